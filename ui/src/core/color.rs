//! Hex parsing and alpha-blended colour derivation.
//!
//! Colour handling is decorative: nothing in here returns an error to the
//! caller. Malformed input degrades to [`DEFAULT_COLOR`] and rendering
//! carries on.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ChartError;

/// Ability colour used when nothing (or garbage) was picked.
pub const DEFAULT_COLOR: &str = "#8080ff";

/// Opacity of filled data regions.
pub const FILL_ALPHA: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parse `#rrggbb` (the leading `#` is optional, case is ignored).
    pub fn parse_hex(raw: &str) -> Option<Self> {
        let digits = raw.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Parse with fallback to [`DEFAULT_COLOR`].
    pub fn parse_or_default(raw: &str) -> Self {
        match Self::parse_hex(raw) {
            Some(rgb) => rgb,
            None => {
                if !raw.trim().is_empty() {
                    tracing::warn!(color = raw, "malformed hex colour, using default");
                }
                default_rgb()
            }
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self, alpha: f64) -> String {
        format!(
            "rgba({},{},{},{})",
            self.r,
            self.g,
            self.b,
            clamp_alpha(alpha)
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s).ok_or_else(|| ChartError::Configuration(format!("invalid colour `{s}`")))
    }
}

fn default_rgb() -> Rgb {
    Rgb {
        r: 0x80,
        g: 0x80,
        b: 0xff,
    }
}

fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        FILL_ALPHA
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

/// `#92dfec` + 0.65 → `rgba(146,223,236,0.65)`.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    Rgb::parse_or_default(hex).to_rgba(alpha)
}

/// Lower-case `#rrggbb`, or the default colour when `raw` does not parse.
pub fn normalize_hex(raw: &str) -> String {
    normalize_hex_or(raw, DEFAULT_COLOR)
}

/// Like [`normalize_hex`], but falls back to `fallback` (itself falling back
/// to [`DEFAULT_COLOR`]) when `raw` does not parse.
pub fn normalize_hex_or(raw: &str, fallback: &str) -> String {
    match Rgb::parse_hex(raw) {
        Some(rgb) => rgb.to_hex(),
        None => {
            if !raw.trim().is_empty() {
                tracing::warn!(color = raw, fallback, "malformed hex colour, using fallback");
            }
            Rgb::parse_hex(fallback).unwrap_or_else(default_rgb).to_hex()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position in `[0, 1]` along the gradient.
    pub offset: f64,
    pub color: String,
}

impl GradientStop {
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

/// Angular gradient around a centre point, starting straight up and running clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicGradient {
    pub start_angle: f64,
    pub stops: Vec<GradientStop>,
}

/// Blend per-axis colours around the circle.
///
/// Produces `N + 1` evenly spaced stops; the last repeats the first so the
/// wraparound at "up" is seamless.
pub fn conic_blend(axis_colors: &[String], alpha: f64) -> ConicGradient {
    let n = axis_colors.len();
    let stops = if n == 0 {
        let fallback = hex_to_rgba(DEFAULT_COLOR, alpha);
        vec![
            GradientStop::new(0.0, fallback.clone()),
            GradientStop::new(1.0, fallback),
        ]
    } else {
        (0..=n)
            .map(|i| GradientStop::new(i as f64 / n as f64, hex_to_rgba(&axis_colors[i % n], alpha)))
            .collect()
    };

    ConicGradient {
        start_angle: -FRAC_PI_2,
        stops,
    }
}

//! One parameterized theme for every cosmetic constant the charts use.
//!
//! Variants differ only in numbers (radii, offsets, gradient stops, opacity);
//! they are expressed as a `ChartTheme` value, optionally loaded from JSON.

use serde::{Deserialize, Serialize};

use super::color::{Rgb, DEFAULT_COLOR, FILL_ALPHA};
use super::error::{ChartError, ChartResult};
use super::layout::{check_offsets, Size};
use super::stats::{Axis, AXIS_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    pub family: String,
    pub size: f64,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub axis_labels: Vec<String>,
    /// Angular nudges (radians) applied to label anchors only.
    pub label_offsets: Vec<f64>,
    pub default_color: String,
    pub fill_alpha: f64,

    pub background_center: String,
    /// Fraction of the radius where the gradient reaches the primary colour.
    pub background_stop: f64,
    pub background_scale: f64,
    pub center_dot_radius: f64,
    pub center_dot_color: String,

    pub spoke: StrokeStyle,
    pub border: StrokeStyle,
    pub data_border_width: f64,
    pub point_radius: f64,
    pub point_border: StrokeStyle,

    pub label_font: FontStyle,
    /// Labels are stroked in the primary colour, then filled with this one.
    pub label_fill: String,
    pub label_outline_width: f64,
    pub label_gap: f64,

    pub value_font: FontStyle,
    pub value_fill: String,
    pub value_outline_width: f64,
    pub value_drop: f64,
    pub value_precision: usize,

    pub chart_padding: f64,
    pub primary_size: Size,
    pub summary_size: Size,
    pub summary_cap: f64,
    pub min_scale: f64,
    pub layout_fallback_ms: u64,

    pub export_size: Size,
    pub export_background: String,
    pub text_color: String,
    pub signature: Option<String>,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            axis_labels: Axis::ALL.iter().map(|a| a.label().to_string()).collect(),
            label_offsets: vec![0.0, -0.04, 0.0, 0.0, 0.08],
            default_color: DEFAULT_COLOR.to_string(),
            fill_alpha: FILL_ALPHA,

            background_center: "#f4f4f4".to_string(),
            background_stop: 0.33,
            background_scale: 1.05,
            center_dot_radius: 4.0,
            center_dot_color: "#ffffff".to_string(),

            spoke: StrokeStyle::new("#6db5c0", 1.5),
            border: StrokeStyle::new("#35727d", 4.0),
            data_border_width: 3.0,
            point_radius: 5.0,
            point_border: StrokeStyle::new("#ffffff", 2.0),

            label_font: FontStyle {
                family: "Candara, 'Segoe UI', sans-serif".to_string(),
                size: 18.0,
                italic: true,
                bold: false,
            },
            label_fill: "#ffffff".to_string(),
            label_outline_width: 4.0,
            label_gap: 15.0,

            value_font: FontStyle {
                family: "Candara, 'Segoe UI', sans-serif".to_string(),
                size: 14.0,
                italic: false,
                bold: true,
            },
            value_fill: "#ffffff".to_string(),
            value_outline_width: 3.0,
            value_drop: 18.0,
            value_precision: 1,

            chart_padding: 70.0,
            primary_size: Size::new(500.0, 500.0),
            summary_size: Size::new(400.0, 400.0),
            summary_cap: 10.0,
            min_scale: 10.0,
            layout_fallback_ms: 60,

            export_size: Size::new(840.0, 480.0),
            export_background: "#10131a".to_string(),
            text_color: "#f5f7fb".to_string(),
            signature: None,
        }
    }
}

impl ChartTheme {
    pub fn from_json(raw: &str) -> ChartResult<Self> {
        let theme: ChartTheme =
            serde_json::from_str(raw).map_err(|err| ChartError::Theme(err.to_string()))?;
        theme.validate()?;
        Ok(theme)
    }

    /// Reject tables that do not line up with the axis list.
    pub fn validate(&self) -> ChartResult<()> {
        if self.axis_labels.len() != AXIS_COUNT {
            return Err(ChartError::Configuration(format!(
                "theme has {} axis labels, expected {AXIS_COUNT}",
                self.axis_labels.len()
            )));
        }
        check_offsets(self.axis_labels.len(), &self.label_offsets)?;
        if !(0.0..=1.0).contains(&self.fill_alpha) {
            return Err(ChartError::Configuration(format!(
                "fill alpha {} outside [0, 1]",
                self.fill_alpha
            )));
        }
        if Rgb::parse_hex(&self.default_color).is_none() {
            return Err(ChartError::Configuration(format!(
                "default colour `{}` is not #rrggbb",
                self.default_color
            )));
        }
        if self.summary_cap <= 0.0 || self.min_scale <= 0.0 {
            return Err(ChartError::Configuration(
                "scale limits must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.axis_labels.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_valid() {
        ChartTheme::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let theme = ChartTheme::from_json(r#"{ "fill_alpha": 0.5, "signature": "Made with statcard" }"#)
            .unwrap();
        assert_eq!(theme.fill_alpha, 0.5);
        assert_eq!(theme.signature.as_deref(), Some("Made with statcard"));
        assert_eq!(theme.axis_labels.len(), AXIS_COUNT);
    }

    #[test]
    fn mismatched_offsets_fail_loudly() {
        let err = ChartTheme::from_json(r#"{ "label_offsets": [0.1, 0.2] }"#).unwrap_err();
        assert!(matches!(err, ChartError::Configuration(_)));
    }

    #[test]
    fn wrong_label_count_fails() {
        let err = ChartTheme::from_json(r#"{ "axis_labels": ["A", "B", "C"] }"#).unwrap_err();
        assert!(matches!(err, ChartError::Configuration(_)));
    }

    #[test]
    fn garbage_json_is_a_theme_error() {
        assert!(matches!(
            ChartTheme::from_json("{"),
            Err(ChartError::Theme(_))
        ));
    }

    #[test]
    fn malformed_default_color_is_rejected() {
        let err = ChartTheme::from_json(r#"{ "default_color": "blue" }"#).unwrap_err();
        assert!(matches!(err, ChartError::Configuration(_)));
    }
}

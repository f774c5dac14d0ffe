//! Character data: the five stat axes, colour selection and free-text metadata.

use serde::{Deserialize, Serialize};

use super::color::{normalize_hex, normalize_hex_or, DEFAULT_COLOR};
use super::error::{ChartError, ChartResult};

pub const AXIS_COUNT: usize = 5;

/// Axis order is fixed; it defines the axis-to-angle mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Power,
    Speed,
    Trick,
    Recovery,
    Defense,
}

impl Axis {
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::Power,
        Axis::Speed,
        Axis::Trick,
        Axis::Recovery,
        Axis::Defense,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Power => "Power",
            Axis::Speed => "Speed",
            Axis::Trick => "Trick",
            Axis::Recovery => "Recovery",
            Axis::Defense => "Defense",
        }
    }

    /// Stable identifier for form fields and CSS hooks.
    pub fn slug(self) -> &'static str {
        match self {
            Axis::Power => "power",
            Axis::Speed => "speed",
            Axis::Trick => "trick",
            Axis::Recovery => "recovery",
            Axis::Defense => "defense",
        }
    }
}

/// Parse a raw numeric field. Empty, malformed and non-finite input reads as 0.
pub fn parse_stat(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatVector([f64; AXIS_COUNT]);

impl StatVector {
    pub const fn new(values: [f64; AXIS_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        self.0[axis.index()] = value;
    }

    pub fn values(&self) -> &[f64; AXIS_COUNT] {
        &self.0
    }

    /// Copy with every value clamped into `[0, cap]`.
    pub fn capped(&self, cap: f64) -> [f64; AXIS_COUNT] {
        self.0.map(|value| value.max(0.0).min(cap))
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Default for StatVector {
    fn default() -> Self {
        Self([5.0; AXIS_COUNT])
    }
}

/// Ability colour plus optional per-axis overrides.
///
/// Overrides are either absent or one per axis, in axis order. They survive
/// toggling multi-colour mode off and on again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSelection {
    primary: String,
    overrides: Vec<String>,
    multi_color: bool,
    /// Substituted for blank or malformed picks.
    #[serde(default = "default_fallback")]
    fallback: String,
}

fn default_fallback() -> String {
    DEFAULT_COLOR.to_string()
}

impl ColorSelection {
    pub fn new(primary: &str) -> Self {
        Self::with_fallback(primary, DEFAULT_COLOR)
    }

    /// Blank or malformed colours, now and on later edits, become `fallback`.
    pub fn with_fallback(primary: &str, fallback: &str) -> Self {
        let fallback = normalize_hex(fallback);
        Self {
            primary: normalize_hex_or(primary, &fallback),
            overrides: Vec::new(),
            multi_color: false,
            fallback,
        }
    }

    pub fn with_overrides(primary: &str, overrides: Vec<String>) -> ChartResult<Self> {
        if !overrides.is_empty() && overrides.len() != AXIS_COUNT {
            return Err(ChartError::Configuration(format!(
                "expected {AXIS_COUNT} per-axis colours, got {}",
                overrides.len()
            )));
        }
        Ok(Self {
            primary: normalize_hex(primary),
            overrides: overrides.iter().map(|c| normalize_hex(c)).collect(),
            multi_color: false,
            fallback: default_fallback(),
        })
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn overrides(&self) -> &[String] {
        &self.overrides
    }

    pub fn multi_color(&self) -> bool {
        self.multi_color
    }

    /// Colour an axis currently renders in (override if present, else the primary).
    pub fn axis_color(&self, axis: Axis) -> &str {
        self.overrides
            .get(axis.index())
            .map(String::as_str)
            .unwrap_or(&self.primary)
    }

    pub fn axis_colors(&self) -> Vec<String> {
        Axis::ALL
            .iter()
            .map(|axis| self.axis_color(*axis).to_string())
            .collect()
    }

    /// Whether per-axis colours should drive the fill right now.
    pub fn blends(&self) -> bool {
        self.multi_color && self.overrides.len() == AXIS_COUNT
    }

    pub(crate) fn set_primary(&mut self, hex: &str) {
        self.primary = normalize_hex_or(hex, &self.fallback);
    }

    pub(crate) fn set_multi_color(&mut self, enabled: bool) {
        self.multi_color = enabled;
    }

    /// Seed every override from the primary colour if none exist yet.
    pub(crate) fn ensure_overrides(&mut self) {
        if self.overrides.is_empty() {
            self.overrides = vec![self.primary.clone(); AXIS_COUNT];
        }
    }

    pub(crate) fn set_override(&mut self, axis: Axis, hex: &str) {
        self.ensure_overrides();
        self.overrides[axis.index()] = normalize_hex_or(hex, &self.fallback);
    }

    pub(crate) fn overrides_all_equal(&self, color: &str) -> bool {
        self.overrides.iter().all(|c| c == color)
    }

    pub(crate) fn fill_overrides(&mut self, hex: &str) {
        let hex = normalize_hex_or(hex, &self.fallback);
        for slot in self.overrides.iter_mut() {
            slot.clone_from(&hex);
        }
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }
}

/// Free-text character details and the portrait reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterMeta {
    pub name: String,
    pub ability: String,
    pub level: String,
    /// `data:` URL of the uploaded portrait, if any.
    pub portrait: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("7", 7.0)]
    #[case(" 3.5 ", 3.5)]
    #[case("", 0.0)]
    #[case("abc", 0.0)]
    #[case("NaN", 0.0)]
    #[case("inf", 0.0)]
    #[case("-2", -2.0)]
    fn parse_stat_cases(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_stat(raw), expected);
    }

    #[test]
    fn capped_clamps_only_out_of_range_values() {
        let stats = StatVector::new([12.0, 3.0, 7.0, 0.0, 10.0]);
        assert_eq!(stats.capped(10.0), [10.0, 3.0, 7.0, 0.0, 10.0]);
    }

    #[test]
    fn axis_order_is_fixed() {
        let slugs: Vec<_> = Axis::ALL.iter().map(|a| a.slug()).collect();
        assert_eq!(slugs, ["power", "speed", "trick", "recovery", "defense"]);
        assert_eq!(Axis::Defense.index(), 4);
    }

    #[test]
    fn override_table_length_is_checked() {
        let err = ColorSelection::with_overrides("#ffffff", vec!["#000000".into(); 3]);
        assert!(matches!(err, Err(ChartError::Configuration(_))));
        assert!(ColorSelection::with_overrides("#ffffff", Vec::new()).is_ok());
    }

    #[test]
    fn axis_color_falls_back_to_primary() {
        let mut colors = ColorSelection::new("#123456");
        assert_eq!(colors.axis_color(Axis::Trick), "#123456");
        colors.set_override(Axis::Trick, "#00FF00");
        assert_eq!(colors.axis_color(Axis::Trick), "#00ff00");
        assert_eq!(colors.axis_color(Axis::Power), "#123456");
    }

    #[test]
    fn fallback_replaces_blank_and_malformed_picks() {
        let mut colors = ColorSelection::with_fallback("", "#00FF00");
        assert_eq!(colors.primary(), "#00ff00");
        colors.set_primary("#abc");
        assert_eq!(colors.primary(), "#00ff00");
        colors.set_primary("#112233");
        assert_eq!(colors.primary(), "#112233");
    }
}

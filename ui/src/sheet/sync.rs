//! Single source of truth for what the sheet currently displays.
//!
//! Every user event lands here, mutates the form state and pushes the result
//! to the primary chart, the summary chart (only once it exists) and the
//! plain-text summary fields. Handlers run to completion one at a time; the
//! component layer feeds them from a single event queue.

use crate::chart::{ChartConfig, ChartView};
use crate::core::error::ChartResult;
use crate::core::format::{format_level, or_placeholder};
use crate::core::layout::Size;
use crate::core::stats::{parse_stat, Axis, CharacterMeta, ColorSelection, StatVector};
use crate::core::theme::ChartTheme;
use crate::portrait;

pub const NAME_PLACEHOLDER: &str = "Unknown Character";
pub const ABILITY_PLACEHOLDER: &str = "Unknown Ability";

/// Values read from the bound inputs at startup. A blank colour picks up the
/// theme's default colour.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialInputs {
    pub stats: StatVector,
    pub primary_color: String,
    pub meta: CharacterMeta,
}

impl Default for InitialInputs {
    fn default() -> Self {
        Self {
            stats: StatVector::default(),
            primary_color: String::new(),
            meta: CharacterMeta::default(),
        }
    }
}

/// Plain-text fields mirrored from [`CharacterMeta`], placeholders applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryText {
    pub name: String,
    pub ability: String,
    pub level: String,
}

impl SummaryText {
    pub fn from_meta(meta: &CharacterMeta) -> Self {
        Self {
            name: or_placeholder(&meta.name, NAME_PLACEHOLDER).to_string(),
            ability: or_placeholder(&meta.ability, ABILITY_PLACEHOLDER).to_string(),
            level: format_level(&meta.level),
        }
    }
}

/// Overlay visibility plus the text copied into it on the last view request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    pub visible: bool,
    pub text: SummaryText,
    pub portrait: String,
}

/// Issued by [`SyncController::on_view_request`]; redeemed once the overlay
/// layout has been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutTicket(u64);

impl LayoutTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct SyncController {
    theme: ChartTheme,
    stats: StatVector,
    colors: ColorSelection,
    meta: CharacterMeta,
    primary: ChartView,
    summary: Option<ChartView>,
    summary_text: SummaryText,
    overlay: OverlayState,
    next_ticket: u64,
    summary_creations: u32,
}

impl SyncController {
    pub fn new(theme: ChartTheme, initial: InitialInputs) -> ChartResult<Self> {
        let colors = ColorSelection::with_fallback(&initial.primary_color, &theme.default_color);
        let primary = ChartView::create(
            "primary",
            theme.primary_size,
            ChartConfig::primary(),
            theme.clone(),
            &initial.stats,
            &colors,
        )?;
        let summary_text = SummaryText::from_meta(&initial.meta);
        Ok(Self {
            theme,
            stats: initial.stats,
            colors,
            meta: initial.meta,
            primary,
            summary: None,
            summary_text,
            overlay: OverlayState::default(),
            next_ticket: 0,
            summary_creations: 0,
        })
    }

    pub fn on_stat_input(&mut self, axis: Axis, raw: &str) -> ChartResult<()> {
        self.stats.set(axis, parse_stat(raw));
        self.refresh()
    }

    /// New ability colour. Per-axis colours that were never customized
    /// (all still equal to the old primary) follow along.
    pub fn on_color_input(&mut self, raw: &str) -> ChartResult<()> {
        let previous = self.colors.primary().to_string();
        self.colors.set_primary(raw);
        if self.colors.overrides_all_equal(&previous) {
            let next = self.colors.primary().to_string();
            self.colors.fill_overrides(&next);
        }
        self.refresh()
    }

    pub fn on_axis_color_input(&mut self, axis: Axis, raw: &str) -> ChartResult<()> {
        self.colors.set_override(axis, raw);
        self.refresh()
    }

    /// Flip between flat fill and the per-axis blend. Turning it on with no
    /// prior picks seeds every axis with the primary colour; turning it off
    /// keeps the picks for next time.
    pub fn on_multi_color_toggle(&mut self) -> ChartResult<()> {
        let enabled = !self.colors.multi_color();
        if enabled {
            self.colors.ensure_overrides();
        }
        self.colors.set_multi_color(enabled);
        self.refresh()
    }

    pub fn on_clear_axis_colors(&mut self) -> ChartResult<()> {
        self.colors.clear_overrides();
        if self.colors.multi_color() {
            self.colors.ensure_overrides();
        }
        self.refresh()
    }

    pub fn on_name_input(&mut self, raw: &str) -> ChartResult<()> {
        self.meta.name = raw.to_string();
        self.refresh()
    }

    pub fn on_ability_input(&mut self, raw: &str) -> ChartResult<()> {
        self.meta.ability = raw.to_string();
        self.refresh()
    }

    pub fn on_level_input(&mut self, raw: &str) -> ChartResult<()> {
        self.meta.level = raw.to_string();
        self.refresh()
    }

    pub fn on_portrait(&mut self, data_url: Option<String>) -> ChartResult<()> {
        self.meta.portrait = data_url;
        self.refresh()
    }

    /// Push the current state everywhere. The summary chart is only updated
    /// if it already exists; a plain edit never creates it.
    pub fn refresh(&mut self) -> ChartResult<()> {
        self.primary.update(&self.stats, &self.colors)?;
        if let Some(summary) = self.summary.as_mut() {
            summary.update(&self.stats, &self.colors)?;
        }
        self.summary_text = SummaryText::from_meta(&self.meta);
        Ok(())
    }

    /// Show the overlay and copy the character details into it. Chart sizing
    /// waits for [`Self::on_layout_committed`] with the returned ticket.
    pub fn on_view_request(&mut self) -> LayoutTicket {
        self.overlay.visible = true;
        self.overlay.text = SummaryText::from_meta(&self.meta);
        self.overlay.portrait = self.portrait_src();
        self.next_ticket += 1;
        LayoutTicket(self.next_ticket)
    }

    /// Deferred half of a view request: create the summary chart on first
    /// use, resize it afterwards, then refresh. Safe to run after the overlay
    /// was closed again.
    pub fn on_layout_committed(&mut self, ticket: LayoutTicket, size: Size) -> ChartResult<()> {
        let size = if size.is_empty() {
            self.theme.summary_size
        } else {
            size
        };
        match self.summary.as_mut() {
            Some(summary) => summary.resize(size)?,
            None => {
                let view = ChartView::create(
                    "summary",
                    size,
                    ChartConfig::summary(self.theme.summary_cap),
                    self.theme.clone(),
                    &self.stats,
                    &self.colors,
                )?;
                self.summary = Some(view);
                self.summary_creations += 1;
                tracing::info!(ticket = ticket.id(), "summary chart created");
            }
        }
        self.refresh()
    }

    pub fn on_close(&mut self) {
        self.overlay.visible = false;
    }

    /// Release both charts.
    pub fn teardown(self) {
        self.primary.destroy();
        if let Some(summary) = self.summary {
            summary.destroy();
        }
    }

    pub fn stats(&self) -> &StatVector {
        &self.stats
    }

    pub fn colors(&self) -> &ColorSelection {
        &self.colors
    }

    pub fn meta(&self) -> &CharacterMeta {
        &self.meta
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    pub fn primary(&self) -> &ChartView {
        &self.primary
    }

    pub fn summary(&self) -> Option<&ChartView> {
        self.summary.as_ref()
    }

    pub fn summary_text(&self) -> &SummaryText {
        &self.summary_text
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Colour each per-axis picker should report.
    pub fn axis_picker(&self, axis: Axis) -> &str {
        self.colors.axis_color(axis)
    }

    pub fn summary_creations(&self) -> u32 {
        self.summary_creations
    }

    /// Uploaded portrait, or a placeholder carrying the character name.
    pub fn portrait_src(&self) -> String {
        match &self.meta.portrait {
            Some(url) => url.clone(),
            None => portrait::placeholder_data_url(&self.meta.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Surface;

    fn controller() -> SyncController {
        SyncController::new(ChartTheme::default(), InitialInputs::default()).unwrap()
    }

    #[test]
    fn stat_input_updates_primary_only() {
        let mut sync = controller();
        sync.on_stat_input(Axis::Power, "12").unwrap();
        assert_eq!(sync.primary().displayed_values()[0], 12.0);
        assert!(sync.summary().is_none());
    }

    #[test]
    fn garbage_stat_reads_as_zero() {
        let mut sync = controller();
        sync.on_stat_input(Axis::Speed, "fast").unwrap();
        assert_eq!(sync.stats().get(Axis::Speed), 0.0);
    }

    #[test]
    fn summary_text_tracks_meta_with_placeholders() {
        let mut sync = controller();
        assert_eq!(sync.summary_text().name, NAME_PLACEHOLDER);
        sync.on_name_input("Ada").unwrap();
        sync.on_level_input("7").unwrap();
        assert_eq!(sync.summary_text().name, "Ada");
        assert_eq!(sync.summary_text().level, "7.0");
        assert_eq!(sync.summary_text().ability, ABILITY_PLACEHOLDER);
    }

    #[test]
    fn customized_axis_colors_do_not_follow_primary() {
        let mut sync = controller();
        sync.on_multi_color_toggle().unwrap();
        sync.on_axis_color_input(Axis::Power, "#123456").unwrap();
        sync.on_color_input("#ff0000").unwrap();
        assert_eq!(sync.axis_picker(Axis::Power), "#123456");
        assert_eq!(sync.axis_picker(Axis::Speed), crate::core::color::DEFAULT_COLOR);
    }

    #[test]
    fn clearing_axis_colors_resets_to_primary() {
        let mut sync = controller();
        sync.on_axis_color_input(Axis::Trick, "#00ff00").unwrap();
        sync.on_clear_axis_colors().unwrap();
        assert_eq!(sync.axis_picker(Axis::Trick), sync.colors().primary());
    }

    #[test]
    fn closing_before_layout_still_creates_safely() {
        let mut sync = controller();
        let ticket = sync.on_view_request();
        sync.on_close();
        sync.on_layout_committed(ticket, Size::new(400.0, 400.0)).unwrap();
        assert!(!sync.overlay().visible);
        assert_eq!(sync.summary_creations(), 1);
    }

    #[test]
    fn empty_measurement_uses_theme_size() {
        let mut sync = controller();
        let ticket = sync.on_view_request();
        sync.on_layout_committed(ticket, Size::default()).unwrap();
        let summary = sync.summary().unwrap();
        assert_eq!(summary.scene().size(), ChartTheme::default().summary_size);
    }

    #[test]
    fn teardown_releases_both_views() {
        let mut sync = controller();
        let ticket = sync.on_view_request();
        sync.on_layout_committed(ticket, Size::new(400.0, 400.0)).unwrap();
        assert!(sync.summary().is_some());
        sync.teardown();
    }

    #[test]
    fn theme_default_color_seeds_and_backs_up_primary() {
        let theme = ChartTheme::from_json(r##"{ "default_color": "#00FF00" }"##).unwrap();
        let mut sync = SyncController::new(theme, InitialInputs::default()).unwrap();
        assert_eq!(sync.colors().primary(), "#00ff00");

        sync.on_color_input("#ff0000").unwrap();
        sync.on_color_input("garbage").unwrap();
        assert_eq!(sync.colors().primary(), "#00ff00");

        sync.on_axis_color_input(Axis::Trick, "nope").unwrap();
        assert_eq!(sync.axis_picker(Axis::Trick), "#00ff00");
    }
}

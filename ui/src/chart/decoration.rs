//! Non-data chart chrome: gradient background, border ring, spokes, outlined
//! axis labels and value annotations.
//!
//! Z-order per frame is fixed: background, (data polygon), spokes and border,
//! labels, values.

use crate::core::color::GradientStop;
use crate::core::error::ChartResult;
use crate::core::format::format_value;
use crate::core::layout::{ring, Point};
use crate::core::theme::{ChartTheme, StrokeStyle};

use super::hooks::{Frame, RenderHooks};
use super::surface::{Paint, RadialGradient, Surface};

#[derive(Debug, Clone)]
pub struct DecorationRenderer {
    theme: ChartTheme,
}

impl DecorationRenderer {
    pub fn new(theme: ChartTheme) -> Self {
        Self { theme }
    }

    /// Radial fill: neutral centre, primary colour from `background_stop` outward.
    pub fn draw_background(&self, surface: &mut dyn Surface, center: Point, radius: f64, primary: &str) {
        let outer = radius * self.theme.background_scale;
        let gradient = RadialGradient {
            center,
            radius: outer,
            stops: vec![
                GradientStop::new(0.0, self.theme.background_center.clone()),
                GradientStop::new(self.theme.background_stop, primary),
                GradientStop::new(1.0, primary),
            ],
        };
        surface.fill_circle(center, outer, Paint::Radial(gradient), None);
    }

    /// Thin spokes from the centre to every tip, then the thick outer ring
    /// on top, then the centre dot.
    pub fn draw_polygon_outline(
        &self,
        surface: &mut dyn Surface,
        center: Point,
        radius: f64,
        axis_count: usize,
    ) -> ChartResult<()> {
        let tips = ring(axis_count, center, radius, &[])?;
        for tip in &tips {
            surface.stroke_line(center, *tip, &self.theme.spoke);
        }
        surface.draw_polygon(&tips, None, Some(&self.theme.border));
        if self.theme.center_dot_radius > 0.0 {
            surface.fill_circle(
                center,
                self.theme.center_dot_radius,
                Paint::Solid(self.theme.center_dot_color.clone()),
                None,
            );
        }
        Ok(())
    }

    /// Two passes per label: outline in the primary colour, then the fill on top.
    pub fn draw_axis_labels(
        &self,
        surface: &mut dyn Surface,
        labels: &[String],
        anchors: &[Point],
        primary: &str,
    ) {
        let outline = StrokeStyle::new(primary, self.theme.label_outline_width);
        for (label, at) in labels.iter().zip(anchors) {
            surface.stroke_text(label, *at, &self.theme.label_font, &outline);
            surface.fill_text(label, *at, &self.theme.label_font, &self.theme.label_fill);
        }
    }

    pub fn draw_value_annotations(
        &self,
        surface: &mut dyn Surface,
        values: &[f64],
        anchors: &[Point],
        primary: &str,
    ) {
        let outline = StrokeStyle::new(primary, self.theme.value_outline_width);
        for (value, at) in values.iter().zip(anchors) {
            let text = format_value(*value, self.theme.value_precision);
            surface.stroke_text(&text, *at, &self.theme.value_font, &outline);
            surface.fill_text(&text, *at, &self.theme.value_font, &self.theme.value_fill);
        }
    }

    /// Label anchors sit just outside the background circle.
    pub fn label_anchors(&self, center: Point, radius: f64, axis_count: usize) -> ChartResult<Vec<Point>> {
        let label_radius = radius * self.theme.background_scale + self.theme.label_gap;
        ring(axis_count, center, label_radius, &self.theme.label_offsets)
    }

    /// Value anchors: below each label so the two never overlap.
    pub fn value_anchors(&self, center: Point, radius: f64, axis_count: usize) -> ChartResult<Vec<Point>> {
        Ok(self
            .label_anchors(center, radius, axis_count)?
            .into_iter()
            .map(|p| p.offset(0.0, self.theme.value_drop))
            .collect())
    }
}

impl RenderHooks for DecorationRenderer {
    fn before_data(&self, surface: &mut dyn Surface, frame: &Frame<'_>) -> ChartResult<()> {
        if frame.config.decorated {
            self.draw_background(surface, frame.center, frame.radius, frame.colors.primary());
        }
        Ok(())
    }

    fn after_data(&self, surface: &mut dyn Surface, frame: &Frame<'_>) -> ChartResult<()> {
        if frame.config.decorated {
            self.draw_polygon_outline(surface, frame.center, frame.radius, frame.labels.len())?;
        }
        Ok(())
    }

    fn after_all(&self, surface: &mut dyn Surface, frame: &Frame<'_>) -> ChartResult<()> {
        let count = frame.labels.len();
        if frame.config.show_labels {
            let anchors = self.label_anchors(frame.center, frame.radius, count)?;
            self.draw_axis_labels(surface, frame.labels, &anchors, frame.colors.primary());
        }
        if frame.config.show_values {
            let anchors = self.value_anchors(frame.center, frame.radius, count)?;
            self.draw_value_annotations(surface, frame.values, &anchors, frame.colors.primary());
        }
        Ok(())
    }
}

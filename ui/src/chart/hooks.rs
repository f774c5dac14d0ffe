//! Render-phase contract between a chart view and its decorations.

use crate::core::error::ChartResult;
use crate::core::layout::Point;
use crate::core::stats::ColorSelection;

use super::surface::Surface;
use super::view::ChartConfig;

/// Everything a decoration needs to know about the frame being drawn.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub center: Point,
    /// Radius of the outermost polygon ring.
    pub radius: f64,
    pub labels: &'a [String],
    /// Values as displayed (already capped for capped views).
    pub values: &'a [f64],
    pub colors: &'a ColorSelection,
    pub config: &'a ChartConfig,
}

/// Callbacks a chart invokes around its data polygon, in this order:
/// `before_data`, the polygon itself, `after_data`, `after_all`.
pub trait RenderHooks {
    fn before_data(&self, _surface: &mut dyn Surface, _frame: &Frame<'_>) -> ChartResult<()> {
        Ok(())
    }

    fn after_data(&self, _surface: &mut dyn Surface, _frame: &Frame<'_>) -> ChartResult<()> {
        Ok(())
    }

    fn after_all(&self, _surface: &mut dyn Surface, _frame: &Frame<'_>) -> ChartResult<()> {
        Ok(())
    }
}

//! Radar chart rendering: drawing surfaces, decorations and chart views.

pub mod decoration;
pub mod hooks;
pub mod surface;
pub mod view;

pub use decoration::DecorationRenderer;
pub use hooks::{Frame, RenderHooks};
pub use surface::{DrawCommand, Paint, Scene, Surface};
pub use view::{ChartConfig, ChartView};

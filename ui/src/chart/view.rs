//! One radar chart: dataset, style and lifecycle (create, update, resize, destroy).

use crate::core::color::{conic_blend, hex_to_rgba};
use crate::core::error::{ChartError, ChartResult};
use crate::core::layout::{value_ring, Point, Size};
use crate::core::stats::{ColorSelection, StatVector, AXIS_COUNT};
use crate::core::theme::{ChartTheme, StrokeStyle};

use super::decoration::DecorationRenderer;
use super::hooks::{Frame, RenderHooks};
use super::surface::{Paint, Scene, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub show_points: bool,
    /// Background, spokes and border ring.
    pub decorated: bool,
    /// Fixed scale maximum; displayed values are clamped to `[0, cap]`.
    pub cap_max: Option<f64>,
    /// Explicit centre; `None` follows the surface centre across resizes.
    pub center: Option<Point>,
    pub show_labels: bool,
    pub show_values: bool,
}

impl ChartConfig {
    /// The always-visible editable chart.
    pub fn primary() -> Self {
        Self {
            show_points: true,
            decorated: false,
            cap_max: None,
            center: None,
            show_labels: true,
            show_values: false,
        }
    }

    /// The read-only overlay chart.
    pub fn summary(cap: f64) -> Self {
        Self {
            show_points: false,
            decorated: true,
            cap_max: Some(cap),
            center: None,
            show_labels: true,
            show_values: true,
        }
    }
}

/// What the data polygon currently shows. Compared on update to skip
/// redundant redraws.
#[derive(Debug, Clone, PartialEq)]
struct Dataset {
    values: [f64; AXIS_COUNT],
    colors: ColorSelection,
    scale_max: f64,
}

pub struct ChartView {
    config: ChartConfig,
    theme: ChartTheme,
    scene: Scene,
    center: Point,
    radius: f64,
    dataset: Dataset,
    hooks: Vec<Box<dyn RenderHooks>>,
    revision: u64,
    resizes: u32,
}

impl ChartView {
    /// Build a chart on a fresh scene and draw its initial frame.
    pub fn create(
        id: &str,
        size: Size,
        config: ChartConfig,
        theme: ChartTheme,
        stats: &StatVector,
        colors: &ColorSelection,
    ) -> ChartResult<Self> {
        theme.validate()?;
        if let Some(cap) = config.cap_max {
            if cap.is_nan() || cap <= 0.0 {
                return Err(ChartError::Configuration(format!(
                    "scale cap must be positive, got {cap}"
                )));
            }
        }

        let decorations = DecorationRenderer::new(theme.clone());
        let dataset = Dataset {
            values: [0.0; AXIS_COUNT],
            colors: colors.clone(),
            scale_max: theme.min_scale,
        };
        let mut view = Self {
            config,
            scene: Scene::new(id, size),
            center: Point::default(),
            radius: 0.0,
            dataset,
            hooks: vec![Box::new(decorations)],
            theme,
            revision: 0,
            resizes: 0,
        };
        view.layout(size);
        view.dataset = view.dataset_for(stats, colors);
        view.redraw()?;
        tracing::debug!(chart = id, width = size.width, height = size.height, "chart created");
        Ok(view)
    }

    /// Register an extra render-phase plugin, drawn after the built-in decorations.
    pub fn register(&mut self, hooks: Box<dyn RenderHooks>) -> ChartResult<()> {
        self.hooks.push(hooks);
        self.redraw()
    }

    /// Replace the displayed data. Returns whether a redraw happened;
    /// identical inputs leave the scene untouched.
    pub fn update(&mut self, stats: &StatVector, colors: &ColorSelection) -> ChartResult<bool> {
        let next = self.dataset_for(stats, colors);
        if next == self.dataset {
            return Ok(false);
        }
        self.dataset = next;
        self.redraw()?;
        Ok(true)
    }

    /// Re-fit the geometry to new surface dimensions.
    pub fn resize(&mut self, size: Size) -> ChartResult<()> {
        self.resizes = self.resizes.saturating_add(1);
        self.layout(size);
        tracing::debug!(
            chart = self.scene.id(),
            width = size.width,
            height = size.height,
            "chart resized"
        );
        self.redraw()
    }

    pub fn destroy(self) {
        tracing::debug!(chart = self.scene.id(), "chart destroyed");
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn svg(&self) -> String {
        self.scene.to_svg()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn displayed_values(&self) -> &[f64; AXIS_COUNT] {
        &self.dataset.values
    }

    pub fn scale_max(&self) -> f64 {
        self.dataset.scale_max
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of frames drawn so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn resize_count(&self) -> u32 {
        self.resizes
    }

    fn layout(&mut self, size: Size) {
        let size = if size.is_empty() {
            tracing::warn!(chart = self.scene.id(), "empty surface size, keeping previous");
            self.scene.size()
        } else {
            size
        };
        self.scene.set_size(size);
        self.center = self.config.center.unwrap_or_else(|| size.center());
        let half = size.width.min(size.height) / 2.0;
        self.radius = (half - self.theme.chart_padding).max(half * 0.25);
    }

    fn dataset_for(&self, stats: &StatVector, colors: &ColorSelection) -> Dataset {
        let (values, scale_max) = match self.config.cap_max {
            Some(cap) => (stats.capped(cap), cap),
            None => {
                let peak = stats.max();
                let scale = if peak > self.theme.min_scale {
                    peak.ceil()
                } else {
                    self.theme.min_scale
                };
                (*stats.values(), scale)
            }
        };
        Dataset {
            values,
            colors: colors.clone(),
            scale_max,
        }
    }

    fn data_fill(&self) -> Paint {
        let colors = &self.dataset.colors;
        if colors.blends() {
            Paint::Conic {
                center: self.center,
                gradient: conic_blend(colors.overrides(), self.theme.fill_alpha),
            }
        } else {
            Paint::Solid(hex_to_rgba(colors.primary(), self.theme.fill_alpha))
        }
    }

    fn redraw(&mut self) -> ChartResult<()> {
        let fill = self.data_fill();
        let tips = value_ring(
            &self.dataset.values,
            self.center,
            self.radius,
            self.dataset.scale_max,
        )?;
        let primary = self.dataset.colors.primary().to_string();
        let border = StrokeStyle::new(primary.clone(), self.theme.data_border_width);

        let frame = Frame {
            center: self.center,
            radius: self.radius,
            labels: &self.theme.axis_labels,
            values: &self.dataset.values,
            colors: &self.dataset.colors,
            config: &self.config,
        };
        let scene = &mut self.scene;
        scene.clear();

        for hook in &self.hooks {
            hook.before_data(&mut *scene, &frame)?;
        }

        scene.draw_polygon(&tips, Some(fill), Some(&border));
        if self.config.show_points {
            for tip in &tips {
                scene.fill_circle(
                    *tip,
                    self.theme.point_radius,
                    Paint::Solid(primary.clone()),
                    Some(&self.theme.point_border),
                );
            }
        }

        for hook in &self.hooks {
            hook.after_data(&mut *scene, &frame)?;
        }
        for hook in &self.hooks {
            hook.after_all(&mut *scene, &frame)?;
        }

        self.revision += 1;
        Ok(())
    }
}

impl std::fmt::Debug for ChartView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartView")
            .field("id", &self.scene.id())
            .field("config", &self.config)
            .field("values", &self.dataset.values)
            .field("revision", &self.revision)
            .finish()
    }
}

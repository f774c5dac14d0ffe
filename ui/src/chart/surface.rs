//! Drawing surfaces.
//!
//! [`Surface`] is the small set of primitives chart rendering needs. [`Scene`]
//! records them as a display list and serializes the list to SVG, which the
//! views embed directly and the exporter rasterizes.

use std::fmt::Write;

use crate::core::color::{ConicGradient, GradientStop};
use crate::core::layout::{project, Point, Size};
use crate::core::theme::{FontStyle, StrokeStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub radius: f64,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(String),
    Radial(RadialGradient),
    /// Angular blend around `center`.
    Conic { center: Point, gradient: ConicGradient },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f64,
        fill: Paint,
        stroke: Option<StrokeStyle>,
    },
    Polygon {
        points: Vec<Point>,
        fill: Option<Paint>,
        stroke: Option<StrokeStyle>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    StrokeText {
        text: String,
        at: Point,
        font: FontStyle,
        stroke: StrokeStyle,
    },
    FillText {
        text: String,
        at: Point,
        font: FontStyle,
        color: String,
    },
}

pub trait Surface {
    fn size(&self) -> Size;
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Point, radius: f64, fill: Paint, stroke: Option<&StrokeStyle>);
    fn draw_polygon(&mut self, points: &[Point], fill: Option<Paint>, stroke: Option<&StrokeStyle>);
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle);
    /// Text is centred on `at`, horizontally and vertically.
    fn stroke_text(&mut self, text: &str, at: Point, font: &FontStyle, stroke: &StrokeStyle);
    fn fill_text(&mut self, text: &str, at: Point, font: &FontStyle, color: &str);
}

/// Display list plus the id prefix used for its SVG gradient definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    id: String,
    size: Size,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(id: impl Into<String>, size: Size) -> Self {
        Self {
            id: id.into(),
            size,
            commands: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Standalone `<svg>` document sized to the scene.
    pub fn to_svg(&self) -> String {
        let Size { width, height } = self.size;
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>",
            w = num(width),
            h = num(height),
        );
        out.push_str(&self.to_svg_fragment());
        out.push_str("</svg>");
        out
    }

    /// `<defs>` followed by the drawing, for embedding inside a larger SVG.
    pub fn to_svg_fragment(&self) -> String {
        let mut defs = String::new();
        let mut body = String::new();
        for (index, command) in self.commands.iter().enumerate() {
            self.write_command(index, command, &mut defs, &mut body);
        }
        if defs.is_empty() {
            body
        } else {
            format!("<defs>{defs}</defs>{body}")
        }
    }

    fn write_command(&self, index: usize, command: &DrawCommand, defs: &mut String, body: &mut String) {
        match command {
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let fill = self.paint_ref(index, 0, fill, defs);
                let _ = write!(
                    body,
                    "<circle cx='{}' cy='{}' r='{}' fill='{}'{}/>",
                    num(center.x),
                    num(center.y),
                    num(*radius),
                    fill,
                    stroke_attrs(stroke.as_ref())
                );
            }
            DrawCommand::Polygon {
                points,
                fill,
                stroke,
            } => {
                if let Some(Paint::Conic { center, gradient }) = fill {
                    self.write_conic_wedges(index, points, *center, gradient, defs, body);
                    if let Some(stroke) = stroke {
                        let _ = write!(
                            body,
                            "<polygon points='{}' fill='none'{}/>",
                            point_list(points),
                            stroke_attrs(Some(stroke))
                        );
                    }
                    return;
                }
                let fill = match fill {
                    Some(paint) => self.paint_ref(index, 0, paint, defs),
                    None => "none".to_string(),
                };
                let _ = write!(
                    body,
                    "<polygon points='{}' fill='{}'{}/>",
                    point_list(points),
                    fill,
                    stroke_attrs(stroke.as_ref())
                );
            }
            DrawCommand::Line { from, to, stroke } => {
                let _ = write!(
                    body,
                    "<line x1='{}' y1='{}' x2='{}' y2='{}'{}/>",
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y),
                    stroke_attrs(Some(stroke))
                );
            }
            DrawCommand::StrokeText {
                text,
                at,
                font,
                stroke,
            } => {
                let _ = write!(
                    body,
                    "<text x='{}' y='{}'{} fill='none' stroke='{}' stroke-width='{}' stroke-linejoin='round'>{}</text>",
                    num(at.x),
                    num(at.y),
                    font_attrs(font),
                    escape_xml(&stroke.color),
                    num(stroke.width),
                    escape_xml(text)
                );
            }
            DrawCommand::FillText {
                text,
                at,
                font,
                color,
            } => {
                let _ = write!(
                    body,
                    "<text x='{}' y='{}'{} fill='{}'>{}</text>",
                    num(at.x),
                    num(at.y),
                    font_attrs(font),
                    escape_xml(color),
                    escape_xml(text)
                );
            }
        }
    }

    fn paint_ref(&self, index: usize, part: usize, paint: &Paint, defs: &mut String) -> String {
        match paint {
            Paint::Solid(color) => escape_xml(color),
            Paint::Radial(gradient) => {
                let id = format!("{}-g{index}-{part}", self.id);
                let _ = write!(
                    defs,
                    "<radialGradient id='{id}' gradientUnits='userSpaceOnUse' cx='{}' cy='{}' r='{}'>{}</radialGradient>",
                    num(gradient.center.x),
                    num(gradient.center.y),
                    num(gradient.radius),
                    stop_list(&gradient.stops)
                );
                format!("url(#{id})")
            }
            Paint::Conic { gradient, .. } => gradient
                .stops
                .first()
                .map(|stop| escape_xml(&stop.color))
                .unwrap_or_else(|| "none".to_string()),
        }
    }

    /// SVG has no conic gradients: fill one wedge per segment, each with a
    /// linear gradient between its two bounding stops.
    fn write_conic_wedges(
        &self,
        index: usize,
        points: &[Point],
        center: Point,
        gradient: &ConicGradient,
        defs: &mut String,
        body: &mut String,
    ) {
        let n = points.len();
        let segments = gradient.stops.len().saturating_sub(1);
        if n == 0 || segments == 0 {
            return;
        }
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            let segment = i * segments / n;
            let from = &gradient.stops[segment];
            let to = &gradient.stops[(segment + 1).min(segments)];
            let (start, end) = wedge_axis(center, a, b);
            let id = format!("{}-g{index}-{i}", self.id);
            let _ = write!(
                defs,
                "<linearGradient id='{id}' gradientUnits='userSpaceOnUse' x1='{}' y1='{}' x2='{}' y2='{}'><stop offset='0' stop-color='{}'/><stop offset='1' stop-color='{}'/></linearGradient>",
                num(start.x),
                num(start.y),
                num(end.x),
                num(end.y),
                escape_xml(&from.color),
                escape_xml(&to.color)
            );
            let _ = write!(
                body,
                "<polygon points='{}' fill='url(#{id})'/>",
                point_list(&[center, a, b])
            );
        }
    }
}

/// Gradient direction across a wedge: from the tip at `a` towards the tip at `b`.
/// Degenerate wedges (a zero value on one side) fall back to a short chord
/// perpendicular to the centre ray so the gradient stays defined.
fn wedge_axis(center: Point, a: Point, b: Point) -> (Point, Point) {
    let dist = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
    if dist > 1e-6 {
        return (a, b);
    }
    let theta = (a.y - center.y).atan2(a.x - center.x);
    (a, project(a, 1.0, theta + std::f64::consts::FRAC_PI_2))
}

impl Surface for Scene {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: Paint, stroke: Option<&StrokeStyle>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke: stroke.cloned(),
        });
    }

    fn draw_polygon(&mut self, points: &[Point], fill: Option<Paint>, stroke: Option<&StrokeStyle>) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            stroke: stroke.cloned(),
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: stroke.clone(),
        });
    }

    fn stroke_text(&mut self, text: &str, at: Point, font: &FontStyle, stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokeText {
            text: text.to_string(),
            at,
            font: font.clone(),
            stroke: stroke.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &FontStyle, color: &str) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            font: font.clone(),
            color: color.to_string(),
        });
    }
}

/// Compact number rendering for SVG attributes.
pub(crate) fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

pub(crate) fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

fn point_list(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn stop_list(stops: &[GradientStop]) -> String {
    stops
        .iter()
        .map(|stop| {
            format!(
                "<stop offset='{}' stop-color='{}'/>",
                num(stop.offset),
                escape_xml(&stop.color)
            )
        })
        .collect()
}

fn stroke_attrs(stroke: Option<&StrokeStyle>) -> String {
    match stroke {
        Some(stroke) => format!(
            " stroke='{}' stroke-width='{}' stroke-linejoin='round'",
            escape_xml(&stroke.color),
            num(stroke.width)
        ),
        None => String::new(),
    }
}

fn font_attrs(font: &FontStyle) -> String {
    let mut attrs = format!(
        " font-family=\"{}\" font-size='{}' text-anchor='middle' dominant-baseline='central'",
        font.family.replace('"', "'"),
        num(font.size)
    );
    if font.italic {
        attrs.push_str(" font-style='italic'");
    }
    if font.bold {
        attrs.push_str(" font-weight='700'");
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::conic_blend;

    fn font() -> FontStyle {
        FontStyle {
            family: "Candara".into(),
            size: 18.0,
            italic: true,
            bold: false,
        }
    }

    #[test]
    fn text_is_escaped() {
        let mut scene = Scene::new("t", Size::new(10.0, 10.0));
        scene.fill_text("<A&B>", Point::new(1.0, 2.0), &font(), "#fff");
        let svg = scene.to_svg();
        assert!(svg.contains("&lt;A&amp;B&gt;"));
        assert!(svg.contains("font-style='italic'"));
    }

    #[test]
    fn radial_gradient_gets_scene_scoped_id() {
        let mut scene = Scene::new("summary", Size::new(100.0, 100.0));
        scene.fill_circle(
            Point::new(50.0, 50.0),
            40.0,
            Paint::Radial(RadialGradient {
                center: Point::new(50.0, 50.0),
                radius: 40.0,
                stops: vec![GradientStop::new(0.0, "#fff"), GradientStop::new(1.0, "#000")],
            }),
            None,
        );
        let svg = scene.to_svg();
        assert!(svg.contains("<radialGradient id='summary-g0-0'"));
        assert!(svg.contains("fill='url(#summary-g0-0)'"));
    }

    #[test]
    fn conic_fill_emits_one_wedge_per_edge() {
        let mut scene = Scene::new("c", Size::new(100.0, 100.0));
        let points = vec![
            Point::new(50.0, 10.0),
            Point::new(90.0, 50.0),
            Point::new(50.0, 90.0),
        ];
        let colors = vec!["#ff0000".to_string(), "#00ff00".into(), "#0000ff".into()];
        scene.draw_polygon(
            &points,
            Some(Paint::Conic {
                center: Point::new(50.0, 50.0),
                gradient: conic_blend(&colors, 0.65),
            }),
            None,
        );
        let svg = scene.to_svg();
        assert_eq!(svg.matches("<linearGradient").count(), 3);
        assert_eq!(svg.matches("<polygon").count(), 3);
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(250.0), "250");
        assert_eq!(num(1.23456), "1.23");
        assert_eq!(num(f64::NAN), "0");
    }

    #[test]
    fn clear_keeps_size() {
        let mut scene = Scene::new("x", Size::new(3.0, 4.0));
        scene.stroke_line(Point::default(), Point::new(1.0, 1.0), &StrokeStyle::new("#000", 1.0));
        scene.clear();
        assert!(scene.commands().is_empty());
        assert_eq!(scene.size(), Size::new(3.0, 4.0));
    }
}

//! Polar placement of stat axes.
//!
//! Screen coordinates: y grows downward, angles run clockwise from "up".
//! Axis 0 sits at -π/2 and the remaining axes follow every 2π/N radians,
//! each optionally nudged by a per-axis correction from an offset table.
//!
//! Callers reuse the same functions with different radii for polygon tips,
//! label anchors and value annotations; nothing here keeps state.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use super::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Unperturbed angle of `axis` out of `axis_count`.
pub fn base_angle(axis: usize, axis_count: usize) -> ChartResult<f64> {
    if axis_count == 0 {
        return Err(ChartError::Configuration(
            "axis count must be at least 1".into(),
        ));
    }
    if axis >= axis_count {
        return Err(ChartError::Configuration(format!(
            "axis index {axis} out of range for {axis_count} axes"
        )));
    }
    Ok(-FRAC_PI_2 + axis as f64 * (TAU / axis_count as f64))
}

/// Check an offset table against the axis count. An empty table means "no offsets".
pub fn check_offsets(axis_count: usize, offsets: &[f64]) -> ChartResult<()> {
    if offsets.is_empty() || offsets.len() == axis_count {
        Ok(())
    } else {
        Err(ChartError::Configuration(format!(
            "offset table has {} entries for {axis_count} axes",
            offsets.len()
        )))
    }
}

/// Final angle of `axis`, including its correction from `offsets`.
pub fn angle(axis: usize, axis_count: usize, offsets: &[f64]) -> ChartResult<f64> {
    check_offsets(axis_count, offsets)?;
    let correction = offsets.get(axis).copied().unwrap_or(0.0);
    Ok(base_angle(axis, axis_count)? + correction)
}

pub fn position(
    axis: usize,
    axis_count: usize,
    center: Point,
    radius: f64,
    offsets: &[f64],
) -> ChartResult<Point> {
    let theta = angle(axis, axis_count, offsets)?;
    Ok(project(center, radius, theta))
}

/// Positions of every axis at one radius, in axis order.
pub fn ring(axis_count: usize, center: Point, radius: f64, offsets: &[f64]) -> ChartResult<Vec<Point>> {
    (0..axis_count.max(1))
        .map(|axis| position(axis, axis_count, center, radius, offsets))
        .collect()
}

/// Points of the data polygon: each axis scaled by `value / scale_max`.
pub fn value_ring(values: &[f64], center: Point, radius: f64, scale_max: f64) -> ChartResult<Vec<Point>> {
    let count = values.len();
    values
        .iter()
        .enumerate()
        .map(|(axis, value)| {
            let fraction = if scale_max > 0.0 {
                (value / scale_max).clamp(0.0, 1.0)
            } else {
                0.0
            };
            position(axis, count, center, radius * fraction, &[])
        })
        .collect()
}

pub fn project(center: Point, radius: f64, theta: f64) -> Point {
    Point::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
    )
}

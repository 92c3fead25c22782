use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::{Point, PointSequence, Result, Viewport};

/// Parameters of the disk projection. Every circular and tunnel scene is this
/// one kernel fed with a different parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Radius reached by points on the viewport baseline, as a fraction of the
    /// inscribed circle radius. `0.0` collapses the baseline onto the centre.
    pub inner_radius_ratio: f32,
    /// Radius reached by points on the top edge.
    pub outer_radius_ratio: f32,
    /// Angle in radians that `x == 0` maps to.
    pub angle_offset: f32,
    /// Moves the neutral point of the stretch curve.
    pub stretch_radius_ratio: f32,
    /// Exponent applied to the radius ratio. Above 1 it funnels small radii
    /// towards the inner circle.
    pub stretch_pow: f32,
}

impl ProjectionParams {
    /// Linear ring between the two radius ratios, no rotation or stretch.
    pub fn ring(inner_radius_ratio: f32, outer_radius_ratio: f32) -> Self {
        Self {
            inner_radius_ratio,
            outer_radius_ratio,
            angle_offset: 0.0,
            stretch_radius_ratio: 1.0,
            stretch_pow: 1.0,
        }
    }

    pub fn with_angle_offset(mut self, angle_offset: f32) -> Self {
        self.angle_offset = angle_offset;
        self
    }

    pub fn with_stretch(mut self, stretch_radius_ratio: f32, stretch_pow: f32) -> Self {
        self.stretch_radius_ratio = stretch_radius_ratio;
        self.stretch_pow = stretch_pow;
        self
    }
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            inner_radius_ratio: 0.4,
            outer_radius_ratio: 1.414,
            angle_offset: 0.0,
            stretch_radius_ratio: 1.0,
            stretch_pow: 1.6,
        }
    }
}

/// Maps points of a rectangle onto a disk: `x` becomes the angle over a full
/// turn, `y` the distance from the centre (top edge outermost).
///
/// The stretch is not clamped; ratios outside `[0, 1]` extrapolate past the
/// inner and outer radii, and a negative base with a fractional exponent
/// yields NaN just like the underlying `powf`.
pub fn circular_project(
    points: &[Point],
    viewport: Viewport,
    params: &ProjectionParams,
) -> Result<PointSequence> {
    viewport.ensure_drawable()?;

    let circle_radius = viewport.inscribed_radius();
    let center = viewport.center();
    let inner_radius = params.inner_radius_ratio * circle_radius;
    let outer_radius = params.outer_radius_ratio * circle_radius;

    Ok(points
        .iter()
        .map(|point| {
            let angle = params.angle_offset + TAU * (point.x / viewport.width);
            let radius_ratio = 1.0 - point.y / viewport.height;
            let stretched = (radius_ratio / params.stretch_radius_ratio).powf(params.stretch_pow);
            let radius = lerp(inner_radius, outer_radius, stretched);
            center + Point::new(angle.cos(), angle.sin()) * radius
        })
        .collect())
}

/// Linear interpolation; `factor` is not clamped.
pub fn lerp(a: f32, b: f32, factor: f32) -> f32 {
    a + (b - a) * factor
}

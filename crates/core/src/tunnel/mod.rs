use std::{
    f32::consts::{SQRT_2, TAU},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::ProjectionParams;

/// Time for a ring to travel one third of the tunnel.
pub const MOVE_PERIOD: Duration = Duration::from_millis(2_000);
/// Time for one full rotation of the tunnel.
pub const ROTATION_PERIOD: Duration = Duration::from_millis(40_000);
/// Exponent fed to the projector for every tunnel ring.
pub const TUNNEL_STRETCH_POW: f32 = 1.8;

const RING_COUNT: usize = 3;
const RING_SPACING: f32 = 1.0 / RING_COUNT as f32;
const SURFACE_RATIO: f32 = RING_SPACING / 3.0;
const BACKGROUND_EXTENT: f32 = 0.1;
const SPEED_POW: i32 = 5;

/// Animation phase of the tunnel, sampled from a monotonically increasing
/// clock by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TunnelPhase {
    /// Travel progress in `[0, 1/3)`; one period moves each ring to the slot
    /// of the next one.
    pub move_ratio: f32,
    /// Rotation angle in `[0, 2π)`.
    pub rotation: f32,
}

impl TunnelPhase {
    pub fn at(elapsed: Duration) -> Self {
        Self {
            move_ratio: cycle_fraction(elapsed, MOVE_PERIOD) * RING_SPACING,
            rotation: cycle_fraction(elapsed, ROTATION_PERIOD) * TAU,
        }
    }
}

/// Radius set of one tunnel ring, as ratios of the inscribed circle radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TunnelRing {
    pub inner: f32,
    pub outer: f32,
    /// Outer radius of the slightly longer halo drawn behind the ring.
    pub background_outer: f32,
    /// The innermost ring fades in as it is born; the others are opaque.
    pub opacity: f32,
}

impl TunnelRing {
    pub fn params(&self, phase: &TunnelPhase) -> ProjectionParams {
        ProjectionParams {
            inner_radius_ratio: self.inner,
            outer_radius_ratio: self.outer,
            angle_offset: phase.rotation,
            stretch_radius_ratio: 1.0,
            stretch_pow: TUNNEL_STRETCH_POW,
        }
    }

    pub fn background_params(&self, phase: &TunnelPhase) -> ProjectionParams {
        ProjectionParams {
            outer_radius_ratio: self.background_outer,
            ..self.params(phase)
        }
    }
}

/// The three rings of the tunnel at `phase`, innermost first.
pub fn tunnel_rings(phase: &TunnelPhase) -> [TunnelRing; RING_COUNT] {
    std::array::from_fn(|index| {
        let start = phase.move_ratio + index as f32 * RING_SPACING;
        let end = start + SURFACE_RATIO;
        TunnelRing {
            inner: depth_curve(start) * SQRT_2,
            outer: depth_curve(end) * SQRT_2,
            background_outer: depth_curve(end + BACKGROUND_EXTENT) * SQRT_2,
            opacity: if index == 0 {
                (phase.move_ratio * RING_COUNT as f32).min(1.0)
            } else {
                1.0
            },
        }
    })
}

/// Perspective curve: rings accelerate as they approach the viewer.
fn depth_curve(progress: f32) -> f32 {
    0.15 + 0.85 * progress.powi(SPEED_POW)
}

fn cycle_fraction(elapsed: Duration, period: Duration) -> f32 {
    let period = period.as_millis();
    (elapsed.as_millis() % period) as f32 / period as f32
}

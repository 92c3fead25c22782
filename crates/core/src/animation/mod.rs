use std::time::Duration;

use crate::{projection::lerp, Point, PointSequence};

/// Smooths the jump between two consecutive frames of one layout.
///
/// This stage lives outside the pure geometry: the caller retargets it with
/// every new point sequence and advances it with the redraw delta.
#[derive(Debug, Clone)]
pub struct PointTween {
    from: PointSequence,
    to: PointSequence,
    duration: Duration,
    elapsed: Duration,
}

impl PointTween {
    pub fn new(duration: Duration) -> Self {
        Self {
            from: Vec::new(),
            to: Vec::new(),
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Starts a new transition from the currently displayed frame to `target`.
    /// A target with a different length snaps immediately.
    pub fn retarget(&mut self, target: PointSequence) {
        if target.len() == self.to.len() {
            self.from = self.current();
            self.elapsed = Duration::ZERO;
        } else {
            self.from = target.clone();
            self.elapsed = self.duration;
        }
        self.to = target;
    }

    /// Advances the clock by `delta` and returns the frame to draw.
    pub fn advance(&mut self, delta: Duration) -> PointSequence {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.current()
    }

    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn current(&self) -> PointSequence {
        lerp_points(&self.from, &self.to, self.progress())
    }
}

/// Pointwise linear interpolation. Sequences of different lengths resolve to
/// `to`.
pub fn lerp_points(from: &[Point], to: &[Point], factor: f32) -> PointSequence {
    if from.len() != to.len() {
        return to.to_vec();
    }

    from.iter()
        .zip(to)
        .map(|(a, b)| Point::new(lerp(a.x, b.x, factor), lerp(a.y, b.y, factor)))
        .collect()
}

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::{EqualizerError, Result};

/// A 2D coordinate, either in viewport space or after projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (self - other).length()
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, factor: f32) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl Div<f32> for Point {
    type Output = Point;

    fn div(self, factor: f32) -> Point {
        self * (1.0 / factor)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// One frame of one layout. Rebuilt from scratch every redraw.
pub type PointSequence = Vec<Point>;

/// Drawing surface size in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Radius of the largest circle inscribed in the viewport.
    pub fn inscribed_radius(&self) -> f32 {
        self.width.min(self.height) / 2.0
    }

    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Fails with [`EqualizerError::InvalidViewport`] unless both dimensions
    /// are positive and finite.
    pub fn ensure_drawable(&self) -> Result<()> {
        if self.is_drawable() {
            Ok(())
        } else {
            Err(EqualizerError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);

        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(a - b, Point::new(-2.0, 3.0));
        assert_eq!(b * 2.0, Point::new(6.0, -2.0));
        assert_eq!(b / 2.0, Point::new(1.5, -0.5));
        assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn viewport_validation() {
        assert!(Viewport::new(10.0, 20.0).ensure_drawable().is_ok());
        assert!(Viewport::new(0.0, 20.0).ensure_drawable().is_err());
        assert!(Viewport::new(10.0, -1.0).ensure_drawable().is_err());
        assert!(Viewport::new(f32::NAN, 5.0).ensure_drawable().is_err());
        assert_eq!(Viewport::new(10.0, 20.0).inscribed_radius(), 5.0);
    }
}

//! 2D normalized points.

use serde::{Deserialize, Serialize};

/// A 2D normalized point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The same point seen in a horizontally mirrored frame.
    pub fn mirrored_x(&self) -> Point2D {
        Point2D {
            x: 1.0 - self.x,
            y: self.y,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(0.3, 0.4);
        assert!((a.distance_to(&b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mirrored_x() {
        let p = Point2D::new(0.2, 0.7).mirrored_x();
        assert!((p.x - 0.8).abs() < 1e-12);
        assert_eq!(p.y, 0.7);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point2D::new(-0.1, 1.2).is_finite());
        assert!(!Point2D::new(f64::NAN, 0.0).is_finite());
        assert!(!Point2D::new(0.0, f64::INFINITY).is_finite());
    }
}

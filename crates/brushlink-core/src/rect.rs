//! Brush rectangles in data coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned brush rectangle, normalized so `min <= max` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl BrushRect {
    /// Build a rectangle from the pointer-down and pointer-up corners, in
    /// either order.
    pub fn from_corners(down: impl Into<Vec2>, up: impl Into<Vec2>) -> Self {
        let (down, up) = (down.into(), up.into());
        Self {
            min: down.min(up),
            max: down.max(up),
        }
    }

    /// Whether `(x, y)` lies inside the rectangle. All four edges are
    /// inclusive; NaN coordinates are never inside.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min.x && x <= self.max.x && y >= self.min.y && y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_are_order_independent() {
        let a = BrushRect::from_corners([2.0, 0.0], [0.0, 3.0]);
        let b = BrushRect::from_corners([0.0, 3.0], [2.0, 0.0]);
        assert_eq!(a, b);
        assert_eq!(a.min, Vec2::new(0.0, 0.0));
        assert_eq!(a.max, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let r = BrushRect::from_corners([0.0, 0.0], [2.0, 2.0]);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(2.0, 2.0));
        assert!(r.contains(2.0, 0.0));
        assert!(!r.contains(2.0001, 1.0));
        assert!(!r.contains(1.0, -0.0001));
    }

    #[test]
    fn test_nan_is_outside() {
        let r = BrushRect::from_corners([-1.0, -1.0], [1.0, 1.0]);
        assert!(!r.contains(f32::NAN, 0.0));
        assert!(!r.contains(0.0, f32::NAN));
    }

    #[test]
    fn test_zero_area_rect_still_hits_exact_points() {
        let r = BrushRect::from_corners([1.0, 1.0], [1.0, 1.0]);
        assert!(r.contains(1.0, 1.0));
        assert!(!r.contains(1.0, 1.5));
    }
}

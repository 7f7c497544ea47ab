//! Collision and visibility tests
//!
//! Circles against axis-aligned rectangles for movement, and a distance +
//! angle cone test for sentry vision. Everything here is side-effect free.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angular_difference;

/// Axis-aligned rectangle in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if `other` lies entirely inside this rectangle (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Check whether a circle overlaps a rectangle
///
/// Uses the expanded-AABB test: the rectangle is grown by `radius` on every
/// side and the circle center is tested against it. Touching edges do not
/// count as overlap.
#[inline]
pub fn intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.x
        && center.x - radius < rect.right()
        && center.y + radius > rect.y
        && center.y - radius < rect.bottom()
}

/// Check whether `target` lies inside a vision cone
///
/// The cone starts at `origin`, faces `facing` (radians) and spans
/// `half_angle` to either side. Both the radius and the angle bounds are
/// exclusive.
pub fn in_vision_cone(origin: Vec2, facing: f32, target: Vec2, radius: f32, half_angle: f32) -> bool {
    let offset = target - origin;
    if offset.length() >= radius {
        return false;
    }
    let angle_to_target = offset.y.atan2(offset.x);
    angular_difference(facing, angle_to_target).abs() < half_angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_6, PI};

    #[test]
    fn test_intersects_rect_overlap_and_miss() {
        let rect = Rect::new(100.0, 100.0, 20.0, 10.0);

        // Center inside
        assert!(intersects_rect(Vec2::new(110.0, 105.0), 8.0, &rect));
        // Circle reaching in from the left
        assert!(intersects_rect(Vec2::new(95.0, 105.0), 8.0, &rect));
        // Clear miss
        assert!(!intersects_rect(Vec2::new(80.0, 105.0), 8.0, &rect));
    }

    #[test]
    fn test_intersects_rect_touching_is_not_overlap() {
        let rect = Rect::new(100.0, 100.0, 20.0, 10.0);
        assert!(!intersects_rect(Vec2::new(92.0, 105.0), 8.0, &rect));
        assert!(!intersects_rect(Vec2::new(110.0, 118.0), 8.0, &rect));
    }

    #[test]
    fn test_contains_rect() {
        let tile = Rect::new(50.0, 50.0, 50.0, 50.0);
        assert!(tile.contains_rect(&Rect::new(60.0, 60.0, 20.0, 20.0)));
        assert!(tile.contains_rect(&tile));
        assert!(!tile.contains_rect(&Rect::new(90.0, 60.0, 20.0, 20.0)));
    }

    #[test]
    fn test_vision_cone_facing_target() {
        let origin = Vec2::new(0.0, 0.0);
        assert!(in_vision_cone(origin, 0.0, Vec2::new(50.0, 0.0), 125.0, FRAC_PI_6));
        // Behind the sentry
        assert!(!in_vision_cone(origin, 0.0, Vec2::new(-50.0, 0.0), 125.0, FRAC_PI_6));
        // Off to the side
        assert!(!in_vision_cone(origin, 0.0, Vec2::new(0.0, 50.0), 125.0, FRAC_PI_6));
    }

    #[test]
    fn test_vision_cone_radius_is_exclusive() {
        let origin = Vec2::new(10.0, 10.0);
        let at_edge = Vec2::new(10.0 + 125.0, 10.0);
        assert!(!in_vision_cone(origin, 0.0, at_edge, 125.0, FRAC_PI_6));
        assert!(in_vision_cone(origin, 0.0, Vec2::new(134.0, 10.0), 125.0, FRAC_PI_6));
    }

    #[test]
    fn test_vision_cone_across_angle_seam() {
        // Facing almost exactly -x, target slightly on the other side of ±π
        let origin = Vec2::ZERO;
        let facing = PI - 0.05;
        let target = Vec2::new(-60.0, -3.0);
        assert!(in_vision_cone(origin, facing, target, 125.0, FRAC_PI_6));
        assert!(!in_vision_cone(origin, facing + FRAC_PI_2, target, 125.0, FRAC_PI_6));
    }

    proptest! {
        #[test]
        fn beyond_radius_never_visible(
            facing in -PI..PI,
            angle in -PI..PI,
            extra in 0.01f32..500.0,
        ) {
            let target = Vec2::new(angle.cos(), angle.sin()) * (125.0 + extra);
            prop_assert!(!in_vision_cone(Vec2::ZERO, facing, target, 125.0, FRAC_PI_6));
        }
    }
}

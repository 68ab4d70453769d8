//! Viewport bounds and the bounce rule

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Logical drawing area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True when a box at `pos` with extent `size` touches or crosses the left/right edge
    #[inline]
    pub fn touches_x(&self, pos: Vec2, size: Vec2) -> bool {
        pos.x <= 0.0 || pos.x + size.x >= self.width
    }

    /// True when a box at `pos` with extent `size` touches or crosses the top/bottom edge
    #[inline]
    pub fn touches_y(&self, pos: Vec2, size: Vec2) -> bool {
        pos.y <= 0.0 || pos.y + size.y >= self.height
    }

    /// Velocity after the bounce check for a box at `pos`.
    ///
    /// Each axis is negated whenever the box touches that axis' edges. There
    /// is no check on direction of travel, so a box resting on an edge flips
    /// every call.
    pub fn reflect(&self, pos: Vec2, size: Vec2, vel: Vec2) -> Vec2 {
        let mut vel = vel;
        if self.touches_x(pos, size) {
            vel.x = -vel.x;
        }
        if self.touches_y(pos, size) {
            vel.y = -vel.y;
        }
        vel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_keeps_velocity() {
        let vp = Viewport::default();
        let vel = Vec2::new(3.0, -2.0);
        assert_eq!(vp.reflect(Vec2::new(500.0, 500.0), Vec2::splat(50.0), vel), vel);
    }

    #[test]
    fn test_edges_are_inclusive() {
        let vp = Viewport::default();
        let size = Vec2::new(100.0, 40.0);
        assert!(vp.touches_x(Vec2::new(0.0, 10.0), size));
        assert!(vp.touches_x(Vec2::new(1820.0, 10.0), size));
        assert!(!vp.touches_x(Vec2::new(1819.0, 10.0), size));
        assert!(vp.touches_y(Vec2::new(10.0, 1040.0), size));
        assert!(!vp.touches_y(Vec2::new(10.0, 1039.5), size));
    }

    #[test]
    fn test_corner_flips_both_axes() {
        let vp = Viewport::new(200.0, 100.0);
        let vel = vp.reflect(Vec2::new(-1.0, -1.0), Vec2::splat(10.0), Vec2::new(-4.0, -5.0));
        assert_eq!(vel, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_resting_on_edge_flips_every_call() {
        let vp = Viewport::default();
        let pos = Vec2::new(0.0, 300.0);
        let size = Vec2::splat(10.0);
        let v1 = vp.reflect(pos, size, Vec2::new(1.0, 0.0));
        let v2 = vp.reflect(pos, size, v1);
        assert_eq!(v1, Vec2::new(-1.0, 0.0));
        assert_eq!(v2, Vec2::new(1.0, 0.0));
    }
}

//! Square wall geometry
//!
//! A wall is a square of side `size` centred on `center` and rotated by
//! `rotation` degrees. Edges and corners are expressed in the wall's
//! unrotated frame (world axes, same centre); callers rotate points into
//! that frame before testing against them.

use glam::Vec2;

/// A directed edge segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.vector().length()
    }
}

/// An axis-aligned square frame about a centre, plus the rotation that maps it to world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareFrame {
    pub center: Vec2,
    pub size: f32,
    /// Degrees, counter-clockwise
    pub rotation: f32,
}

impl SquareFrame {
    pub fn new(center: Vec2, size: f32, rotation: f32) -> Self {
        Self {
            center,
            size,
            rotation,
        }
    }

    #[inline]
    fn half(&self) -> f32 {
        self.size / 2.0
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half()
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half()
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half()
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half()
    }

    pub fn left_top(&self) -> Vec2 {
        Vec2::new(self.left(), self.top())
    }

    pub fn left_bottom(&self) -> Vec2 {
        Vec2::new(self.left(), self.bottom())
    }

    pub fn right_top(&self) -> Vec2 {
        Vec2::new(self.right(), self.top())
    }

    pub fn right_bottom(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Edges in test order: left, bottom, right, top.
    /// Vertical edges run bottom to top, horizontal ones left to right.
    pub fn edges(&self) -> [Edge; 4] {
        [
            Edge::new(self.left_bottom(), self.left_top()),
            Edge::new(self.left_bottom(), self.right_bottom()),
            Edge::new(self.right_bottom(), self.right_top()),
            Edge::new(self.left_top(), self.right_top()),
        ]
    }

    /// Corners in test order
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.left_top(),
            self.right_top(),
            self.left_bottom(),
            self.right_bottom(),
        ]
    }

    /// Map a world-space point into the unrotated frame
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        crate::rotate_degrees(point - self.center, -self.rotation) + self.center
    }

    /// Map a direction from the unrotated frame back to world space
    pub fn direction_to_world(&self, direction: Vec2) -> Vec2 {
        crate::rotate_degrees(direction, self.rotation)
    }

    /// Corners in world space (for rendering or debugging)
    pub fn world_corners(&self) -> [Vec2; 4] {
        self.corners()
            .map(|c| crate::rotate_degrees(c - self.center, self.rotation) + self.center)
    }
}

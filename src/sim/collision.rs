//! Axis-aligned collision detection
//!
//! Every collidable in Flappy Drone is a sprite-sized rectangle, so collision
//! reduces to rectangle overlap. Rotation of the avatar is cosmetic and never
//! changes its collision box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// True if the rectangles share interior area.
    ///
    /// Touching edges do not count, matching how sprite blits line up
    /// pixel-exactly without colliding.
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Check the avatar box against both segments of a pipe pair
pub fn hits_pipe_pair(avatar: &Rect, top: &Rect, bottom: &Rect) -> bool {
    avatar.intersects(top) || avatar.intersects(bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_contained_rect_intersects() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_avatar_in_gap_misses_pipe_pair() {
        // Gap from y=200 to y=390, pipe at x=40
        let top = Rect::new(40.0, 200.0 - 500.0, 100.0, 500.0);
        let bottom = Rect::new(40.0, 390.0, 100.0, 500.0);

        let avatar = Rect::new(50.0, 250.0, 90.0, 70.0);
        assert!(!hits_pipe_pair(&avatar, &top, &bottom));

        let grazing_top = Rect::new(50.0, 199.0, 90.0, 70.0);
        assert!(hits_pipe_pair(&grazing_top, &top, &bottom));

        let grazing_bottom = Rect::new(50.0, 321.0, 90.0, 70.0);
        assert!(hits_pipe_pair(&grazing_bottom, &top, &bottom));
    }

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
        assert_eq!(r.max(), Vec2::new(40.0, 60.0));
    }
}

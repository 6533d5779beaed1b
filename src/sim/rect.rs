//! Axis-aligned rectangles for bounds and collision
//!
//! Screen space: origin at the top-left, y grows downward.

use glam::Vec2;

/// An axis-aligned rectangle defined by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap test; rectangles that only share an edge don't intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True once this rectangle lies entirely past any single edge of `area`
    ///
    /// Each edge is checked on its own: leaving through the left edge counts even
    /// if the rectangle is still vertically inside the area.
    pub fn is_outside(&self, area: &Rect) -> bool {
        self.right() < area.left()
            || self.left() > area.right()
            || self.bottom() < area.top()
            || self.top() > area.bottom()
    }

    /// True if this rectangle lies fully inside `area` (edges inclusive)
    pub fn is_within(&self, area: &Rect) -> bool {
        self.left() >= area.left()
            && self.right() <= area.right()
            && self.top() >= area.top()
            && self.bottom() <= area.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn screen() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::splat(10.0));
        assert_eq!(r.pos, Vec2::new(45.0, 45.0));
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        let b = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        let b = Rect::new(30.0, 0.0, 30.0, 30.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_outside_each_edge_independently() {
        let area = screen();
        // Left: right edge past 0, vertically inside
        assert!(Rect::new(-31.0, 300.0, 30.0, 30.0).is_outside(&area));
        // Right
        assert!(Rect::new(801.0, 300.0, 30.0, 30.0).is_outside(&area));
        // Top
        assert!(Rect::new(400.0, -31.0, 30.0, 30.0).is_outside(&area));
        // Bottom
        assert!(Rect::new(400.0, 601.0, 30.0, 30.0).is_outside(&area));
    }

    #[test]
    fn test_partially_offscreen_is_not_outside() {
        let area = screen();
        assert!(!Rect::new(-29.0, 300.0, 30.0, 30.0).is_outside(&area));
        // Exactly on the edge still counts as present
        assert!(!Rect::new(-30.0, 300.0, 30.0, 30.0).is_outside(&area));
        assert!(!Rect::new(800.0, 300.0, 30.0, 30.0).is_outside(&area));
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(
            ax in -100.0f32..900.0, ay in -100.0f32..700.0,
            bx in -100.0f32..900.0, by in -100.0f32..700.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, w, h);
            let b = Rect::new(bx, by, 30.0, 30.0);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_within_is_never_outside(
            x in 0.0f32..770.0, y in 0.0f32..570.0,
        ) {
            let r = Rect::new(x, y, 30.0, 30.0);
            prop_assert!(r.is_within(&screen()));
            prop_assert!(!r.is_outside(&screen()));
        }
    }
}

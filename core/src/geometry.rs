//! Axis-aligned rectangle primitives shared by generation and simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle expressed in world units.
///
/// The origin sits at the top-left corner and the y axis grows downwards, so
/// `top() <= bottom()` for every well-formed rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and dimensions.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the provided size centred on `center`.
    #[must_use]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x * 0.5,
            center.y - size.y * 0.5,
            size.x,
            size.y,
        )
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Dimensions packed into a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Top-left corner.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Reports whether the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Moves the rectangle so its centre lands on `center`.
    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.width * 0.5;
        self.y = center.y - self.height * 0.5;
    }

    /// Moves the rectangle horizontally so its left edge lands on `left`.
    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    /// Moves the rectangle horizontally so its right edge lands on `right`.
    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    /// Moves the rectangle vertically so its top edge lands on `top`.
    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    /// Moves the rectangle vertically so its bottom edge lands on `bottom`.
    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// Translates the rectangle in place.
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Returns a translated copy of the rectangle.
    #[must_use]
    pub fn translated(mut self, delta: Vec2) -> Self {
        self.translate(delta);
        self
    }

    /// Grows (or, with negative amounts, shrinks) the rectangle around its
    /// centre. The result never has negative dimensions.
    #[must_use]
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        let width = (self.width + dx).max(0.0);
        let height = (self.height + dy).max(0.0);
        Self::from_center(self.center(), Vec2::new(width, height))
    }

    /// Reports whether the two rectangles share a region of positive area.
    ///
    /// Rectangles that merely touch along an edge do not intersect, and empty
    /// rectangles never intersect anything.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Overlapping region of the two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Smallest rectangle enclosing both inputs.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Reports whether `other` lies entirely within this rectangle.
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Reports whether the point lies inside the rectangle. The right and
    /// bottom edges are exclusive.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Clips the segment `start..end` against the rectangle.
    ///
    /// Returns the entry and exit points of the portion of the segment lying
    /// inside the rectangle, ordered from `start` towards `end`, or `None` when
    /// the segment misses the rectangle entirely.
    #[must_use]
    pub fn clip_segment(&self, start: Vec2, end: Vec2) -> Option<(Vec2, Vec2)> {
        if self.is_empty() {
            return None;
        }

        let delta = end - start;
        let mut entry = 0.0_f32;
        let mut exit = 1.0_f32;
        let boundaries = [
            (-delta.x, start.x - self.left()),
            (delta.x, self.right() - start.x),
            (-delta.y, start.y - self.top()),
            (delta.y, self.bottom() - start.y),
        ];

        for (direction, distance) in boundaries {
            if direction == 0.0 {
                if distance < 0.0 {
                    return None;
                }
                continue;
            }

            let ratio = distance / direction;
            if direction < 0.0 {
                if ratio > exit {
                    return None;
                }
                entry = entry.max(ratio);
            } else {
                if ratio < entry {
                    return None;
                }
                exit = exit.min(ratio);
            }
        }

        Some((start + delta * entry, start + delta * exit))
    }
}

/// Unit vector pointing from `from` towards `to`.
///
/// Coincident points yield the positive x axis so callers always receive a
/// usable direction.
#[must_use]
pub fn bearing(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let left = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!left.intersects(&right));
        assert!(left.intersects(&right.translated(Vec2::new(-0.5, 0.0))));
    }

    #[test]
    fn empty_rectangles_never_intersect() {
        let solid = Rect::new(0.0, 0.0, 10.0, 10.0);
        let empty = Rect::new(2.0, 2.0, 0.0, 0.0);
        assert!(!solid.intersects(&empty));
        assert!(!empty.intersects(&solid));
    }

    #[test]
    fn inflate_keeps_centre_and_clamps_at_zero() {
        let rect = Rect::new(10.0, 20.0, 50.0, 60.0);
        let shrunk = rect.inflate(-8.0, -20.0);
        assert_eq!(shrunk.center(), rect.center());
        assert_eq!(shrunk.size(), Vec2::new(42.0, 40.0));
        assert!(rect.contains(&shrunk));

        let collapsed = rect.inflate(-100.0, -100.0);
        assert!(collapsed.is_empty());
        assert_eq!(collapsed.center(), rect.center());
    }

    #[test]
    fn union_and_intersection_agree_on_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 15.0, 15.0));
        assert_eq!(a.intersection(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.intersection(&Rect::new(20.0, 20.0, 1.0, 1.0)), None);
    }

    #[test]
    fn clip_segment_returns_entry_and_exit() {
        let rect = Rect::new(10.0, -5.0, 10.0, 10.0);
        let (entry, exit) = rect
            .clip_segment(Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0))
            .expect("segment crosses the rectangle");
        assert_eq!(entry, Vec2::new(10.0, 0.0));
        assert_eq!(exit, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn clip_segment_misses_parallel_outside_segment() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(rect
            .clip_segment(Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0))
            .is_none());
        assert!(rect
            .clip_segment(Vec2::new(0.0, 15.0), Vec2::new(5.0, 15.0))
            .is_none());
    }

    #[test]
    fn bearing_defaults_to_positive_x_for_coincident_points() {
        let point = Vec2::new(3.0, 4.0);
        assert_eq!(bearing(point, point), Vec2::new(1.0, 0.0));
        let down = bearing(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((down - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }
}

//! Camera state translating between world and screen coordinates.

use glam::Vec2;
use nrogue_core::Rect;

/// Window onto the world, passed explicitly to anything needing screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    origin: Vec2,
    size: Vec2,
    pointer: Option<Vec2>,
}

impl Viewport {
    /// Creates a viewport of the provided screen dimensions at the world origin.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            size: Vec2::new(width.max(0.0), height.max(0.0)),
            pointer: None,
        }
    }

    /// World coordinate shown at the top-left corner of the screen.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Screen dimensions.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Area of the world currently on screen.
    #[must_use]
    pub fn world_rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.size.x, self.size.y)
    }

    /// Centres the view on `target` without showing anything outside `bounds`.
    ///
    /// When `bounds` is smaller than the view along an axis, the bounds are
    /// centred on screen instead.
    pub fn follow(&mut self, target: Vec2, bounds: Rect) {
        let desired = target - self.size / 2.0;
        self.origin = Vec2::new(
            clamp_axis(desired.x, bounds.left(), bounds.right() - self.size.x),
            clamp_axis(desired.y, bounds.top(), bounds.bottom() - self.size.y),
        );
    }

    /// Records the pointer position in screen coordinates.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Pointer position in screen coordinates, if known.
    #[must_use]
    pub const fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Converts a world point into screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        point - self.origin
    }

    /// Converts a screen point into world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        point + self.origin
    }

    /// Moves a world rectangle into screen coordinates.
    #[must_use]
    pub fn project(&self, rect: Rect) -> Rect {
        rect.translated(-self.origin)
    }

    /// Reports whether any part of `rect` is on screen.
    #[must_use]
    pub fn is_visible(&self, rect: &Rect) -> bool {
        self.world_rect().intersects(rect)
    }

    /// Reports whether the pointer lies within `radius` of the world point.
    #[must_use]
    pub fn is_targeted(&self, point: Vec2, radius: f32) -> bool {
        self.pointer
            .map(|pointer| self.screen_to_world(pointer))
            .is_some_and(|pointer| pointer.distance_squared(point) < radius * radius)
    }
}

fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if max < min {
        (min + max) / 2.0
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 3750.0, 3000.0)
    }

    #[test]
    fn follow_centres_the_target_inside_the_world() {
        let mut viewport = Viewport::new(1920.0, 1080.0);
        viewport.follow(Vec2::new(2000.0, 1500.0), bounds());
        assert_eq!(viewport.origin(), Vec2::new(1040.0, 960.0));
        assert_eq!(viewport.world_rect().center(), Vec2::new(2000.0, 1500.0));
    }

    #[test]
    fn follow_stops_at_the_world_edges() {
        let mut viewport = Viewport::new(1920.0, 1080.0);
        viewport.follow(Vec2::new(10.0, 2990.0), bounds());
        assert_eq!(viewport.origin(), Vec2::new(0.0, 1920.0));
    }

    #[test]
    fn small_worlds_are_centred() {
        let mut viewport = Viewport::new(1920.0, 1080.0);
        viewport.follow(Vec2::new(100.0, 100.0), Rect::new(0.0, 0.0, 1500.0, 600.0));
        assert_eq!(viewport.origin(), Vec2::new(-210.0, -240.0));
    }

    #[test]
    fn screen_and_world_conversions_are_inverse() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.follow(Vec2::new(1000.0, 1000.0), bounds());
        let world = Vec2::new(1234.0, 987.0);
        assert_eq!(viewport.screen_to_world(viewport.world_to_screen(world)), world);
        assert_eq!(
            viewport.project(Rect::new(700.0, 800.0, 10.0, 10.0)).min(),
            Vec2::new(100.0, 100.0)
        );
    }

    #[test]
    fn targeting_uses_the_world_position_of_the_pointer() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.follow(Vec2::new(1000.0, 1000.0), bounds());
        assert!(!viewport.is_targeted(Vec2::new(1000.0, 1000.0), 250.0));

        viewport.set_pointer(Some(Vec2::new(400.0, 300.0)));
        assert!(viewport.is_targeted(Vec2::new(1100.0, 1100.0), 250.0));
        assert!(!viewport.is_targeted(Vec2::new(1300.0, 1000.0), 250.0));
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Axis-separated collision resolution for moving rectangles.
//!
//! A move is applied one axis at a time: the horizontal component first, then
//! the vertical one. After each pass the mover is checked against the world
//! boundary and every solid rectangle, and the configured
//! [`CollisionResponse`] decides what happens on contact. Resolving one axis
//! fully before the next keeps movers from slipping diagonally through the
//! corner where two solids meet.

use glam::Vec2;
use nrogue_core::Rect;

/// Reaction applied when a mover touches a solid or leaves the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionResponse {
    /// Snap back to the touching edge and zero the axis velocity.
    Clamp,
    /// Snap back to the touching edge and invert the axis velocity.
    Reflect,
    /// Leave the mover where it is and only report the contact.
    Detect,
}

/// Horizontal or vertical axis of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

/// Outcome of resolving a move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveReport {
    rect: Rect,
    velocity: Vec2,
    blocked_x: bool,
    blocked_y: bool,
    left_bounds: bool,
}

impl MoveReport {
    /// Mover rectangle after resolution.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Mover velocity after resolution.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Reports whether the pass along `axis` made contact.
    #[must_use]
    pub const fn blocked(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.blocked_x,
            Axis::Vertical => self.blocked_y,
        }
    }

    /// Reports whether either pass made contact.
    #[must_use]
    pub const fn collided(&self) -> bool {
        self.blocked_x || self.blocked_y
    }

    /// Reports whether the mover ended up outside the boundary.
    ///
    /// Only [`CollisionResponse::Detect`] can leave a mover outside.
    #[must_use]
    pub const fn left_bounds(&self) -> bool {
        self.left_bounds
    }
}

/// Moves `rect` by `delta`, one axis at a time, resolving contacts with
/// `solids` and the optional `bounds`.
///
/// `velocity` is the mover's stored velocity; the response rewrites the
/// component of every axis that made contact. Passing an empty `solids` slice
/// gives free movement that still respects the boundary.
#[must_use]
pub fn resolve_axis_move(
    rect: Rect,
    velocity: Vec2,
    delta: Vec2,
    solids: &[Rect],
    bounds: Option<Rect>,
    response: CollisionResponse,
) -> MoveReport {
    let mut report = MoveReport {
        rect,
        velocity,
        blocked_x: false,
        blocked_y: false,
        left_bounds: false,
    };

    report.blocked_x = resolve_pass(
        &mut report,
        Axis::Horizontal,
        delta.x,
        solids,
        bounds,
        response,
    );
    report.blocked_y = resolve_pass(
        &mut report,
        Axis::Vertical,
        delta.y,
        solids,
        bounds,
        response,
    );

    if let Some(bounds) = bounds {
        report.left_bounds = !bounds.contains(&report.rect);
    }
    report
}

fn resolve_pass(
    report: &mut MoveReport,
    axis: Axis,
    step: f32,
    solids: &[Rect],
    bounds: Option<Rect>,
    response: CollisionResponse,
) -> bool {
    if step == 0.0 {
        return false;
    }

    let offset = match axis {
        Axis::Horizontal => Vec2::new(step, 0.0),
        Axis::Vertical => Vec2::new(0.0, step),
    };
    report.rect.translate(offset);

    let mut blocked = false;
    if let Some(bounds) = bounds {
        if let Some((edge, far)) = boundary_contact(&report.rect, bounds, axis) {
            blocked = true;
            if response != CollisionResponse::Detect {
                snap(&mut report.rect, axis, edge, far);
            }
        }
    }

    for solid in solids {
        if !report.rect.intersects(solid) {
            continue;
        }
        blocked = true;
        if response == CollisionResponse::Detect {
            continue;
        }
        let forward = step > 0.0;
        let edge = match (axis, forward) {
            (Axis::Horizontal, true) => solid.left(),
            (Axis::Horizontal, false) => solid.right(),
            (Axis::Vertical, true) => solid.top(),
            (Axis::Vertical, false) => solid.bottom(),
        };
        snap(&mut report.rect, axis, edge, forward);
    }

    if blocked {
        let component = match axis {
            Axis::Horizontal => &mut report.velocity.x,
            Axis::Vertical => &mut report.velocity.y,
        };
        match response {
            CollisionResponse::Clamp => *component = 0.0,
            CollisionResponse::Reflect => *component = -*component,
            CollisionResponse::Detect => {}
        }
    }
    blocked
}

/// Boundary edge crossed along `axis`, paired with whether it is the far
/// (right or bottom) edge.
fn boundary_contact(rect: &Rect, bounds: Rect, axis: Axis) -> Option<(f32, bool)> {
    match axis {
        Axis::Horizontal if rect.left() < bounds.left() => Some((bounds.left(), false)),
        Axis::Horizontal if rect.right() > bounds.right() => Some((bounds.right(), true)),
        Axis::Vertical if rect.top() < bounds.top() => Some((bounds.top(), false)),
        Axis::Vertical if rect.bottom() > bounds.bottom() => Some((bounds.bottom(), true)),
        _ => None,
    }
}

/// Places the leading edge of `rect` on `edge`. A forward mover is stopped by
/// its right or bottom edge; a backward mover by its left or top edge.
fn snap(rect: &mut Rect, axis: Axis, edge: f32, forward: bool) {
    match (axis, forward) {
        (Axis::Horizontal, true) => rect.set_right(edge),
        (Axis::Horizontal, false) => rect.set_left(edge),
        (Axis::Vertical, true) => rect.set_bottom(edge),
        (Axis::Vertical, false) => rect.set_top(edge),
    }
}

/// Scales `velocity` by `factor` and snaps components below `threshold` to zero.
#[must_use]
pub fn apply_damping(velocity: Vec2, factor: f32, threshold: f32) -> Vec2 {
    let damped = velocity * factor;
    Vec2::new(snap_small(damped.x, threshold), snap_small(damped.y, threshold))
}

fn snap_small(value: f32, threshold: f32) -> f32 {
    if value.abs() < threshold {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_snaps_small_components() {
        let damped = apply_damping(Vec2::new(10.0, 0.5), 0.3, 0.2);
        assert!((damped.x - 3.0).abs() < 1e-6);
        assert_eq!(damped.y, 0.0);
    }

    #[test]
    fn zero_step_skips_the_pass() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let solid = Rect::new(5.0, 5.0, 10.0, 10.0);
        let report = resolve_axis_move(
            rect,
            Vec2::ZERO,
            Vec2::ZERO,
            &[solid],
            None,
            CollisionResponse::Clamp,
        );
        assert_eq!(report.rect(), rect);
        assert!(!report.collided());
    }
}

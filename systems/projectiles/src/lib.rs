#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Straight-line projectiles with ownership and a wall bounce budget.
//!
//! A projectile's direction is fixed when it is launched. Every tick it moves
//! by `direction * speed` and is tested against the full visual rectangles of
//! the walls. While bounces remain, a contact reflects the colliding axis and
//! spends one bounce. Once the budget is gone the next contact marks the
//! projectile doomed; it lingers for the rest of that tick and is removed on
//! the following one.

use glam::Vec2;
use nrogue_core::{bearing, Owner, Rect};
use nrogue_system_movement::{resolve_axis_move, CollisionResponse};

/// Result of advancing a projectile by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved without touching anything.
    Moving,
    /// Rebounded off a wall.
    Bounced {
        /// Bounces still available.
        bounces_left: u32,
    },
    /// Hit a wall with no bounces left; removed on the next tick.
    Doomed,
    /// Must be removed now.
    Despawned,
}

/// Ballistic state of a single projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ballistic {
    rect: Rect,
    direction: Vec2,
    speed: f32,
    owner: Owner,
    damage: u32,
    invulnerable: bool,
    bounces_left: Option<u32>,
    doomed: bool,
    spent: bool,
}

impl Ballistic {
    /// Launches a projectile of `size` centred on `origin`, aimed at `target`.
    #[must_use]
    pub fn launch(
        origin: Vec2,
        target: Vec2,
        size: Vec2,
        speed: f32,
        owner: Owner,
        damage: u32,
    ) -> Self {
        Self {
            rect: Rect::from_center(origin, size),
            direction: bearing(origin, target),
            speed,
            owner,
            damage,
            invulnerable: false,
            bounces_left: None,
            doomed: false,
            spent: false,
        }
    }

    /// Lets the projectile rebound off walls `bounces` times.
    #[must_use]
    pub fn with_bounces(mut self, bounces: u32) -> Self {
        self.bounces_left = Some(bounces);
        self
    }

    /// Keeps the projectile alive after it damages a target.
    #[must_use]
    pub fn piercing(mut self) -> Self {
        self.invulnerable = true;
        self
    }

    /// Current rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Unit direction of travel.
    #[must_use]
    pub const fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Distance travelled per tick.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Side that fired the projectile.
    #[must_use]
    pub const fn owner(&self) -> Owner {
        self.owner
    }

    /// Damage dealt on contact.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Remaining bounce budget; `None` for projectiles that never bounce.
    #[must_use]
    pub const fn bounces_left(&self) -> Option<u32> {
        self.bounces_left
    }

    /// Reports whether the projectile survives hitting a target.
    #[must_use]
    pub const fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    /// Reports whether the projectile will be removed on its next tick.
    #[must_use]
    pub const fn is_doomed(&self) -> bool {
        self.doomed
    }

    /// Reports whether the projectile has been consumed and awaits removal.
    #[must_use]
    pub const fn is_spent(&self) -> bool {
        self.spent
    }

    /// Reports whether the projectile may damage members of `side`.
    #[must_use]
    pub fn threatens(&self, side: Owner) -> bool {
        !self.spent && self.owner != side
    }

    /// Moves the projectile one tick, resolving wall contacts.
    ///
    /// Projectiles leaving `bounds` entirely are despawned immediately.
    pub fn advance(&mut self, walls: &[Rect], bounds: Rect) -> Advance {
        if self.spent {
            return Advance::Despawned;
        }
        if self.doomed {
            self.spent = true;
            return Advance::Despawned;
        }

        let bouncing = matches!(self.bounces_left, Some(left) if left > 0);
        let response = if bouncing {
            CollisionResponse::Reflect
        } else {
            CollisionResponse::Detect
        };
        let velocity = self.direction * self.speed;
        let report = resolve_axis_move(self.rect, velocity, velocity, walls, None, response);
        self.rect = report.rect();

        if !bounds.intersects(&self.rect) {
            self.spent = true;
            return Advance::Despawned;
        }

        if !report.collided() {
            return Advance::Moving;
        }

        match self.bounces_left {
            Some(left) if bouncing => {
                let remaining = left - 1;
                self.bounces_left = Some(remaining);
                if self.speed > 0.0 {
                    self.direction = report.velocity() / self.speed;
                }
                Advance::Bounced {
                    bounces_left: remaining,
                }
            }
            _ => {
                self.doomed = true;
                Advance::Doomed
            }
        }
    }

    /// Applies a hit, returning the damage dealt.
    ///
    /// Non-piercing projectiles are consumed by the hit.
    pub fn strike(&mut self) -> Option<u32> {
        if self.spent {
            return None;
        }
        if !self.invulnerable {
            self.spent = true;
        }
        Some(self.damage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_fixes_a_unit_direction() {
        let ballistic = Ballistic::launch(
            Vec2::ZERO,
            Vec2::new(30.0, 40.0),
            Vec2::splat(10.0),
            5.0,
            Owner::Player,
            1,
        );
        assert!((ballistic.direction().length() - 1.0).abs() < 1e-6);
        assert!((ballistic.direction().x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn friendly_fire_is_impossible() {
        let ballistic = Ballistic::launch(
            Vec2::ZERO,
            Vec2::X,
            Vec2::splat(4.0),
            1.0,
            Owner::Enemy,
            1,
        );
        assert!(ballistic.threatens(Owner::Player));
        assert!(!ballistic.threatens(Owner::Enemy));
    }
}

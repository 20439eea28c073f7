//! Player state: body, health, invincibility window, and inventory.

use glam::Vec2;
use nrogue_core::{PlayerTuning, Rect, SpriteHandle, WeaponKind};

/// Cheats currently active on the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActiveCheats {
    /// Doubled acceleration.
    pub speed: bool,
    /// Movement through solid geometry.
    pub free_move: bool,
    /// Hidden from enemy detection.
    pub invisible: bool,
}

/// Authoritative player record owned by the world.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) rect: Rect,
    pub(crate) collide: Rect,
    pub(crate) velocity: Vec2,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) invincibility: u32,
    pub(crate) score: u32,
    pub(crate) weapon: WeaponKind,
    pub(crate) holds_goal_item: bool,
    pub(crate) alive: bool,
    pub(crate) cheats: ActiveCheats,
    pub(crate) aim: Vec2,
    pub(crate) sprite: SpriteHandle,
    shrink: Vec2,
    invincibility_ticks: u32,
}

impl Player {
    pub(crate) fn new(center: Vec2, sprite: SpriteHandle, tuning: &PlayerTuning) -> Self {
        let rect = Rect::from_center(center, sprite.size());
        let shrink = Vec2::new(tuning.collide_shrink_x, tuning.collide_shrink_y);
        Self {
            rect,
            collide: rect.inflate(-shrink.x, -shrink.y),
            velocity: Vec2::ZERO,
            health: tuning.max_health,
            max_health: tuning.max_health,
            invincibility: 0,
            score: 0,
            weapon: WeaponKind::default(),
            holds_goal_item: false,
            alive: true,
            cheats: ActiveCheats::default(),
            aim: center,
            sprite,
            shrink,
            invincibility_ticks: tuning.invincibility_ticks,
        }
    }

    pub(crate) fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Moves the body so both rectangles stay concentric around `center`.
    pub(crate) fn set_center(&mut self, center: Vec2) {
        self.rect.set_center(center);
        self.collide = self.rect.inflate(-self.shrink.x, -self.shrink.y);
    }

    pub(crate) fn is_invincible(&self) -> bool {
        self.invincibility > 0
    }

    pub(crate) fn is_hurt(&self) -> bool {
        self.health < self.max_health
    }

    /// Counts down the invincibility window.
    pub(crate) fn tick_invincibility(&mut self) {
        self.invincibility = self.invincibility.saturating_sub(1);
    }

    /// Applies damage unless the player is invincible or already down.
    ///
    /// Returns the health left after a hit that landed.
    pub(crate) fn hurt(&mut self, amount: u32) -> Option<u32> {
        if !self.alive || self.is_invincible() || amount == 0 {
            return None;
        }
        self.health = self.health.saturating_sub(amount);
        self.invincibility = self.invincibility_ticks;
        if self.health == 0 {
            self.alive = false;
        }
        Some(self.health)
    }

    /// Restores up to `amount` health, returning what was actually restored.
    pub(crate) fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health - self.health);
        self.health += restored;
        restored
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            rect: self.rect,
            collide: self.collide,
            velocity: self.velocity,
            health: self.health,
            max_health: self.max_health,
            invincibility: self.invincibility,
            score: self.score,
            weapon: self.weapon,
            holds_goal_item: self.holds_goal_item,
            alive: self.alive,
            cheats: self.cheats,
            aim: self.aim,
            sprite: self.sprite,
        }
    }
}

/// Read-only copy of the player's state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Visual rectangle.
    pub rect: Rect,
    /// Rectangle used for blocking and combat.
    pub collide: Rect,
    /// Current velocity.
    pub velocity: Vec2,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Ticks of invincibility left.
    pub invincibility: u32,
    /// Accumulated score.
    pub score: u32,
    /// Weapon in hand.
    pub weapon: WeaponKind,
    /// Whether the player carries the goal item.
    pub holds_goal_item: bool,
    /// Whether the player is still standing.
    pub alive: bool,
    /// Active cheats.
    pub cheats: ActiveCheats,
    /// Last pointer location in world coordinates.
    pub aim: Vec2,
    /// Sprite used to draw the player.
    pub sprite: SpriteHandle,
}

impl PlayerSnapshot {
    /// Centre of the player's body.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

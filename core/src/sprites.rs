//! Logical sprite keys and the asset-resolution seam.
//!
//! The simulation never interprets image data. When it constructs an entity it
//! asks an [`AssetResolver`] for an opaque [`SpriteHandle`] and uses only the
//! reported dimensions to size the entity's rectangle.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical sprite identifiers understood by asset resolvers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpriteKey {
    /// The player character.
    Player,
    /// Square wall piece filling a room corner.
    WallCorner,
    /// Straight wall piece along a room's top edge.
    WallTop,
    /// Straight wall piece along a room's bottom edge.
    WallBottom,
    /// Straight wall piece along a room's left or right edge.
    WallSide,
    /// Ladder leading to the level above.
    LadderUp,
    /// Ladder leading to the level below.
    LadderDown,
    /// Fountain placed in danger rooms.
    Fountain,
    /// Currency cube pickup.
    PickupCube,
    /// Health pickup.
    PickupHealth,
    /// Wandering dummy enemy.
    EnemyDummy,
    /// Charging enemy.
    EnemyCharger,
    /// Ranged enemy.
    EnemyArcher,
    /// Goal crystal guarding the deepest level.
    GoalCrystal,
    /// Projectile fired by the slingshot.
    Pebble,
    /// Projectile fired by archers.
    Arrow,
    /// Fog-of-war veil covering an unexplored room.
    Fog,
}

impl SpriteKey {
    /// Every sprite key in declaration order.
    pub const ALL: [SpriteKey; 17] = [
        SpriteKey::Player,
        SpriteKey::WallCorner,
        SpriteKey::WallTop,
        SpriteKey::WallBottom,
        SpriteKey::WallSide,
        SpriteKey::LadderUp,
        SpriteKey::LadderDown,
        SpriteKey::Fountain,
        SpriteKey::PickupCube,
        SpriteKey::PickupHealth,
        SpriteKey::EnemyDummy,
        SpriteKey::EnemyCharger,
        SpriteKey::EnemyArcher,
        SpriteKey::GoalCrystal,
        SpriteKey::Pebble,
        SpriteKey::Arrow,
        SpriteKey::Fog,
    ];

    /// Dotted key used by asset manifests, e.g. `"pickup.cube"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::WallCorner => "wall.corner",
            Self::WallTop => "wall.top",
            Self::WallBottom => "wall.bottom",
            Self::WallSide => "wall.side",
            Self::LadderUp => "ladder.up",
            Self::LadderDown => "ladder.down",
            Self::Fountain => "static.fountain",
            Self::PickupCube => "pickup.cube",
            Self::PickupHealth => "pickup.hp",
            Self::EnemyDummy => "enemy.dummy",
            Self::EnemyCharger => "enemy.charger",
            Self::EnemyArcher => "enemy.archer",
            Self::GoalCrystal => "goal.crystal",
            Self::Pebble => "projectile.pebble",
            Self::Arrow => "projectile.arrow",
            Self::Fog => "fog",
        }
    }

    /// Parses a dotted manifest key. Unknown keys yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == tag)
    }
}

impl fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque image reference paired with its pixel dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteHandle {
    id: u32,
    width: f32,
    height: f32,
}

impl SpriteHandle {
    /// Creates a handle from an adapter-defined identifier and dimensions.
    #[must_use]
    pub const fn new(id: u32, width: f32, height: f32) -> Self {
        Self { id, width, height }
    }

    /// Adapter-defined identifier of the image.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Pixel dimensions of the image.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Resolves logical sprite keys into opaque handles.
pub trait AssetResolver: fmt::Debug {
    /// Returns the handle registered for `key`.
    fn resolve(&self, key: SpriteKey) -> SpriteHandle;
}

/// Built-in resolver reporting the stock dimensions of every sprite.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardSprites;

impl StandardSprites {
    /// Stock pixel dimensions for `key`.
    #[must_use]
    pub const fn dimensions(key: SpriteKey) -> (f32, f32) {
        match key {
            SpriteKey::Player => (50.0, 60.0),
            SpriteKey::WallCorner => (75.0, 75.0),
            SpriteKey::WallTop | SpriteKey::WallBottom => (150.0, 75.0),
            SpriteKey::WallSide => (75.0, 150.0),
            SpriteKey::LadderUp | SpriteKey::LadderDown => (60.0, 60.0),
            SpriteKey::Fountain => (100.0, 100.0),
            SpriteKey::PickupCube | SpriteKey::PickupHealth => (24.0, 24.0),
            SpriteKey::EnemyDummy => (40.0, 40.0),
            SpriteKey::EnemyCharger => (40.0, 40.0),
            SpriteKey::EnemyArcher => (40.0, 50.0),
            SpriteKey::GoalCrystal => (50.0, 70.0),
            SpriteKey::Pebble => (12.0, 12.0),
            SpriteKey::Arrow => (16.0, 16.0),
            SpriteKey::Fog => (750.0, 600.0),
        }
    }
}

impl AssetResolver for StandardSprites {
    fn resolve(&self, key: SpriteKey) -> SpriteHandle {
        let (width, height) = Self::dimensions(key);
        SpriteHandle::new(key as u32, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_round_trips_through_its_tag() {
        for key in SpriteKey::ALL {
            assert_eq!(SpriteKey::from_tag(key.as_str()), Some(key));
        }
    }

    #[test]
    fn unknown_tags_are_ignored() {
        assert_eq!(SpriteKey::from_tag("pickup.mystery"), None);
    }

    #[test]
    fn standard_sprites_report_stock_dimensions() {
        let handle = StandardSprites.resolve(SpriteKey::Player);
        assert_eq!(handle.size(), Vec2::new(50.0, 60.0));
        assert_eq!(handle.id(), SpriteKey::Player as u32);
    }
}

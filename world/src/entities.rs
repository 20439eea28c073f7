//! Entities living inside a level.

use glam::Vec2;
use nrogue_core::{
    CoverEdges, EnemyId, EnemyKind, PickupId, PickupKind, ProjectileId, Rect, RoomIndex,
    SpriteHandle, StaticId, StaticKind, WallKind, WallSegment,
};
use nrogue_system_ai::Behavior;
use nrogue_system_projectiles::Ballistic;

/// Concentric shrink applied to moving enemies' collision rectangles.
const ENEMY_COLLIDE_SHRINK: f32 = 6.0;

/// Wall piece of a live level with its resolved sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct Wall {
    pub(crate) segment: WallSegment,
    pub(crate) sprite: SpriteHandle,
}

impl Wall {
    /// Geometry produced by the maze generator.
    #[must_use]
    pub const fn segment(&self) -> &WallSegment {
        &self.segment
    }

    /// Visual rectangle, also used for projectile contacts.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.segment.rect()
    }

    /// Rectangle that blocks movement.
    #[must_use]
    pub const fn collide(&self) -> Rect {
        self.segment.collide()
    }

    /// Corner or straight piece.
    #[must_use]
    pub const fn kind(&self) -> WallKind {
        self.segment.kind()
    }

    /// Edges that need a decorative cover.
    #[must_use]
    pub const fn covers(&self) -> CoverEdges {
        self.segment.covers()
    }

    /// Sprite used to draw the piece.
    #[must_use]
    pub const fn sprite(&self) -> SpriteHandle {
        self.sprite
    }
}

/// Room-sized fog veil.
#[derive(Clone, Debug, PartialEq)]
pub struct FogVeil {
    pub(crate) room: RoomIndex,
    pub(crate) rect: Rect,
    pub(crate) sprite: SpriteHandle,
}

impl FogVeil {
    /// Room hidden by the veil.
    #[must_use]
    pub const fn room(&self) -> RoomIndex {
        self.room
    }

    /// Area covered by the veil.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Sprite used to draw the veil.
    #[must_use]
    pub const fn sprite(&self) -> SpriteHandle {
        self.sprite
    }
}

/// Non-moving object such as a ladder or a fountain.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticObject {
    pub(crate) id: StaticId,
    pub(crate) room: RoomIndex,
    pub(crate) kind: StaticKind,
    pub(crate) rect: Rect,
    pub(crate) collide: Rect,
    pub(crate) sprite: SpriteHandle,
}

impl StaticObject {
    pub(crate) fn new(
        id: StaticId,
        room: RoomIndex,
        kind: StaticKind,
        center: Vec2,
        sprite: SpriteHandle,
    ) -> Self {
        let rect = Rect::from_center(center, sprite.size());
        let (shrink_x, shrink_y) = kind.collide_shrink();
        Self {
            id,
            room,
            kind,
            rect,
            collide: rect.inflate(-shrink_x, -shrink_y),
            sprite,
        }
    }

    /// Identifier of the object.
    #[must_use]
    pub const fn id(&self) -> StaticId {
        self.id
    }

    /// Room the object was placed in.
    #[must_use]
    pub const fn room(&self) -> RoomIndex {
        self.room
    }

    /// Kind of the object.
    #[must_use]
    pub const fn kind(&self) -> StaticKind {
        self.kind
    }

    /// Visual rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Blocking rectangle; meaningful only for solid kinds.
    #[must_use]
    pub const fn collide(&self) -> Rect {
        self.collide
    }

    /// Sprite used to draw the object.
    #[must_use]
    pub const fn sprite(&self) -> SpriteHandle {
        self.sprite
    }
}

/// Collectable item.
#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub(crate) id: PickupId,
    pub(crate) room: RoomIndex,
    pub(crate) kind: PickupKind,
    pub(crate) rect: Rect,
    pub(crate) velocity: Vec2,
    pub(crate) sprite: SpriteHandle,
    pub(crate) collected: bool,
}

impl Pickup {
    pub(crate) fn new(
        id: PickupId,
        room: RoomIndex,
        kind: PickupKind,
        center: Vec2,
        sprite: SpriteHandle,
    ) -> Self {
        Self {
            id,
            room,
            kind,
            rect: Rect::from_center(center, sprite.size()),
            velocity: Vec2::ZERO,
            sprite,
            collected: false,
        }
    }

    /// Identifier of the pickup.
    #[must_use]
    pub const fn id(&self) -> PickupId {
        self.id
    }

    /// Room the pickup was placed in.
    #[must_use]
    pub const fn room(&self) -> RoomIndex {
        self.room
    }

    /// Kind of the pickup.
    #[must_use]
    pub const fn kind(&self) -> PickupKind {
        self.kind
    }

    /// Current rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Current drift velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Sprite used to draw the pickup.
    #[must_use]
    pub const fn sprite(&self) -> SpriteHandle {
        self.sprite
    }
}

/// Hostile entity, including the goal crystal.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) room: Option<RoomIndex>,
    pub(crate) rect: Rect,
    pub(crate) collide: Rect,
    pub(crate) velocity: Vec2,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) contact_damage: u32,
    pub(crate) behavior: Behavior,
    pub(crate) sprite: SpriteHandle,
    pub(crate) solved: bool,
    pub(crate) defeated: bool,
}

impl Enemy {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: EnemyId,
        room: Option<RoomIndex>,
        center: Vec2,
        velocity: Vec2,
        health: u32,
        contact_damage: u32,
        behavior: Behavior,
        sprite: SpriteHandle,
    ) -> Self {
        let rect = Rect::from_center(center, sprite.size());
        Self {
            id,
            room,
            rect,
            collide: Self::collide_for(rect, behavior.kind()),
            velocity,
            health,
            max_health: health,
            contact_damage,
            behavior,
            sprite,
            solved: false,
            defeated: false,
        }
    }

    fn collide_for(rect: Rect, kind: EnemyKind) -> Rect {
        match kind {
            EnemyKind::Goal => rect,
            EnemyKind::Dummy | EnemyKind::Charger | EnemyKind::Archer => {
                rect.inflate(-ENEMY_COLLIDE_SHRINK, -ENEMY_COLLIDE_SHRINK)
            }
        }
    }

    /// Re-centres the visual rectangle on a moved collision rectangle.
    pub(crate) fn follow_collide(&mut self, collide: Rect) {
        self.collide = collide;
        self.rect.set_center(collide.center());
    }

    /// Removes up to `amount` health and returns what is left.
    pub(crate) fn damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Identifier of the enemy.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Species of the enemy.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.behavior.kind()
    }

    /// Room the enemy was placed in, if it was placed inside one.
    #[must_use]
    pub const fn room(&self) -> Option<RoomIndex> {
        self.room
    }

    /// Visual rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Rectangle used for blocking and combat.
    #[must_use]
    pub const fn collide(&self) -> Rect {
        self.collide
    }

    /// Current velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Starting health.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Damage dealt to the player on contact.
    #[must_use]
    pub const fn contact_damage(&self) -> u32 {
        self.contact_damage
    }

    /// Behaviour state.
    #[must_use]
    pub const fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Sprite used to draw the enemy.
    #[must_use]
    pub const fn sprite(&self) -> SpriteHandle {
        self.sprite
    }

    /// Reports whether the goal crystal has been shattered.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }
}

/// Projectile in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) ballistic: Ballistic,
    pub(crate) sprite: SpriteHandle,
}

impl Projectile {
    /// Identifier of the projectile.
    #[must_use]
    pub const fn id(&self) -> ProjectileId {
        self.id
    }

    /// Flight state.
    #[must_use]
    pub const fn ballistic(&self) -> &Ballistic {
        &self.ballistic
    }

    /// Current rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.ballistic.rect()
    }

    /// Sprite used to draw the projectile.
    #[must_use]
    pub const fn sprite(&self) -> SpriteHandle {
        self.sprite
    }
}

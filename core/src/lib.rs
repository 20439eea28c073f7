#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the nrogue dungeon crawler.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! carrying resolved player [`Intents`], the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! everything that changed during the tick. Systems are pure functions over the
//! geometry and tag types declared here.

mod geometry;
mod sprites;
mod tuning;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use geometry::{bearing, Rect};
pub use sprites::{AssetResolver, SpriteHandle, SpriteKey, StandardSprites};
pub use tuning::{
    ArcherTuning, ChargerTuning, DummyTuning, GameConfig, GoalTuning, GridTuning, PickupTuning,
    PlacementTuning, PlayerTuning, WeaponTuning,
};

/// Number of logical simulation steps per second of play.
pub const TICKS_PER_SECOND: u32 = 30;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one logical step using the provided intents.
    Tick {
        /// Player input resolved by the adapter for this step.
        intents: Intents,
    },
    /// Spawns an enemy of the requested kind into the live level.
    SpawnEnemy {
        /// Species of the enemy to create.
        kind: EnemyKind,
        /// World-space centre of the new enemy.
        center: Vec2,
    },
    /// Moves the player so their rectangle is centred on the provided point.
    TeleportPlayer {
        /// World-space centre the player should occupy.
        center: Vec2,
    },
}

/// Player input consumed by a single tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intents {
    /// Held movement axes; each component is expected within `-1.0..=1.0`.
    pub move_vector: Vec2,
    /// Pointer location expressed in world coordinates.
    pub aim: Vec2,
    /// Whether the equipped weapon should fire this tick.
    pub fire: bool,
    /// Whether the player attempts to use an overlapping ladder.
    pub interact: bool,
    /// Weapon to equip before any other intent is handled.
    pub weapon_switch: Option<WeaponKind>,
    /// Cheats toggled during this tick.
    pub cheats: CheatToggles,
}

/// Cheat toggles requested during a tick. Each set flag flips its cheat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CheatToggles {
    /// Doubles or restores the player's acceleration.
    pub speed: bool,
    /// Lets the player pass through solid geometry.
    pub free_move: bool,
    /// Hides the player from enemy detection.
    pub invisibility: bool,
    /// Grants the goal item without shattering the crystal.
    pub grant_goal_item: bool,
}

impl CheatToggles {
    /// Reports whether any cheat flag is set.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.speed || self.free_move || self.invisibility || self.grant_goal_item
    }
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation advanced by one step.
    TimeAdvanced {
        /// Index of the step that just completed, starting at one.
        tick: u64,
    },
    /// Announces that a level became live.
    LevelEntered {
        /// Index of the level, starting at one for the topmost floor.
        level: u32,
        /// Direction of travel that led to the level, absent for the first level.
        travel: Option<Travel>,
        /// Whether the level was restored from the cache instead of generated.
        restored: bool,
        /// World-space centre at which the player was placed.
        spawn: Vec2,
    },
    /// Confirms that a level snapshot was written to the cache.
    LevelCached {
        /// Index of the cached level.
        level: u32,
        /// Number of times the level has been written to the cache.
        version: u32,
    },
    /// Announces that the fog veil covering a room was lifted.
    RoomRevealed {
        /// Room whose veil was removed.
        room: RoomIndex,
    },
    /// Reports that the player lost health.
    PlayerDamaged {
        /// Health removed by the hit.
        amount: u32,
        /// Player health after the hit.
        health: u32,
    },
    /// Reports that the player regained health.
    PlayerHealed {
        /// Health restored.
        amount: u32,
        /// Player health after healing.
        health: u32,
    },
    /// Announces that the player's health reached zero.
    PlayerDied,
    /// Reports the player's updated score.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// Confirms that the player consumed a pickup.
    PickupCollected {
        /// Identifier of the consumed pickup.
        pickup: PickupId,
        /// Kind of the consumed pickup.
        kind: PickupKind,
    },
    /// Reports that an enemy lost health.
    EnemyDamaged {
        /// Identifier of the damaged enemy.
        enemy: EnemyId,
        /// Health removed by the hit.
        amount: u32,
        /// Enemy health after the hit.
        health: u32,
    },
    /// Announces that an enemy was defeated and removed.
    EnemyDefeated {
        /// Identifier of the defeated enemy.
        enemy: EnemyId,
        /// Species of the defeated enemy.
        kind: EnemyKind,
    },
    /// Confirms that an enemy was added to the live level.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Species of the enemy.
        kind: EnemyKind,
        /// World-space centre of the enemy.
        center: Vec2,
    },
    /// Confirms that a projectile entered the level.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Side that fired the projectile.
        owner: Owner,
        /// World-space centre at which the projectile spawned.
        origin: Vec2,
        /// Unit direction of travel.
        direction: Vec2,
    },
    /// Reports that a projectile rebounded off solid geometry.
    ProjectileBounced {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Bounces the projectile may still perform.
        bounces_left: u32,
    },
    /// Announces that a projectile left the level.
    ProjectileDespawned {
        /// Identifier of the removed projectile.
        projectile: ProjectileId,
    },
    /// Reports a laser discharge.
    LaserFired {
        /// Muzzle position.
        start: Vec2,
        /// Point at which the beam was stopped.
        end: Vec2,
        /// Enemy struck by the beam, if any.
        hit: Option<EnemyId>,
    },
    /// Announces that the goal crystal shattered and the player holds the goal item.
    GoalShattered {
        /// Identifier of the crystal.
        enemy: EnemyId,
    },
    /// Confirms that the player equipped a weapon.
    WeaponEquipped {
        /// Weapon now in hand.
        weapon: WeaponKind,
    },
    /// Reports a cheat toggle.
    CheatToggled {
        /// Cheat that changed.
        cheat: Cheat,
        /// Whether the cheat is now active.
        enabled: bool,
    },
    /// Reports that an interact intent was ignored.
    InteractRejected {
        /// Reason the interaction failed.
        reason: InteractRejection,
    },
    /// Announces that the run was completed.
    RunCompleted {
        /// Final score.
        score: u32,
        /// Step at which the run completed.
        tick: u64,
    },
    /// Requests that the audio collaborator play a cue.
    SoundCue {
        /// Cue to play.
        cue: SoundCue,
    },
}

/// Reasons an interact intent may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractRejection {
    /// The player is not standing on any ladder.
    NoLadderInReach,
    /// The top-level exit requires the goal item.
    GoalItemMissing,
    /// The run already finished.
    RunAlreadyCompleted,
    /// The player has been defeated.
    PlayerDefeated,
    /// The destination level could not be generated.
    GenerationFailed,
}

/// Cheats the player may toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cheat {
    /// Doubled acceleration.
    Speed,
    /// Movement through solid geometry.
    FreeMove,
    /// Hidden from enemy detection.
    Invisibility,
    /// Goal item granted outright.
    GoalItem,
}

/// Audio cues emitted by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Score increased after collecting currency.
    ScoreUp,
}

impl SoundCue {
    /// Logical key understood by audio collaborators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SoundCue::ScoreUp => "score_up",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall progress of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    /// The player is exploring.
    Active,
    /// The player escaped with the goal item.
    Completed,
    /// The player's health reached zero.
    Defeated,
}

/// Direction of travel between adjacent levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Travel {
    /// Moving towards a larger level index.
    Descend,
    /// Moving towards a smaller level index.
    Ascend,
}

/// Weapons available to the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Fires pebbles towards the aim point.
    #[default]
    Slingshot,
    /// Hitscan beam that strikes the nearest enemy on its line.
    LaserGun,
}

/// Side responsible for a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Fired by the player; damages enemies.
    Player,
    /// Fired by an enemy; damages the player.
    Enemy,
}

/// Identity of a room inside a level, equal to its row-major grid index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomIndex(u32);

impl RoomIndex {
    /// Creates a new room index with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pickup within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a static object within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaticId(u32);

impl StaticId {
    /// Creates a new static identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Role assigned to a room during generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomRole {
    /// First room carved; holds the up ladder.
    Start,
    /// Room holding the down ladder.
    Exit,
    /// Room with optional random content.
    Regular,
    /// Room holding a cluster of currency.
    Treasure,
    /// Room holding a hazard and stronger enemies.
    Danger,
    /// Exit substitute on the deepest level holding the goal crystal.
    Crystal,
}

impl RoomRole {
    /// Canonical tag of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RoomRole::Start => "start",
            RoomRole::Exit => "exit",
            RoomRole::Regular => "regular",
            RoomRole::Treasure => "treasure",
            RoomRole::Danger => "danger",
            RoomRole::Crystal => "crystal",
        }
    }

    /// Parses a role tag, returning `None` for unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "start" => Some(RoomRole::Start),
            "exit" => Some(RoomRole::Exit),
            "regular" => Some(RoomRole::Regular),
            "treasure" => Some(RoomRole::Treasure),
            "danger" => Some(RoomRole::Danger),
            "crystal" => Some(RoomRole::Crystal),
            _ => None,
        }
    }
}

impl fmt::Display for RoomRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sides of a room or wall piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Edge with the smallest y coordinate.
    Top,
    /// Edge with the largest x coordinate.
    Right,
    /// Edge with the largest y coordinate.
    Bottom,
    /// Edge with the smallest x coordinate.
    Left,
}

impl Side {
    /// Every side in clockwise order starting at the top.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Side facing this one across a shared edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

/// Shape class of a wall piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    /// Square piece at a room corner.
    Corner,
    /// Straight piece along a room edge.
    Straight,
}

/// Edges of a wall piece that need a decorative cover overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoverEdges {
    /// Cover along the top edge.
    pub top: bool,
    /// Cover along the right edge.
    pub right: bool,
    /// Cover along the bottom edge.
    pub bottom: bool,
    /// Cover along the left edge.
    pub left: bool,
}

impl CoverEdges {
    /// Reports whether the edge on `side` needs a cover.
    #[must_use]
    pub const fn on(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Marks whether the edge on `side` needs a cover.
    pub fn set(&mut self, side: Side, needed: bool) {
        match side {
            Side::Top => self.top = needed,
            Side::Right => self.right = needed,
            Side::Bottom => self.bottom = needed,
            Side::Left => self.left = needed,
        }
    }

    /// Number of covered edges.
    #[must_use]
    pub fn count(&self) -> usize {
        Side::ALL.iter().filter(|side| self.on(**side)).count()
    }
}

/// Single wall piece placed around a room.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    rect: Rect,
    collide: Rect,
    kind: WallKind,
    side: Side,
    covers: CoverEdges,
}

impl WallSegment {
    /// Horizontal shrink applied to derive a wall's collision rectangle.
    pub const COLLIDE_SHRINK_X: f32 = 20.0;
    /// Vertical shrink applied to derive a wall's collision rectangle.
    pub const COLLIDE_SHRINK_Y: f32 = 30.0;
    /// Upward shift applied to the collision rectangle.
    pub const COLLIDE_LIFT: f32 = 5.0;

    /// Creates a wall piece, deriving its collision rectangle from `rect`.
    #[must_use]
    pub fn new(rect: Rect, kind: WallKind, side: Side) -> Self {
        let collide = rect
            .inflate(-Self::COLLIDE_SHRINK_X, -Self::COLLIDE_SHRINK_Y)
            .translated(Vec2::new(0.0, -Self::COLLIDE_LIFT));
        Self {
            rect,
            collide,
            kind,
            side,
            covers: CoverEdges::default(),
        }
    }

    /// Visual rectangle of the piece, also used for projectile collisions.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Narrower rectangle that blocks movement.
    #[must_use]
    pub const fn collide(&self) -> Rect {
        self.collide
    }

    /// Shape class of the piece.
    #[must_use]
    pub const fn kind(&self) -> WallKind {
        self.kind
    }

    /// Room side the piece belongs to. Corners report the side they were laid with.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Edges that need a decorative cover.
    #[must_use]
    pub const fn covers(&self) -> CoverEdges {
        self.covers
    }

    /// Replaces the decorative cover flags.
    pub fn set_covers(&mut self, covers: CoverEdges) {
        self.covers = covers;
    }

    /// Sprite used to draw the piece.
    #[must_use]
    pub const fn sprite(&self) -> SpriteKey {
        match (self.kind, self.side) {
            (WallKind::Corner, _) => SpriteKey::WallCorner,
            (WallKind::Straight, Side::Top) => SpriteKey::WallTop,
            (WallKind::Straight, Side::Bottom) => SpriteKey::WallBottom,
            (WallKind::Straight, Side::Left | Side::Right) => SpriteKey::WallSide,
        }
    }
}

/// Direction a ladder leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LadderDirection {
    /// Leads to the level above, or out of the dungeon from the top level.
    Up,
    /// Leads to the level below.
    Down,
}

impl LadderDirection {
    /// Ladder found at the far end of the trip.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            LadderDirection::Up => LadderDirection::Down,
            LadderDirection::Down => LadderDirection::Up,
        }
    }

    /// Travel direction taken by climbing this ladder.
    #[must_use]
    pub const fn travel(self) -> Travel {
        match self {
            LadderDirection::Up => Travel::Ascend,
            LadderDirection::Down => Travel::Descend,
        }
    }
}

/// Kinds of static objects placed in rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaticKind {
    /// Level-transition trigger. Never blocks movement.
    Ladder(LadderDirection),
    /// Danger-room hazard that blocks movement.
    Fountain,
}

impl StaticKind {
    /// Reports whether the object blocks movement.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, StaticKind::Ladder(_))
    }

    /// Shrink applied to derive the collision rectangle.
    #[must_use]
    pub const fn collide_shrink(self) -> (f32, f32) {
        match self {
            StaticKind::Ladder(_) => (0.0, 0.0),
            StaticKind::Fountain => (20.0, 6.0),
        }
    }

    /// Sprite used to draw the object.
    #[must_use]
    pub const fn sprite(self) -> SpriteKey {
        match self {
            StaticKind::Ladder(LadderDirection::Up) => SpriteKey::LadderUp,
            StaticKind::Ladder(LadderDirection::Down) => SpriteKey::LadderDown,
            StaticKind::Fountain => SpriteKey::Fountain,
        }
    }
}

/// Kinds of pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Currency that raises the score.
    Cube,
    /// Restores health while the player is hurt.
    Health,
}

impl PickupKind {
    /// Canonical tag of the pickup kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PickupKind::Cube => "cube",
            PickupKind::Health => "hp",
        }
    }

    /// Parses a pickup tag, returning `None` for unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cube" => Some(PickupKind::Cube),
            "hp" => Some(PickupKind::Health),
            _ => None,
        }
    }

    /// Sprite used to draw the pickup.
    #[must_use]
    pub const fn sprite(self) -> SpriteKey {
        match self {
            PickupKind::Cube => SpriteKey::PickupCube,
            PickupKind::Health => SpriteKey::PickupHealth,
        }
    }
}

/// Enemy species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Bounces around at constant velocity.
    Dummy,
    /// Seeks and accelerates towards the player.
    Charger,
    /// Keeps its distance and shoots arrows.
    Archer,
    /// Stationary crystal holding the goal item.
    Goal,
}

impl EnemyKind {
    /// Sprite used to draw the enemy.
    #[must_use]
    pub const fn sprite(self) -> SpriteKey {
        match self {
            EnemyKind::Dummy => SpriteKey::EnemyDummy,
            EnemyKind::Charger => SpriteKey::EnemyCharger,
            EnemyKind::Archer => SpriteKey::EnemyArcher,
            EnemyKind::Goal => SpriteKey::GoalCrystal,
        }
    }
}

/// Request to place a static object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticSpawn {
    /// Kind of object.
    pub kind: StaticKind,
    /// World-space centre.
    pub center: Vec2,
}

/// Request to place a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PickupSpawn {
    /// Kind of pickup.
    pub kind: PickupKind,
    /// World-space centre.
    pub center: Vec2,
}

/// Request to place an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Species of the enemy.
    pub kind: EnemyKind,
    /// World-space centre.
    pub center: Vec2,
}

//! Live container of a single dungeon floor.

use glam::Vec2;
use nrogue_core::{
    AssetResolver, EnemyId, EnemyKind, GameConfig, LadderDirection, PickupId, ProjectileId,
    Rect, RoomIndex, RoomRole, SpriteHandle, SpriteKey, StaticId, StaticKind,
};
use nrogue_system_ai::EntityAi;
use nrogue_system_features::FeaturePlacer;
use nrogue_system_maze::{GenerationError, MazeGenerator};
use nrogue_system_projectiles::Ballistic;
use rand::Rng;

use crate::entities::{Enemy, FogVeil, Pickup, Projectile, StaticObject, Wall};

/// Room of a live level.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    index: RoomIndex,
    rect: Rect,
    role: RoomRole,
    revealed: bool,
}

impl Room {
    /// Row-major index of the room.
    #[must_use]
    pub const fn index(&self) -> RoomIndex {
        self.index
    }

    /// Area covered by the room, walls included.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Role assigned during generation.
    #[must_use]
    pub const fn role(&self) -> RoomRole {
        self.role
    }

    /// Whether the player has entered the room.
    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }
}

/// Shared collaborators needed to populate a level.
pub(crate) struct Builders<'a> {
    pub(crate) config: &'a GameConfig,
    pub(crate) generator: &'a MazeGenerator,
    pub(crate) placer: &'a FeaturePlacer,
    pub(crate) ai: &'a EntityAi,
    pub(crate) assets: &'a dyn AssetResolver,
}

/// Every room, wall, and entity of one floor.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Level {
    pub(crate) index: u32,
    pub(crate) bounds: Rect,
    pub(crate) rooms: Vec<Room>,
    pub(crate) walls: Vec<Wall>,
    pub(crate) statics: Vec<StaticObject>,
    pub(crate) pickups: Vec<Pickup>,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) fog: Vec<FogVeil>,
    pub(crate) up_ladder: StaticId,
    pub(crate) down_ladder: Option<StaticId>,
    pub(crate) goal: Option<EnemyId>,
    next_id: u32,
}

impl Level {
    /// Generates and populates floor `index` from `rng`.
    pub(crate) fn generate<R>(
        index: u32,
        builders: &Builders<'_>,
        rng: &mut R,
    ) -> Result<Self, GenerationError>
    where
        R: Rng + ?Sized,
    {
        let final_floor = index >= builders.config.depth;
        let maze = builders.generator.generate(rng, final_floor)?;
        let bounds = maze.bounds();

        let mut level = Self {
            index,
            bounds,
            rooms: Vec::with_capacity(maze.rooms().len()),
            walls: Vec::new(),
            statics: Vec::new(),
            pickups: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            fog: Vec::new(),
            up_ladder: StaticId::new(0),
            down_ladder: None,
            goal: None,
            next_id: 0,
        };

        let fog_sprite = builders.assets.resolve(SpriteKey::Fog);
        let mut up_ladder = None;
        for layout in maze.into_rooms() {
            let room = layout.index();
            level.walls.extend(layout.walls().map(|segment| Wall {
                segment: *segment,
                sprite: builders.assets.resolve(segment.sprite()),
            }));
            level.rooms.push(Room {
                index: room,
                rect: layout.rect(),
                role: layout.role(),
                revealed: false,
            });

            let features = builders.placer.assign(layout.rect(), layout.role(), rng);
            level.fog.push(FogVeil {
                room,
                rect: features.fog,
                sprite: fog_sprite,
            });
            for spawn in features.statics {
                let id = level.add_static(room, spawn.kind, spawn.center, builders.assets);
                match spawn.kind {
                    StaticKind::Ladder(LadderDirection::Up) => up_ladder = Some(id),
                    StaticKind::Ladder(LadderDirection::Down) => level.down_ladder = Some(id),
                    StaticKind::Fountain => {}
                }
            }
            for spawn in features.pickups {
                let id = PickupId::new(level.allocate_id());
                let sprite = builders.assets.resolve(spawn.kind.sprite());
                level
                    .pickups
                    .push(Pickup::new(id, room, spawn.kind, spawn.center, sprite));
            }
            for spawn in features.enemies {
                let id = level.spawn_enemy(spawn.kind, spawn.center, Some(room), builders, rng);
                if spawn.kind == EnemyKind::Goal {
                    level.goal = Some(id);
                }
            }
        }

        level.up_ladder = up_ladder.ok_or(GenerationError::MissingRole(RoomRole::Start))?;
        if !final_floor && level.down_ladder.is_none() {
            return Err(GenerationError::MissingRole(RoomRole::Exit));
        }
        if final_floor && level.goal.is_none() {
            return Err(GenerationError::MissingRole(RoomRole::Crystal));
        }
        Ok(level)
    }

    fn allocate_id(&mut self) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    fn add_static(
        &mut self,
        room: RoomIndex,
        kind: StaticKind,
        center: Vec2,
        assets: &dyn AssetResolver,
    ) -> StaticId {
        let id = StaticId::new(self.allocate_id());
        let sprite = assets.resolve(kind.sprite());
        self.statics
            .push(StaticObject::new(id, room, kind, center, sprite));
        id
    }

    /// Adds an enemy of `kind` centred on `center`.
    pub(crate) fn spawn_enemy<R>(
        &mut self,
        kind: EnemyKind,
        center: Vec2,
        room: Option<RoomIndex>,
        builders: &Builders<'_>,
        rng: &mut R,
    ) -> EnemyId
    where
        R: Rng + ?Sized,
    {
        let config = builders.config;
        let (health, contact_damage) = match kind {
            EnemyKind::Dummy => (config.dummy.health, config.dummy.contact_damage),
            EnemyKind::Charger => (config.charger.health, config.charger.contact_damage),
            EnemyKind::Archer => (config.archer.health, config.archer.contact_damage),
            EnemyKind::Goal => (config.goal.health, 0),
        };
        let id = EnemyId::new(self.allocate_id());
        let velocity = builders.ai.initial_velocity(kind, rng);
        let sprite = builders.assets.resolve(kind.sprite());
        self.enemies.push(Enemy::new(
            id,
            room,
            center,
            velocity,
            health.max(1),
            contact_damage,
            builders.ai.spawn(kind),
            sprite,
        ));
        id
    }

    /// Adds a projectile and returns its identifier.
    pub(crate) fn launch(&mut self, ballistic: Ballistic, sprite: SpriteHandle) -> ProjectileId {
        let id = ProjectileId::new(self.allocate_id());
        self.projectiles.push(Projectile {
            id,
            ballistic,
            sprite,
        });
        id
    }

    /// Rectangles that block movement.
    pub(crate) fn solids(&self) -> Vec<Rect> {
        self.walls
            .iter()
            .map(Wall::collide)
            .chain(
                self.statics
                    .iter()
                    .filter(|object| object.kind.is_solid())
                    .map(|object| object.collide),
            )
            .collect()
    }

    /// Full wall rectangles used for projectile contacts.
    pub(crate) fn wall_rects(&self) -> Vec<Rect> {
        self.walls.iter().map(Wall::rect).collect()
    }

    pub(crate) fn room_at(&self, point: Vec2) -> Option<RoomIndex> {
        self.rooms
            .iter()
            .find(|room| room.rect.contains_point(point))
            .map(|room| room.index)
    }

    pub(crate) fn static_object(&self, id: StaticId) -> Option<&StaticObject> {
        self.statics.iter().find(|object| object.id == id)
    }

    pub(crate) fn reveal(&mut self, room: RoomIndex) {
        if let Some(entry) = self.rooms.iter_mut().find(|entry| entry.index == room) {
            entry.revealed = true;
        }
    }
}

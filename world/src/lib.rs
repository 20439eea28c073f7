#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the nrogue dungeon crawler.
//!
//! The [`World`] owns the live level, the cache of departed levels, and the
//! player. Adapters mutate it exclusively through [`apply`] and read it back
//! through the [`query`] module. Within a tick, intents are applied first,
//! then the player moves, pickups seek, enemies decide and move, projectiles
//! advance, contacts with the player resolve, and fog lifts. Removals are
//! deferred to a sweep at the end of the tick.

mod cache;
mod config;
mod entities;
mod level;
mod player;
mod seeds;
mod weapons;

use std::mem;

use glam::Vec2;
use nrogue_core::{
    bearing, AssetResolver, Cheat, CheatToggles, Command, EnemyKind, Event, GameConfig,
    InteractRejection, Intents, LadderDirection, Owner, PickupKind, RunStatus, SoundCue,
    SpriteKey, StandardSprites, StaticKind, Travel, WeaponKind,
};
use nrogue_system_ai::{EntityAi, Perception};
use nrogue_system_features::FeaturePlacer;
use nrogue_system_maze::MazeGenerator;
use nrogue_system_movement::{apply_damping, resolve_axis_move, CollisionResponse};
use nrogue_system_projectiles::{Advance, Ballistic};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

pub use cache::CachedLevel;
pub use config::{validate, ConfigError};
pub use entities::{Enemy, FogVeil, Pickup, Projectile, StaticObject, Wall};
pub use level::Room;
pub use player::{ActiveCheats, PlayerSnapshot};
pub use weapons::LaserTrace;

use cache::LevelCache;
use level::{Builders, Level};
use player::Player;

/// Index of the topmost floor.
const FIRST_LEVEL: u32 = 1;

/// Represents the authoritative dungeon state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    assets: Box<dyn AssetResolver>,
    generator: MazeGenerator,
    placer: FeaturePlacer,
    ai: EntityAi,
    level: Level,
    cache: LevelCache,
    player: Player,
    rng: ChaCha8Rng,
    tick_index: u64,
    status: RunStatus,
    pending: Vec<Event>,
}

impl World {
    /// Creates a world using the stock sprite dimensions.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_assets(config, Box::new(StandardSprites))
    }

    /// Creates a world whose entities are sized by `assets`.
    ///
    /// The first level is generated immediately and the player is placed on
    /// its up ladder. Announcements for that level are delivered together
    /// with the events of the first applied command.
    pub fn with_assets(
        config: GameConfig,
        assets: Box<dyn AssetResolver>,
    ) -> Result<Self, ConfigError> {
        config::validate(&config)?;

        let generator = MazeGenerator::new(config.grid.clone());
        let placer = FeaturePlacer::new(config.placement.clone());
        let ai = EntityAi::new(
            config.dummy.clone(),
            config.charger.clone(),
            config.archer.clone(),
        );

        let level = {
            let builders = Builders {
                config: &config,
                generator: &generator,
                placer: &placer,
                ai: &ai,
                assets: assets.as_ref(),
            };
            let mut rng = seeds::level_rng(&config, FIRST_LEVEL);
            Level::generate(FIRST_LEVEL, &builders, &mut rng)?
        };

        let spawn = level
            .static_object(level.up_ladder)
            .map_or(level.bounds.center(), |ladder| ladder.rect.center());
        let player = Player::new(spawn, assets.resolve(SpriteKey::Player), &config.player);

        let mut cache = LevelCache::new();
        let version = cache.store(level.clone());
        info!(level = FIRST_LEVEL, seed = config.seed, "entered level");

        Ok(Self {
            rng: seeds::simulation_rng(&config),
            config,
            assets,
            generator,
            placer,
            ai,
            level,
            cache,
            player,
            tick_index: 0,
            status: RunStatus::Active,
            pending: vec![
                Event::LevelCached {
                    level: FIRST_LEVEL,
                    version,
                },
                Event::LevelEntered {
                    level: FIRST_LEVEL,
                    travel: None,
                    restored: false,
                    spawn,
                },
            ],
        })
    }

    fn builders(&self) -> Builders<'_> {
        Builders {
            config: &self.config,
            generator: &self.generator,
            placer: &self.placer,
            ai: &self.ai,
            assets: self.assets.as_ref(),
        }
    }

    fn tick(&mut self, intents: &Intents, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        if self.status == RunStatus::Completed {
            if intents.interact {
                reject(InteractRejection::RunAlreadyCompleted, out_events);
            }
            return;
        }

        if self.player.alive {
            if self.apply_intents(intents, out_events) {
                return;
            }
        } else if intents.interact {
            reject(InteractRejection::PlayerDefeated, out_events);
        }

        self.move_player();
        self.update_pickups();
        self.update_enemies(out_events);
        self.update_projectiles(out_events);
        self.resolve_player_contacts(out_events);
        self.reveal_fog(out_events);
        self.sweep(out_events);
    }

    /// Applies the player's intents. Returns `true` when the level changed.
    fn apply_intents(&mut self, intents: &Intents, out_events: &mut Vec<Event>) -> bool {
        if let Some(weapon) = intents.weapon_switch {
            if weapon != self.player.weapon {
                self.player.weapon = weapon;
                out_events.push(Event::WeaponEquipped { weapon });
            }
        }
        self.toggle_cheats(intents.cheats, out_events);
        self.player.aim = intents.aim;

        let mut acceleration = self.config.player.acceleration;
        if self.player.cheats.speed {
            acceleration *= 2.0;
        }
        self.player.velocity += intents.move_vector * acceleration;

        if intents.fire {
            self.fire_weapon(out_events);
        }
        if intents.interact {
            return self.interact(out_events);
        }
        false
    }

    fn toggle_cheats(&mut self, toggles: CheatToggles, out_events: &mut Vec<Event>) {
        if !toggles.any() {
            return;
        }
        let cheats = &mut self.player.cheats;
        let flips = [
            (toggles.speed, Cheat::Speed, &mut cheats.speed),
            (toggles.free_move, Cheat::FreeMove, &mut cheats.free_move),
            (
                toggles.invisibility,
                Cheat::Invisibility,
                &mut cheats.invisible,
            ),
        ];
        for (requested, cheat, flag) in flips {
            if requested {
                *flag = !*flag;
                debug!(?cheat, enabled = *flag, "cheat toggled");
                out_events.push(Event::CheatToggled {
                    cheat,
                    enabled: *flag,
                });
            }
        }

        // Granting is one-way; the goal item is never taken back.
        if toggles.grant_goal_item {
            self.player.holds_goal_item = true;
            debug!(cheat = ?Cheat::GoalItem, "goal item granted");
            out_events.push(Event::CheatToggled {
                cheat: Cheat::GoalItem,
                enabled: true,
            });
        }
    }

    fn fire_weapon(&mut self, out_events: &mut Vec<Event>) {
        let center = self.player.center();
        let aim = self.player.aim;
        let tuning = &self.config.weapons;
        let origin = weapons::muzzle(center, aim, tuning.muzzle_offset);
        let target = origin + bearing(center, aim);

        match self.player.weapon {
            WeaponKind::Slingshot => {
                let sprite = self.assets.resolve(SpriteKey::Pebble);
                let ballistic = Ballistic::launch(
                    origin,
                    target,
                    sprite.size(),
                    tuning.pebble_speed,
                    Owner::Player,
                    tuning.pebble_damage,
                );
                let direction = ballistic.direction();
                let projectile = self.level.launch(ballistic, sprite);
                out_events.push(Event::ProjectileFired {
                    projectile,
                    owner: Owner::Player,
                    origin,
                    direction,
                });
            }
            WeaponKind::LaserGun => {
                let damage = tuning.laser_damage;
                let trace = weapons::cast_laser(&self.level, origin, target, tuning.laser_range);
                out_events.push(Event::LaserFired {
                    start: trace.start,
                    end: trace.end,
                    hit: trace.hit,
                });
                let player = &mut self.player;
                if let Some(enemy) = self
                    .level
                    .enemies
                    .iter_mut()
                    .find(|enemy| Some(enemy.id) == trace.hit)
                {
                    strike_enemy(enemy, damage, player, out_events);
                }
            }
        }
    }

    /// Uses the ladder under the player. Returns `true` when the level changed.
    fn interact(&mut self, out_events: &mut Vec<Event>) -> bool {
        let collide = self.player.collide;
        let ladder = self
            .level
            .statics
            .iter()
            .filter(|object| object.rect.intersects(&collide))
            .find_map(|object| match object.kind {
                StaticKind::Ladder(direction) => Some(direction),
                StaticKind::Fountain => None,
            });

        let Some(direction) = ladder else {
            reject(InteractRejection::NoLadderInReach, out_events);
            return false;
        };

        let current = self.level.index;
        match direction {
            LadderDirection::Up if current <= FIRST_LEVEL => {
                if self.player.holds_goal_item {
                    self.status = RunStatus::Completed;
                    info!(
                        score = self.player.score,
                        tick = self.tick_index,
                        "run completed"
                    );
                    out_events.push(Event::RunCompleted {
                        score: self.player.score,
                        tick: self.tick_index,
                    });
                } else {
                    reject(InteractRejection::GoalItemMissing, out_events);
                }
                false
            }
            LadderDirection::Up => self.transition(current - 1, direction.travel(), out_events),
            LadderDirection::Down => {
                self.transition(current.saturating_add(1), direction.travel(), out_events)
            }
        }
    }

    /// Swaps the live level for `target`, caching the departed one.
    fn transition(&mut self, target: u32, travel: Travel, out_events: &mut Vec<Event>) -> bool {
        let (next, restored) = match self.cache.restore(target) {
            Some(level) => {
                debug!(level = target, "restored level from cache");
                (level, true)
            }
            None => {
                let mut rng = seeds::level_rng(&self.config, target);
                let generated = Level::generate(target, &self.builders(), &mut rng);
                match generated {
                    Ok(level) => {
                        let version = self.cache.store(level.clone());
                        debug!(level = target, version, "cached generated level");
                        out_events.push(Event::LevelCached {
                            level: target,
                            version,
                        });
                        (level, false)
                    }
                    Err(err) => {
                        error!(level = target, error = %err, "level generation failed");
                        reject(InteractRejection::GenerationFailed, out_events);
                        return false;
                    }
                }
            }
        };

        let departed = mem::replace(&mut self.level, next);
        let departed_index = departed.index;
        let version = self.cache.store(departed);
        debug!(level = departed_index, version, "cached departed level");
        out_events.push(Event::LevelCached {
            level: departed_index,
            version,
        });

        let arrival = match travel {
            Travel::Descend => Some(self.level.up_ladder),
            Travel::Ascend => self.level.down_ladder,
        };
        let spawn = match arrival.and_then(|id| self.level.static_object(id)) {
            Some(ladder) => ladder.rect.center(),
            None => {
                warn!(level = target, ?travel, "arrival ladder missing, using the up ladder");
                self.level
                    .static_object(self.level.up_ladder)
                    .map_or(self.level.bounds.center(), |ladder| ladder.rect.center())
            }
        };
        self.player.set_center(spawn);
        self.player.velocity = Vec2::ZERO;

        info!(level = target, ?travel, restored, "entered level");
        out_events.push(Event::LevelEntered {
            level: target,
            travel: Some(travel),
            restored,
            spawn,
        });
        true
    }

    fn move_player(&mut self) {
        let solids = if self.player.cheats.free_move {
            Vec::new()
        } else {
            self.level.solids()
        };
        let velocity = self.player.velocity;
        let report = resolve_axis_move(
            self.player.collide,
            velocity,
            velocity,
            &solids,
            Some(self.level.bounds),
            CollisionResponse::Clamp,
        );
        self.player.set_center(report.rect().center());
        let tuning = &self.config.player;
        self.player.velocity =
            apply_damping(report.velocity(), tuning.damping, tuning.rest_threshold);
    }

    fn update_pickups(&mut self) {
        let tuning = &self.config.pickups;
        let target = self.player.center();
        let alive = self.player.alive;
        let hurt = self.player.is_hurt();
        let radius = tuning.seek_radius * tuning.seek_radius;

        for pickup in &mut self.level.pickups {
            let seeks = alive
                && match pickup.kind {
                    PickupKind::Cube => true,
                    PickupKind::Health => hurt,
                };
            let center = pickup.rect.center();
            if seeks && center.distance_squared(target) < radius {
                pickup.velocity += bearing(center, target);
            } else {
                pickup.velocity *= tuning.idle_decay;
            }
            pickup.rect.translate(pickup.velocity * tuning.seek_step);
        }
    }

    fn update_enemies(&mut self, out_events: &mut Vec<Event>) {
        let solids = self.level.solids();
        let bounds = self.level.bounds;
        let player_center = self.player.center();
        let player_invisible = self.player.cheats.invisible || !self.player.alive;

        let mut fire_requests = Vec::new();
        for enemy in self.level.enemies.iter_mut().filter(|enemy| !enemy.defeated) {
            let perception = Perception {
                enemy_center: enemy.rect.center(),
                player_center,
                player_invisible,
            };
            let decision =
                self.ai
                    .step(&mut enemy.behavior, enemy.velocity, &perception, &mut self.rng);
            enemy.velocity = decision.velocity;

            let response = match enemy.kind() {
                EnemyKind::Dummy => Some(CollisionResponse::Reflect),
                EnemyKind::Charger | EnemyKind::Archer => Some(CollisionResponse::Clamp),
                EnemyKind::Goal => None,
            };
            if let Some(response) = response {
                let report = resolve_axis_move(
                    enemy.collide,
                    enemy.velocity,
                    enemy.velocity,
                    &solids,
                    Some(bounds),
                    response,
                );
                enemy.velocity = report.velocity();
                enemy.follow_collide(report.rect());
            }
            if let Some(request) = decision.fire {
                fire_requests.push(request);
            }
        }

        let tuning = &self.config.archer;
        let sprite = self.assets.resolve(SpriteKey::Arrow);
        for request in fire_requests {
            let ballistic = Ballistic::launch(
                request.origin,
                request.target,
                sprite.size(),
                tuning.arrow_speed,
                Owner::Enemy,
                tuning.arrow_damage,
            )
            .with_bounces(tuning.arrow_bounces);
            let direction = ballistic.direction();
            let projectile = self.level.launch(ballistic, sprite);
            out_events.push(Event::ProjectileFired {
                projectile,
                owner: Owner::Enemy,
                origin: request.origin,
                direction,
            });
        }

        let player = &mut self.player;
        for enemy in self
            .level
            .enemies
            .iter_mut()
            .filter(|enemy| !enemy.defeated && !enemy.solved)
        {
            for projectile in &mut self.level.projectiles {
                if !projectile.ballistic.threatens(Owner::Enemy)
                    || !projectile.rect().intersects(&enemy.collide)
                {
                    continue;
                }
                if let Some(damage) = projectile.ballistic.strike() {
                    strike_enemy(enemy, damage, player, out_events);
                }
                if enemy.defeated || enemy.solved {
                    break;
                }
            }
        }
    }

    fn update_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let walls = self.level.wall_rects();
        let bounds = self.level.bounds;
        for projectile in &mut self.level.projectiles {
            match projectile.ballistic.advance(&walls, bounds) {
                Advance::Bounced { bounces_left } => {
                    out_events.push(Event::ProjectileBounced {
                        projectile: projectile.id,
                        bounces_left,
                    });
                }
                Advance::Moving | Advance::Doomed | Advance::Despawned => {}
            }
        }
    }

    fn resolve_player_contacts(&mut self, out_events: &mut Vec<Event>) {
        self.player.tick_invincibility();
        if !self.player.alive {
            return;
        }

        let collide = self.player.collide;
        let contact = self
            .level
            .enemies
            .iter()
            .filter(|enemy| !enemy.defeated && enemy.kind() != EnemyKind::Goal)
            .find(|enemy| enemy.rect.intersects(&collide))
            .map(|enemy| enemy.contact_damage);
        if let Some(damage) = contact {
            hurt_player(&mut self.player, &mut self.status, damage, out_events);
        }

        for projectile in &mut self.level.projectiles {
            if !projectile.ballistic.threatens(Owner::Player)
                || !projectile.rect().intersects(&collide)
            {
                continue;
            }
            if let Some(damage) = projectile.ballistic.strike() {
                hurt_player(&mut self.player, &mut self.status, damage, out_events);
            }
        }

        if !self.player.alive {
            return;
        }
        let tuning = &self.config.pickups;
        for pickup in &mut self.level.pickups {
            if pickup.collected || !pickup.rect.intersects(&collide) {
                continue;
            }
            match pickup.kind {
                PickupKind::Cube => {
                    self.player.score = self.player.score.saturating_add(tuning.cube_value);
                    out_events.push(Event::ScoreChanged {
                        score: self.player.score,
                    });
                    out_events.push(Event::SoundCue {
                        cue: SoundCue::ScoreUp,
                    });
                }
                PickupKind::Health => {
                    if !self.player.is_hurt() {
                        continue;
                    }
                    let amount = self.player.heal(tuning.heal_amount);
                    out_events.push(Event::PlayerHealed {
                        amount,
                        health: self.player.health,
                    });
                }
            }
            pickup.collected = true;
            out_events.push(Event::PickupCollected {
                pickup: pickup.id,
                kind: pickup.kind,
            });
        }
    }

    fn reveal_fog(&mut self, out_events: &mut Vec<Event>) {
        let rect = self.player.rect;
        let mut revealed = Vec::new();
        self.level.fog.retain(|veil| {
            if veil.rect.intersects(&rect) {
                revealed.push(veil.room);
                false
            } else {
                true
            }
        });
        for room in revealed {
            self.level.reveal(room);
            out_events.push(Event::RoomRevealed { room });
        }
    }

    fn sweep(&mut self, out_events: &mut Vec<Event>) {
        for enemy in self.level.enemies.iter().filter(|enemy| enemy.defeated) {
            out_events.push(Event::EnemyDefeated {
                enemy: enemy.id,
                kind: enemy.kind(),
            });
        }
        self.level.enemies.retain(|enemy| !enemy.defeated);

        for projectile in self
            .level
            .projectiles
            .iter()
            .filter(|projectile| projectile.ballistic.is_spent())
        {
            out_events.push(Event::ProjectileDespawned {
                projectile: projectile.id,
            });
        }
        self.level
            .projectiles
            .retain(|projectile| !projectile.ballistic.is_spent());

        self.level.pickups.retain(|pickup| !pickup.collected);
    }
}

fn reject(reason: InteractRejection, out_events: &mut Vec<Event>) {
    out_events.push(Event::InteractRejected { reason });
}

/// Applies `amount` damage to `enemy`; the goal crystal shatters instead of dying.
fn strike_enemy(enemy: &mut Enemy, amount: u32, player: &mut Player, out_events: &mut Vec<Event>) {
    if enemy.defeated || enemy.solved {
        return;
    }
    let before = enemy.health;
    let health = enemy.damage(amount);
    out_events.push(Event::EnemyDamaged {
        enemy: enemy.id,
        amount: before - health,
        health,
    });
    if health > 0 {
        return;
    }
    match enemy.kind() {
        EnemyKind::Goal => {
            enemy.solved = true;
            player.holds_goal_item = true;
            info!(enemy = enemy.id.get(), "goal crystal shattered");
            out_events.push(Event::GoalShattered { enemy: enemy.id });
        }
        EnemyKind::Dummy | EnemyKind::Charger | EnemyKind::Archer => enemy.defeated = true,
    }
}

fn hurt_player(
    player: &mut Player,
    status: &mut RunStatus,
    amount: u32,
    out_events: &mut Vec<Event>,
) {
    let before = player.health;
    let Some(health) = player.hurt(amount) else {
        return;
    };
    out_events.push(Event::PlayerDamaged {
        amount: before - health,
        health,
    });
    if health == 0 {
        *status = RunStatus::Defeated;
        info!("player defeated");
        out_events.push(Event::PlayerDied);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    out_events.append(&mut world.pending);
    match command {
        Command::Tick { intents } => world.tick(&intents, out_events),
        Command::SpawnEnemy { kind, center } => {
            let room = world.level.room_at(center);
            let builders = Builders {
                config: &world.config,
                generator: &world.generator,
                placer: &world.placer,
                ai: &world.ai,
                assets: world.assets.as_ref(),
            };
            let enemy = world
                .level
                .spawn_enemy(kind, center, room, &builders, &mut world.rng);
            debug!(enemy = enemy.get(), ?kind, "enemy spawned on request");
            out_events.push(Event::EnemySpawned {
                enemy,
                kind,
                center,
            });
        }
        Command::TeleportPlayer { center } => {
            world.player.set_center(center);
            world.player.velocity = Vec2::ZERO;
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{
        weapons, CachedLevel, Enemy, FogVeil, LaserTrace, Pickup, PlayerSnapshot, Projectile,
        Room, StaticObject, Wall, World,
    };
    use nrogue_core::{bearing, AssetResolver, EnemyId, GameConfig, Rect, RunStatus, WeaponKind};

    /// Index of the live level, starting at one for the topmost floor.
    #[must_use]
    pub fn level_index(world: &World) -> u32 {
        world.level.index
    }

    /// Index of the deepest level.
    #[must_use]
    pub fn depth(world: &World) -> u32 {
        world.config.depth
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Copy of the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Overall progress of the run.
    #[must_use]
    pub fn status(world: &World) -> RunStatus {
        world.status
    }

    /// Rooms of the live level in row-major order.
    #[must_use]
    pub fn rooms(world: &World) -> &[Room] {
        &world.level.rooms
    }

    /// Wall segments of the live level.
    #[must_use]
    pub fn walls(world: &World) -> &[Wall] {
        &world.level.walls
    }

    /// Ladders and other static objects of the live level.
    #[must_use]
    pub fn statics(world: &World) -> &[StaticObject] {
        &world.level.statics
    }

    /// Uncollected pickups of the live level.
    #[must_use]
    pub fn pickups(world: &World) -> &[Pickup] {
        &world.level.pickups
    }

    /// Enemies of the live level, the goal crystal included.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.level.enemies
    }

    /// Looks up a single enemy of the live level.
    #[must_use]
    pub fn enemy(world: &World, id: EnemyId) -> Option<&Enemy> {
        world.level.enemies.iter().find(|enemy| enemy.id == id)
    }

    /// Projectiles in flight on the live level.
    #[must_use]
    pub fn projectiles(world: &World) -> &[Projectile] {
        &world.level.projectiles
    }

    /// Fog veils still covering rooms of the live level.
    #[must_use]
    pub fn fog(world: &World) -> &[FogVeil] {
        &world.level.fog
    }

    /// Ladder leading towards the surface.
    #[must_use]
    pub fn up_ladder(world: &World) -> Option<&StaticObject> {
        world.level.static_object(world.level.up_ladder)
    }

    /// Ladder leading deeper, absent on the deepest level.
    #[must_use]
    pub fn down_ladder(world: &World) -> Option<&StaticObject> {
        world
            .level
            .down_ladder
            .and_then(|id| world.level.static_object(id))
    }

    /// Goal crystal, present only on the deepest level.
    #[must_use]
    pub fn goal(world: &World) -> Option<&Enemy> {
        world.level.goal.and_then(|id| enemy(world, id))
    }

    /// Area enclosing every room of the live level.
    #[must_use]
    pub fn bounds(world: &World) -> Rect {
        world.level.bounds
    }

    /// Levels held by the cache and their write counts.
    #[must_use]
    pub fn cached_levels(world: &World) -> Vec<CachedLevel> {
        world.cache.summary()
    }

    /// Reports whether level `index` has been cached.
    #[must_use]
    pub fn is_cached(world: &World, index: u32) -> bool {
        world.cache.contains(index)
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Resolver used to size entities.
    #[must_use]
    pub fn assets(world: &World) -> &dyn AssetResolver {
        world.assets.as_ref()
    }

    /// Beam the laser would draw if fired now; `None` unless it is equipped.
    #[must_use]
    pub fn laser_sight(world: &World) -> Option<LaserTrace> {
        if world.player.weapon != WeaponKind::LaserGun {
            return None;
        }
        let center = world.player.center();
        let aim = world.player.aim;
        let tuning = &world.config.weapons;
        let origin = weapons::muzzle(center, aim, tuning.muzzle_offset);
        Some(weapons::cast_laser(
            &world.level,
            origin,
            origin + bearing(center, aim),
            tuning.laser_range,
        ))
    }
}

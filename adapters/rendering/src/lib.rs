#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation contracts shared by dungeon front-ends.
//!
//! Adapters capture a [`Scene`] from the world once per frame, translate raw
//! device state into [`Intents`] through [`FrameInput`], and forward sound cues
//! to an [`AudioSink`]. Nothing here mutates the world.

mod manifest;
mod viewport;

use glam::Vec2;
use nrogue_core::{
    CheatToggles, EnemyId, EnemyKind, Event, Intents, Rect, RunStatus, SoundCue,
    SpriteHandle, WeaponKind,
};
use nrogue_world::{query, World};

pub use manifest::SpriteManifest;
pub use viewport::Viewport;

/// Pointer distance within which a charger exposes its health meter.
pub const METER_POINTER_RADIUS: f32 = 250.0;

const OPAQUE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const INVINCIBLE_TINT: Color = OPAQUE.with_alpha(0.5);
const SOLVED_TINT: Color = Color::new(0.55, 0.6, 0.7, 1.0);

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Returns the same color with a replaced alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Draw layers, ordered back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Wall segments.
    Wall,
    /// Ladders and fountains.
    Static,
    /// Cubes and health potions.
    Pickup,
    /// Enemies including the goal crystal.
    Enemy,
    /// Pebbles and arrows in flight.
    Projectile,
    /// The player avatar.
    Player,
    /// Veils over unexplored rooms.
    Fog,
}

/// Single sprite placed on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSprite {
    /// Layer the sprite belongs to.
    pub layer: Layer,
    /// Resolved asset to draw.
    pub sprite: SpriteHandle,
    /// Destination rectangle in screen coordinates.
    pub rect: Rect,
    /// Color multiplied into the sprite.
    pub tint: Color,
}

/// Player statistics shown by the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    /// Current health.
    pub health: u32,
    /// Health ceiling.
    pub max_health: u32,
    /// Accumulated score.
    pub score: u32,
    /// Index of the live level.
    pub level: u32,
    /// World-space centre of the player.
    pub position: Vec2,
    /// Weapon in hand.
    pub weapon: WeaponKind,
    /// Whether the goal item has been obtained.
    pub holds_goal_item: bool,
    /// Progress of the run.
    pub status: RunStatus,
}

/// Laser sight drawn while the laser gun is equipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaserLine {
    /// Muzzle position in screen coordinates.
    pub start: Vec2,
    /// Point where the beam stops, in screen coordinates.
    pub end: Vec2,
}

/// Health bar drawn above a charger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthMeter {
    /// Charger the meter belongs to.
    pub enemy: EnemyId,
    /// Screen rectangle of the charger.
    pub anchor: Rect,
    /// Remaining health.
    pub health: u32,
    /// Health at spawn.
    pub max_health: u32,
}

impl HealthMeter {
    /// Remaining health as a fraction of the maximum.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }
}

/// Everything a front-end needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Sprites in draw order.
    pub sprites: Vec<SceneSprite>,
    /// Heads-up display contents.
    pub hud: Hud,
    /// Laser sight, present while the laser gun is equipped.
    pub laser: Option<LaserLine>,
    /// Charger health bars currently exposed.
    pub health_meters: Vec<HealthMeter>,
}

impl Scene {
    /// Captures the visible part of the world as seen through `viewport`.
    #[must_use]
    pub fn capture(world: &World, viewport: &Viewport) -> Self {
        let player = query::player(world);
        let mut sprites = Vec::new();
        let mut place = |layer: Layer, sprite: SpriteHandle, rect: Rect, tint: Color| {
            if viewport.is_visible(&rect) {
                sprites.push(SceneSprite {
                    layer,
                    sprite,
                    rect: viewport.project(rect),
                    tint,
                });
            }
        };

        for wall in query::walls(world) {
            place(Layer::Wall, wall.sprite(), wall.rect(), OPAQUE);
        }
        for object in query::statics(world) {
            place(Layer::Static, object.sprite(), object.rect(), OPAQUE);
        }
        for pickup in query::pickups(world) {
            place(Layer::Pickup, pickup.sprite(), pickup.rect(), OPAQUE);
        }
        for enemy in query::enemies(world) {
            let tint = if enemy.is_solved() {
                SOLVED_TINT
            } else {
                OPAQUE
            };
            place(Layer::Enemy, enemy.sprite(), enemy.rect(), tint);
        }
        for projectile in query::projectiles(world) {
            place(
                Layer::Projectile,
                projectile.sprite(),
                projectile.rect(),
                OPAQUE,
            );
        }
        let player_tint = if player.invincibility > 0 {
            INVINCIBLE_TINT
        } else {
            OPAQUE
        };
        place(Layer::Player, player.sprite, player.rect, player_tint);
        for veil in query::fog(world) {
            place(Layer::Fog, veil.sprite(), veil.rect(), OPAQUE);
        }

        let seek_range = query::config(world).charger.seek_range;
        let health_meters = query::enemies(world)
            .iter()
            .filter(|enemy| enemy.kind() == EnemyKind::Charger)
            .filter(|enemy| {
                let center = enemy.rect().center();
                viewport.is_targeted(center, METER_POINTER_RADIUS)
                    || center.distance_squared(player.center()) < seek_range * seek_range
            })
            .map(|enemy| HealthMeter {
                enemy: enemy.id(),
                anchor: viewport.project(enemy.rect()),
                health: enemy.health(),
                max_health: enemy.max_health(),
            })
            .collect();

        let laser = query::laser_sight(world).map(|trace| LaserLine {
            start: viewport.world_to_screen(trace.start),
            end: viewport.world_to_screen(trace.end),
        });

        Self {
            sprites,
            hud: Hud {
                health: player.health,
                max_health: player.max_health,
                score: player.score,
                level: query::level_index(world),
                position: player.center(),
                weapon: player.weapon,
                holds_goal_item: player.holds_goal_item,
                status: query::status(world),
            },
            laser,
            health_meters,
        }
    }

    /// Iterates over the sprites belonging to a single layer.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &SceneSprite> + '_ {
        self.sprites
            .iter()
            .filter(move |sprite| sprite.layer == layer)
    }
}

/// Device state sampled by a front-end for one frame.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether the upward movement key is held.
    pub move_up: bool,
    /// Whether the downward movement key is held.
    pub move_down: bool,
    /// Whether the leftward movement key is held.
    pub move_left: bool,
    /// Whether the rightward movement key is held.
    pub move_right: bool,
    /// Pointer position in screen coordinates.
    pub pointer: Option<Vec2>,
    /// Whether the fire button was pressed this frame.
    pub fire: bool,
    /// Whether the interact key was pressed this frame.
    pub interact: bool,
    /// Weapon selected this frame, if any.
    pub weapon_switch: Option<WeaponKind>,
    /// Cheat keys pressed this frame.
    pub cheats: CheatToggles,
}

impl FrameInput {
    /// Translates the frame into simulation intents.
    ///
    /// Without a pointer the player aims at the centre of the screen.
    #[must_use]
    pub fn to_intents(&self, viewport: &Viewport) -> Intents {
        let move_vector = Vec2::new(
            axis(self.move_left, self.move_right),
            axis(self.move_up, self.move_down),
        );
        let aim = self.pointer.map_or_else(
            || viewport.world_rect().center(),
            |pointer| viewport.screen_to_world(pointer),
        );

        Intents {
            move_vector,
            aim,
            fire: self.fire,
            interact: self.interact,
            weapon_switch: self.weapon_switch,
            cheats: self.cheats,
        }
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    f32::from(u8::from(positive)) - f32::from(u8::from(negative))
}

/// Collaborator able to play logical sound cues.
pub trait AudioSink {
    /// Plays the provided cue.
    fn play(&mut self, cue: SoundCue);
}

/// Forwards every sound cue found in `events` to the sink, returning how many were played.
pub fn forward_sound_cues<S: AudioSink + ?Sized>(events: &[Event], sink: &mut S) -> usize {
    let mut played = 0;
    for event in events {
        if let Event::SoundCue { cue } = event {
            sink.play(*cue);
            played += 1;
        }
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;
    use nrogue_core::{Command, GameConfig, PickupKind};
    use nrogue_world as world;

    fn viewport_for(world: &World) -> Viewport {
        let mut viewport = Viewport::new(1920.0, 1080.0);
        viewport.follow(query::player(world).center(), query::bounds(world));
        viewport
    }

    fn spawn(world: &mut World, kind: EnemyKind, center: Vec2) -> EnemyId {
        let mut events = Vec::new();
        world::apply(world, Command::SpawnEnemy { kind, center }, &mut events);
        events
            .iter()
            .find_map(|event| match event {
                Event::EnemySpawned { enemy, .. } => Some(*enemy),
                _ => None,
            })
            .expect("enemy spawned")
    }

    #[test]
    fn walls_are_drawn_with_the_handles_resolved_at_generation() {
        let manifest = SpriteManifest::parse(
            r#"
            version = 1

            [sprites."wall.corner"]
            width = 75
            height = 75
            id = 4242
            "#,
        )
        .expect("manifest parses");
        let world = World::with_assets(GameConfig::default(), Box::new(manifest))
            .expect("valid");

        let corners: Vec<SpriteHandle> = query::walls(&world)
            .iter()
            .filter(|wall| wall.kind() == nrogue_core::WallKind::Corner)
            .map(|wall| wall.sprite())
            .collect();
        assert!(!corners.is_empty());
        assert!(corners.iter().all(|sprite| sprite.id() == 4242));

        let scene = Scene::capture(&world, &viewport_for(&world));
        assert!(scene
            .layer(Layer::Wall)
            .any(|sprite| sprite.sprite.id() == 4242));
    }

    #[test]
    fn the_player_fades_while_invincible() {
        let mut world = World::new(GameConfig::default()).expect("valid");
        let center = query::player(&world).center();
        let _ = spawn(&mut world, EnemyKind::Charger, center);
        let mut hit = false;
        for _ in 0..5 {
            let mut events = Vec::new();
            world::apply(
                &mut world,
                Command::Tick {
                    intents: Intents::default(),
                },
                &mut events,
            );
            if events
                .iter()
                .any(|event| matches!(event, Event::PlayerDamaged { .. }))
            {
                hit = true;
                break;
            }
        }
        assert!(hit, "charger touching the player deals damage");
        assert!(query::player(&world).invincibility > 0);

        let scene = Scene::capture(&world, &viewport_for(&world));
        let player = scene.layer(Layer::Player).next().expect("player drawn");
        assert_eq!(player.tint, OPAQUE.with_alpha(0.5));
    }

    #[test]
    fn sprites_are_captured_back_to_front_with_fog_last() {
        let world = World::new(GameConfig::default()).expect("valid");
        let scene = Scene::capture(&world, &viewport_for(&world));

        assert!(scene
            .sprites
            .windows(2)
            .all(|pair| pair[0].layer <= pair[1].layer));
        assert_eq!(scene.layer(Layer::Player).count(), 1);
        assert!(scene.layer(Layer::Wall).count() > 0);
        assert_eq!(scene.hud.level, 1);
        assert_eq!(scene.hud.health, scene.hud.max_health);
        assert_eq!(scene.hud.weapon, WeaponKind::Slingshot);
        assert!(scene.laser.is_none());
    }

    #[test]
    fn offscreen_sprites_are_culled_and_visible_ones_projected() {
        let world = World::new(GameConfig::default()).expect("valid");
        let viewport = viewport_for(&world);
        let scene = Scene::capture(&world, &viewport);
        let screen = Rect::new(0.0, 0.0, 1920.0, 1080.0);

        assert!(scene
            .sprites
            .iter()
            .all(|sprite| sprite.rect.intersects(&screen)));
        let player = scene.layer(Layer::Player).next().expect("player drawn");
        assert_eq!(player.rect, viewport.project(query::player(&world).rect));
    }

    #[test]
    fn laser_sight_follows_the_equipped_weapon() {
        let mut world = World::new(GameConfig::default()).expect("valid");
        let mut events = Vec::new();
        let aim = query::player(&world).center() + Vec2::new(100.0, 0.0);
        world::apply(
            &mut world,
            Command::Tick {
                intents: Intents {
                    weapon_switch: Some(WeaponKind::LaserGun),
                    aim,
                    ..Intents::default()
                },
            },
            &mut events,
        );

        let viewport = viewport_for(&world);
        let scene = Scene::capture(&world, &viewport);
        let laser = scene.laser.expect("laser sight while the laser is equipped");
        let trace = query::laser_sight(&world).expect("laser trace");
        assert_eq!(laser.start, viewport.world_to_screen(trace.start));
        assert_eq!(scene.hud.weapon, WeaponKind::LaserGun);
    }

    #[test]
    fn charger_meters_appear_near_the_player_or_the_pointer() {
        let mut world = World::new(GameConfig::default()).expect("valid");
        let player = query::player(&world).center();
        let seek_range = query::config(&world).charger.seek_range;
        let near = spawn(&mut world, EnemyKind::Charger, player + Vec2::new(60.0, 0.0));
        let far_center = player + Vec2::new(seek_range + 200.0, 0.0);
        let far = spawn(&mut world, EnemyKind::Charger, far_center);

        let mut viewport = viewport_for(&world);
        let scene = Scene::capture(&world, &viewport);
        let exposed: Vec<EnemyId> = scene.health_meters.iter().map(|meter| meter.enemy).collect();
        assert!(exposed.contains(&near));
        assert!(!exposed.contains(&far));
        assert!(scene
            .health_meters
            .iter()
            .all(|meter| (meter.fraction() - 1.0).abs() < f32::EPSILON));

        viewport.set_pointer(Some(viewport.world_to_screen(far_center)));
        let scene = Scene::capture(&world, &viewport);
        assert!(scene.health_meters.iter().any(|meter| meter.enemy == far));
    }

    #[test]
    fn frame_input_maps_keys_and_pointer_into_intents() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.follow(Vec2::new(1000.0, 1000.0), Rect::new(0.0, 0.0, 3750.0, 3000.0));

        let input = FrameInput {
            move_up: true,
            move_right: true,
            move_left: true,
            pointer: Some(Vec2::new(10.0, 20.0)),
            fire: true,
            ..FrameInput::default()
        };
        let intents = input.to_intents(&viewport);
        assert_eq!(intents.move_vector, Vec2::new(0.0, -1.0));
        assert_eq!(intents.aim, Vec2::new(610.0, 720.0));
        assert!(intents.fire);
        assert!(!intents.interact);

        let idle = FrameInput::default().to_intents(&viewport);
        assert_eq!(idle.aim, Vec2::new(1000.0, 1000.0));
        assert_eq!(idle.move_vector, Vec2::ZERO);
    }

    #[derive(Default)]
    struct RecordingSink {
        played: Vec<SoundCue>,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, cue: SoundCue) {
            self.played.push(cue);
        }
    }

    #[test]
    fn only_sound_cues_reach_the_audio_sink() {
        let events = vec![
            Event::TimeAdvanced { tick: 1 },
            Event::ScoreChanged { score: 1 },
            Event::SoundCue {
                cue: SoundCue::ScoreUp,
            },
            Event::PickupCollected {
                pickup: nrogue_core::PickupId::new(0),
                kind: PickupKind::Cube,
            },
        ];
        let mut sink = RecordingSink::default();
        assert_eq!(forward_sound_cues(&events, &mut sink), 1);
        assert_eq!(sink.played, vec![SoundCue::ScoreUp]);
    }
}

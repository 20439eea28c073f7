#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Populates generated rooms with ladders, pickups, enemies, and fog.
//!
//! Placement is a pure function of the room rectangle, its role, and the RNG
//! stream handed in by the caller, so replaying a level seed reproduces the
//! same content.

use glam::Vec2;
use nrogue_core::{
    EnemyKind, EnemySpawn, LadderDirection, PickupKind, PickupSpawn, PlacementTuning, Rect,
    RoomRole, StaticKind, StaticSpawn,
};
use rand::Rng;
use tracing::debug;

/// Content assigned to a single room.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomFeatures {
    /// Static objects such as ladders and hazards.
    pub statics: Vec<StaticSpawn>,
    /// Pickups scattered through the room.
    pub pickups: Vec<PickupSpawn>,
    /// Enemies guarding the room.
    pub enemies: Vec<EnemySpawn>,
    /// Fog veil hiding the room until the player enters it.
    pub fog: Rect,
}

impl RoomFeatures {
    /// Features of a room that holds nothing but its fog veil.
    #[must_use]
    pub fn veiled(room: Rect) -> Self {
        Self {
            statics: Vec::new(),
            pickups: Vec::new(),
            enemies: Vec::new(),
            fog: room,
        }
    }
}

/// Places role-specific content inside rooms.
#[derive(Clone, Debug)]
pub struct FeaturePlacer {
    tuning: PlacementTuning,
}

impl FeaturePlacer {
    /// Creates a placer driven by the provided tuning.
    #[must_use]
    pub fn new(tuning: PlacementTuning) -> Self {
        Self { tuning }
    }

    /// Builds the complete feature set for a room with the given role.
    ///
    /// The result replaces whatever the room held before.
    pub fn assign<R>(&self, room: Rect, role: RoomRole, rng: &mut R) -> RoomFeatures
    where
        R: Rng + ?Sized,
    {
        let mut features = RoomFeatures::veiled(room);
        match role {
            RoomRole::Start => features.statics.push(StaticSpawn {
                kind: StaticKind::Ladder(LadderDirection::Up),
                center: self.anchor_point(room, rng),
            }),
            RoomRole::Exit => features.statics.push(StaticSpawn {
                kind: StaticKind::Ladder(LadderDirection::Down),
                center: self.anchor_point(room, rng),
            }),
            RoomRole::Crystal => features.enemies.push(EnemySpawn {
                kind: EnemyKind::Goal,
                center: self.anchor_point(room, rng),
            }),
            RoomRole::Treasure => self.place_treasure(room, rng, &mut features),
            RoomRole::Danger => self.place_danger(room, rng, &mut features),
            RoomRole::Regular => self.place_regular(room, rng, &mut features),
        }

        debug!(
            role = %role,
            statics = features.statics.len(),
            pickups = features.pickups.len(),
            enemies = features.enemies.len(),
            "placed room features"
        );
        features
    }

    /// Same as [`FeaturePlacer::assign`] but keyed by a role tag.
    ///
    /// Unknown tags leave the room with only its fog veil.
    pub fn assign_tag<R>(&self, room: Rect, tag: &str, rng: &mut R) -> RoomFeatures
    where
        R: Rng + ?Sized,
    {
        match RoomRole::from_tag(tag) {
            Some(role) => self.assign(room, role, rng),
            None => {
                debug!(tag, "ignoring unknown room role");
                RoomFeatures::veiled(room)
            }
        }
    }

    fn place_treasure<R>(&self, room: Rect, rng: &mut R, features: &mut RoomFeatures)
    where
        R: Rng + ?Sized,
    {
        let center = self.anchor_point(room, rng);
        let count = sample_count(rng, self.tuning.treasure_min, self.tuning.treasure_max);
        let jitter = self.tuning.treasure_jitter;
        for _ in 0..count {
            let offset = Vec2::new(sample_offset(rng, jitter), sample_offset(rng, jitter));
            features.pickups.push(PickupSpawn {
                kind: PickupKind::Cube,
                center: center + offset,
            });
        }
    }

    fn place_danger<R>(&self, room: Rect, rng: &mut R, features: &mut RoomFeatures)
    where
        R: Rng + ?Sized,
    {
        features.statics.push(StaticSpawn {
            kind: StaticKind::Fountain,
            center: room.center(),
        });

        let center = self.anchor_point(room, rng);
        let kinds: &[EnemyKind] = if rng.gen_bool(0.5) {
            &[EnemyKind::Charger, EnemyKind::Archer]
        } else if rng.gen_bool(0.5) {
            &[EnemyKind::Charger]
        } else {
            &[EnemyKind::Archer]
        };
        features
            .enemies
            .extend(kinds.iter().map(|kind| EnemySpawn { kind: *kind, center }));
    }

    fn place_regular<R>(&self, room: Rect, rng: &mut R, features: &mut RoomFeatures)
    where
        R: Rng + ?Sized,
    {
        let chance = self.tuning.regular_content_chance.clamp(0.0, 1.0);
        if !rng.gen_bool(chance) {
            return;
        }

        let pickups = sample_count(
            rng,
            self.tuning.regular_pickups_min,
            self.tuning.regular_pickups_max,
        );
        for _ in 0..pickups {
            let kind = if weighted_first(rng, self.tuning.health_weight, self.tuning.cube_weight) {
                PickupKind::Health
            } else {
                PickupKind::Cube
            };
            features.pickups.push(PickupSpawn {
                kind,
                center: self.scatter_point(room, rng),
            });
        }

        let enemies = sample_count(
            rng,
            self.tuning.regular_enemies_min,
            self.tuning.regular_enemies_max,
        );
        for _ in 0..enemies {
            let kind = if weighted_first(rng, self.tuning.dummy_weight, self.tuning.archer_weight) {
                EnemyKind::Dummy
            } else {
                EnemyKind::Archer
            };
            features.enemies.push(EnemySpawn {
                kind,
                center: self.scatter_point(room, rng),
            });
        }
    }

    fn anchor_point<R>(&self, room: Rect, rng: &mut R) -> Vec2
    where
        R: Rng + ?Sized,
    {
        inset_point(room, self.tuning.anchor_inset, rng)
    }

    fn scatter_point<R>(&self, room: Rect, rng: &mut R) -> Vec2
    where
        R: Rng + ?Sized,
    {
        inset_point(room, self.tuning.scatter_inset, rng)
    }
}

/// Uniformly random point at least `inset` away from every edge of `room`.
///
/// Rooms too small for the inset collapse onto their centre along that axis.
pub fn inset_point<R>(room: Rect, inset: f32, rng: &mut R) -> Vec2
where
    R: Rng + ?Sized,
{
    Vec2::new(
        sample_axis(rng, room.left() + inset, room.right() - inset, room.center().x),
        sample_axis(rng, room.top() + inset, room.bottom() - inset, room.center().y),
    )
}

fn sample_axis<R>(rng: &mut R, low: f32, high: f32, fallback: f32) -> f32
where
    R: Rng + ?Sized,
{
    if low < high {
        rng.gen_range(low..=high)
    } else {
        fallback
    }
}

fn sample_offset<R>(rng: &mut R, jitter: f32) -> f32
where
    R: Rng + ?Sized,
{
    if jitter > 0.0 {
        rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    }
}

fn sample_count<R>(rng: &mut R, min: u32, max: u32) -> u32
where
    R: Rng + ?Sized,
{
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

fn weighted_first<R>(rng: &mut R, first: u32, second: u32) -> bool
where
    R: Rng + ?Sized,
{
    let total = first.saturating_add(second);
    if total == 0 {
        return false;
    }
    rng.gen_range(0..total) < first
}

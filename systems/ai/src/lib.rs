#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-species enemy decision logic.
//!
//! Each enemy carries a [`Behavior`] value holding whatever state its species
//! needs between ticks. [`EntityAi::step`] inspects the enemy and the player,
//! mutates that state, and returns the velocity the enemy should move with
//! plus an optional request to fire. Movement and collision are resolved by the
//! caller. Every range check compares squared distances.

use glam::Vec2;
use nrogue_core::{bearing, ArcherTuning, ChargerTuning, DummyTuning, EnemyKind};
use nrogue_system_movement::apply_damping;
use rand::Rng;
use rand_distr::{Distribution, Triangular};

/// Idle velocity components below this snap to zero.
pub const REST_THRESHOLD: f32 = 0.05;

/// Behaviour state attached to an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    /// Keeps its velocity and bounces off walls.
    Dummy,
    /// Seeks the player and accelerates while closing in.
    Charger(ChargerState),
    /// Backs away from the player and shoots.
    Archer(ArcherState),
    /// Never moves.
    Goal,
}

impl Behavior {
    /// Reports the species the behaviour belongs to.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        match self {
            Behavior::Dummy => EnemyKind::Dummy,
            Behavior::Charger(_) => EnemyKind::Charger,
            Behavior::Archer(_) => EnemyKind::Archer,
            Behavior::Goal => EnemyKind::Goal,
        }
    }
}

/// Charger state carried between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChargerState {
    heading: f32,
    speed: f32,
}

impl ChargerState {
    /// Current heading in radians.
    #[must_use]
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// Current speed scalar.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }
}

/// Archer state carried between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcherState {
    heading: f32,
    cooldown: u32,
}

impl ArcherState {
    /// Current heading in radians.
    #[must_use]
    pub const fn heading(&self) -> f32 {
        self.heading
    }

    /// Ticks left before the next shot.
    #[must_use]
    pub const fn cooldown(&self) -> u32 {
        self.cooldown
    }
}

/// What an enemy knows about its surroundings this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perception {
    /// Centre of the deciding enemy.
    pub enemy_center: Vec2,
    /// Centre of the player.
    pub player_center: Vec2,
    /// Whether the player is hidden from detection.
    pub player_invisible: bool,
}

impl Perception {
    fn distance_squared(&self) -> f32 {
        self.enemy_center.distance_squared(self.player_center)
    }
}

/// Request to launch a projectile from `origin` towards `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireRequest {
    /// Point the projectile leaves from.
    pub origin: Vec2,
    /// Point the projectile is aimed at.
    pub target: Vec2,
}

/// Outcome of a single decision step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    /// Velocity the enemy should move with this tick.
    pub velocity: Vec2,
    /// Projectile the enemy wants to fire, if any.
    pub fire: Option<FireRequest>,
}

/// Decision maker for every enemy species.
#[derive(Clone, Debug)]
pub struct EntityAi {
    dummy: DummyTuning,
    charger: ChargerTuning,
    archer: ArcherTuning,
}

impl EntityAi {
    /// Creates the decision maker from species tunings.
    #[must_use]
    pub fn new(dummy: DummyTuning, charger: ChargerTuning, archer: ArcherTuning) -> Self {
        Self {
            dummy,
            charger,
            archer,
        }
    }

    /// Fresh behaviour state for a newly spawned enemy of `kind`.
    #[must_use]
    pub fn spawn(&self, kind: EnemyKind) -> Behavior {
        match kind {
            EnemyKind::Dummy => Behavior::Dummy,
            EnemyKind::Charger => Behavior::Charger(ChargerState {
                heading: 0.0,
                speed: self.charger.base_speed,
            }),
            EnemyKind::Archer => Behavior::Archer(ArcherState {
                heading: 0.0,
                cooldown: self.archer.fire_interval,
            }),
            EnemyKind::Goal => Behavior::Goal,
        }
    }

    /// Velocity a newly spawned enemy of `kind` starts with.
    pub fn initial_velocity<R>(&self, kind: EnemyKind, rng: &mut R) -> Vec2
    where
        R: Rng + ?Sized,
    {
        match kind {
            EnemyKind::Dummy => Vec2::new(
                sample_speed(rng, self.dummy.min_speed_x, self.dummy.max_speed_x),
                sample_speed(rng, self.dummy.min_speed_y, self.dummy.max_speed_y),
            ),
            EnemyKind::Charger | EnemyKind::Archer | EnemyKind::Goal => Vec2::ZERO,
        }
    }

    /// Advances `behavior` by one tick and returns the resulting decision.
    pub fn step<R>(
        &self,
        behavior: &mut Behavior,
        velocity: Vec2,
        perception: &Perception,
        rng: &mut R,
    ) -> Decision
    where
        R: Rng + ?Sized,
    {
        match behavior {
            Behavior::Dummy => Decision {
                velocity,
                fire: None,
            },
            Behavior::Charger(state) => Decision {
                velocity: self.step_charger(state, velocity, perception, rng),
                fire: None,
            },
            Behavior::Archer(state) => self.step_archer(state, velocity, perception, rng),
            Behavior::Goal => Decision {
                velocity: Vec2::ZERO,
                fire: None,
            },
        }
    }

    fn step_charger<R>(
        &self,
        state: &mut ChargerState,
        velocity: Vec2,
        perception: &Perception,
        rng: &mut R,
    ) -> Vec2
    where
        R: Rng + ?Sized,
    {
        let tuning = &self.charger;
        let distance_squared = perception.distance_squared();
        let seek = tuning.seek_range * tuning.seek_range;
        let roam = 4.0 * seek;

        if distance_squared < seek && !perception.player_invisible {
            let direction = bearing(perception.enemy_center, perception.player_center);
            state.heading = direction.y.atan2(direction.x);
            state.speed = (state.speed + tuning.acceleration).min(tuning.max_speed);
            return direction * state.speed;
        }

        if distance_squared < roam {
            state.heading += sample_turn(rng, tuning.wander_turn);
            return heading_vector(state.heading) * tuning.wander_speed;
        }

        state.speed = tuning.base_speed;
        apply_damping(velocity, tuning.idle_decay, REST_THRESHOLD)
    }

    fn step_archer<R>(
        &self,
        state: &mut ArcherState,
        velocity: Vec2,
        perception: &Perception,
        rng: &mut R,
    ) -> Decision
    where
        R: Rng + ?Sized,
    {
        let tuning = &self.archer;
        let distance_squared = perception.distance_squared();
        let close = tuning.close_range * tuning.close_range;
        let roam = 9.0 * close;
        let detected = !perception.player_invisible;

        let velocity = if distance_squared < close && detected {
            let away = bearing(perception.player_center, perception.enemy_center);
            state.heading = away.y.atan2(away.x);
            away * tuning.retreat_speed
        } else if distance_squared < roam {
            state.heading += sample_turn(rng, tuning.wander_turn);
            heading_vector(state.heading) * tuning.wander_speed
        } else {
            apply_damping(velocity, tuning.idle_decay, REST_THRESHOLD)
        };

        let mut fire = None;
        if detected && distance_squared < tuning.fire_range * tuning.fire_range {
            state.cooldown = state.cooldown.saturating_sub(1);
            if state.cooldown == 0 {
                state.cooldown = tuning.fire_interval.max(1);
                fire = Some(FireRequest {
                    origin: perception.enemy_center,
                    target: perception.player_center,
                });
            }
        }

        Decision { velocity, fire }
    }
}

fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

fn sample_turn<R>(rng: &mut R, max_turn: f32) -> f32
where
    R: Rng + ?Sized,
{
    match Triangular::new(-max_turn, max_turn, 0.0) {
        Ok(distribution) if max_turn > 0.0 => distribution.sample(rng),
        _ => 0.0,
    }
}

fn sample_speed<R>(rng: &mut R, min: u32, max: u32) -> f32
where
    R: Rng + ?Sized,
{
    if min >= max {
        return min as f32;
    }
    rng.gen_range(min..=max) as f32
}

//! Tuning knobs for generation and simulation.
//!
//! Every block deserialises with `#[serde(default)]`, so a configuration file
//! only needs to mention the values it overrides.

use serde::{Deserialize, Serialize};

/// Aggregated configuration for a single run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed from which every level and simulation stream is derived.
    pub seed: u64,
    /// Index of the deepest level. Its exit room holds the goal crystal.
    pub depth: u32,
    /// Room grid layout.
    pub grid: GridTuning,
    /// Room content placement.
    pub placement: PlacementTuning,
    /// Player movement and health.
    pub player: PlayerTuning,
    /// Wandering dummy enemies.
    pub dummy: DummyTuning,
    /// Charging enemies.
    pub charger: ChargerTuning,
    /// Ranged enemies.
    pub archer: ArcherTuning,
    /// Goal crystal.
    pub goal: GoalTuning,
    /// Pickup behaviour.
    pub pickups: PickupTuning,
    /// Player weapons.
    pub weapons: WeaponTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x6e72_6f67_7565,
            depth: 5,
            grid: GridTuning::default(),
            placement: PlacementTuning::default(),
            player: PlayerTuning::default(),
            dummy: DummyTuning::default(),
            charger: ChargerTuning::default(),
            archer: ArcherTuning::default(),
            goal: GoalTuning::default(),
            pickups: PickupTuning::default(),
            weapons: WeaponTuning::default(),
        }
    }
}

/// Layout of the room grid carved by the maze generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridTuning {
    /// Number of room columns.
    pub columns: u32,
    /// Number of room rows.
    pub rows: u32,
    /// Width of a room in world units.
    pub room_width: f32,
    /// Height of a room in world units.
    pub room_height: f32,
    /// Thickness of the perimeter walls; also the side length of corner pieces.
    pub wall_thickness: f32,
    /// Length of a straight wall segment.
    pub segment_length: f32,
    /// Number of trailing rooms in visit order from which the exit is drawn.
    pub exit_tail_window: u32,
}

impl Default for GridTuning {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 5,
            room_width: 750.0,
            room_height: 600.0,
            wall_thickness: 75.0,
            segment_length: 150.0,
            exit_tail_window: 3,
        }
    }
}

impl GridTuning {
    /// Total number of rooms in the grid.
    #[must_use]
    pub fn room_count(&self) -> usize {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Number of straight segments along a horizontal room edge.
    #[must_use]
    pub fn horizontal_segments(&self) -> usize {
        segments_between_corners(self.room_width, self.wall_thickness, self.segment_length)
    }

    /// Number of straight segments along a vertical room edge.
    #[must_use]
    pub fn vertical_segments(&self) -> usize {
        segments_between_corners(self.room_height, self.wall_thickness, self.segment_length)
    }
}

fn segments_between_corners(edge: f32, thickness: f32, segment: f32) -> usize {
    if segment <= 0.0 {
        return 0;
    }
    let span = edge - 2.0 * thickness;
    if span <= 0.0 {
        return 0;
    }
    (span / segment).ceil() as usize
}

/// Placement of ladders, pickups and enemies inside rooms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementTuning {
    /// Inset from the room edge for anchor points (ladders, clusters, goal).
    pub anchor_inset: f32,
    /// Inset from the room edge for scattered regular-room content.
    pub scatter_inset: f32,
    /// Maximum offset of treasure cubes from their cluster centre.
    pub treasure_jitter: f32,
    /// Minimum number of cubes in a treasure room.
    pub treasure_min: u32,
    /// Maximum number of cubes in a treasure room.
    pub treasure_max: u32,
    /// Probability that a regular room holds any content.
    pub regular_content_chance: f64,
    /// Minimum pickups in a populated regular room.
    pub regular_pickups_min: u32,
    /// Maximum pickups in a populated regular room.
    pub regular_pickups_max: u32,
    /// Minimum enemies in a populated regular room.
    pub regular_enemies_min: u32,
    /// Maximum enemies in a populated regular room.
    pub regular_enemies_max: u32,
    /// Relative weight of health pickups in regular rooms.
    pub health_weight: u32,
    /// Relative weight of cube pickups in regular rooms.
    pub cube_weight: u32,
    /// Relative weight of dummies among regular-room enemies.
    pub dummy_weight: u32,
    /// Relative weight of archers among regular-room enemies.
    pub archer_weight: u32,
}

impl Default for PlacementTuning {
    fn default() -> Self {
        Self {
            anchor_inset: 200.0,
            scatter_inset: 100.0,
            treasure_jitter: 75.0,
            treasure_min: 8,
            treasure_max: 12,
            regular_content_chance: 0.5,
            regular_pickups_min: 2,
            regular_pickups_max: 5,
            regular_enemies_min: 1,
            regular_enemies_max: 2,
            health_weight: 1,
            cube_weight: 3,
            dummy_weight: 4,
            archer_weight: 1,
        }
    }
}

/// Player movement, health and invincibility window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Velocity gained per tick along each held axis.
    pub acceleration: f32,
    /// Multiplier applied to velocity after every tick.
    pub damping: f32,
    /// Velocity components below this magnitude snap to zero.
    pub rest_threshold: f32,
    /// Maximum and starting health.
    pub max_health: u32,
    /// Ticks of invincibility granted after taking damage.
    pub invincibility_ticks: u32,
    /// Horizontal shrink applied to derive the collision rectangle.
    pub collide_shrink_x: f32,
    /// Vertical shrink applied to derive the collision rectangle.
    pub collide_shrink_y: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            acceleration: 15.0,
            damping: 0.3,
            rest_threshold: 0.2,
            max_health: 4,
            invincibility_ticks: crate::TICKS_PER_SECOND / 2,
            collide_shrink_x: 8.0,
            collide_shrink_y: 20.0,
        }
    }
}

/// Wandering dummies that bounce off walls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DummyTuning {
    /// Starting health.
    pub health: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: u32,
    /// Minimum initial horizontal speed.
    pub min_speed_x: u32,
    /// Maximum initial horizontal speed.
    pub max_speed_x: u32,
    /// Minimum initial vertical speed.
    pub min_speed_y: u32,
    /// Maximum initial vertical speed.
    pub max_speed_y: u32,
}

impl Default for DummyTuning {
    fn default() -> Self {
        Self {
            health: 1,
            contact_damage: 1,
            min_speed_x: 5,
            max_speed_x: 15,
            min_speed_y: 5,
            max_speed_y: 10,
        }
    }
}

/// Chargers seek the player and accelerate while closing in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargerTuning {
    /// Starting health.
    pub health: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: u32,
    /// Distance within which the charger seeks the player.
    pub seek_range: f32,
    /// Speed restored whenever the charger comes to rest.
    pub base_speed: f32,
    /// Speed cap while seeking.
    pub max_speed: f32,
    /// Speed gained per tick while seeking.
    pub acceleration: f32,
    /// Speed used while random-walking.
    pub wander_speed: f32,
    /// Largest heading change per random-walk tick, in radians.
    pub wander_turn: f32,
    /// Velocity multiplier applied per tick while idle.
    pub idle_decay: f32,
}

impl Default for ChargerTuning {
    fn default() -> Self {
        Self {
            health: 2,
            contact_damage: 2,
            seek_range: 500.0,
            base_speed: 2.0,
            max_speed: 4.0,
            acceleration: 0.07,
            wander_speed: 0.7,
            wander_turn: std::f32::consts::FRAC_PI_2,
            idle_decay: 0.5,
        }
    }
}

/// Archers keep their distance and shoot at the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcherTuning {
    /// Starting health.
    pub health: u32,
    /// Damage dealt to the player on contact.
    pub contact_damage: u32,
    /// Distance within which the archer backs away from the player.
    pub close_range: f32,
    /// Speed while backing away.
    pub retreat_speed: f32,
    /// Speed while random-walking.
    pub wander_speed: f32,
    /// Largest heading change per random-walk tick, in radians.
    pub wander_turn: f32,
    /// Velocity multiplier applied per tick while idle.
    pub idle_decay: f32,
    /// Distance within which the archer shoots.
    pub fire_range: f32,
    /// Ticks between consecutive shots.
    pub fire_interval: u32,
    /// Arrow speed in world units per tick.
    pub arrow_speed: f32,
    /// Damage dealt by an arrow.
    pub arrow_damage: u32,
    /// Wall bounces an arrow survives.
    pub arrow_bounces: u32,
}

impl Default for ArcherTuning {
    fn default() -> Self {
        Self {
            health: 2,
            contact_damage: 1,
            close_range: 250.0,
            retreat_speed: 3.0,
            wander_speed: 1.0,
            wander_turn: std::f32::consts::FRAC_PI_2,
            idle_decay: 0.5,
            fire_range: 600.0,
            fire_interval: 45,
            arrow_speed: 12.0,
            arrow_damage: 1,
            arrow_bounces: 1,
        }
    }
}

/// Goal crystal guarding the deepest level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalTuning {
    /// Hits the crystal absorbs before shattering.
    pub health: u32,
}

impl Default for GoalTuning {
    fn default() -> Self {
        Self { health: 5 }
    }
}

/// Pickup seeking and rewards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    /// Distance within which pickups drift towards the player.
    pub seek_radius: f32,
    /// Multiplier converting pickup velocity into per-tick displacement.
    pub seek_step: f32,
    /// Velocity multiplier applied per tick while out of range.
    pub idle_decay: f32,
    /// Score granted by a cube.
    pub cube_value: u32,
    /// Health restored by a health pickup.
    pub heal_amount: u32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            seek_radius: 100.0,
            seek_step: 5.0,
            idle_decay: 0.5,
            cube_value: 100,
            heal_amount: 1,
        }
    }
}

/// Player weapon parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    /// Distance from the player centre to the weapon muzzle.
    pub muzzle_offset: f32,
    /// Slingshot pebble speed in world units per tick.
    pub pebble_speed: f32,
    /// Damage dealt by a pebble.
    pub pebble_damage: u32,
    /// Length of the laser sight.
    pub laser_range: f32,
    /// Damage dealt by a laser hit.
    pub laser_damage: u32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            muzzle_offset: 30.0,
            pebble_speed: 40.0,
            pebble_damage: 1,
            laser_range: 1920.0,
            laser_damage: 99,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_matches_stock_room_layout() {
        let grid = GridTuning::default();
        assert_eq!(grid.room_count(), 25);
        assert_eq!(grid.horizontal_segments(), 4);
        assert_eq!(grid.vertical_segments(), 3);
    }

    #[test]
    fn invincibility_window_lasts_half_a_second() {
        assert_eq!(PlayerTuning::default().invincibility_ticks, 15);
    }
}

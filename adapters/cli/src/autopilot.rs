//! Scripted player used to drive headless runs.

use glam::Vec2;
use nrogue_core::{EnemyKind, Rect, WeaponKind};
use nrogue_rendering::{FrameInput, Viewport};
use nrogue_world::{query, World};

/// Horizontal offset from the crystal at which the pilot takes aim.
const GOAL_STANDOFF: f32 = 80.0;
/// Distance below which steering stops pushing along an axis.
const STEER_DEADZONE: f32 = 8.0;
/// Enemies farther than this are ignored while roaming.
const ENGAGE_RANGE: f32 = 600.0;
/// Ticks between shots while roaming.
const ROAM_FIRE_INTERVAL: u64 = 8;

/// How the pilot reaches its objectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Teleports straight to each objective.
    Express,
    /// Walks toward each objective, shooting nearby enemies.
    Roam,
}

/// Decision for a single frame.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Step {
    /// Relocation applied before the frame.
    pub(crate) teleport: Option<Vec2>,
    /// Device state for the frame.
    pub(crate) input: FrameInput,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Objective {
    Ladder(Rect),
    Crystal(Vec2),
    Idle,
}

/// Chooses inputs that descend to the crystal, shatter it and climb back out.
#[derive(Debug)]
pub(crate) struct Autopilot {
    mode: Mode,
}

impl Autopilot {
    pub(crate) const fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub(crate) fn plan(&self, world: &World, viewport: &Viewport) -> Step {
        let player = query::player(world);
        let center = player.center();
        let weapon_switch =
            (player.weapon != WeaponKind::Slingshot).then_some(WeaponKind::Slingshot);

        let mut step = Step {
            teleport: None,
            input: FrameInput {
                weapon_switch,
                ..FrameInput::default()
            },
        };

        match (objective(world), self.mode) {
            (Objective::Idle, _) => {}
            (Objective::Ladder(ladder), Mode::Express) => {
                step.teleport = Some(ladder.center());
                step.input.interact = true;
            }
            (Objective::Ladder(ladder), Mode::Roam) => {
                steer(&mut step.input, center, ladder.center());
                step.input.interact = ladder.intersects(&player.collide);
                engage(world, viewport, center, &mut step.input);
            }
            (Objective::Crystal(crystal), Mode::Express) => {
                let standoff = crystal + Vec2::new(GOAL_STANDOFF, 0.0);
                if center.distance_squared(standoff) > 1.0 {
                    step.teleport = Some(standoff);
                }
                step.input.pointer = Some(viewport.world_to_screen(crystal));
                step.input.fire = true;
            }
            (Objective::Crystal(crystal), Mode::Roam) => {
                steer(
                    &mut step.input,
                    center,
                    crystal + Vec2::new(GOAL_STANDOFF, 0.0),
                );
                step.input.pointer = Some(viewport.world_to_screen(crystal));
                step.input.fire = query::tick_index(world) % ROAM_FIRE_INTERVAL == 0;
            }
        }
        step
    }
}

fn objective(world: &World) -> Objective {
    let player = query::player(world);
    if !player.alive {
        return Objective::Idle;
    }
    if player.holds_goal_item {
        return query::up_ladder(world).map_or(Objective::Idle, |ladder| {
            Objective::Ladder(ladder.rect())
        });
    }
    if let Some(ladder) = query::down_ladder(world) {
        return Objective::Ladder(ladder.rect());
    }
    query::goal(world)
        .filter(|goal| !goal.is_solved())
        .map_or(Objective::Idle, |goal| Objective::Crystal(goal.rect().center()))
}

fn engage(world: &World, viewport: &Viewport, center: Vec2, input: &mut FrameInput) {
    let target = query::enemies(world)
        .iter()
        .filter(|enemy| enemy.kind() != EnemyKind::Goal)
        .map(|enemy| enemy.rect().center())
        .filter(|position| position.distance_squared(center) < ENGAGE_RANGE * ENGAGE_RANGE)
        .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)));

    if let Some(target) = target {
        input.pointer = Some(viewport.world_to_screen(target));
        input.fire = query::tick_index(world) % ROAM_FIRE_INTERVAL == 0;
    }
}

fn steer(input: &mut FrameInput, from: Vec2, to: Vec2) {
    let delta = to - from;
    input.move_left = delta.x < -STEER_DEADZONE;
    input.move_right = delta.x > STEER_DEADZONE;
    input.move_up = delta.y < -STEER_DEADZONE;
    input.move_down = delta.y > STEER_DEADZONE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use nrogue_core::GameConfig;

    fn viewport_for(world: &World) -> Viewport {
        let mut viewport = Viewport::new(1920.0, 1080.0);
        viewport.follow(query::player(world).center(), query::bounds(world));
        viewport
    }

    #[test]
    fn express_pilot_heads_for_the_down_ladder_first() {
        let world = World::new(GameConfig::default()).expect("valid");
        let step = Autopilot::new(Mode::Express).plan(&world, &viewport_for(&world));
        let ladder = query::down_ladder(&world).expect("down ladder").rect();

        assert_eq!(step.teleport, Some(ladder.center()));
        assert!(step.input.interact);
        assert!(!step.input.fire);
    }

    #[test]
    fn roaming_pilot_walks_toward_the_down_ladder() {
        let world = World::new(GameConfig::default()).expect("valid");
        let step = Autopilot::new(Mode::Roam).plan(&world, &viewport_for(&world));
        let ladder = query::down_ladder(&world).expect("down ladder").rect().center();
        let center = query::player(&world).center();

        assert!(step.teleport.is_none());
        assert!(!step.input.interact);
        assert_eq!(step.input.move_right, ladder.x - center.x > STEER_DEADZONE);
        assert_eq!(step.input.move_left, ladder.x - center.x < -STEER_DEADZONE);
        assert_eq!(step.input.move_down, ladder.y - center.y > STEER_DEADZONE);
    }

    #[test]
    fn steering_ignores_small_offsets() {
        let mut input = FrameInput::default();
        steer(&mut input, Vec2::ZERO, Vec2::new(5.0, -50.0));
        assert!(!input.move_left && !input.move_right);
        assert!(input.move_up && !input.move_down);
    }
}

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use glam::Vec2;
use nrogue_core::{CheatToggles, Command, EnemyKind, Event, GameConfig, Intents, WeaponKind};
use nrogue_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay(17, scripted_commands());
    let second = replay(17, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first.events.len() >= 181);
    assert!(first
        .events
        .iter()
        .any(|event| event.starts_with("LevelEntered")));
}

#[test]
fn different_seeds_diverge() {
    let first = replay(17, scripted_commands());
    let second = replay(18, scripted_commands());
    assert_ne!(first.fingerprint, second.fingerprint);
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<String>,
    fingerprint: u64,
}

fn replay(seed: u64, commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new(GameConfig {
        seed,
        ..GameConfig::default()
    })
    .expect("valid");
    let mut events = Vec::new();
    let mut hasher = DefaultHasher::new();

    for command in commands {
        let command = resolve(&world, command);
        let mut generated: Vec<Event> = Vec::new();
        world::apply(&mut world, command, &mut generated);
        for event in generated {
            let record = format!("{event:?}");
            record.hash(&mut hasher);
            events.push(record);
        }
    }

    query::level_index(&world).hash(&mut hasher);
    query::tick_index(&world).hash(&mut hasher);
    format!("{:?}", query::player(&world)).hash(&mut hasher);
    for enemy in query::enemies(&world) {
        format!("{enemy:?}").hash(&mut hasher);
    }
    for projectile in query::projectiles(&world) {
        format!("{projectile:?}").hash(&mut hasher);
    }
    query::cached_levels(&world).hash(&mut hasher);

    ReplayOutcome {
        events,
        fingerprint: hasher.finish(),
    }
}

/// Placeholder position replaced by the live down ladder before applying.
const DOWN_LADDER: Vec2 = Vec2::new(-1.0, -1.0);

fn resolve(world: &World, command: Command) -> Command {
    match command {
        Command::TeleportPlayer { center } if center == DOWN_LADDER => Command::TeleportPlayer {
            center: query::down_ladder(world)
                .map_or(center, |ladder| ladder.rect().center()),
        },
        other => other,
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = Vec::new();
    let directions = [
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(-1.0, 0.0),
        Vec2::new(0.0, -1.0),
    ];
    for (index, direction) in directions.iter().cycle().take(120).enumerate() {
        commands.push(Command::Tick {
            intents: Intents {
                move_vector: *direction,
                aim: Vec2::new(375.0 + index as f32 * 7.0, 300.0),
                fire: index % 5 == 0,
                weapon_switch: (index == 60).then_some(WeaponKind::LaserGun),
                cheats: CheatToggles {
                    invisibility: index == 90,
                    ..CheatToggles::default()
                },
                ..Intents::default()
            },
        });
        if index == 30 {
            commands.push(Command::SpawnEnemy {
                kind: EnemyKind::Charger,
                center: Vec2::new(400.0, 300.0),
            });
            commands.push(Command::SpawnEnemy {
                kind: EnemyKind::Archer,
                center: Vec2::new(500.0, 350.0),
            });
        }
    }

    commands.push(Command::TeleportPlayer {
        center: DOWN_LADDER,
    });
    commands.push(Command::Tick {
        intents: Intents {
            interact: true,
            ..Intents::default()
        },
    });
    for _ in 0..60 {
        commands.push(Command::Tick {
            intents: Intents::default(),
        });
    }
    commands
}

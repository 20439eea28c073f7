use glam::Vec2;
use nrogue_core::{
    Command, EnemyId, EnemyKind, Event, GameConfig, InteractRejection, Intents, LadderDirection,
    PickupKind, RoomRole, StaticKind, Travel, WeaponKind,
};
use nrogue_world::{self as world, query, CachedLevel, StaticObject, World};

fn new_world(seed: u64) -> World {
    World::new(GameConfig {
        seed,
        ..GameConfig::default()
    })
    .expect("default configuration is valid")
}

fn step(world: &mut World, intents: Intents) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { intents }, &mut events);
    events
}

fn teleport(world: &mut World, center: Vec2) {
    let mut events = Vec::new();
    world::apply(world, Command::TeleportPlayer { center }, &mut events);
}

fn center_of(ladder: Option<&StaticObject>) -> Vec2 {
    ladder.expect("ladder present").rect().center()
}

fn interact(world: &mut World) -> Vec<Event> {
    step(
        world,
        Intents {
            interact: true,
            ..Intents::default()
        },
    )
}

fn descend(world: &mut World) -> Vec<Event> {
    let target = center_of(query::down_ladder(world));
    teleport(world, target);
    interact(world)
}

fn ascend(world: &mut World) -> Vec<Event> {
    let target = center_of(query::up_ladder(world));
    teleport(world, target);
    interact(world)
}

fn entered(events: &[Event]) -> Option<(u32, Option<Travel>, bool, Vec2)> {
    events.iter().find_map(|event| match event {
        Event::LevelEntered {
            level,
            travel,
            restored,
            spawn,
        } => Some((*level, *travel, *restored, *spawn)),
        _ => None,
    })
}

#[test]
fn first_level_is_announced_with_the_first_command() {
    let mut world = new_world(11);
    let events = step(&mut world, Intents::default());

    assert_eq!(
        events.first(),
        Some(&Event::LevelCached {
            level: 1,
            version: 1
        })
    );
    let (level, travel, restored, spawn) = entered(&events).expect("level entered");
    assert_eq!((level, travel, restored), (1, None, false));
    assert_eq!(spawn, center_of(query::up_ladder(&world)));

    let later = step(&mut world, Intents::default());
    assert!(entered(&later).is_none());
}

#[test]
fn every_level_has_its_ladders_and_only_the_deepest_has_the_goal() {
    for seed in [1_u64, 2, 3] {
        let mut world = new_world(seed);
        let depth = query::depth(&world);
        loop {
            let level = query::level_index(&world);
            assert_eq!(query::rooms(&world).len(), 25);
            let ups = query::statics(&world)
                .iter()
                .filter(|object| object.kind() == StaticKind::Ladder(LadderDirection::Up))
                .count();
            assert_eq!(ups, 1, "seed {seed} level {level}");

            if level == depth {
                assert!(query::down_ladder(&world).is_none());
                let goal = query::goal(&world).expect("goal on deepest level");
                assert_eq!(goal.kind(), EnemyKind::Goal);
                let roles: Vec<_> = query::rooms(&world).iter().map(|room| room.role()).collect();
                assert_eq!(roles.iter().filter(|role| **role == RoomRole::Crystal).count(), 1);
                assert!(!roles.contains(&RoomRole::Exit));
                break;
            }

            assert!(query::goal(&world).is_none());
            assert!(query::down_ladder(&world).is_some());
            let events = descend(&mut world);
            let (entered_level, travel, restored, spawn) =
                entered(&events).expect("descended");
            assert_eq!(entered_level, level + 1);
            assert_eq!(travel, Some(Travel::Descend));
            assert!(!restored);
            assert_eq!(spawn, center_of(query::up_ladder(&world)));
        }
    }
}

#[test]
fn ascending_lands_on_the_down_ladder_of_the_restored_level() {
    let mut world = new_world(5);
    let _ = step(&mut world, Intents::default());
    let _ = descend(&mut world);
    assert_eq!(query::level_index(&world), 2);

    let events = ascend(&mut world);
    let (level, travel, restored, spawn) = entered(&events).expect("ascended");
    assert_eq!((level, travel, restored), (1, Some(Travel::Ascend), true));
    assert_eq!(spawn, center_of(query::down_ladder(&world)));
    assert!(events.contains(&Event::LevelCached {
        level: 2,
        version: 2
    }));

    assert_eq!(
        query::cached_levels(&world),
        vec![
            CachedLevel {
                level: 1,
                version: 2
            },
            CachedLevel {
                level: 2,
                version: 2
            },
        ]
    );
}

#[test]
fn interacting_away_from_ladders_is_rejected() {
    let mut world = new_world(8);
    let up = center_of(query::up_ladder(&world));
    teleport(&mut world, up + Vec2::new(0.0, 120.0));
    let events = interact(&mut world);
    assert!(events.contains(&Event::InteractRejected {
        reason: InteractRejection::NoLadderInReach
    }));
    assert_eq!(query::level_index(&world), 1);
}

#[test]
fn revisited_levels_keep_their_consequences() {
    let mut world = new_world(21);
    let _ = step(&mut world, Intents::default());
    let _ = descend(&mut world);
    let _ = descend(&mut world);
    assert_eq!(query::level_index(&world), 3);

    let candidates: Vec<EnemyId> = query::enemies(&world)
        .iter()
        .filter(|enemy| enemy.kind() != EnemyKind::Goal)
        .map(|enemy| enemy.id())
        .collect();
    assert!(!candidates.is_empty(), "danger room guarantees enemies");

    let mut killed = None;
    for id in candidates {
        let Some(enemy) = query::enemy(&world, id) else {
            continue;
        };
        let center = enemy.rect().center();
        teleport(&mut world, center + Vec2::new(40.0, 0.0));
        let events = step(
            &mut world,
            Intents {
                aim: center,
                fire: true,
                weapon_switch: Some(WeaponKind::LaserGun),
                ..Intents::default()
            },
        );
        let defeated = events
            .iter()
            .any(|event| matches!(event, Event::EnemyDefeated { enemy, .. } if *enemy == id));
        if defeated {
            killed = Some(id);
            break;
        }
    }
    let killed = killed.expect("laser defeats an exposed enemy");
    assert!(query::enemy(&world, killed).is_none());

    let cube = query::pickups(&world)
        .iter()
        .find(|pickup| pickup.kind() == PickupKind::Cube)
        .map(|pickup| (pickup.id(), pickup.rect().center()))
        .expect("treasure room guarantees cubes");
    teleport(&mut world, cube.1);
    let events = step(&mut world, Intents::default());
    assert!(events.contains(&Event::PickupCollected {
        pickup: cube.0,
        kind: PickupKind::Cube
    }));

    let enemies_before = query::enemies(&world).to_vec();
    let pickups_before = query::pickups(&world).to_vec();
    let statics_before = query::statics(&world).to_vec();

    let _ = ascend(&mut world);
    assert_eq!(query::level_index(&world), 2);
    let events = descend(&mut world);
    let (level, _, restored, _) = entered(&events).expect("returned");
    assert_eq!(level, 3);
    assert!(restored);

    assert!(query::enemy(&world, killed).is_none());
    assert!(query::pickups(&world)
        .iter()
        .all(|pickup| pickup.id() != cube.0));
    assert_eq!(query::enemies(&world), enemies_before.as_slice());
    assert_eq!(query::pickups(&world), pickups_before.as_slice());
    assert_eq!(query::statics(&world), statics_before.as_slice());
}

#[test]
fn the_start_room_is_revealed_on_the_first_step_and_stays_revealed() {
    let mut world = new_world(17);
    assert_eq!(query::fog(&world).len(), 25);
    let start = query::rooms(&world)
        .iter()
        .find(|room| room.role() == RoomRole::Start)
        .expect("start room")
        .index();

    let events = step(&mut world, Intents::default());
    let revealed: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::RoomRevealed { room } => Some(*room),
            _ => None,
        })
        .collect();
    assert_eq!(revealed, vec![start]);
    assert_eq!(query::fog(&world).len(), 24);
    assert!(query::fog(&world).iter().all(|veil| veil.room() != start));

    let _ = descend(&mut world);
    assert_eq!(query::level_index(&world), 2);
    let _ = ascend(&mut world);
    assert_eq!(query::level_index(&world), 1);

    assert!(query::fog(&world).iter().all(|veil| veil.room() != start));
    let room = query::rooms(&world)
        .iter()
        .find(|room| room.index() == start)
        .expect("start room survives the round trip");
    assert!(room.is_revealed());
}

#[test]
fn pickups_are_collected_by_the_collision_box_not_the_sprite() {
    let mut config = GameConfig {
        seed: 23,
        ..GameConfig::default()
    };
    config.pickups.seek_radius = 0.0;
    let mut world = World::new(config).expect("valid");

    let mut cube = None;
    for _ in 0..query::depth(&world) {
        cube = query::pickups(&world)
            .iter()
            .find(|pickup| pickup.kind() == PickupKind::Cube)
            .map(|pickup| (pickup.id(), pickup.rect()));
        if cube.is_some() || query::down_ladder(&world).is_none() {
            break;
        }
        let _ = descend(&mut world);
    }
    let (id, rect) = cube.expect("the treasure room guarantees cubes");

    let player = query::player(&world);
    let overhang = (player.rect.height() - player.collide.height()) / 2.0;
    let above = Vec2::new(
        rect.center().x,
        rect.top() - player.rect.height() / 2.0 + overhang / 2.0,
    );
    teleport(&mut world, above);
    let player = query::player(&world);
    assert!(player.rect.intersects(&rect));
    assert!(!player.collide.intersects(&rect));

    let events = step(&mut world, Intents::default());
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::PickupCollected { pickup, .. } if *pickup == id)));

    teleport(&mut world, rect.center());
    let events = step(&mut world, Intents::default());
    assert!(events.contains(&Event::PickupCollected {
        pickup: id,
        kind: PickupKind::Cube
    }));
}

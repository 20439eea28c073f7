use nrogue_core::{
    EnemyKind, LadderDirection, PickupKind, PlacementTuning, Rect, RoomRole, StaticKind,
};
use nrogue_system_features::FeaturePlacer;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const ROOM: Rect = Rect::new(1500.0, 600.0, 750.0, 600.0);

fn placer() -> FeaturePlacer {
    FeaturePlacer::new(PlacementTuning::default())
}

#[test]
fn every_role_gets_a_room_sized_fog_veil() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for role in [
        RoomRole::Start,
        RoomRole::Exit,
        RoomRole::Regular,
        RoomRole::Treasure,
        RoomRole::Danger,
        RoomRole::Crystal,
    ] {
        let features = placer().assign(ROOM, role, &mut rng);
        assert_eq!(features.fog, ROOM);
    }
}

#[test]
fn start_and_exit_rooms_hold_a_single_ladder() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let start = placer().assign(ROOM, RoomRole::Start, &mut rng);
    assert_eq!(start.statics.len(), 1);
    assert_eq!(
        start.statics[0].kind,
        StaticKind::Ladder(LadderDirection::Up)
    );
    assert!(start.pickups.is_empty() && start.enemies.is_empty());

    let exit = placer().assign(ROOM, RoomRole::Exit, &mut rng);
    assert_eq!(exit.statics.len(), 1);
    assert_eq!(
        exit.statics[0].kind,
        StaticKind::Ladder(LadderDirection::Down)
    );
}

#[test]
fn crystal_room_holds_the_goal_instead_of_a_ladder() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let features = placer().assign(ROOM, RoomRole::Crystal, &mut rng);
    assert!(features.statics.is_empty());
    assert_eq!(features.enemies.len(), 1);
    assert_eq!(features.enemies[0].kind, EnemyKind::Goal);
}

#[test]
fn treasure_rooms_cluster_eight_to_twelve_cubes() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let features = placer().assign(ROOM, RoomRole::Treasure, &mut rng);
        let count = features.pickups.len();
        assert!((8..=12).contains(&count), "seed {seed} placed {count}");
        assert!(features
            .pickups
            .iter()
            .all(|pickup| pickup.kind == PickupKind::Cube));

        let inner = ROOM.inflate(-2.0 * 124.0, -2.0 * 124.0);
        for pickup in &features.pickups {
            assert!(pickup.center.x >= inner.left() && pickup.center.x <= inner.right());
            assert!(pickup.center.y >= inner.top() && pickup.center.y <= inner.bottom());
        }
    }
}

#[test]
fn danger_rooms_hold_a_fountain_and_stronger_enemies() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let features = placer().assign(ROOM, RoomRole::Danger, &mut rng);
        assert_eq!(features.statics.len(), 1);
        assert_eq!(features.statics[0].kind, StaticKind::Fountain);
        assert_eq!(features.statics[0].center, ROOM.center());

        let count = features.enemies.len();
        assert!((1..=2).contains(&count));
        assert!(features
            .enemies
            .iter()
            .all(|enemy| matches!(enemy.kind, EnemyKind::Charger | EnemyKind::Archer)));
        assert!(features
            .enemies
            .iter()
            .all(|enemy| enemy.center == features.enemies[0].center));
    }
}

#[test]
fn regular_rooms_are_empty_or_populated_within_bounds() {
    let mut populated = 0;
    let mut empty = 0;
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let features = placer().assign(ROOM, RoomRole::Regular, &mut rng);
        assert!(features.statics.is_empty());
        if features.pickups.is_empty() {
            assert!(features.enemies.is_empty());
            empty += 1;
            continue;
        }

        populated += 1;
        assert!((2..=5).contains(&features.pickups.len()));
        assert!((1..=2).contains(&features.enemies.len()));
        assert!(features
            .enemies
            .iter()
            .all(|enemy| matches!(enemy.kind, EnemyKind::Dummy | EnemyKind::Archer)));

        let inner = ROOM.inflate(-200.0, -200.0);
        for point in features
            .pickups
            .iter()
            .map(|pickup| pickup.center)
            .chain(features.enemies.iter().map(|enemy| enemy.center))
        {
            assert!(point.x >= inner.left() && point.x <= inner.right());
            assert!(point.y >= inner.top() && point.y <= inner.bottom());
        }
    }
    assert!(populated > 50 && empty > 50);
}

#[test]
fn regular_pickups_favour_currency() {
    let mut cubes = 0;
    let mut health = 0;
    for seed in 0..400 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let features = placer().assign(ROOM, RoomRole::Regular, &mut rng);
        for pickup in features.pickups {
            match pickup.kind {
                PickupKind::Cube => cubes += 1,
                PickupKind::Health => health += 1,
            }
        }
    }
    assert!(cubes > health * 2);
}

#[test]
fn unknown_role_tags_leave_only_fog() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let features = placer().assign_tag(ROOM, "armory", &mut rng);
    assert!(features.statics.is_empty());
    assert!(features.pickups.is_empty());
    assert!(features.enemies.is_empty());
    assert_eq!(features.fog, ROOM);

    let start = placer().assign_tag(ROOM, "start", &mut rng);
    assert_eq!(start.statics.len(), 1);
}

#[test]
fn placement_is_reproducible_per_seed() {
    let mut first = ChaCha8Rng::seed_from_u64(77);
    let mut second = ChaCha8Rng::seed_from_u64(77);
    assert_eq!(
        placer().assign(ROOM, RoomRole::Treasure, &mut first),
        placer().assign(ROOM, RoomRole::Treasure, &mut second)
    );
}

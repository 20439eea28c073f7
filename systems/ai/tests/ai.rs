use glam::Vec2;
use nrogue_core::{ArcherTuning, ChargerTuning, DummyTuning, EnemyKind};
use nrogue_system_ai::{Behavior, EntityAi, Perception};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn ai() -> EntityAi {
    EntityAi::new(
        DummyTuning::default(),
        ChargerTuning::default(),
        ArcherTuning::default(),
    )
}

fn perception(enemy: Vec2, player: Vec2) -> Perception {
    Perception {
        enemy_center: enemy,
        player_center: player,
        player_invisible: false,
    }
}

#[test]
fn dummy_keeps_its_velocity() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut behavior = ai.spawn(EnemyKind::Dummy);
    let velocity = Vec2::new(7.0, -6.0);
    let decision = ai.step(
        &mut behavior,
        velocity,
        &perception(Vec2::ZERO, Vec2::new(10.0, 0.0)),
        &mut rng,
    );
    assert_eq!(decision.velocity, velocity);
    assert!(decision.fire.is_none());
}

#[test]
fn dummy_initial_velocity_is_within_tuning() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    for _ in 0..100 {
        let velocity = ai.initial_velocity(EnemyKind::Dummy, &mut rng);
        assert!((5.0..=15.0).contains(&velocity.x));
        assert!((5.0..=10.0).contains(&velocity.y));
    }
    assert_eq!(ai.initial_velocity(EnemyKind::Goal, &mut rng), Vec2::ZERO);
}

#[test]
fn charger_accelerates_towards_a_nearby_player_up_to_the_cap() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut behavior = ai.spawn(EnemyKind::Charger);
    let sight = perception(Vec2::ZERO, Vec2::new(300.0, 0.0));

    let first = ai.step(&mut behavior, Vec2::ZERO, &sight, &mut rng);
    assert!(first.velocity.x > 2.0 && first.velocity.x < 2.1);
    assert!(first.velocity.y.abs() < 1e-4);

    let mut velocity = first.velocity;
    for _ in 0..100 {
        velocity = ai.step(&mut behavior, velocity, &sight, &mut rng).velocity;
    }
    assert!((velocity.length() - 4.0).abs() < 1e-4);
    match behavior {
        Behavior::Charger(state) => assert!((state.speed() - 4.0).abs() < 1e-6),
        other => panic!("unexpected behaviour {other:?}"),
    }
}

#[test]
fn charger_wanders_slowly_between_one_and_two_seek_ranges() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut behavior = ai.spawn(EnemyKind::Charger);
    let roaming = perception(Vec2::ZERO, Vec2::new(800.0, 0.0));

    for _ in 0..20 {
        let decision = ai.step(&mut behavior, Vec2::ZERO, &roaming, &mut rng);
        assert!((decision.velocity.length() - 0.7).abs() < 1e-4);
    }
}

#[test]
fn charger_comes_to_rest_far_from_the_player() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut behavior = ai.spawn(EnemyKind::Charger);
    let near = perception(Vec2::ZERO, Vec2::new(100.0, 0.0));
    let far = perception(Vec2::ZERO, Vec2::new(5000.0, 0.0));

    let mut velocity = Vec2::ZERO;
    for _ in 0..10 {
        velocity = ai.step(&mut behavior, velocity, &near, &mut rng).velocity;
    }
    let decayed = ai.step(&mut behavior, velocity, &far, &mut rng).velocity;
    assert_eq!(decayed, velocity * 0.5);
    match behavior {
        Behavior::Charger(state) => assert_eq!(state.speed(), 2.0),
        other => panic!("unexpected behaviour {other:?}"),
    }
}

#[test]
fn idle_chargers_and_archers_settle_to_a_standstill() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let far = perception(Vec2::ZERO, Vec2::new(5000.0, 0.0));

    for kind in [EnemyKind::Charger, EnemyKind::Archer] {
        let mut behavior = ai.spawn(kind);
        let mut velocity = Vec2::new(3.0, -1.5);
        for _ in 0..30 {
            velocity = ai.step(&mut behavior, velocity, &far, &mut rng).velocity;
        }
        assert_eq!(velocity, Vec2::ZERO, "{kind:?} kept creeping");
    }
}

#[test]
fn invisibility_suppresses_the_charge() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut behavior = ai.spawn(EnemyKind::Charger);
    let hidden = Perception {
        player_invisible: true,
        ..perception(Vec2::ZERO, Vec2::new(100.0, 0.0))
    };
    let decision = ai.step(&mut behavior, Vec2::ZERO, &hidden, &mut rng);
    assert!((decision.velocity.length() - 0.7).abs() < 1e-4);
}

#[test]
fn archer_backs_away_from_a_close_player() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut behavior = ai.spawn(EnemyKind::Archer);
    let close = perception(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0));
    let decision = ai.step(&mut behavior, Vec2::ZERO, &close, &mut rng);
    assert!(decision.velocity.x < -2.9);
    assert!(decision.velocity.y.abs() < 1e-4);
}

#[test]
fn archer_fires_once_per_interval_while_in_range() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut behavior = ai.spawn(EnemyKind::Archer);
    let in_range = perception(Vec2::ZERO, Vec2::new(400.0, 0.0));

    let mut shots = Vec::new();
    for tick in 1..=135 {
        let decision = ai.step(&mut behavior, Vec2::ZERO, &in_range, &mut rng);
        if let Some(request) = decision.fire {
            assert_eq!(request.target, Vec2::new(400.0, 0.0));
            shots.push(tick);
        }
    }
    assert_eq!(shots, vec![45, 90, 135]);
}

#[test]
fn archer_holds_fire_when_the_player_is_hidden_or_far() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut behavior = ai.spawn(EnemyKind::Archer);
    let hidden = Perception {
        player_invisible: true,
        ..perception(Vec2::ZERO, Vec2::new(400.0, 0.0))
    };
    let far = perception(Vec2::ZERO, Vec2::new(700.0, 0.0));

    for _ in 0..200 {
        assert!(ai.step(&mut behavior, Vec2::ZERO, &hidden, &mut rng).fire.is_none());
        assert!(ai.step(&mut behavior, Vec2::ZERO, &far, &mut rng).fire.is_none());
    }
    match behavior {
        Behavior::Archer(state) => assert_eq!(state.cooldown(), 45),
        other => panic!("unexpected behaviour {other:?}"),
    }
}

#[test]
fn goal_never_moves() {
    let ai = ai();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut behavior = ai.spawn(EnemyKind::Goal);
    let decision = ai.step(
        &mut behavior,
        Vec2::new(3.0, 3.0),
        &perception(Vec2::ZERO, Vec2::new(10.0, 10.0)),
        &mut rng,
    );
    assert_eq!(decision.velocity, Vec2::ZERO);
    assert!(decision.fire.is_none());
}

/// Integration tests for the simulation loop
///
/// These drive `Simulation::tick` end to end with a seeded spawner and check
/// the scoring, health, invincibility and respawn rules together.
use stellar_blitz::{
    Adversary, Body, EntityKind, GameConfig, GameMode, InputFrame, Outcome, Phase, Projectile,
    Simulation,
};

fn seeded(seed: u64) -> Simulation {
    Simulation::new(GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    })
    .unwrap()
}

/// A motionless adversary sitting right on top of the player
fn adversary_on_player(sim: &Simulation) -> Adversary {
    let player = sim.arena().player.bounds();
    Adversary::new(player.x, player.y, 30.0, 40.0, 0.0, 0.0)
}

/// Moves the player to the bottom edge, out of reach of the falling pool for
/// the first couple of seconds.
fn park_player_at_bottom(sim: &mut Simulation) {
    let player = &mut sim.arena_mut().player;
    player.y = 700.0 - player.height;
}

fn in_mode(seed: u64, mode: GameMode, tweak: impl FnOnce(&mut GameConfig)) -> Simulation {
    let mut config = GameConfig {
        seed: Some(seed),
        mode,
        ..GameConfig::default()
    };
    tweak(&mut config);
    Simulation::new(config).unwrap()
}

fn idle() -> InputFrame {
    InputFrame::default()
}

#[test]
fn test_player_hit_costs_one_health_and_grants_invincibility() {
    let mut sim = seeded(1);
    let struck = adversary_on_player(&sim);
    sim.arena_mut().adversaries[0] = struck.clone();

    let report = sim.tick(&idle());

    let now = sim.clock().now_ms();
    assert_eq!(report.collisions.player_hits, 1);
    assert_eq!(sim.arena().player.health, 2);
    assert!(sim.arena().player.is_invincible(now));
    assert_eq!(sim.arena().player.invincible_since, Some(now));
    assert_ne!(sim.arena().adversaries[0], struck);
    assert_eq!(sim.arena().adversaries.len(), 8);
    assert_eq!(sim.state().phase, Phase::Running);
}

#[test]
fn test_every_overlapping_adversary_costs_health() {
    let mut sim = seeded(11);
    let struck = adversary_on_player(&sim);
    sim.arena_mut().adversaries[0] = struck.clone();
    sim.arena_mut().adversaries[3] = struck.clone();

    let report = sim.tick(&idle());

    let now = sim.clock().now_ms();
    assert_eq!(report.collisions.player_hits, 2);
    assert_eq!(sim.arena().player.health, 1);
    assert_eq!(sim.arena().player.invincible_since, Some(now));
    assert_ne!(sim.arena().adversaries[0], struck);
    assert_ne!(sim.arena().adversaries[3], struck);
    assert_eq!(sim.arena().adversaries.len(), 8);
    assert_eq!(sim.state().phase, Phase::Running);
}

#[test]
fn test_pile_up_past_last_health_ends_the_game() {
    let mut sim = seeded(12);
    sim.arena_mut().player.health = 2;
    let struck = adversary_on_player(&sim);
    for slot in 0..3 {
        sim.arena_mut().adversaries[slot] = struck.clone();
    }

    let report = sim.tick(&idle());

    assert_eq!(report.collisions.player_hits, 3);
    assert!(report.collisions.game_over);
    assert_eq!(sim.arena().player.health, 0);
    assert_eq!(sim.state().outcome, Some(Outcome::Destroyed));
    assert!(sim.arena().adversaries[..3].iter().all(|a| *a != struck));
}

#[test]
fn test_upward_spawn_speed_is_rejected() {
    let mut config = GameConfig::default();
    config.adversary.spawn_speed_y.min = -2;
    config.adversary.spawn_speed_y.max = 1;
    assert!(Simulation::new(config).is_err());

    let mut config = GameConfig::default();
    config.adversary.respawn_speed_y.min = 0;
    assert!(Simulation::new(config).is_err());
}

#[test]
fn test_projectile_leaving_the_top_is_removed() {
    let mut sim = seeded(2);
    let config = sim.config().projectile.clone();
    sim.arena_mut()
        .projectiles
        .push(Projectile::new(100.0, 0.0, &config));

    let report = sim.tick(&idle());

    assert_eq!(report.projectiles_expired, 1);
    assert!(sim.arena().projectiles.is_empty());
    assert_eq!(sim.state().score, 0);
}

#[test]
fn test_one_second_survived_scores_exactly_ten() {
    let mut sim = seeded(3);
    park_player_at_bottom(&mut sim);

    for _ in 0..59 {
        sim.tick(&idle());
    }
    assert_eq!(sim.state().score, 0);

    let report = sim.tick(&idle());
    assert_eq!(sim.clock().now_ms(), 1000);
    assert!(report.survival_points_awarded);
    assert_eq!(sim.state().score, 10);

    for _ in 0..59 {
        sim.tick(&idle());
    }
    assert_eq!(sim.state().score, 10);
}

#[test]
fn test_projectile_and_adversary_destroy_each_other() {
    let mut sim = seeded(4);
    let target = Adversary::new(100.0, 100.0, 30.0, 40.0, 0.0, 0.0);
    sim.arena_mut().adversaries[0] = target.clone();
    let config = sim.config().projectile.clone();
    sim.arena_mut()
        .projectiles
        .push(Projectile::new(115.0, 140.0, &config));

    let report = sim.tick(&idle());

    assert_eq!(report.collisions.adversaries_destroyed, 1);
    assert!(sim.arena().projectiles.is_empty());
    assert_eq!(sim.arena().adversaries.len(), 8);
    assert_ne!(sim.arena().adversaries[0], target);
    assert_eq!(sim.state().score, 100);
}

#[test]
fn test_game_over_stops_all_updates() {
    let mut sim = seeded(5);
    sim.arena_mut().player.health = 1;
    let struck = adversary_on_player(&sim);
    sim.arena_mut().adversaries[0] = struck;

    let report = sim.tick(&idle());
    assert!(report.collisions.game_over);
    assert_eq!(sim.state().phase, Phase::GameOver);
    assert_eq!(sim.arena().player.health, 0);

    let frozen = sim.snapshot();
    for _ in 0..120 {
        let report = sim.tick(&InputFrame::fire());
        assert!(!report.advanced);
    }
    let after = sim.snapshot();
    assert_eq!(after.sprites, frozen.sprites);
    assert_eq!(after.score, frozen.score);
    assert_eq!(after.elapsed_ms, frozen.elapsed_ms);
    assert_eq!(after.phase, Phase::GameOver);
}

#[test]
fn test_invincibility_window_is_one_second() {
    let mut sim = seeded(6);
    park_player_at_bottom(&mut sim);
    let struck = adversary_on_player(&sim);
    sim.arena_mut().adversaries[0] = struck;

    sim.tick(&idle());
    let hit_at = sim.clock().now_ms();
    assert_eq!(sim.arena().player.health, 2);

    loop {
        // Keep something on top of the player every tick
        let struck = adversary_on_player(&sim);
        sim.arena_mut().adversaries[0] = struck;
        let report = sim.tick(&idle());
        let now = sim.clock().now_ms();
        if now < hit_at + 1000 {
            assert_eq!(report.collisions.player_hits, 0, "hit at {now}ms inside the window");
            assert_eq!(sim.arena().player.health, 2);
        } else {
            assert_eq!(report.collisions.player_hits, 1);
            assert_eq!(sim.arena().player.health, 1);
            assert_eq!(sim.arena().player.invincible_since, Some(now));
            break;
        }
    }
}

#[test]
fn test_held_controls_move_player_diagonally() {
    let mut sim = seeded(7);
    let start = sim.arena().player.bounds();
    let frame = InputFrame::holding(stellar_blitz::ControlState {
        up: true,
        right: true,
        ..Default::default()
    });

    sim.tick(&frame);

    let moved = sim.arena().player.bounds();
    assert_eq!(moved.x, start.x + 6.0);
    assert_eq!(moved.y, start.y - 6.0);
}

#[test]
fn test_fired_projectile_travels_from_player() {
    let mut sim = seeded(8);
    let (nose_x, nose_y) = sim.arena().player.fire_origin();

    sim.tick(&InputFrame::fire());
    sim.tick(&idle());

    let projectile = sim.arena().projectiles[0].bounds();
    assert_eq!(projectile.center_x(), nose_x);
    assert_eq!(projectile.bottom(), nose_y - 30.0);
}

#[test]
fn test_same_seed_same_game() {
    let mut first = seeded(99);
    let mut second = seeded(99);
    for tick in 0..300 {
        let frame = if tick % 20 == 0 {
            InputFrame::fire()
        } else {
            idle()
        };
        first.tick(&frame);
        second.tick(&frame);
    }
    assert_eq!(first.snapshot(), second.snapshot());
}

#[test]
fn test_pool_size_never_changes_over_a_long_game() {
    let mut sim = seeded(10);
    for tick in 0..3000 {
        let frame = if tick % 7 == 0 {
            InputFrame::fire()
        } else {
            idle()
        };
        sim.tick(&frame);
        assert_eq!(sim.snapshot().count(EntityKind::Adversary), 8);
        if sim.state().phase == Phase::GameOver {
            break;
        }
    }
}

#[test]
fn test_time_attack_ends_when_the_clock_runs_out() {
    let mut sim = in_mode(13, GameMode::TimeAttack, |config| {
        config.modes.time_attack_limit_ms = 1000;
    });
    park_player_at_bottom(&mut sim);

    for _ in 0..59 {
        sim.tick(&idle());
    }
    assert_eq!(sim.state().phase, Phase::Running);
    assert_eq!(sim.time_left_ms(), Some(17));

    let report = sim.tick(&idle());
    assert!(!report.survival_points_awarded);
    assert_eq!(sim.state().phase, Phase::GameOver);
    assert_eq!(sim.state().outcome, Some(Outcome::TimeUp));
    assert_eq!(sim.state().score, 0);
    assert_eq!(sim.time_left_ms(), Some(0));
}

#[test]
fn test_conquest_boss_falls_to_five_shots_and_wins() {
    let mut sim = in_mode(14, GameMode::Conquest, |config| {
        config.modes.conquest_kill_target = 1;
    });
    park_player_at_bottom(&mut sim);
    sim.arena_mut().adversaries[0] = Adversary::new(100.0, 100.0, 30.0, 40.0, 0.0, 0.0);
    let config = sim.config().projectile.clone();
    sim.arena_mut()
        .projectiles
        .push(Projectile::new(115.0, 140.0, &config));

    let report = sim.tick(&idle());
    assert_eq!(report.collisions.adversaries_destroyed, 1);
    assert!(report.boss_spawned);
    assert_eq!(sim.state().kills, 1);
    assert_eq!(sim.snapshot().boss_health, Some(5));

    // Bring the boss well into view and stack five shots inside it
    let boss = sim.arena_mut().boss.as_mut().unwrap();
    boss.y = 100.0;
    let center_x = boss.bounds().center_x();
    for bottom in [250.0, 240.0, 230.0, 220.0, 210.0] {
        sim.arena_mut()
            .projectiles
            .push(Projectile::new(center_x, bottom, &config));
    }

    let report = sim.tick(&idle());
    assert!(report.collisions.boss_destroyed);
    assert!(sim.arena().boss.is_none());
    assert!(sim.arena().projectiles.is_empty());
    assert_eq!(sim.state().score, 600);
    assert_eq!(sim.state().phase, Phase::GameOver);
    assert_eq!(sim.state().outcome, Some(Outcome::BossDefeated));
}

#[test]
fn test_conquest_boss_shrugs_off_fewer_shots() {
    let mut sim = in_mode(15, GameMode::Conquest, |config| {
        config.modes.conquest_kill_target = 1;
    });
    park_player_at_bottom(&mut sim);
    sim.arena_mut().adversaries.clear();
    sim.state_mut().kills = 1;
    assert!(sim.tick(&idle()).boss_spawned);

    let config = sim.config().projectile.clone();
    let boss = sim.arena_mut().boss.as_mut().unwrap();
    boss.y = 100.0;
    let center_x = boss.bounds().center_x();
    for bottom in [250.0, 240.0] {
        sim.arena_mut()
            .projectiles
            .push(Projectile::new(center_x, bottom, &config));
    }

    let report = sim.tick(&idle());
    assert!(!report.collisions.boss_destroyed);
    assert_eq!(sim.snapshot().boss_health, Some(3));
    assert_eq!(sim.state().phase, Phase::Running);
}

#[test]
fn test_dodge_scores_only_while_vulnerable() {
    let mut sim = in_mode(16, GameMode::Dodge, |_| {});
    sim.arena_mut().adversaries.clear();

    let report = sim.tick(&InputFrame::fire());
    assert_eq!(report.projectiles_fired, 0);
    assert!(sim.arena().projectiles.is_empty());

    for _ in 1..60 {
        sim.tick(&idle());
    }
    assert_eq!(sim.state().score, 10);

    for _ in 0..30 {
        sim.tick(&idle());
    }
    let now = sim.clock().now_ms();
    sim.arena_mut().player.take_hit(now);

    // The interval closing at 2000ms falls inside the invincibility window
    for _ in 0..30 {
        sim.tick(&idle());
    }
    assert_eq!(sim.clock().now_ms(), 2000);
    assert_eq!(sim.state().score, 10);

    for _ in 0..60 {
        sim.tick(&idle());
    }
    assert_eq!(sim.state().score, 20);
}

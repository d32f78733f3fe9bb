//! Collision detection and resolution between the player, adversaries and projectiles.
//!
//! Detection functions are pure. Resolution functions apply the consequences
//! (removals, respawns, health, score) and always replace a destroyed
//! adversary in the same slot, so the pool size never changes.

use rand::Rng;

use crate::config::{BossConfig, GameConfig, ScoringConfig};
use crate::entities::{
    Adversary, Body, EntityArena, GameState, Outcome, Phase, Player, Projectile,
};
use crate::spawner::Spawner;

/// One projectile striking one adversary, by index into the arena's collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile: usize,
    pub adversary: usize,
}

/// What collision resolution did during a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Health lost by the player this tick, one per overlapping enemy
    pub player_hits: u32,
    pub adversaries_destroyed: u32,
    pub boss_destroyed: bool,
    pub game_over: bool,
}

/// Indices (in pool order) of every adversary overlapping the player. Empty
/// while the player is invincible at `now_ms`.
pub fn find_player_hits(player: &Player, adversaries: &[Adversary], now_ms: u64) -> Vec<usize> {
    if player.is_invincible(now_ms) {
        return Vec::new();
    }
    let player_bounds = player.bounds();
    adversaries
        .iter()
        .enumerate()
        .filter(|(_, adversary)| player_bounds.intersects(&adversary.bounds()))
        .map(|(e_idx, _)| e_idx)
        .collect()
}

/// Pairs projectiles with the adversaries they hit.
///
/// Projectiles are visited oldest first and each claims the lowest-index
/// adversary it overlaps that no earlier projectile claimed. Every projectile
/// and every adversary appears in at most one pair.
pub fn find_projectile_hits(
    projectiles: &[Projectile],
    adversaries: &[Adversary],
) -> Vec<ProjectileHit> {
    let mut claimed = vec![false; adversaries.len()];
    let mut hits = Vec::new();

    for (p_idx, projectile) in projectiles.iter().enumerate() {
        let projectile_bounds = projectile.bounds();
        let target = adversaries.iter().enumerate().position(|(e_idx, adversary)| {
            !claimed[e_idx] && projectile_bounds.intersects(&adversary.bounds())
        });

        if let Some(e_idx) = target {
            claimed[e_idx] = true;
            hits.push(ProjectileHit {
                projectile: p_idx,
                adversary: e_idx,
            });
        }
    }

    hits
}

/// Resolves Player×Adversary (and Player×Boss) for this tick.
///
/// Unless the player is invincible, every overlapping adversary is replaced
/// in its slot and costs one health; touching the boss costs one more. The
/// player then turns invincible from `now_ms`, and the game ends if health
/// reached zero. Returns the health lost.
pub fn resolve_player_collision<R: Rng>(
    arena: &mut EntityArena,
    state: &mut GameState,
    spawner: &mut Spawner<R>,
    now_ms: u64,
) -> u32 {
    let struck = find_player_hits(&arena.player, &arena.adversaries, now_ms);
    let player_bounds = arena.player.bounds();
    let boss_hit = !arena.player.is_invincible(now_ms)
        && arena
            .boss
            .as_ref()
            .is_some_and(|boss| boss.bounds().intersects(&player_bounds));

    let hits = struck.len() as u32 + u32::from(boss_hit);
    if hits == 0 {
        return 0;
    }

    for &e_idx in &struck {
        arena.adversaries[e_idx] = spawner.spawn_adversary();
    }
    arena.player.take_hits(hits, now_ms);
    log::debug!(
        "player hit by adversaries {struck:?}{} at {now_ms}ms, health now {}",
        if boss_hit { " and the boss" } else { "" },
        arena.player.health
    );

    if !arena.player.is_alive() {
        state.finish(Outcome::Destroyed);
    }
    hits
}

/// Resolves Projectile×Adversary for this tick and returns how many
/// adversaries were destroyed.
pub fn resolve_projectile_collisions<R: Rng>(
    arena: &mut EntityArena,
    state: &mut GameState,
    spawner: &mut Spawner<R>,
    scoring: &ScoringConfig,
) -> u32 {
    let hits = find_projectile_hits(&arena.projectiles, &arena.adversaries);
    if hits.is_empty() {
        return 0;
    }

    let mut spent = vec![false; arena.projectiles.len()];
    for hit in &hits {
        spent[hit.projectile] = true;
        arena.adversaries[hit.adversary] = spawner.spawn_adversary();
        state.add_kill(scoring);
        log::debug!(
            "projectile {} destroyed adversary {}, score {}",
            hit.projectile,
            hit.adversary,
            state.score
        );
    }

    let mut spent = spent.into_iter();
    arena
        .projectiles
        .retain(|_| !spent.next().unwrap_or(false));

    hits.len() as u32
}

/// Resolves Projectile×Boss with whatever projectiles the adversaries left.
///
/// Each overlapping projectile is spent and takes one health off the boss,
/// oldest first; projectiles after the killing shot fly on. Destroying the
/// boss scores its points and wins the game. Returns `true` if it went down.
pub fn resolve_boss_collisions(
    arena: &mut EntityArena,
    state: &mut GameState,
    boss_config: &BossConfig,
) -> bool {
    let Some(boss) = arena.boss.as_mut() else {
        return false;
    };
    let boss_bounds = boss.bounds();

    let mut destroyed = false;
    arena.projectiles.retain(|projectile| {
        if destroyed || !projectile.bounds().intersects(&boss_bounds) {
            return true;
        }
        destroyed = boss.take_hit();
        false
    });
    if !destroyed {
        return false;
    }

    arena.boss = None;
    state.add_points(boss_config.kill_points);
    state.finish(Outcome::BossDefeated);
    log::info!("boss destroyed, score {}", state.score);
    true
}

/// Runs every collision check in order and reports what happened.
pub fn resolve_collisions<R: Rng>(
    arena: &mut EntityArena,
    state: &mut GameState,
    spawner: &mut Spawner<R>,
    config: &GameConfig,
    now_ms: u64,
) -> CollisionReport {
    let player_hits = resolve_player_collision(arena, state, spawner, now_ms);
    let adversaries_destroyed =
        resolve_projectile_collisions(arena, state, spawner, &config.scoring);
    let boss_destroyed = resolve_boss_collisions(arena, state, &config.modes.boss);
    CollisionReport {
        player_hits,
        adversaries_destroyed,
        boss_destroyed,
        game_over: state.phase == Phase::GameOver,
    }
}

//! The fixed-step game simulation.
//!
//! [`Simulation::tick`] is the whole game rule set: it takes one
//! [`InputFrame`], moves everything, resolves collisions, updates score and
//! health, and leaves a state that [`Simulation::snapshot`] can hand to a
//! renderer. It never blocks and never fails; pacing belongs to the caller.

use rand::rngs::StdRng;
use rand::Rng;

use crate::clock::SimClock;
use crate::collision::{self, CollisionReport};
use crate::config::{ConfigError, GameConfig, GameMode};
use crate::entities::{
    Body, EntityArena, EntityRef, FULL_OPACITY, GameState, Outcome, Phase, Player, Projectile,
};
use crate::input::InputFrame;
use crate::snapshot::{RenderSnapshot, SpriteView};
use crate::spawner::Spawner;

/// Time step handed to every entity on a normal tick
const TICK_DT: f32 = 1.0;

/// What happened during one call to [`Simulation::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// False when the tick was skipped (paused, game over, quit)
    pub advanced: bool,
    pub projectiles_fired: u32,
    /// Adversaries that fell out the bottom and were sent back to the top
    pub adversaries_recycled: u32,
    /// Projectiles that flew off the top of the arena
    pub projectiles_expired: u32,
    pub collisions: CollisionReport,
    pub survival_points_awarded: bool,
    pub boss_spawned: bool,
}

pub struct Simulation<R = StdRng> {
    config: GameConfig,
    arena: EntityArena,
    state: GameState,
    spawner: Spawner<R>,
    clock: SimClock,
    /// Simulated time of the most recent shot, for the fire cooldown
    last_shot_ms: Option<u64>,
}

impl Simulation<StdRng> {
    /// Validates `config` and starts a new game.
    ///
    /// Spawns are seeded from `config.seed`, or from a fresh random seed
    /// which is logged so the run can be replayed.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("starting game with spawn seed {seed}");
        let spawner = Spawner::seeded(&config.adversary, config.arena(), seed);
        Ok(Self::with_spawner(config, spawner))
    }
}

impl<R: Rng> Simulation<R> {
    /// Starts a game with an existing spawner. `config` is assumed valid.
    pub fn with_spawner(config: GameConfig, mut spawner: Spawner<R>) -> Self {
        let arena = new_arena(&config, &mut spawner);
        Self {
            clock: SimClock::new(config.tick_rate),
            config,
            arena,
            state: GameState::new(),
            spawner,
            last_shot_ms: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn arena(&self) -> &EntityArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut EntityArena {
        &mut self.arena
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn spawner(&self) -> &Spawner<R> {
        &self.spawner
    }

    /// Runs one fixed step.
    pub fn tick(&mut self, input: &InputFrame) -> TickReport {
        if input.quit && self.state.phase != Phase::Quit {
            log::info!("quit requested, final score {}", self.state.score);
            self.state.phase = Phase::Quit;
        }

        match self.state.phase {
            Phase::Quit => return TickReport::default(),
            Phase::GameOver => {
                if input.restart {
                    self.restart();
                }
                return TickReport::default();
            }
            Phase::Paused => {
                if input.toggle_pause {
                    log::info!("resumed");
                    self.state.phase = Phase::Running;
                }
                return TickReport::default();
            }
            Phase::Running => {
                if input.toggle_pause {
                    log::info!("paused at {}ms", self.clock.now_ms());
                    self.state.phase = Phase::Paused;
                    return TickReport::default();
                }
            }
        }

        self.step(input)
    }

    fn step(&mut self, input: &InputFrame) -> TickReport {
        self.clock.advance();
        let now_ms = self.clock.now_ms();

        let mut projectiles_fired = 0;
        for _ in 0..input.fire_presses {
            if self.can_fire(now_ms) {
                self.fire();
                self.last_shot_ms = Some(now_ms);
                projectiles_fired += 1;
            }
        }

        self.arena.player.update_invincibility(now_ms);
        self.arena.player.steer(&input.controls);
        let (adversaries_recycled, projectiles_expired) = self.advance_entities(TICK_DT);

        let collisions = collision::resolve_collisions(
            &mut self.arena,
            &mut self.state,
            &mut self.spawner,
            &self.config,
            now_ms,
        );

        let eligible = match self.config.mode {
            GameMode::Dodge => !self.arena.player.is_invincible(now_ms),
            mode => mode.awards_survival_points(),
        };
        let survival_points_awarded =
            self.state
                .advance_score_timer(now_ms, &self.config.scoring, eligible);

        let boss_spawned = self.apply_mode_rules(now_ms);

        if self.state.phase == Phase::GameOver {
            log::info!(
                "game over ({:?}) at {now_ms}ms with score {}",
                self.state.outcome,
                self.state.score
            );
        }

        TickReport {
            advanced: true,
            projectiles_fired,
            adversaries_recycled,
            projectiles_expired,
            collisions,
            survival_points_awarded,
            boss_spawned,
        }
    }

    /// Whether a fire press at `now_ms` launches a projectile under the
    /// current mode and cooldown.
    pub fn can_fire(&self, now_ms: u64) -> bool {
        self.config.mode.can_fire()
            && self.last_shot_ms.is_none_or(|last| {
                now_ms.saturating_sub(last) >= self.config.projectile.fire_cooldown_ms
            })
    }

    /// End-of-tick rules of the time attack and conquest modes. Returns
    /// `true` if the conquest boss appeared this tick.
    fn apply_mode_rules(&mut self, now_ms: u64) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        let modes = &self.config.modes;
        match self.config.mode {
            GameMode::TimeAttack if now_ms >= modes.time_attack_limit_ms => {
                self.state.finish(Outcome::TimeUp);
                false
            }
            GameMode::Conquest
                if self.arena.boss.is_none()
                    && self.state.kills >= modes.conquest_kill_target =>
            {
                let target = self.player_center();
                self.arena.boss = Some(self.spawner.spawn_boss(&modes.boss, target));
                log::info!("boss spawned after {} kills", self.state.kills);
                true
            }
            _ => false,
        }
    }

    /// Milliseconds left before a time attack ends; `None` in other modes.
    pub fn time_left_ms(&self) -> Option<u64> {
        (self.config.mode == GameMode::TimeAttack).then(|| {
            self.config
                .modes
                .time_attack_limit_ms
                .saturating_sub(self.clock.now_ms())
        })
    }

    fn player_center(&self) -> (f32, f32) {
        let bounds = self.arena.player.bounds();
        (bounds.center_x(), bounds.center_y())
    }

    /// Launches a projectile from the top centre of the player.
    pub fn fire(&mut self) {
        let (center_x, top) = self.arena.player.fire_origin();
        self.arena
            .projectiles
            .push(Projectile::new(center_x, top, &self.config.projectile));
    }

    /// Moves every entity by `dt` ticks. Adversaries that dropped out of the
    /// arena are recycled at the top, projectiles that left it are removed.
    /// The boss steers for where the player has just moved to.
    /// Returns `(recycled, expired)` counts.
    pub fn advance_entities(&mut self, dt: f32) -> (u32, u32) {
        let bounds = self.config.arena();
        self.arena.player.advance(dt);
        let target = self.player_center();
        if let Some(boss) = &mut self.arena.boss {
            boss.target = target;
            boss.advance(dt);
        }

        let mut recycled = 0;
        for adversary in &mut self.arena.adversaries {
            adversary.advance(dt);
            if adversary.has_left_arena(&bounds) {
                self.spawner.respawn(adversary);
                recycled += 1;
            }
        }

        for projectile in &mut self.arena.projectiles {
            projectile.advance(dt);
        }
        let before = self.arena.projectiles.len();
        self.arena
            .projectiles
            .retain(|projectile| !projectile.has_left_arena(&bounds));
        let expired = (before - self.arena.projectiles.len()) as u32;

        (recycled, expired)
    }

    /// Throws away the current game and starts a new one. The spawn RNG
    /// carries on from where it was.
    pub fn restart(&mut self) {
        log::info!("restarting after score {}", self.state.score);
        self.arena = new_arena(&self.config, &mut self.spawner);
        self.state = GameState::new();
        self.clock.reset();
        self.last_shot_ms = None;
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let now_ms = self.clock.now_ms();
        let sprites = self
            .arena
            .iter()
            .map(|entity| SpriteView {
                bounds: entity.bounds(),
                kind: entity.kind(),
                opacity: match entity {
                    EntityRef::Player(player) => player.opacity(now_ms),
                    EntityRef::Adversary(_) | EntityRef::Boss(_) | EntityRef::Projectile(_) => {
                        FULL_OPACITY
                    }
                },
            })
            .collect();

        RenderSnapshot {
            arena: self.config.arena(),
            sprites,
            score: self.state.score,
            health: self.arena.player.health,
            phase: self.state.phase,
            elapsed_ms: now_ms,
            mode: self.config.mode,
            kills: self.state.kills,
            boss_health: self.arena.boss.as_ref().map(|boss| boss.health),
            time_left_ms: self.time_left_ms(),
            outcome: self.state.outcome,
        }
    }
}

fn new_arena<R: Rng>(config: &GameConfig, spawner: &mut Spawner<R>) -> EntityArena {
    let player = Player::new(&config.player, config.arena());
    EntityArena::new(player, spawner.spawn_pool())
}

//! Game tuning, loaded from TOML.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. [`GameConfig::validate`] runs once at startup; the simulation
//! assumes a validated config afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::entities::Bounds;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Half-open integer range `[min, max)` used for random spawn draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: i32,
    pub max: i32,
}

impl SpawnRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min as f32 && value < self.max as f32
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min >= self.max {
            return Err(ConfigError::invalid(
                field,
                format!("range [{}, {}) is empty", self.min, self.max),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Units moved per tick on each held axis
    pub speed: f32,
    pub health: u32,
    pub invincibility_ms: u64,
    /// Opacity toggles this often while invincible
    pub blink_interval_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 40.0,
            speed: 6.0,
            health: 3,
            invincibility_ms: 1000,
            blink_interval_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdversaryConfig {
    pub width: f32,
    pub height: f32,
    /// Number of adversaries kept alive at all times
    pub pool_size: usize,
    /// Vertical start position, above the visible arena
    pub spawn_y: SpawnRange,
    pub spawn_speed_x: SpawnRange,
    pub spawn_speed_y: SpawnRange,
    /// Speeds drawn when an adversary falls out the bottom and is recycled.
    /// Narrower than the initial spawn ranges.
    pub respawn_speed_x: SpawnRange,
    pub respawn_speed_y: SpawnRange,
}

impl Default for AdversaryConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 40.0,
            pool_size: 8,
            spawn_y: SpawnRange::new(-100, -50),
            spawn_speed_x: SpawnRange::new(-3, 3),
            spawn_speed_y: SpawnRange::new(3, 7),
            respawn_speed_x: SpawnRange::new(-2, 2),
            respawn_speed_y: SpawnRange::new(3, 6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub width: f32,
    pub height: f32,
    /// Upward units per tick
    pub speed: f32,
    /// Minimum simulated time between two shots; 0 fires on every press
    pub fire_cooldown_ms: u64,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            width: 5.0,
            height: 15.0,
            speed: 15.0,
            fire_cooldown_ms: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub survival_points: u32,
    pub survival_interval_ms: u64,
    pub kill_points: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            survival_points: 10,
            survival_interval_ms: 1000,
            kill_points: 100,
        }
    }
}

/// Rule set for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Survive and shoot for as long as health lasts
    #[default]
    Classic,
    /// No firing; survival points only while not invincible
    Dodge,
    /// Kill points only, and the game ends when the time limit runs out
    TimeAttack,
    /// Kill points only; enough kills bring out a boss, and beating it wins
    Conquest,
}

impl GameMode {
    pub fn can_fire(self) -> bool {
        self != GameMode::Dodge
    }

    pub fn awards_survival_points(self) -> bool {
        matches!(self, GameMode::Classic | GameMode::Dodge)
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Dodge => "Dodge",
            GameMode::TimeAttack => "Time Attack",
            GameMode::Conquest => "Conquest",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub width: f32,
    pub height: f32,
    /// Projectile hits needed to destroy it
    pub health: u32,
    /// Units per tick, always straight at the player
    pub speed: f32,
    pub kill_points: u32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            width: 150.0,
            height: 200.0,
            health: 5,
            speed: 2.25,
            kill_points: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    pub time_attack_limit_ms: u64,
    /// Adversary kills before the conquest boss appears
    pub conquest_kill_target: u32,
    pub boss: BossConfig,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            time_attack_limit_ms: 60_000,
            conquest_kill_target: 10,
            boss: BossConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Fixed simulation steps per second of simulated time
    pub tick_rate: u32,
    /// Seed for the spawn RNG; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Stop the loop as soon as the game ends
    pub exit_on_game_over: bool,
    pub mode: GameMode,
    pub player: PlayerConfig,
    pub adversary: AdversaryConfig,
    pub projectile: ProjectileConfig,
    pub scoring: ScoringConfig,
    pub modes: ModeConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 600.0,
            arena_height: 700.0,
            tick_rate: 60,
            seed: None,
            exit_on_game_over: false,
            mode: GameMode::default(),
            player: PlayerConfig::default(),
            adversary: AdversaryConfig::default(),
            projectile: ProjectileConfig::default(),
            scoring: ScoringConfig::default(),
            modes: ModeConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reads, parses and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn arena(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.arena_width, self.arena_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("arena_width", self.arena_width)?;
        check_positive("arena_height", self.arena_height)?;
        if self.tick_rate == 0 {
            return Err(ConfigError::invalid("tick_rate", "must be at least 1"));
        }

        let player = &self.player;
        check_positive("player.width", player.width)?;
        check_positive("player.height", player.height)?;
        check_positive("player.speed", player.speed)?;
        check_fits("player.width", player.width, self.arena_width)?;
        check_fits("player.height", player.height, self.arena_height)?;
        if player.health == 0 {
            return Err(ConfigError::invalid("player.health", "must be at least 1"));
        }
        if player.invincibility_ms == 0 {
            return Err(ConfigError::invalid(
                "player.invincibility_ms",
                "must be at least 1",
            ));
        }
        if player.blink_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "player.blink_interval_ms",
                "must be at least 1",
            ));
        }

        let adversary = &self.adversary;
        check_positive("adversary.width", adversary.width)?;
        check_positive("adversary.height", adversary.height)?;
        // Spawn x is drawn from [0, arena_width - width), which must not be empty.
        if adversary.width.ceil() >= self.arena_width.floor() {
            return Err(ConfigError::invalid(
                "adversary.width",
                format!(
                    "{} leaves no room to spawn in an arena {} wide",
                    adversary.width, self.arena_width
                ),
            ));
        }
        if adversary.pool_size == 0 {
            return Err(ConfigError::invalid(
                "adversary.pool_size",
                "must be at least 1",
            ));
        }
        adversary.spawn_y.check("adversary.spawn_y")?;
        adversary.spawn_speed_x.check("adversary.spawn_speed_x")?;
        adversary.spawn_speed_y.check("adversary.spawn_speed_y")?;
        adversary.respawn_speed_x.check("adversary.respawn_speed_x")?;
        adversary.respawn_speed_y.check("adversary.respawn_speed_y")?;
        // Adversaries that never fall never recycle
        check_descending("adversary.spawn_speed_y", adversary.spawn_speed_y)?;
        check_descending("adversary.respawn_speed_y", adversary.respawn_speed_y)?;

        let projectile = &self.projectile;
        check_positive("projectile.width", projectile.width)?;
        check_positive("projectile.height", projectile.height)?;
        check_positive("projectile.speed", projectile.speed)?;

        if self.scoring.survival_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "scoring.survival_interval_ms",
                "must be at least 1",
            ));
        }

        let modes = &self.modes;
        if modes.time_attack_limit_ms == 0 {
            return Err(ConfigError::invalid(
                "modes.time_attack_limit_ms",
                "must be at least 1",
            ));
        }
        if modes.conquest_kill_target == 0 {
            return Err(ConfigError::invalid(
                "modes.conquest_kill_target",
                "must be at least 1",
            ));
        }
        let boss = &modes.boss;
        check_positive("modes.boss.width", boss.width)?;
        check_positive("modes.boss.height", boss.height)?;
        check_positive("modes.boss.speed", boss.speed)?;
        check_fits("modes.boss.width", boss.width, self.arena_width)?;
        check_fits("modes.boss.height", boss.height, self.arena_height)?;
        if boss.health == 0 {
            return Err(ConfigError::invalid("modes.boss.health", "must be at least 1"));
        }

        Ok(())
    }
}

fn check_descending(field: &'static str, range: SpawnRange) -> Result<(), ConfigError> {
    if range.min <= 0 {
        return Err(ConfigError::invalid(
            field,
            format!("speeds from {} up must all be positive", range.min),
        ));
    }
    Ok(())
}

fn check_fits(field: &'static str, size: f32, limit: f32) -> Result<(), ConfigError> {
    if size > limit {
        return Err(ConfigError::invalid(
            field,
            format!("{size} does not fit in the arena ({limit})"),
        ));
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("{value} must be a positive number"),
        ));
    }
    Ok(())
}

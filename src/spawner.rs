use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{AdversaryConfig, BossConfig, SpawnRange};
use crate::entities::{Adversary, Boss, Bounds};

/// Creates and recycles adversaries.
///
/// All spawn parameters come from one RNG, so a fixed seed replays the same
/// sequence of adversaries.
#[derive(Debug, Clone)]
pub struct Spawner<R = StdRng> {
    rng: R,
    config: AdversaryConfig,
    arena: Bounds,
    seed: Option<u64>,
}

impl Spawner<StdRng> {
    pub fn seeded(config: &AdversaryConfig, arena: Bounds, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config: config.clone(),
            arena,
            seed: Some(seed),
        }
    }
}

impl<R: Rng> Spawner<R> {
    pub fn with_rng(config: &AdversaryConfig, arena: Bounds, rng: R) -> Self {
        Self {
            rng,
            config: config.clone(),
            arena,
            seed: None,
        }
    }

    /// The seed this spawner was built from, if it was built from one.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// A fresh adversary above the visible arena, using the initial speed ranges.
    pub fn spawn_adversary(&mut self) -> Adversary {
        let x = self.draw_x();
        let y = self.draw(self.config.spawn_y);
        let velocity_x = self.draw(self.config.spawn_speed_x);
        let velocity_y = self.draw(self.config.spawn_speed_y);
        Adversary::new(
            x,
            y,
            self.config.width,
            self.config.height,
            velocity_x,
            velocity_y,
        )
    }

    /// Fills a whole pool at game start.
    pub fn spawn_pool(&mut self) -> Vec<Adversary> {
        (0..self.config.pool_size)
            .map(|_| self.spawn_adversary())
            .collect()
    }

    /// Sends an adversary that fell out of the arena back to the top with the
    /// narrower respawn speed ranges.
    pub fn respawn(&mut self, adversary: &mut Adversary) {
        let x = self.draw_x();
        let y = self.draw(self.config.spawn_y);
        let velocity_x = self.draw(self.config.respawn_speed_x);
        let velocity_y = self.draw(self.config.respawn_speed_y);
        adversary.reposition(x, y, velocity_x, velocity_y);
    }

    /// The conquest boss, just above the top edge at a random x, already
    /// heading for `target`.
    pub fn spawn_boss(&mut self, config: &BossConfig, target: (f32, f32)) -> Boss {
        let x = self.draw_x_for(config.width);
        Boss::new(x, self.arena.top(), config, target)
    }

    fn draw_x(&mut self) -> f32 {
        self.draw_x_for(self.config.width)
    }

    fn draw_x_for(&mut self, width: f32) -> f32 {
        let max_x = (self.arena.width - width).floor() as i32;
        self.draw(SpawnRange::new(0, max_x.max(1)))
    }

    fn draw(&mut self, range: SpawnRange) -> f32 {
        self.rng.random_range(range.min..range.max) as f32
    }
}

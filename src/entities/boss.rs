use super::body::{Body, EntityKind};
use super::bounds::Bounds;
use crate::config::BossConfig;

/// The conquest boss. Homes in on the player and soaks up several hits.
#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: u32,
    /// Centre of the player at the start of the tick
    pub target: (f32, f32),
}

impl Boss {
    /// Creates a boss with its bottom edge at `bottom_y`, heading for `target`.
    pub fn new(x: f32, bottom_y: f32, config: &BossConfig, target: (f32, f32)) -> Self {
        Self {
            x,
            y: bottom_y - config.height,
            width: config.width,
            height: config.height,
            speed: config.speed,
            health: config.health,
            target,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Takes one projectile hit. Returns `true` if that destroyed it.
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        !self.is_alive()
    }
}

impl Body for Boss {
    /// Moves straight towards `target`, stopping on it rather than overshooting.
    fn advance(&mut self, dt: f32) {
        let bounds = self.bounds();
        let dx = self.target.0 - bounds.center_x();
        let dy = self.target.1 - bounds.center_y();
        let distance = dx.hypot(dy);
        let step = self.speed * dt;
        if distance <= step {
            self.x += dx;
            self.y += dy;
        } else if distance > 0.0 {
            self.x += dx / distance * step;
            self.y += dy / distance * step;
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Boss
    }
}

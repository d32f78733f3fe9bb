use super::body::{Body, EntityKind};
use super::bounds::Bounds;
use crate::config::ProjectileConfig;

/// A player shot. Travels straight up with no horizontal drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Always negative: screen y grows downwards
    pub velocity_y: f32,
}

impl Projectile {
    /// Creates a projectile whose bottom edge is centred on `(center_x, bottom_y)`.
    pub fn new(center_x: f32, bottom_y: f32, config: &ProjectileConfig) -> Self {
        Self {
            x: center_x - config.width / 2.0,
            y: bottom_y - config.height,
            width: config.width,
            height: config.height,
            velocity_y: -config.speed,
        }
    }

    /// True once the projectile is entirely above the arena.
    pub fn has_left_arena(&self, arena: &Bounds) -> bool {
        self.bounds().bottom() < arena.top()
    }
}

impl Body for Projectile {
    fn advance(&mut self, dt: f32) {
        self.y += self.velocity_y * dt;
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Bounds {
        Bounds::new(0.0, 0.0, 600.0, 700.0)
    }

    #[test]
    fn test_projectile_new_sits_on_fire_origin() {
        let projectile = Projectile::new(300.0, 330.0, &ProjectileConfig::default());
        let bounds = projectile.bounds();
        assert_eq!(bounds.center_x(), 300.0);
        assert_eq!(bounds.bottom(), 330.0);
        assert_eq!(projectile.velocity_y, -15.0);
        assert_eq!(projectile.kind(), EntityKind::Projectile);
    }

    #[test]
    fn test_projectile_moves_straight_up() {
        let mut projectile = Projectile::new(300.0, 330.0, &ProjectileConfig::default());
        let start_x = projectile.x;
        projectile.advance(1.0);
        assert_eq!(projectile.x, start_x);
        assert_eq!(projectile.bounds().bottom(), 315.0);
    }

    #[test]
    fn test_projectile_zero_dt_does_not_move() {
        let mut projectile = Projectile::new(300.0, 330.0, &ProjectileConfig::default());
        let before = projectile.clone();
        projectile.advance(0.0);
        assert_eq!(projectile, before);
    }

    #[test]
    fn test_projectile_leaves_once_bottom_is_above_arena() {
        let mut projectile = Projectile::new(100.0, 0.0, &ProjectileConfig::default());
        assert!(!projectile.has_left_arena(&arena()));

        projectile.advance(1.0);
        assert!(projectile.bounds().bottom() < 0.0);
        assert!(projectile.has_left_arena(&arena()));
    }

    #[test]
    fn test_projectile_touching_top_is_still_inside() {
        let projectile = Projectile::new(100.0, 0.0, &ProjectileConfig::default());
        assert_eq!(projectile.bounds().bottom(), 0.0);
        assert!(!projectile.has_left_arena(&arena()));
    }
}

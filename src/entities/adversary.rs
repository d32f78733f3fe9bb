use super::body::{Body, EntityKind};
use super::bounds::Bounds;

#[derive(Debug, Clone, PartialEq)]
pub struct Adversary {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl Adversary {
    pub fn new(x: f32, y: f32, width: f32, height: f32, velocity_x: f32, velocity_y: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            velocity_x,
            velocity_y,
        }
    }

    /// True once the whole sprite has dropped past the bottom of the arena.
    pub fn has_left_arena(&self, arena: &Bounds) -> bool {
        self.bounds().top() > arena.bottom()
    }

    /// Moves the adversary to a new start point with a new velocity.
    /// Used when recycling it instead of destroying it.
    pub fn reposition(&mut self, x: f32, y: f32, velocity_x: f32, velocity_y: f32) {
        self.x = x;
        self.y = y;
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
    }
}

impl Body for Adversary {
    fn advance(&mut self, dt: f32) {
        self.x += self.velocity_x * dt;
        self.y += self.velocity_y * dt;
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Adversary
    }
}

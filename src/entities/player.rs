use super::body::{Body, EntityKind};
use super::bounds::Bounds;
use crate::config::PlayerConfig;
use crate::input::ControlState;

/// Opacity used on the "dim" half of the invincibility blink
pub const BLINK_OPACITY: u8 = 100;
pub const FULL_OPACITY: u8 = 255;

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub health: u32,
    /// Simulated timestamp (ms) of the hit that started the current invincibility window
    pub invincible_since: Option<u64>,
    pub invincibility_ms: u64,
    pub blink_interval_ms: u64,
    /// Area the player is clamped to after every move
    pub arena: Bounds,
}

impl Player {
    /// Creates a player centred in `arena`.
    pub fn new(config: &PlayerConfig, arena: Bounds) -> Self {
        Self {
            x: arena.center_x() - config.width / 2.0,
            y: arena.center_y() - config.height / 2.0,
            width: config.width,
            height: config.height,
            speed: config.speed,
            velocity_x: 0.0,
            velocity_y: 0.0,
            health: config.health,
            invincible_since: None,
            invincibility_ms: config.invincibility_ms,
            blink_interval_ms: config.blink_interval_ms,
            arena,
        }
    }

    /// Sets the velocity from the directional controls held this tick.
    /// Opposite directions cancel out; the two axes are independent.
    pub fn steer(&mut self, controls: &ControlState) {
        let horizontal = f32::from(u8::from(controls.right)) - f32::from(u8::from(controls.left));
        let vertical = f32::from(u8::from(controls.down)) - f32::from(u8::from(controls.up));
        self.velocity_x = horizontal * self.speed;
        self.velocity_y = vertical * self.speed;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_invincible(&self, now_ms: u64) -> bool {
        self.invincible_since
            .is_some_and(|since| now_ms < since.saturating_add(self.invincibility_ms))
    }

    /// Clears an invincibility window that has run its course.
    pub fn update_invincibility(&mut self, now_ms: u64) {
        if self.invincible_since.is_some() && !self.is_invincible(now_ms) {
            self.invincible_since = None;
        }
    }

    /// Applies one adversary hit. See [`Player::take_hits`].
    pub fn take_hit(&mut self, now_ms: u64) -> bool {
        self.take_hits(1, now_ms)
    }

    /// Applies every hit landed in one collision check: one point of health
    /// each, then invincible from `now_ms`. Returns `false` (and changes
    /// nothing) if there were no hits or the player is still invincible.
    pub fn take_hits(&mut self, hits: u32, now_ms: u64) -> bool {
        if hits == 0 || self.is_invincible(now_ms) {
            return false;
        }
        self.health = self.health.saturating_sub(hits);
        self.invincible_since = Some(now_ms);
        true
    }

    /// Render opacity: blinks while invincible, solid otherwise.
    pub fn opacity(&self, now_ms: u64) -> u8 {
        if self.is_invincible(now_ms) && (now_ms / self.blink_interval_ms) % 2 == 0 {
            BLINK_OPACITY
        } else {
            FULL_OPACITY
        }
    }

    /// Where projectiles leave the ship: the centre of its top edge.
    pub fn fire_origin(&self) -> (f32, f32) {
        let bounds = self.bounds();
        (bounds.center_x(), bounds.top())
    }
}

impl Body for Player {
    fn advance(&mut self, dt: f32) {
        let moved = self
            .bounds()
            .translated(self.velocity_x * dt, self.velocity_y * dt)
            .clamp_within(&self.arena);
        self.x = moved.x;
        self.y = moved.y;
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }
}

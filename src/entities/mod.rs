mod adversary;
mod arena;
mod body;
mod boss;
mod bounds;
mod game_state;
mod player;
mod projectile;

// Re-export all public types
pub use adversary::Adversary;
pub use arena::EntityArena;
pub use body::{Body, EntityKind, EntityRef};
pub use boss::Boss;
pub use bounds::Bounds;
pub use game_state::{GameState, Outcome, Phase};
pub use player::{BLINK_OPACITY, FULL_OPACITY, Player};
pub use projectile::Projectile;

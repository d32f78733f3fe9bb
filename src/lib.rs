// Library exports for the game binary and tests
pub use app::{App, RunSummary};
pub use collision::CollisionReport;
pub use config::{ConfigError, GameConfig, GameMode};
pub use entities::{
    Adversary, Body, Boss, Bounds, EntityArena, EntityKind, EntityRef, GameState, Outcome, Phase,
    Player, Projectile,
};
pub use input::{ControlState, InputFrame, InputManager, InputSource, ScriptedInput};
pub use renderer::{GameRenderer, RenderSink, TerminalSink};
pub use simulation::{Simulation, TickReport};
pub use snapshot::{RenderSnapshot, SpriteView};
pub use spawner::Spawner;

pub mod app;
pub mod clock;
pub mod collision;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod simulation;
pub mod snapshot;
pub mod spawner;

use crate::config::GameMode;
use crate::entities::{Bounds, EntityKind, Outcome, Phase};

/// One entity as the renderer should draw it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteView {
    pub bounds: Bounds,
    pub kind: EntityKind,
    /// 0 (invisible) ..= 255 (solid)
    pub opacity: u8,
}

/// Render-ready view of the game after a tick.
///
/// Owns plain data only, so a sink can keep it around after the simulation
/// has moved on.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub arena: Bounds,
    pub sprites: Vec<SpriteView>,
    pub score: u32,
    pub health: u32,
    pub phase: Phase,
    pub elapsed_ms: u64,
    pub mode: GameMode,
    pub kills: u32,
    /// Remaining hits on the conquest boss while it is in play
    pub boss_health: Option<u32>,
    /// Countdown shown in time attack
    pub time_left_ms: Option<u64>,
    pub outcome: Option<Outcome>,
}

impl RenderSnapshot {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.sprites.iter().filter(|sprite| sprite.kind == kind).count()
    }

    pub fn player(&self) -> Option<&SpriteView> {
        self.sprites
            .iter()
            .find(|sprite| sprite.kind == EntityKind::Player)
    }
}

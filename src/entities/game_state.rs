use crate::config::ScoringConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    /// The game ended (see [`Outcome`]). Nothing moves until a restart.
    GameOver,
    /// The user asked to leave. Distinct from losing.
    Quit,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Player health ran out
    Destroyed,
    /// The time attack limit was reached
    TimeUp,
    /// The conquest boss was shot down
    BossDefeated,
}

/// Score bookkeeping and the current phase of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    /// Simulated time (ms) at which the current survival interval started
    pub score_timer_start_ms: u64,
    /// Adversaries destroyed by projectiles
    pub kills: u32,
    pub phase: Phase,
    /// Set together with `Phase::GameOver`
    pub outcome: Option<Outcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            score_timer_start_ms: 0,
            kills: 0,
            phase: Phase::Running,
            outcome: None,
        }
    }

    /// Ends the game. The first outcome recorded wins.
    pub fn finish(&mut self, outcome: Outcome) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        self.outcome = Some(outcome);
    }

    /// True until the user quits; a finished game still keeps the app alive.
    pub fn is_running(&self) -> bool {
        self.phase != Phase::Quit
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn add_kill(&mut self, scoring: &ScoringConfig) {
        self.kills += 1;
        self.add_points(scoring.kill_points);
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Closes the survival interval once it has fully elapsed and restarts it
    /// at `now_ms`. Points are only added if `eligible`. Returns `true` if
    /// points were awarded.
    pub fn advance_score_timer(
        &mut self,
        now_ms: u64,
        scoring: &ScoringConfig,
        eligible: bool,
    ) -> bool {
        if now_ms.saturating_sub(self.score_timer_start_ms) < scoring.survival_interval_ms {
            return false;
        }
        self.score_timer_start_ms = now_ms;
        if eligible {
            self.add_points(scoring.survival_points);
        }
        eligible
    }
}

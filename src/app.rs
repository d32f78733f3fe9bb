use color_eyre::Result;
use rand::Rng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::entities::Phase;
use crate::input::InputSource;
use crate::renderer::RenderSink;
use crate::simulation::Simulation;

/// Summary handed back when the loop ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub final_phase: Phase,
    pub score: u32,
    pub ticks: u64,
}

/// The main application: paces the simulation and wires it to input and output.
pub struct App<R = StdRng> {
    simulation: Simulation<R>,
    /// Wall-clock budget per tick; `None` runs as fast as possible
    frame_budget: Option<Duration>,
    exit_on_game_over: bool,
}

impl App<StdRng> {
    /// Construct a new instance of [`App`] paced to the configured tick rate.
    pub fn new(config: GameConfig) -> Result<Self> {
        let exit_on_game_over = config.exit_on_game_over;
        let simulation = Simulation::new(config)?;
        let frame_budget = Some(simulation.clock().tick_duration());
        Ok(Self {
            simulation,
            frame_budget,
            exit_on_game_over,
        })
    }
}

impl<R: Rng> App<R> {
    pub fn from_simulation(simulation: Simulation<R>) -> Self {
        let exit_on_game_over = simulation.config().exit_on_game_over;
        Self {
            simulation,
            frame_budget: None,
            exit_on_game_over,
        }
    }

    /// Turns wall-clock pacing on or off.
    pub fn with_frame_budget(mut self, frame_budget: Option<Duration>) -> Self {
        self.frame_budget = frame_budget;
        self
    }

    pub fn simulation(&self) -> &Simulation<R> {
        &self.simulation
    }

    /// Run the application's main loop until the player quits (or, with
    /// `exit_on_game_over`, until the game ends).
    pub fn run(mut self, input: &mut impl InputSource, sink: &mut impl RenderSink) -> Result<RunSummary> {
        let mut ticks = 0;
        while self.should_continue() {
            let frame_start = Instant::now();

            let frame = input.poll()?;
            if self.simulation.tick(&frame).advanced {
                ticks += 1;
            }
            sink.present(&self.simulation.snapshot())?;

            if let Some(budget) = self.frame_budget {
                let spent = frame_start.elapsed();
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }
            }
        }

        let state = self.simulation.state();
        log::info!(
            "loop finished in {:?} after {ticks} ticks, score {}",
            state.phase,
            state.score
        );
        Ok(RunSummary {
            final_phase: state.phase,
            score: state.score,
            ticks,
        })
    }

    fn should_continue(&self) -> bool {
        match self.simulation.state().phase {
            Phase::Quit => false,
            Phase::GameOver => !self.exit_on_game_over,
            Phase::Running | Phase::Paused => true,
        }
    }
}

//! Fixed timestep driver
//!
//! Frames arrive with arbitrary durations; the session accumulates them and
//! runs whole [`SIM_DT`] ticks, the same way the browser loop feeds the game.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::SimError;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, TickOutcome, tick};

/// A running game plus its frame accumulator
#[derive(Debug)]
pub struct Session {
    state: GameState,
    accumulator: f32,
    /// One-shot commands waiting for the next substep
    pending_pause: bool,
    pending_quit: bool,
    /// Events from every substep since the last drain; moved out of the
    /// state after each tick
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            pending_pause: false,
            pending_quit: false,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Feed one frame of wall-clock time
    ///
    /// Held inputs apply to every substep; pause and quit are latched until a
    /// substep consumes them, so a short frame cannot swallow them.
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> Result<TickOutcome, SimError> {
        self.pending_pause |= input.pause;
        self.pending_quit |= input.quit;
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut outcome = self.current_outcome();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let step = TickInput {
                pause: self.pending_pause,
                quit: self.pending_quit,
                ..input.clone()
            };
            outcome = tick(&mut self.state, &step, SIM_DT)?;
            self.events.append(&mut self.state.events);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending_pause = false;
            self.pending_quit = false;

            if outcome == TickOutcome::Quit {
                break;
            }
        }
        Ok(outcome)
    }

    fn current_outcome(&self) -> TickOutcome {
        match self.state.phase {
            GamePhase::Playing => TickOutcome::Running,
            GamePhase::Paused => TickOutcome::Paused,
            GamePhase::GameOver => TickOutcome::GameOver,
        }
    }
}

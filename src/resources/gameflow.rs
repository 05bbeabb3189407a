//! High-level gameflow phase holder.
//!
//! A single process-wide phase value that behaviours read to guard their
//! per-frame logic and write to drive transitions (e.g. leaving the main
//! menu once the court is in view). Constructed once at startup and passed
//! by reference inside [`Services`](crate::resources::Services).

use log::debug;

/// Discrete high-level phases the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// Waiting on the title screen for the first input.
    #[default]
    MainMenu,
    /// A rally is in progress.
    GamePlay,
    /// The rally ended; waiting for a restart.
    GameOver,
}

/// Authoritative current gameflow phase.
#[derive(Debug, Clone)]
pub struct Gameflow {
    current: GamePhase,
}

impl Default for Gameflow {
    fn default() -> Self {
        Self::new()
    }
}

impl Gameflow {
    /// Create a new holder starting at [`GamePhase::MainMenu`].
    pub fn new() -> Self {
        Gameflow {
            current: GamePhase::MainMenu,
        }
    }

    /// Read-only access to the current phase.
    pub fn phase(&self) -> GamePhase {
        self.current
    }

    /// Update the current phase immediately.
    ///
    /// Transitions take effect for every behaviour updated after this call
    /// within the same frame; there is no queuing.
    pub fn set_phase(&mut self, phase: GamePhase) {
        if phase != self.current {
            debug!("gameflow phase {:?} -> {:?}", self.current, phase);
        }
        self.current = phase;
    }
}

//! Input latch: collects key presses between two ticks.
//!
//! Terminals deliver presses as discrete events at arbitrary times, while each
//! board samples its input exactly once per tick. The latch ORs every routed
//! press into the board's flags and hands them over (clearing them) on
//! [`InputLatch::take`]. Holding a key relies on terminal auto-repeat.

use arrayvec::ArrayVec;
use crossterm::event::KeyEvent;

use crate::map::route_key;
use crate::types::{InputFlags, MatchMode, PlayerAction, MAX_BOARDS};

/// Per-tick flags for every board in a match.
pub type TickInputs = ArrayVec<InputFlags, MAX_BOARDS>;

#[derive(Debug, Clone)]
pub struct InputLatch {
    mode: MatchMode,
    flags: TickInputs,
}

impl InputLatch {
    pub fn new(mode: MatchMode) -> Self {
        let flags = (0..mode.board_count()).map(|_| InputFlags::NONE).collect();
        Self { mode, flags }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Latch an action for `board`. Returns false for a board outside the match.
    pub fn press(&mut self, board: usize, action: PlayerAction) -> bool {
        match self.flags.get_mut(board) {
            Some(flags) => {
                flags.set(action);
                true
            }
            None => false,
        }
    }

    /// Route a key event and latch it. Returns true if the key belonged to a player.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match route_key(key, self.mode) {
            Some((board, action)) => self.press(board, action),
            None => false,
        }
    }

    /// Flags gathered since the last call, one entry per board. Clears the latch.
    pub fn take(&mut self) -> TickInputs {
        self.flags.iter_mut().map(InputFlags::take).collect()
    }

    /// Drop anything latched (e.g. presses made while paused).
    pub fn clear(&mut self) {
        for flags in &mut self.flags {
            *flags = InputFlags::NONE;
        }
    }
}

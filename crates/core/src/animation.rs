//! Animation sequencer - line-clear frames and the game-over sweep
//!
//! While any animation is active the board ignores input and gravity. The
//! line-clear animation shows frames 1..=7, one every [`ANIMATION_FRAME_SECS`],
//! and hands the pending rows back once the last frame has expired. The
//! game-over sweep grays out one row per tick, starting at the floor.

use arrayvec::ArrayVec;

use crate::types::{ANIMATION_FRAME_SECS, BOARD_HEIGHT, LINE_CLEAR_FRAMES};

/// Rows waiting to be removed, highest row first.
pub type ClearRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Animation {
    #[default]
    None,
    LineClear {
        rows: ClearRows,
        frame: u8,
        timer: f64,
    },
    GameOverSweep {
        cursor: u8,
    },
}

/// Result of advancing a line-clear animation.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClearStep {
    /// Still on the same frame
    Hold,
    /// Moved to a new frame
    Frame(u8),
    /// Last frame expired; these rows must be removed now
    Done(ClearRows),
}

impl Animation {
    /// Start a line-clear animation at frame 1.
    pub fn line_clear(rows: ClearRows) -> Self {
        Animation::LineClear {
            rows,
            frame: 1,
            timer: ANIMATION_FRAME_SECS,
        }
    }

    pub fn game_over_sweep() -> Self {
        Animation::GameOverSweep { cursor: 0 }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Animation::None)
    }

    pub fn is_line_clear(&self) -> bool {
        matches!(self, Animation::LineClear { .. })
    }

    /// Current line-clear frame (1..=7), if clearing.
    pub fn frame(&self) -> Option<u8> {
        match self {
            Animation::LineClear { frame, .. } => Some(*frame),
            _ => None,
        }
    }

    /// Rows being cleared, empty unless clearing.
    pub fn clearing_rows(&self) -> &[u8] {
        match self {
            Animation::LineClear { rows, .. } => rows.as_slice(),
            _ => &[],
        }
    }

    /// Next row the sweep will gray out, if sweeping.
    pub fn sweep_cursor(&self) -> Option<u8> {
        match self {
            Animation::GameOverSweep { cursor } => Some(*cursor),
            _ => None,
        }
    }

    /// The sweep has grayed every row.
    pub fn sweep_finished(&self) -> bool {
        matches!(self, Animation::GameOverSweep { cursor } if *cursor >= BOARD_HEIGHT)
    }

    /// Advance a line-clear animation by `dt` seconds.
    ///
    /// On [`LineClearStep::Done`] the animation resets to [`Animation::None`].
    pub fn advance_line_clear(&mut self, dt: f64) -> LineClearStep {
        let Animation::LineClear { rows, frame, timer } = self else {
            return LineClearStep::Hold;
        };

        *timer -= dt;
        if *timer > 0.0 {
            return LineClearStep::Hold;
        }

        *timer = ANIMATION_FRAME_SECS;
        *frame += 1;
        if *frame <= LINE_CLEAR_FRAMES {
            return LineClearStep::Frame(*frame);
        }

        let rows = std::mem::take(rows);
        *self = Animation::None;
        LineClearStep::Done(rows)
    }

    /// Advance the game-over sweep by one row.
    ///
    /// Returns the row to gray out, or `None` once the sweep is complete.
    pub fn advance_sweep(&mut self) -> Option<u8> {
        let Animation::GameOverSweep { cursor } = self else {
            return None;
        };
        if *cursor >= BOARD_HEIGHT {
            return None;
        }
        let row = *cursor;
        *cursor += 1;
        Some(row)
    }
}

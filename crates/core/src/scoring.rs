//! Scoring module - line-clear score and level progression
//!
//! The rules are deliberately simple:
//! - every gravity step that attempts a fall is worth [`GRAVITY_STEP_SCORE`]
//! - clearing `k` rows at once is worth `10 * 2^(k - 1)`
//! - every [`LINES_PER_LEVEL`] cleared rows raise the level by one, up to [`MAX_LEVEL`];
//!   rows beyond the threshold do not carry over

use crate::types::{LINES_PER_LEVEL, LINE_CLEAR_BASE_SCORE, MAX_LEVEL};

pub use crate::types::GRAVITY_STEP_SCORE;

/// Score for clearing `rows` rows in one animation.
///
/// # Examples
///
/// ```
/// use zen_tetris_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 0);
/// assert_eq!(line_clear_score(1), 10);
/// assert_eq!(line_clear_score(4), 80);
/// ```
pub fn line_clear_score(rows: usize) -> u32 {
    if rows == 0 {
        return 0;
    }
    let shift = (rows - 1).min(31) as u32;
    LINE_CLEAR_BASE_SCORE.saturating_mul(1u32 << shift)
}

/// Outcome of adding cleared rows to the level counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    /// Rows counted toward the next level
    pub counter: u32,
    /// The counter reached the threshold (the level may still be capped)
    pub threshold_reached: bool,
    /// The level actually increased
    pub leveled_up: bool,
}

/// Add `rows` cleared rows to `counter`, raising `level` when the threshold is hit.
pub fn advance_level(level: u32, counter: u32, rows: usize) -> LevelProgress {
    let counter = counter.saturating_add(rows as u32);
    if counter < LINES_PER_LEVEL {
        return LevelProgress {
            level,
            counter,
            threshold_reached: false,
            leveled_up: false,
        };
    }

    let next = (level + 1).min(MAX_LEVEL);
    LevelProgress {
        level: next,
        counter: 0,
        threshold_reached: true,
        leveled_up: next > level,
    }
}

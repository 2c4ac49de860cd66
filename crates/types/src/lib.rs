//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input routing).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, floor to ceiling)
//! - **Spawn origin**: (3, 19), the 4x4 shape box hangs down from the top row
//!
//! # Game Timing Constants
//!
//! Timing values are in seconds, except the terminal tick:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Default fixed timestep of the terminal loop (~60 FPS) |
//! | `ANIMATION_FRAME_SECS` | 0.1 | Duration of one line-clear animation frame |
//! | `LINE_CLEAR_FRAMES` | 7 | Frames shown before cleared rows are removed |
//!
//! # Fall Intervals by Level
//!
//! Gravity speeds up with level (seconds per row):
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 60/60 |
//! | 1 | 50/60 |
//! | 2 | 40/60 |
//! | 3 | 30/60 |
//! | 4 | 25/60 |
//! | 5 | 20/60 |
//! | 6 | 15/60 |
//! | 7 | 10/60 |
//! | 8 | 7/60 |
//! | 9 | 5/60 |
//! | 10 | 3/60 |
//!
//! # Examples
//!
//! ```
//! use zen_tetris_types::{BlockColor, InputFlags, MatchMode, PlayerAction, ShapeKind};
//! use zen_tetris_types::{BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::T.color(), BlockColor::Aqua);
//!
//! let mut flags = InputFlags::NONE;
//! flags.set(PlayerAction::SoftDrop);
//! assert!(flags.down);
//! assert_eq!(MatchMode::Dual.board_count(), 2);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the shape box origin for a freshly spawned piece (`width / 2 - 2`).
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Row of the shape box origin for a freshly spawned piece (top row).
pub const SPAWN_Y: i8 = BOARD_HEIGHT as i8 - 1;

/// Default fixed timestep interval of the terminal loop in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Seconds between automatic one-row drops, indexed by level.
pub const FALL_INTERVALS: [f64; 11] = [
    60.0 / 60.0,
    50.0 / 60.0,
    40.0 / 60.0,
    30.0 / 60.0,
    25.0 / 60.0,
    20.0 / 60.0,
    15.0 / 60.0,
    10.0 / 60.0,
    7.0 / 60.0,
    5.0 / 60.0,
    3.0 / 60.0,
];

/// Highest reachable level (last index of [`FALL_INTERVALS`]).
pub const MAX_LEVEL: u32 = (FALL_INTERVALS.len() - 1) as u32;

/// Cleared rows needed for one level up. Any excess is dropped on level up.
pub const LINES_PER_LEVEL: u32 = 4;

/// Score awarded for every gravity step that attempts a fall.
pub const GRAVITY_STEP_SCORE: u32 = 2;

/// Score for a single-row clear; each additional row doubles it.
pub const LINE_CLEAR_BASE_SCORE: u32 = 10;

/// Duration of one line-clear animation frame in seconds.
pub const ANIMATION_FRAME_SECS: f64 = 0.1;

/// Number of visible line-clear animation frames (frame indices 1..=7).
pub const LINE_CLEAR_FRAMES: u8 = 7;

/// Chance (in percent) that a damage-row cell is filled with a gray block.
pub const GARBAGE_FILL_PERCENT: u32 = 50;

/// Maximum number of boards in one match.
pub const MAX_BOARDS: usize = 2;

/// Fall interval for a level, clamped to the last table entry.
///
/// # Examples
///
/// ```
/// use zen_tetris_types::fall_interval_secs;
///
/// assert_eq!(fall_interval_secs(0), 1.0);
/// assert_eq!(fall_interval_secs(10), 3.0 / 60.0);
/// assert_eq!(fall_interval_secs(99), 3.0 / 60.0);
/// ```
pub fn fall_interval_secs(level: u32) -> f64 {
    let idx = (level.min(MAX_LEVEL)) as usize;
    FALL_INTERVALS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(FALL_INTERVALS.len(), 11);
        assert_eq!(MAX_LEVEL, 10);
        assert_eq!(SPAWN_X, 3);
        assert_eq!(SPAWN_Y, 19);
        assert_eq!(LINE_CLEAR_FRAMES, 7);
        assert_eq!(LINES_PER_LEVEL, 4);
        assert!((FALL_INTERVALS[1] - 0.833).abs() < 1e-3);
        assert!((FALL_INTERVALS[8] - 0.117).abs() < 1e-3);
    }

    #[test]
    fn fall_intervals_strictly_decrease() {
        for pair in FALL_INTERVALS.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn input_flags_set_and_clear() {
        let mut flags = InputFlags::default();
        assert!(flags.is_empty());

        flags.set(PlayerAction::Rotate);
        flags.set(PlayerAction::MoveRight);
        assert!(flags.up);
        assert!(flags.right);
        assert!(!flags.left);
        assert!(!flags.is_empty());

        assert_eq!(flags.take(), InputFlags { up: true, right: true, ..InputFlags::NONE });
        assert!(flags.is_empty());
    }

    #[test]
    fn color_ids_match_palette() {
        for id in 1..=8u8 {
            let color = BlockColor::from_u8(id).unwrap();
            assert_eq!(color.as_u8(), id);
        }
        assert_eq!(BlockColor::from_u8(0), None);
        assert_eq!(BlockColor::from_u8(9), None);
    }

    #[test]
    fn redraw_flags_any() {
        assert!(!RedrawFlags::default().any());
        let moved = RedrawFlags {
            piece_moved: true,
            ..RedrawFlags::default()
        };
        assert!(moved.any());
    }
}

/// Block colors, numbered as stored in grid snapshots.
///
/// `Gray` is never used by a falling shape; it marks damage rows, the wall frame
/// and blocks that were grayed out after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockColor {
    Blue = 1,
    Red = 2,
    Purple = 3,
    Green = 4,
    Aqua = 5,
    Yellow = 6,
    Orange = 7,
    Gray = 8,
}

impl BlockColor {
    /// Numeric color id (1-8), as stored in grid snapshots.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse a numeric color id. `0` means "empty" and yields `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(BlockColor::Blue),
            2 => Some(BlockColor::Red),
            3 => Some(BlockColor::Purple),
            4 => Some(BlockColor::Green),
            5 => Some(BlockColor::Aqua),
            6 => Some(BlockColor::Yellow),
            7 => Some(BlockColor::Orange),
            8 => Some(BlockColor::Gray),
            _ => None,
        }
    }
}

/// A cell on the game grid
///
/// - `None`: Empty cell
/// - `Some(BlockColor)`: Cell filled with a block of that color
pub type Cell = Option<BlockColor>;

/// The seven falling shapes
///
/// Each shape has a fixed color:
/// - **I**: Red, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Aqua
/// - **J**: Blue
/// - **L**: Orange
/// - **S**: Green
/// - **Z**: Purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl ShapeKind {
    /// All shapes in table order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Position of the shape in [`ShapeKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Color the shape is drawn and locked with.
    pub fn color(self) -> BlockColor {
        match self {
            ShapeKind::I => BlockColor::Red,
            ShapeKind::O => BlockColor::Yellow,
            ShapeKind::T => BlockColor::Aqua,
            ShapeKind::J => BlockColor::Blue,
            ShapeKind::L => BlockColor::Orange,
            ShapeKind::S => BlockColor::Green,
            ShapeKind::Z => BlockColor::Purple,
        }
    }
}

/// Per-player control actions
///
/// Each action maps to one input flag of the board it is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Advance to the next rotation state (the `up` flag)
    Rotate,
    /// Shift one column left
    MoveLeft,
    /// Shift one column right
    MoveRight,
    /// Force the next gravity step now (the `down` flag)
    SoftDrop,
}

/// Input flags for one board, sampled once per tick.
///
/// Flags are edge-triggered: a key press sets its flag and the board consumes
/// (clears) all flags on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputFlags {
    pub const NONE: InputFlags = InputFlags {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn set(&mut self, action: PlayerAction) {
        match action {
            PlayerAction::Rotate => self.up = true,
            PlayerAction::MoveLeft => self.left = true,
            PlayerAction::MoveRight => self.right = true,
            PlayerAction::SoftDrop => self.down = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Return the current flags and clear them.
    pub fn take(&mut self) -> InputFlags {
        std::mem::take(self)
    }
}

/// Sound cues the core asks the presentation layer to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    /// A piece locked into the grid
    Lock,
    /// Rows were removed after the clear animation
    LineClear,
    /// Damage rows were pushed onto this board
    Attacked,
    LevelUp,
    GameOver,
}

impl SoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Lock => "lock",
            SoundKind::LineClear => "lineClear",
            SoundKind::Attacked => "attacked",
            SoundKind::LevelUp => "levelUp",
            SoundKind::GameOver => "gameOver",
        }
    }
}

/// Number of players in a match.
///
/// Only `Dual` activates the attack channel; everything else is layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    #[default]
    Single,
    Dual,
}

impl MatchMode {
    pub fn board_count(self) -> usize {
        match self {
            MatchMode::Single => 1,
            MatchMode::Dual => 2,
        }
    }

    /// Parse mode from string (case-insensitive)
    ///
    /// Accepts "single" | "one" | "1" and "dual" | "two" | "2".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "single" | "one" | "1" => Some(MatchMode::Single),
            "dual" | "two" | "2" => Some(MatchMode::Dual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Single => "single",
            MatchMode::Dual => "dual",
        }
    }
}

/// How long a soft-drop request stays armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoftDropStyle {
    /// Consumed by the next gravity step
    #[default]
    Tap,
    /// Stays armed until the next spawn, so the piece falls one row per tick until it locks
    Sticky,
}

impl SoftDropStyle {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tap" => Some(SoftDropStyle::Tap),
            "sticky" => Some(SoftDropStyle::Sticky),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoftDropStyle::Tap => "tap",
            SoftDropStyle::Sticky => "sticky",
        }
    }
}

/// What changed on a board since the flags were last read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedrawFlags {
    /// The active piece moved, rotated, spawned or was frozen
    pub piece_moved: bool,
    /// Locked cells changed (lock, clear, damage rows, animation frame, sweep)
    pub grid_changed: bool,
}

impl RedrawFlags {
    pub fn any(&self) -> bool {
        self.piece_moved || self.grid_changed
    }
}

use arrayvec::ArrayVec;

use crate::board::ActivePiece;
use crate::pieces::absolute_cells;
use crate::types::{MatchMode, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARDS};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Grid positions covered by the piece (may include cells above the ceiling).
    pub fn cells(&self) -> [(i8, i8); 4] {
        absolute_cells(self.kind, self.rotation, self.x, self.y)
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Which animation, if any, currently governs a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationPhase {
    #[default]
    None,
    LineClear {
        frame: u8,
    },
    GameOverSweep {
        cursor: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    /// Color ids indexed `[y][x]`, row 0 is the floor, 0 = empty
    pub grid: [[u8; WIDTH]; HEIGHT],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub level: u32,
    /// Total rows cleared this match
    pub lines: u32,
    /// Rows counted toward the next level
    pub lines_toward_level: u32,
    pub pending_attack: u32,
    pub game_over: bool,
    pub phase: AnimationPhase,
    /// `clearing_rows[y]` is set while row `y` is being cleared
    pub clearing_rows: [bool; HEIGHT],
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[0u8; WIDTH]; HEIGHT];
        self.active = None;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.lines_toward_level = 0;
        self.pending_attack = 0;
        self.game_over = false;
        self.phase = AnimationPhase::None;
        self.clearing_rows = [false; HEIGHT];
    }

    /// Color id at `(x, y)`; 0 when empty or out of range.
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }

    /// Current line-clear frame, if clearing.
    pub fn clear_frame(&self) -> Option<u8> {
        match self.phase {
            AnimationPhase::LineClear { frame } => Some(frame),
            _ => None,
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over && self.phase == AnimationPhase::None
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; WIDTH]; HEIGHT],
            active: None,
            score: 0,
            level: 0,
            lines: 0,
            lines_toward_level: 0,
            pending_attack: 0,
            game_over: false,
            phase: AnimationPhase::None,
            clearing_rows: [false; HEIGHT],
        }
    }
}

/// Whether a match still has a board in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchStatus {
    #[default]
    Running,
    /// Every board is game over
    Finished,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSnapshot {
    pub mode: MatchMode,
    pub high_score: u32,
    pub status: MatchStatus,
    pub boards: ArrayVec<BoardSnapshot, MAX_BOARDS>,
}

impl MatchSnapshot {
    pub fn board(&self, idx: usize) -> Option<&BoardSnapshot> {
        self.boards.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cleared() {
        let mut s = BoardSnapshot::default();
        s.grid[3][4] = 5;
        s.score = 12;
        s.phase = AnimationPhase::LineClear { frame: 2 };
        s.clear();
        assert_eq!(s, BoardSnapshot::default());
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let mut s = BoardSnapshot::default();
        s.grid[19][9] = 8;
        assert_eq!(s.cell(9, 19), 8);
        assert_eq!(s.cell(10, 0), 0);
        assert_eq!(s.cell(0, 20), 0);
    }

    #[test]
    fn test_active_snapshot_cells() {
        let a = ActiveSnapshot {
            kind: ShapeKind::O,
            rotation: 0,
            x: 3,
            y: 19,
        };
        assert_eq!(a.cells(), [(4, 19), (5, 19), (4, 18), (5, 18)]);
    }
}

//! Match coordinator - owns the boards of one match and steps them together
//!
//! Boards are advanced in index order. When a board finishes a multi-row clear,
//! its damage is delivered to the opponent straight away, so board 1 can take
//! board 0's attack within the same tick while board 0 sees board 1's attack on
//! the next one.

use arrayvec::ArrayVec;
use log::info;

use crate::board::Board;
use crate::config::{ConfigError, MatchConfig};
use crate::snapshot::{MatchSnapshot, MatchStatus};
use crate::types::{InputFlags, MatchMode, RedrawFlags, SoundKind, MAX_BOARDS};

/// Receives the fire-and-forget notifications of a match.
///
/// Both methods default to no-ops, and `()` is an observer that ignores everything.
pub trait MatchObserver {
    fn play_sound(&mut self, board: usize, sound: SoundKind) {
        let _ = (board, sound);
    }

    fn request_redraw(&mut self, board: usize, flags: RedrawFlags) {
        let _ = (board, flags);
    }
}

impl MatchObserver for () {}

/// Outcome of one coordinator tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub status: MatchStatus,
    /// Per-board redraw flags collected (and reset) during this tick
    pub redraw: ArrayVec<RedrawFlags, MAX_BOARDS>,
}

impl TickReport {
    pub fn needs_redraw(&self) -> bool {
        self.redraw.iter().any(RedrawFlags::any)
    }
}

#[derive(Debug, Clone)]
pub struct MatchCoordinator {
    config: MatchConfig,
    seed: u32,
    boards: ArrayVec<Board, MAX_BOARDS>,
    high_score: u32,
}

/// Seed of board `idx`, derived from the match seed so the two boards of a dual
/// match draw different shapes.
fn board_seed(seed: u32, idx: usize) -> u32 {
    seed ^ (idx as u32).wrapping_mul(0x9E37_79B9)
}

impl MatchCoordinator {
    pub fn new(config: MatchConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_high_score(config, seed, 0)
    }

    /// Start a match that keeps the high score of an earlier one.
    pub fn with_high_score(
        config: MatchConfig,
        seed: u32,
        high_score: u32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let boards = (0..config.board_count)
            .map(|idx| {
                Board::new(
                    board_seed(seed, idx),
                    config.soft_drop,
                    config.attacks_enabled(),
                )
            })
            .collect();

        info!(
            "match started: mode {}, seed {seed}, soft drop {}",
            config.mode.as_str(),
            config.soft_drop.as_str()
        );

        Ok(Self {
            config,
            seed,
            boards,
            high_score,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn mode(&self) -> MatchMode {
        self.config.mode
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    pub fn board(&self, idx: usize) -> Option<&Board> {
        self.boards.get(idx)
    }

    /// Mutable board access for scripted setups (tests, benches).
    pub fn board_mut(&mut self, idx: usize) -> Option<&mut Board> {
        self.boards.get_mut(idx)
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Advance every board by `dt` seconds. `inputs` holds one flag set per board.
    pub fn tick(
        &mut self,
        dt: f64,
        inputs: &[InputFlags],
        observer: &mut impl MatchObserver,
    ) -> TickReport {
        assert!(dt.is_finite() && dt >= 0.0, "tick dt must be finite and >= 0, got {dt}");
        assert_eq!(
            inputs.len(),
            self.boards.len(),
            "expected one input slot per board"
        );

        let count = self.boards.len();
        for idx in 0..count {
            let board = &mut self.boards[idx];
            if board.is_swept() {
                continue;
            }

            let was_over = board.game_over();
            board.tick(dt, inputs[idx]);
            if !was_over && board.game_over() {
                info!("board {idx} game over with score {}", board.score());
            }

            let damage = board.take_outgoing_attack();
            for sound in board.take_sounds() {
                observer.play_sound(idx, sound);
            }

            if let Some(damage) = damage {
                if count == 2 {
                    self.boards[1 - idx].receive_attack(damage);
                }
            }
        }

        for board in &self.boards {
            self.high_score = self.high_score.max(board.score());
        }

        let mut redraw = ArrayVec::new();
        for (idx, board) in self.boards.iter_mut().enumerate() {
            let flags = board.take_redraw();
            if flags.any() {
                observer.request_redraw(idx, flags);
            }
            redraw.push(flags);
        }

        TickReport {
            status: self.status(),
            redraw,
        }
    }

    /// `Finished` once every board is game over.
    pub fn status(&self) -> MatchStatus {
        if self.boards.iter().all(Board::game_over) {
            MatchStatus::Finished
        } else {
            MatchStatus::Running
        }
    }

    /// Dual mode: the board still playing once the other one is game over.
    pub fn winner(&self) -> Option<usize> {
        if self.config.mode != MatchMode::Dual {
            return None;
        }
        let mut alive = self
            .boards
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.game_over());
        match (alive.next(), alive.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    pub fn snapshot_into(&self, out: &mut MatchSnapshot) {
        out.mode = self.config.mode;
        out.high_score = self.high_score;
        out.status = self.status();
        out.boards.truncate(self.boards.len());
        for (idx, board) in self.boards.iter().enumerate() {
            match out.boards.get_mut(idx) {
                Some(slot) => board.snapshot_into(slot),
                None => out.boards.push(board.snapshot()),
            }
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut s = MatchSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

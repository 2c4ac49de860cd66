//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, board state and match coordination.
//! It has **no dependencies** on terminal, input or other I/O, making it:
//!
//! - **Deterministic**: the same seed produces identical games
//! - **Testable**: every rule is reachable through plain function calls
//! - **Portable**: the frontend only has to supply `dt` and input flags
//! - **Allocation-free**: boards, row sets and sound queues live in fixed-size arrays
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 cell storage, full-row scan, row removal and damage-row insertion
//! - [`pieces`]: static shape table and rotation states
//! - [`board`]: one player's state machine (spawn, gravity, lock, clear, attack, game over)
//! - [`animation`]: line-clear frames and the game-over sweep
//! - [`attack`]: the per-board damage channel of a dual match
//! - [`scoring`]: line-clear score and level progression
//! - [`coordinator`]: steps one or two boards per tick and routes attacks
//! - [`config`]: match configuration and validation errors
//! - [`rng`]: seeded LCG for shape selection and damage rows
//! - [`snapshot`]: plain render state handed to the presentation layer
//!
//! # Game Rules
//!
//! - Shapes are drawn uniformly at random, no bag and no preview
//! - Rotation cycles through a fixed list of states; blocked rotations are rejected (no kicks)
//! - A piece locks the first time a gravity step cannot move it down
//! - Every gravity step that tries to move a piece down scores 2, whether or not it moves
//! - Clearing `k` rows scores `10 * 2^(k - 1)` after a seven-frame animation
//! - Four cleared rows raise the level (up to 10), which shortens the fall interval
//! - In a dual match a `k >= 2` clear sends `k - 1` damage rows to the opponent
//!
//! # Example
//!
//! ```
//! use zen_tetris_core::{MatchConfig, MatchCoordinator, MatchStatus};
//! use zen_tetris_core::types::{InputFlags, MatchMode};
//!
//! let mut game = MatchCoordinator::new(MatchConfig::new(MatchMode::Single), 12345).unwrap();
//!
//! // The first tick spawns a piece.
//! let report = game.tick(0.016, &[InputFlags::NONE], &mut ());
//! assert_eq!(report.status, MatchStatus::Running);
//! assert!(game.board(0).unwrap().active().is_some());
//!
//! // Soft drop moves it down one row and scores 2.
//! let down = InputFlags { down: true, ..InputFlags::NONE };
//! game.tick(0.016, &[down], &mut ());
//! assert_eq!(game.board(0).unwrap().score(), 2);
//! ```
//!
//! # Timing
//!
//! Time is passed in as seconds per tick. The frontend uses a fixed timestep of
//! 16ms by default, but nothing in here depends on it: gravity and the clear
//! animation count down whatever `dt` they are given. The game-over sweep moves
//! one row per tick.

pub mod animation;
pub mod attack;
pub mod board;
pub mod config;
pub mod coordinator;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use zen_tetris_types as types;

// Re-export commonly used types for convenience
pub use animation::{Animation, ClearRows};
pub use attack::AttackChannel;
pub use board::{ActivePiece, Board};
pub use config::{ConfigError, MatchConfig};
pub use coordinator::{MatchCoordinator, MatchObserver, TickReport};
pub use grid::Grid;
pub use pieces::{absolute_cells, get_cells, next_rotation};
pub use rng::SimpleRng;
pub use scoring::line_clear_score;
pub use snapshot::{ActiveSnapshot, AnimationPhase, BoardSnapshot, MatchSnapshot, MatchStatus};

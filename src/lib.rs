//! Zen Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `zen_tetris::{types,core,input,term}` and
//! hosts the frontend state machine in [`app`], shared by the binary and the
//! integration tests.

pub mod app;

pub use zen_tetris_core as core;
pub use zen_tetris_input as input;
pub use zen_tetris_term as term;
pub use zen_tetris_types as types;

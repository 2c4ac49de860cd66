//! Keyboard input for the terminal frontend.
//!
//! Maps `crossterm` key events onto per-board [`crate::types::PlayerAction`]s and
//! screen commands, and latches player actions into the [`crate::types::InputFlags`]
//! each board consumes once per tick.

pub mod handler;
pub mod map;

pub use zen_tetris_types as types;

pub use handler::InputLatch;
pub use map::{handle_play_key, handle_title_key, route_key, should_quit, PlayCommand, TitleCommand};

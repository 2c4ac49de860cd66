//! Terminal presentation of a match.
//!
//! Screens are painted into a plain framebuffer, which the renderer flushes to
//! the terminal as a diff against the previous frame.
//!
//! - [`match_view`] turns a match snapshot (or the title screen) into a framebuffer
//! - [`renderer`] diffs framebuffers and writes them to the terminal
//! - [`sink`] receives sounds and redraw requests from the core
//! - [`redraw_gate`] decides when a new frame is worth building

pub mod fb;
pub mod match_view;
pub mod redraw_gate;
pub mod renderer;
pub mod sink;

pub use zen_tetris_core as core;
pub use zen_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use match_view::{MatchView, TitleInfo, Viewport};
pub use redraw_gate::{screen_fingerprint, RedrawGate};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sink::TerminalSink;

//! TerminalSink: the match observer of the terminal frontend.
//!
//! Sounds become a terminal bell (at most one per frame, since a plain bell has
//! no pitch), and redraw requests mark the frame dirty.

use log::debug;

use crate::core::MatchObserver;
use crate::types::{RedrawFlags, SoundKind};

#[derive(Debug, Clone, Default)]
pub struct TerminalSink {
    muted: bool,
    bell_pending: bool,
    redraw_pending: bool,
}

impl TerminalSink {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Self::default()
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// A sound was played since the last call and the sink is not muted.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    /// Some board asked for a redraw since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }
}

impl MatchObserver for TerminalSink {
    fn play_sound(&mut self, board: usize, sound: SoundKind) {
        debug!("board {board} sound {}", sound.as_str());
        if !self.muted {
            self.bell_pending = true;
        }
    }

    fn request_redraw(&mut self, _board: usize, flags: RedrawFlags) {
        self.redraw_pending |= flags.any();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sounds_ring_once_until_taken() {
        let mut sink = TerminalSink::new(false);
        sink.play_sound(0, SoundKind::Lock);
        sink.play_sound(1, SoundKind::Attacked);
        assert!(sink.take_bell());
        assert!(!sink.take_bell());
    }

    #[test]
    fn muted_sink_stays_silent() {
        let mut sink = TerminalSink::new(true);
        sink.play_sound(0, SoundKind::GameOver);
        assert!(!sink.take_bell());
    }

    #[test]
    fn redraw_requests_latch() {
        let mut sink = TerminalSink::new(true);
        sink.request_redraw(0, RedrawFlags::default());
        assert!(!sink.take_redraw());
        sink.request_redraw(
            1,
            RedrawFlags {
                piece_moved: true,
                grid_changed: false,
            },
        );
        assert!(sink.take_redraw());
        assert!(!sink.take_redraw());
    }
}

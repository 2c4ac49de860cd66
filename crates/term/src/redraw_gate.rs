//! Decides when the frontend rebuilds and flushes a frame.

/// Frame rebuild policy.
///
/// A frame is drawn the first time, whenever the caller reports game changes,
/// and whenever the screen fingerprint (screen kind, pause state, terminal
/// size, ...) differs from the last drawn frame. Static screens are otherwise
/// left alone, except for an optional periodic refresh.
#[derive(Debug, Clone)]
pub struct RedrawGate {
    refresh_interval_ms: Option<u64>,
    last_draw_ms: u64,
    last_fingerprint: u64,
    has_drawn: bool,
}

impl RedrawGate {
    /// `refresh_interval_ms` repaints static screens at most that often; `None`
    /// disables it.
    pub fn new(refresh_interval_ms: Option<u64>) -> Self {
        Self {
            refresh_interval_ms,
            last_draw_ms: 0,
            last_fingerprint: 0,
            has_drawn: false,
        }
    }

    /// Forget the last frame so the next call draws.
    pub fn reset(&mut self) {
        self.has_drawn = false;
    }

    pub fn should_draw(&mut self, now_ms: u64, fingerprint: u64, changed: bool) -> bool {
        let refresh_due = self
            .refresh_interval_ms
            .is_some_and(|every| now_ms.saturating_sub(self.last_draw_ms) >= every);

        let draw = !self.has_drawn
            || changed
            || fingerprint != self.last_fingerprint
            || refresh_due;

        if draw {
            self.has_drawn = true;
            self.last_draw_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        draw
    }
}

/// Fold screen properties into a fingerprint for [`RedrawGate::should_draw`].
pub fn screen_fingerprint(parts: &[u64]) -> u64 {
    // FNV-1a over the little-endian bytes.
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for part in parts {
        for b in part.to_le_bytes() {
            h ^= b as u64;
            h = h.wrapping_mul(0x0000_0100_0000_01b3);
        }
    }
    h
}

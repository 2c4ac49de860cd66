//! Attack channel - damage rows sent between the two boards of a dual match
//!
//! Each board owns one channel for incoming damage. Only the opponent's
//! clear finalization writes it, and only the owning board reads it (once per
//! normal-play tick, before input). A new write replaces whatever is still
//! pending: attacks are not queued.

/// Pending damage rows for one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackChannel {
    pending: u32,
}

impl AttackChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the pending count (last write wins).
    pub fn send(&mut self, lines: u32) {
        self.pending = lines;
    }

    /// Read the pending count and reset it to zero.
    pub fn take(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }
}

/// Damage rows earned by clearing `rows` rows at once; single clears send nothing.
pub fn damage_for_clear(rows: usize) -> Option<u32> {
    if rows >= 2 {
        Some(rows as u32 - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_for_clear() {
        assert_eq!(damage_for_clear(0), None);
        assert_eq!(damage_for_clear(1), None);
        assert_eq!(damage_for_clear(2), Some(1));
        assert_eq!(damage_for_clear(3), Some(2));
        assert_eq!(damage_for_clear(4), Some(3));
    }

    #[test]
    fn test_last_write_wins() {
        let mut ch = AttackChannel::new();
        ch.send(3);
        ch.send(1);
        assert_eq!(ch.pending(), 1);
    }

    #[test]
    fn test_take_resets() {
        let mut ch = AttackChannel::new();
        ch.send(2);
        assert_eq!(ch.take(), 2);
        assert_eq!(ch.pending(), 0);
        assert_eq!(ch.take(), 0);
    }
}

//! RNG module - uniform shape selection and damage-row noise
//!
//! Shapes are drawn uniformly at random (no bag), and every damage-row cell is an
//! independent coin flip. Both come from a small LCG so that a seed fully
//! determines a board's sequence, which keeps tests and benches reproducible.

use crate::types::{BlockColor, ShapeKind, BOARD_WIDTH, GARBAGE_FILL_PERCENT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        assert!(max > 0, "next_range needs a non-empty range");
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// True with the given probability in percent.
    pub fn chance_percent(&mut self, percent: u32) -> bool {
        self.next_range(100) < percent
    }

    /// Pick one of the seven shapes uniformly.
    pub fn next_shape(&mut self) -> ShapeKind {
        let idx = self.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }

    /// Build one damage row: each column independently gray or empty.
    pub fn garbage_row(&mut self) -> [Option<BlockColor>; BOARD_WIDTH as usize] {
        let mut row = [None; BOARD_WIDTH as usize];
        for cell in row.iter_mut() {
            if self.chance_percent(GARBAGE_FILL_PERCENT) {
                *cell = Some(BlockColor::Gray);
            }
        }
        row
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

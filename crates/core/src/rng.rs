//! RNG module - deterministic piece kind generation
//!
//! A small LCG drives every random choice in the engine (refill kinds, the
//! initial deal, hint selection), so the same seed replays the same game.

use crate::types::{Mode, PieceKind};

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
    /// Multiply-shift keeps the high bits; the low bits of an LCG cycle with a
    /// short period (bit 0 simply alternates).
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick one element uniformly; None for an empty slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_range(items.len() as u32) as usize;
        items.get(idx)
    }
}

/// Draws piece kinds uniformly from a mode's palette
#[derive(Debug, Clone)]
pub struct KindPicker {
    palette: &'static [PieceKind],
    rng: SimpleRng,
}

impl KindPicker {
    pub fn new(mode: Mode, seed: u32) -> Self {
        Self {
            palette: mode.palette(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next kind
    pub fn draw(&mut self) -> PieceKind {
        let idx = self.rng.next_range(self.palette.len() as u32) as usize;
        self.palette[idx]
    }

    /// Shared RNG for non-kind choices (hint selection)
    pub fn rng_mut(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }
}

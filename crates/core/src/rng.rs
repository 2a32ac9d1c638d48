//! RNG module - injectable randomness for tile spawning
//!
//! The engine never reaches for a global RNG. Everything random goes through
//! [`RandomSource`], so a game can be replayed from a seed ([`SimpleRng`]) or
//! driven to an exact grid from a fixed script ([`ScriptedRng`]).

use std::collections::VecDeque;

/// Source of the two draws the spawner needs.
pub trait RandomSource {
    /// Uniform index in `[0, bound)`. `bound` is never 0.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

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

    /// Current internal state; `SimpleRng::new(rng.state())` continues the same sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_index(&mut self, bound: usize) -> usize {
        // Multiply-shift keeps the high bits; the low bits of an LCG cycle quickly.
        ((u64::from(self.next_u32()) * bound as u64) >> 32) as usize
    }

    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Replays fixed draws, for tests that need exact grids.
///
/// Cell draws and value draws are scripted separately. An exhausted script
/// yields index 0 and unit 0.0 (which spawns a 2 in the first empty cell).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    indices: VecDeque<usize>,
    units: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new(
        indices: impl IntoIterator<Item = usize>,
        units: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            units: units.into_iter().collect(),
        }
    }

    /// Queue one spawn: the `index`-th empty cell, receiving a 4 when `four` is set.
    pub fn push_spawn(&mut self, index: usize, four: bool) -> &mut Self {
        self.indices.push_back(index);
        self.units.push_back(if four { 0.95 } else { 0.0 });
        self
    }

    /// Draws not yet consumed, as `(indices, units)`.
    pub fn remaining(&self) -> (usize, usize) {
        (self.indices.len(), self.units.len())
    }
}

impl RandomSource for ScriptedRng {
    fn next_index(&mut self, bound: usize) -> usize {
        // Clamp so a stale script can never select a non-empty cell.
        self.indices
            .pop_front()
            .map_or(0, |i| i.min(bound.saturating_sub(1)))
    }

    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.0)
    }
}

/// Injectable randomness for word selection and medium-difficulty reveals.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send {
    /// Uniform index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform in-place permutation.
    fn shuffle(&mut self, items: &mut [char]);
}

/// Default source backed by a `StdRng`, seeded from the OS unless a seed is given.
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn shuffle(&mut self, items: &mut [char]) {
        items.shuffle(&mut self.rng);
    }
}

/// Always draws the same index (clamped to the list) and never reorders.
/// Used to replay a known game.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom {
    pub index: usize,
}

impl FixedRandom {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl RandomSource for FixedRandom {
    fn index(&mut self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }

    fn shuffle(&mut self, _items: &mut [char]) {}
}

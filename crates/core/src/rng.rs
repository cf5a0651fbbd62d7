//! RNG module - the random source pieces are drawn from
//!
//! The session only ever asks for "an integer in `[0, max)`", so that is the
//! whole [`RandomSource`] seam. [`SimpleRng`] is a small LCG that makes seeded
//! sessions (and replays) reproducible.

/// Source of uniformly distributed integers for piece spawning
pub trait RandomSource {
    /// Random value in `[0, max)`; `max` is never 0
    fn next_range(&mut self, max: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

/// Seeded 32-bit linear congruential generator
///
/// Multiplier and increment are the Numerical Recipes pair; the modulus is the
/// natural `u32` wrap.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    const MUL: u32 = 1_664_525;
    const INC: u32 = 1_013_904_223;

    /// Seed 0 is treated as 1
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(Self::MUL).wrapping_add(Self::INC);
        self.state
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    /// Multiply-shift reduction: uses the high bits, the low bits of an LCG cycle quickly.
    fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

use super::*;

/// Multiplier of the minimal-standard generator.
const MULTIPLIER: u32 = 16807;

/// Modulus of the generator, `2^31 - 1`.
const MODULUS: u32 = 2_147_483_647;

/// Seedable linear-congruential generator (Park–Miller "minimal standard").
///
/// The whole state is one 31-bit register. Every draw advances it with
/// `state' = 16807 * state mod (2^31 - 1)` and returns `state' / (2^31 - 1)`.
/// The multiplication is split into 16-bit halves so it never leaves 32-bit
/// arithmetic, which keeps the stream identical on every platform.
///
/// # Example
/// ```rust
/// use rustynn::random::{Rng, RandomSource};
///
/// let mut a = Rng::new(42);
/// let mut b = Rng::new(42);
/// assert_eq!(a.draw(), b.draw());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Creates a generator positioned at the start of the stream for `seed`.
    ///
    /// # Parameters
    ///
    /// * `seed` - Seed value, masked to 31 bits
    ///
    /// # Returns
    ///
    /// * `Self` - A new generator
    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::seed_state(seed),
        }
    }

    /// Current register value.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// A zero register would stay zero forever and a register equal to the modulus
    /// would produce a draw of exactly 1, so both map to 1.
    fn seed_state(seed: u64) -> u32 {
        let masked = (seed & MODULUS as u64) as u32;
        if masked == 0 || masked == MODULUS {
            1
        } else {
            masked
        }
    }

    /// Computes `MULTIPLIER * state mod MODULUS` without 64-bit intermediates.
    fn next_state(state: u32) -> u32 {
        let mut lo = MULTIPLIER * (state & 0xFFFF);
        let hi = MULTIPLIER * (state >> 16);
        lo += (hi & 0x7FFF) << 16;

        if lo > MODULUS {
            lo &= MODULUS;
            lo += 1;
        }

        lo += hi >> 15;

        if lo > MODULUS {
            lo &= MODULUS;
            lo += 1;
        }

        lo
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for Rng {
    fn seed(&mut self, seed: u64) {
        self.state = Self::seed_state(seed);
    }

    fn draw(&mut self) -> f64 {
        self.state = Self::next_state(self.state);
        self.state as f64 / MODULUS as f64
    }
}

use super::*;
use rand::{Rng as _, RngCore, SeedableRng};
use rand_distr::Open01;

/// Wraps any seedable `rand` generator so a network can use it as its random stream.
///
/// Draws come from the `Open01` distribution, so they never hit 0 or 1 and the
/// Box–Muller transform stays well defined.
///
/// # Example
/// ```rust
/// use rand::rngs::StdRng;
/// use rustynn::random::{RandAdapter, RandomSource};
///
/// let mut rng = RandAdapter::<StdRng>::from_seed(7);
/// let u = rng.draw();
/// assert!(u > 0.0 && u < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct RandAdapter<R> {
    rng: R,
}

impl<R: RngCore + SeedableRng> RandAdapter<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Creates the wrapped generator from a `u64` seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: R::seed_from_u64(seed),
        }
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore + SeedableRng> RandomSource for RandAdapter<R> {
    fn seed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }

    fn draw(&mut self) -> f64 {
        self.rng.sample(Open01)
    }
}

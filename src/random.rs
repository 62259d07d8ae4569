/// Park–Miller generator used by default for shuffling and initialization
pub mod lcg;
/// Normal-random parameter fill built on a `RandomSource`
pub mod normal;
/// Adapter exposing any `rand` generator as a `RandomSource`
pub mod rand_adapter;

pub use lcg::*;
pub use normal::*;
pub use rand_adapter::*;

pub use crate::traits::RandomSource;

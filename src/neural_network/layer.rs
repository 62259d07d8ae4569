/// Dense (fully connected) layer
pub mod dense;

pub use dense::*;

use super::Matrix;
use crate::ModelError;
use crate::traits::{Activation, Layer, Optimizer, RandomSource};

/// Where a layer is in its per-step lifecycle.
///
/// `forward` requires at least `Initialized`, `backprop` requires `Forwarded`
/// (or a previous `BackPropagated` for the same batch), and `update` requires
/// `BackPropagated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    /// Shape known, no storage allocated
    Uninitialized,
    /// Parameters allocated (and possibly filled)
    Initialized,
    /// Forward caches valid for the current batch
    Forwarded,
    /// Gradients valid for the current batch
    BackPropagated,
}

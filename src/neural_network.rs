/// Module that contains activation function implementations
pub mod activation;
/// Module that shuffles a dataset and splits it into minibatches
pub mod batch;
/// Module that contains training observers
pub mod callback;
/// Module that contains neural network layer implementations
pub mod layer;
/// Module that contains the network orchestrator and training loop
pub mod network;
/// Module that contains optimization algorithms for neural network training
pub mod optimizer;
/// Module that contains output layers (loss heads)
pub mod output;

pub use activation::*;
pub use batch::*;
pub use callback::*;
pub use layer::*;
pub use network::*;
pub use optimizer::*;
pub use output::*;

use crate::ModelError;
use ndarray::{Array1, Array2};

/// Dense matrix type consumed by every layer: one row per unit, one column per observation
pub type Matrix = Array2<f32>;

/// Class labels, one per observation
pub type Labels = Array1<i32>;

pub use crate::traits::{Activation, Callback, Layer, Optimizer, Output};

/// Borrowed view of the target of a batch, in either supported representation.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// Target matrix with the same shape as the network output
    Values(&'a Matrix),
    /// One class label per observation
    Labels(&'a Labels),
}

impl Target<'_> {
    /// Number of observations in the target.
    pub fn n_obs(&self) -> usize {
        match self {
            Target::Values(m) => m.ncols(),
            Target::Labels(l) => l.len(),
        }
    }

    /// Dispatches to the matching `Output` validation method.
    pub fn check(&self, output: &dyn Output) -> Result<(), ModelError> {
        match self {
            Target::Values(m) => output.check_target_data(m),
            Target::Labels(l) => output.check_label_data(l),
        }
    }

    /// Dispatches to the matching `Output` evaluation method.
    pub fn evaluate(
        &self,
        output: &mut dyn Output,
        prev_layer_data: &Matrix,
    ) -> Result<(), ModelError> {
        match self {
            Target::Values(m) => output.evaluate(prev_layer_data, m),
            Target::Labels(l) => output.evaluate_labels(prev_layer_data, l),
        }
    }
}

/// Target data that can be split into minibatches and fed to an `Output`.
///
/// Implemented for target matrices ([`Matrix`]) and class-label vectors ([`Labels`]).
pub trait TargetData: Observations {
    /// Borrows `self` as a [`Target`].
    fn as_target(&self) -> Target<'_>;
}

impl TargetData for Matrix {
    fn as_target(&self) -> Target<'_> {
        Target::Values(self)
    }
}

impl TargetData for Labels {
    fn as_target(&self) -> Target<'_> {
        Target::Labels(self)
    }
}

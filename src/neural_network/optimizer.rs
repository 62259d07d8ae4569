/// AdaGrad optimizer
pub mod ada_grad;
/// Adam optimizer
pub mod adam;
/// Hyperparameter validation shared by all optimizers
mod input_validation_function;
/// Stochastic gradient descent with momentum
pub mod momentum;
/// RMSprop optimizer
pub mod rms_prop;
/// Plain stochastic gradient descent
pub mod sgd;
/// Per-parameter optimizer memory keyed by update order
pub mod slot_state;

pub use ada_grad::*;
pub use adam::*;
pub use momentum::*;
pub use rms_prop::*;
pub use sgd::*;
pub use slot_state::*;

use crate::ModelError;
use crate::traits::Optimizer;
use input_validation_function::*;

/// Checks that a gradient and its parameter buffer have the same length.
fn check_lengths(grad: &[f32], param: &[f32]) -> Result<(), ModelError> {
    if grad.len() != param.len() {
        return Err(ModelError::DimensionMismatch(format!(
            "gradient has length {} but parameter has length {}",
            grad.len(),
            param.len()
        )));
    }
    Ok(())
}

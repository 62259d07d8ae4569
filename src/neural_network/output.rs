/// Binary cross-entropy head for sigmoid outputs
pub mod binary_class_entropy;
/// Categorical cross-entropy head for softmax outputs
pub mod multi_class_entropy;
/// Mean squared error regression head
pub mod regression_mse;

pub use binary_class_entropy::*;
pub use multi_class_entropy::*;
pub use regression_mse::*;

use super::{Labels, Matrix};
use crate::ModelError;
use crate::traits::Output;

/// Checks that the target matrix has the same shape as the last layer's output.
fn check_same_shape(
    name: &str,
    prev_layer_data: &Matrix,
    target: &Matrix,
) -> Result<(), ModelError> {
    if prev_layer_data.dim() != target.dim() {
        return Err(ModelError::DimensionMismatch(format!(
            "[{}] target data have shape {:?}, expected {:?}",
            name,
            target.dim(),
            prev_layer_data.dim()
        )));
    }
    Ok(())
}

/// Checks that there is one label per output column.
fn check_label_count(
    name: &str,
    prev_layer_data: &Matrix,
    target: &Labels,
) -> Result<(), ModelError> {
    if target.len() != prev_layer_data.ncols() {
        return Err(ModelError::DimensionMismatch(format!(
            "[{}] got {} labels for {} observations",
            name,
            target.len(),
            prev_layer_data.ncols()
        )));
    }
    Ok(())
}

fn not_evaluated(name: &str) -> ModelError {
    ModelError::ProcessingError(format!("[{}] loss requested before evaluate", name))
}

/// Error types that can occur while building, training or querying a network
///
/// # Variants
///
/// - `DimensionMismatch` - shapes do not line up: adjacent layers, output and target,
///   input and target observation counts, or a parameter vector of the wrong length
/// - `Unsupported` - a component was asked to do something it has no capability for,
///   e.g. a regression output fed with class labels
/// - `InputValidationError` - a hyperparameter or argument is outside its valid range
/// - `ProcessingError` - a component was used out of order, e.g. `backprop` before `forward`
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    DimensionMismatch(String),
    Unsupported(String),
    InputValidationError(String),
    ProcessingError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
            ModelError::Unsupported(msg) => write!(f, "Unsupported operation: {}", msg),
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
            ModelError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

/// Implements the standard error trait for ModelError
impl std::error::Error for ModelError {}

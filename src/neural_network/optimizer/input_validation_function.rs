use crate::ModelError;

/// Validates that the learning rate is positive and finite.
pub(super) fn validate_learning_rate(learning_rate: f32) -> Result<(), ModelError> {
    if !(learning_rate > 0.0 && learning_rate.is_finite()) {
        return Err(ModelError::InputValidationError(format!(
            "learning_rate must be positive and finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

/// Validates that the L2 weight decay is non-negative and finite.
pub(super) fn validate_weight_decay(decay: f32) -> Result<(), ModelError> {
    if !(decay >= 0.0 && decay.is_finite()) {
        return Err(ModelError::InputValidationError(format!(
            "decay must be non-negative and finite, got {}",
            decay
        )));
    }
    Ok(())
}

/// Validates that a moving-average factor (momentum, beta or rho) lies in `[0, 1)`.
///
/// # Parameters
///
/// - `value` - The factor to validate
/// - `param_name` - The name of the parameter (for error messages)
pub(super) fn validate_decay_rate(value: f32, param_name: &str) -> Result<(), ModelError> {
    if !(0.0..1.0).contains(&value) {
        return Err(ModelError::InputValidationError(format!(
            "{} must be in range [0, 1), got {}",
            param_name, value
        )));
    }
    Ok(())
}

/// Validates that epsilon is positive and finite.
pub(super) fn validate_epsilon(epsilon: f32) -> Result<(), ModelError> {
    if !(epsilon > 0.0 && epsilon.is_finite()) {
        return Err(ModelError::InputValidationError(format!(
            "epsilon must be positive and finite, got {}",
            epsilon
        )));
    }
    Ok(())
}

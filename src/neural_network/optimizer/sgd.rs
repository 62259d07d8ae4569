use super::*;

/// Stochastic Gradient Descent (SGD) optimizer.
///
/// Updates every parameter with `p -= lr * (g + decay * p)`. It has no memory, so
/// `reset` is a no-op and the order of `update` calls does not matter.
///
/// # Fields
///
/// - `learning_rate` - Step size for parameter updates
/// - `decay` - L2 weight decay coefficient
#[derive(Debug, Clone)]
pub struct SGD {
    learning_rate: f32,
    decay: f32,
}

impl SGD {
    /// Creates a new SGD optimizer without weight decay.
    ///
    /// # Parameters
    ///
    /// * `learning_rate` - Step size for parameter updates
    ///
    /// # Returns
    ///
    /// * `Result<Self, ModelError>` - A new SGD optimizer instance or an error
    pub fn new(learning_rate: f32) -> Result<Self, ModelError> {
        Self::with_decay(learning_rate, 0.0)
    }

    /// Creates a new SGD optimizer with L2 weight decay.
    ///
    /// # Parameters
    ///
    /// - `learning_rate` - Step size for parameter updates
    /// - `decay` - Weight decay coefficient, non-negative
    pub fn with_decay(learning_rate: f32, decay: f32) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_weight_decay(decay)?;

        Ok(Self {
            learning_rate,
            decay,
        })
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }
}

impl Optimizer for SGD {
    fn reset(&mut self) {}

    fn update(&mut self, grad: &[f32], param: &mut [f32]) -> Result<(), ModelError> {
        check_lengths(grad, param)?;

        for (p, &g) in param.iter_mut().zip(grad) {
            *p -= self.learning_rate * (g + self.decay * *p);
        }
        Ok(())
    }
}

use super::*;

/// AdaGrad (Adaptive Gradient Algorithm) optimizer
///
/// Accumulates squared gradients per parameter and scales each step by the inverse
/// square root of that accumulator, so frequently updated parameters take smaller steps.
///
/// # Fields
///
/// - `learning_rate` - Initial learning rate controlling the size of parameter updates
/// - `epsilon` - Small constant added for numerical stability
/// - `decay` - L2 weight decay coefficient
/// - `accumulator` - Sum of squared gradients, one buffer per parameter slot
#[derive(Debug, Clone)]
pub struct AdaGrad {
    learning_rate: f32,
    epsilon: f32,
    decay: f32,
    accumulator: SlotState<1>,
}

impl AdaGrad {
    /// Creates a new AdaGrad optimizer with the specified parameters.
    ///
    /// # Parameters
    ///
    /// - `learning_rate` - Initial step size for parameter updates (typically 0.01)
    /// - `epsilon` - Small constant for numerical stability (typically 1e-8)
    /// - `decay` - L2 weight decay coefficient
    pub fn new(learning_rate: f32, epsilon: f32, decay: f32) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_epsilon(epsilon)?;
        validate_weight_decay(decay)?;

        Ok(Self {
            learning_rate,
            epsilon,
            decay,
            accumulator: SlotState::new(),
        })
    }
}

impl Optimizer for AdaGrad {
    fn reset(&mut self) {
        self.accumulator.clear();
    }

    fn begin_step(&mut self) {
        self.accumulator.rewind();
    }

    fn update(&mut self, grad: &[f32], param: &mut [f32]) -> Result<(), ModelError> {
        check_lengths(grad, param)?;
        let [acc] = self.accumulator.next_slot(param.len())?;

        for ((p, &g), acc) in param.iter_mut().zip(grad).zip(acc.iter_mut()) {
            let g = g + self.decay * *p;
            *acc += g * g;
            *p -= self.learning_rate * g / (acc.sqrt() + self.epsilon);
        }
        Ok(())
    }
}

use super::*;

/// RMSprop optimizer.
///
/// Keeps an exponential moving average of squared gradients per parameter:
/// `s = rho * s + (1 - rho) * g²`, then `p -= lr * g / (sqrt(s) + epsilon)`.
#[derive(Debug, Clone)]
pub struct RMSprop {
    learning_rate: f32,
    rho: f32,
    epsilon: f32,
    decay: f32,
    cache: SlotState<1>,
}

impl RMSprop {
    /// Creates a new RMSprop optimizer.
    ///
    /// # Parameters
    ///
    /// - `learning_rate` - Step size for parameter updates
    /// - `rho` - Decay rate for the moving average of squared gradients (typically 0.9)
    /// - `epsilon` - Small constant for numerical stability (typically 1e-6)
    /// - `decay` - L2 weight decay coefficient
    pub fn new(learning_rate: f32, rho: f32, epsilon: f32, decay: f32) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_decay_rate(rho, "rho")?;
        validate_epsilon(epsilon)?;
        validate_weight_decay(decay)?;

        Ok(Self {
            learning_rate,
            rho,
            epsilon,
            decay,
            cache: SlotState::new(),
        })
    }
}

impl Optimizer for RMSprop {
    fn reset(&mut self) {
        self.cache.clear();
    }

    fn begin_step(&mut self) {
        self.cache.rewind();
    }

    fn update(&mut self, grad: &[f32], param: &mut [f32]) -> Result<(), ModelError> {
        check_lengths(grad, param)?;
        let [cache] = self.cache.next_slot(param.len())?;

        for ((p, &g), s) in param.iter_mut().zip(grad).zip(cache.iter_mut()) {
            let g = g + self.decay * *p;
            *s = self.rho * *s + (1.0 - self.rho) * g * g;
            *p -= self.learning_rate * g / (s.sqrt() + self.epsilon);
        }
        Ok(())
    }
}

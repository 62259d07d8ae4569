use super::*;

/// SGD with (optionally Nesterov) momentum.
///
/// Keeps one velocity buffer per parameter slot:
///
/// - `g' = g + decay * p`
/// - `v = momentum * v + g'`
/// - `p -= lr * v`, or `p -= lr * (g' + momentum * v)` with Nesterov momentum
#[derive(Debug, Clone)]
pub struct Momentum {
    learning_rate: f32,
    momentum: f32,
    decay: f32,
    nesterov: bool,
    velocity: SlotState<1>,
}

impl Momentum {
    /// Creates a new momentum optimizer.
    ///
    /// # Parameters
    ///
    /// - `learning_rate` - Step size for parameter updates
    /// - `momentum` - Velocity retention factor in `[0, 1)` (typically 0.9)
    /// - `decay` - L2 weight decay coefficient
    /// - `nesterov` - Whether to use the Nesterov look-ahead step
    ///
    /// # Returns
    ///
    /// * `Result<Self, ModelError>` - A new optimizer instance or an error
    pub fn new(
        learning_rate: f32,
        momentum: f32,
        decay: f32,
        nesterov: bool,
    ) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_decay_rate(momentum, "momentum")?;
        validate_weight_decay(decay)?;

        Ok(Self {
            learning_rate,
            momentum,
            decay,
            nesterov,
            velocity: SlotState::new(),
        })
    }

    /// Velocity buffers allocated so far.
    pub fn velocity(&self) -> &SlotState<1> {
        &self.velocity
    }
}

impl Optimizer for Momentum {
    fn reset(&mut self) {
        self.velocity.clear();
    }

    fn begin_step(&mut self) {
        self.velocity.rewind();
    }

    fn update(&mut self, grad: &[f32], param: &mut [f32]) -> Result<(), ModelError> {
        check_lengths(grad, param)?;
        let [v] = self.velocity.next_slot(param.len())?;

        for ((p, &g), v) in param.iter_mut().zip(grad).zip(v.iter_mut()) {
            let g = g + self.decay * *p;
            *v = self.momentum * *v + g;
            let step = if self.nesterov {
                g + self.momentum * *v
            } else {
                *v
            };
            *p -= self.learning_rate * step;
        }
        Ok(())
    }
}

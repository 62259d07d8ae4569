use super::*;

/// Adam optimizer implementation.
///
/// Keeps bias-corrected estimates of the first and second moments of each gradient.
/// The step counter `t` advances once per training step (in `begin_step`), not once
/// per parameter buffer, so every buffer in a step sees the same bias correction.
///
/// # Fields
///
/// - `learning_rate` - Learning rate controlling the size of parameter updates
/// - `beta1` - Exponential decay rate for the first moment estimates
/// - `beta2` - Exponential decay rate for the second moment estimates
/// - `epsilon` - Small constant added for numerical stability
/// - `decay` - L2 weight decay coefficient
/// - `t` - Current timestep
/// - `moments` - `[m, v]` buffers, one pair per parameter slot
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    decay: f32,
    t: u64,
    moments: SlotState<2>,
}

impl Adam {
    /// Creates a new Adam optimizer with the specified parameters.
    ///
    /// # Parameters
    ///
    /// - `learning_rate` - Step size for parameter updates (typically 0.001)
    /// - `beta1` - Decay rate for the first moment estimates (typically 0.9)
    /// - `beta2` - Decay rate for the second moment estimates (typically 0.999)
    /// - `epsilon` - Small constant for numerical stability (typically 1e-8)
    /// - `decay` - L2 weight decay coefficient
    ///
    /// # Returns
    ///
    /// * `Result<Self, ModelError>` - A new Adam optimizer instance or an error
    pub fn new(
        learning_rate: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
        decay: f32,
    ) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_decay_rate(beta1, "beta1")?;
        validate_decay_rate(beta2, "beta2")?;
        validate_epsilon(epsilon)?;
        validate_weight_decay(decay)?;

        Ok(Self {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            decay,
            t: 0,
            moments: SlotState::new(),
        })
    }

    /// Number of training steps taken since the last reset.
    pub fn step_count(&self) -> u64 {
        self.t
    }
}

impl Optimizer for Adam {
    fn reset(&mut self) {
        self.moments.clear();
        self.t = 0;
    }

    fn begin_step(&mut self) {
        self.moments.rewind();
        self.t += 1;
    }

    fn update(&mut self, grad: &[f32], param: &mut [f32]) -> Result<(), ModelError> {
        check_lengths(grad, param)?;
        let [m, v] = self.moments.next_slot(param.len())?;

        let t = self.t.max(1) as i32;
        let correction1 = 1.0 - self.beta1.powi(t);
        let correction2 = 1.0 - self.beta2.powi(t);

        for (((p, &g), m), v) in param
            .iter_mut()
            .zip(grad)
            .zip(m.iter_mut())
            .zip(v.iter_mut())
        {
            let g = g + self.decay * *p;
            *m = self.beta1 * *m + (1.0 - self.beta1) * g;
            *v = self.beta2 * *v + (1.0 - self.beta2) * g * g;
            let m_hat = *m / correction1;
            let v_hat = *v / correction2;
            *p -= self.learning_rate * m_hat / (v_hat.sqrt() + self.epsilon);
        }
        Ok(())
    }
}

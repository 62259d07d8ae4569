use super::*;
use ndarray::Zip;

/// Multi-class cross-entropy head.
///
/// Expects each column of the last layer's output to be a probability vector,
/// typically produced by a `Softmax` activation. Targets are either a one-hot
/// matrix with the output's shape or one class index in `0..nrows` per observation.
///
/// - gradient: `-y / p`
/// - loss: `-Σ y ln p / ncols`
#[derive(Debug, Clone)]
pub struct MultiClassEntropy {
    din: Matrix,
    loss: Option<f32>,
}

impl MultiClassEntropy {
    pub fn new() -> Self {
        Self {
            din: Matrix::zeros((0, 0)),
            loss: None,
        }
    }
}

impl Default for MultiClassEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for MultiClassEntropy {
    fn check_target_data(&self, target: &Matrix) -> Result<(), ModelError> {
        if target.iter().any(|&y| y != 0.0 && y != 1.0) {
            return Err(ModelError::InputValidationError(
                "[MultiClassEntropy] target data must only contain zeros and ones".to_string(),
            ));
        }
        Ok(())
    }

    fn check_label_data(&self, target: &Labels) -> Result<(), ModelError> {
        if target.iter().any(|&y| y < 0) {
            return Err(ModelError::InputValidationError(
                "[MultiClassEntropy] class labels must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    fn evaluate(&mut self, prev_layer_data: &Matrix, target: &Matrix) -> Result<(), ModelError> {
        check_same_shape(self.output_type(), prev_layer_data, target)?;

        let mut din = Matrix::zeros(prev_layer_data.dim());
        let mut total = 0.0_f32;
        Zip::from(&mut din)
            .and(prev_layer_data)
            .and(target)
            .for_each(|d, &p, &y| {
                *d = -y / p;
                if y != 0.0 {
                    total -= y * p.ln();
                }
            });

        self.loss = Some(total / prev_layer_data.ncols() as f32);
        self.din = din;
        Ok(())
    }

    fn evaluate_labels(
        &mut self,
        prev_layer_data: &Matrix,
        target: &Labels,
    ) -> Result<(), ModelError> {
        check_label_count(self.output_type(), prev_layer_data, target)?;

        let nclass = prev_layer_data.nrows();
        let mut din = Matrix::zeros(prev_layer_data.dim());
        let mut total = 0.0_f32;
        for (j, &label) in target.iter().enumerate() {
            let class = usize::try_from(label)
                .ok()
                .filter(|&c| c < nclass)
                .ok_or_else(|| {
                    ModelError::InputValidationError(format!(
                        "[MultiClassEntropy] class label {} is outside 0..{}",
                        label, nclass
                    ))
                })?;
            let p = prev_layer_data[[class, j]];
            din[[class, j]] = -1.0 / p;
            total -= p.ln();
        }

        self.loss = Some(total / prev_layer_data.ncols() as f32);
        self.din = din;
        Ok(())
    }

    fn backprop_data(&self) -> &Matrix {
        &self.din
    }

    fn loss(&self) -> Result<f32, ModelError> {
        self.loss.ok_or_else(|| not_evaluated(self.output_type()))
    }

    fn output_type(&self) -> &str {
        "MultiClassEntropy"
    }
}

use super::*;
use ndarray::Zip;

/// Binary cross-entropy head.
///
/// Expects the last layer to produce probabilities in `(0, 1)`, typically through a
/// `Sigmoid` activation. Targets are either a 0/1 matrix with the output's shape or
/// one label in `{0, 1}` per observation (the output must then have a single row).
///
/// - gradient: `-(y / p) + (1 - y) / (1 - p)`
/// - loss: `-Σ [y ln p + (1 - y) ln(1 - p)] / ncols`
#[derive(Debug, Clone)]
pub struct BinaryClassEntropy {
    din: Matrix,
    loss: Option<f32>,
}

impl BinaryClassEntropy {
    pub fn new() -> Self {
        Self {
            din: Matrix::zeros((0, 0)),
            loss: None,
        }
    }

    fn evaluate_with<I>(&mut self, prev_layer_data: &Matrix, is_positive: I)
    where
        I: Fn(usize, usize) -> bool,
    {
        let mut din = Matrix::zeros(prev_layer_data.dim());
        let mut total = 0.0_f32;
        Zip::indexed(&mut din)
            .and(prev_layer_data)
            .for_each(|(i, j), d, &p| {
                if is_positive(i, j) {
                    *d = -1.0 / p;
                    total -= p.ln();
                } else {
                    *d = 1.0 / (1.0 - p);
                    total -= (1.0 - p).ln();
                }
            });

        self.loss = Some(total / prev_layer_data.ncols() as f32);
        self.din = din;
    }
}

impl Default for BinaryClassEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for BinaryClassEntropy {
    fn check_target_data(&self, target: &Matrix) -> Result<(), ModelError> {
        if target.iter().any(|&y| y != 0.0 && y != 1.0) {
            return Err(ModelError::InputValidationError(
                "[BinaryClassEntropy] target data must only contain zeros and ones".to_string(),
            ));
        }
        Ok(())
    }

    fn check_label_data(&self, target: &Labels) -> Result<(), ModelError> {
        if target.iter().any(|&y| y != 0 && y != 1) {
            return Err(ModelError::InputValidationError(
                "[BinaryClassEntropy] class labels must be 0 or 1".to_string(),
            ));
        }
        Ok(())
    }

    fn evaluate(&mut self, prev_layer_data: &Matrix, target: &Matrix) -> Result<(), ModelError> {
        check_same_shape(self.output_type(), prev_layer_data, target)?;
        self.check_target_data(target)?;

        self.evaluate_with(prev_layer_data, |i, j| target[[i, j]] == 1.0);
        Ok(())
    }

    fn evaluate_labels(
        &mut self,
        prev_layer_data: &Matrix,
        target: &Labels,
    ) -> Result<(), ModelError> {
        if prev_layer_data.nrows() != 1 {
            return Err(ModelError::DimensionMismatch(format!(
                "[BinaryClassEntropy] class labels need a single output row, got {}",
                prev_layer_data.nrows()
            )));
        }
        check_label_count(self.output_type(), prev_layer_data, target)?;
        self.check_label_data(target)?;

        self.evaluate_with(prev_layer_data, |_, j| target[j] == 1);
        Ok(())
    }

    fn backprop_data(&self) -> &Matrix {
        &self.din
    }

    fn loss(&self) -> Result<f32, ModelError> {
        self.loss.ok_or_else(|| not_evaluated(self.output_type()))
    }

    fn output_type(&self) -> &str {
        "BinaryClassEntropy"
    }
}

use super::*;

/// Mean squared error head for regression.
///
/// For a prediction `P` and target `T` of the same shape:
///
/// - gradient: `P - T`
/// - loss: `0.5 * ‖P - T‖² / ncols`
///
/// Class labels are not accepted as targets.
#[derive(Debug, Clone)]
pub struct RegressionMSE {
    din: Matrix,
    evaluated: bool,
}

impl RegressionMSE {
    pub fn new() -> Self {
        Self {
            din: Matrix::zeros((0, 0)),
            evaluated: false,
        }
    }
}

impl Default for RegressionMSE {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for RegressionMSE {
    fn evaluate(&mut self, prev_layer_data: &Matrix, target: &Matrix) -> Result<(), ModelError> {
        check_same_shape(self.output_type(), prev_layer_data, target)?;

        self.din = prev_layer_data - target;
        self.evaluated = true;
        Ok(())
    }

    fn backprop_data(&self) -> &Matrix {
        &self.din
    }

    fn loss(&self) -> Result<f32, ModelError> {
        if !self.evaluated {
            return Err(not_evaluated(self.output_type()));
        }
        let squared_norm: f32 = self.din.iter().map(|d| d * d).sum();
        Ok(0.5 * squared_norm / self.din.ncols() as f32)
    }

    fn output_type(&self) -> &str {
        "RegressionMSE"
    }
}

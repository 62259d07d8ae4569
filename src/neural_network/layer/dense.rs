use super::*;
use crate::random::set_normal_random;
use ndarray::linalg::general_mat_mul;
use ndarray::{Array1, Axis, ShapeBuilder};
use std::marker::PhantomData;

/// Dense (Fully Connected) layer implementation for neural networks.
///
/// Computes `z = Wᵀ · input + b` followed by `a = act(z)`, where the activation rule is
/// chosen at compile time through the type parameter `A`.
///
/// # Dimensions
///
/// - Input shape: (in_size, batch_size)
/// - Weight shape: (in_size, out_size), stored column-major
/// - Bias shape: (out_size)
/// - Output shape: (out_size, batch_size)
///
/// # Gradients
///
/// The weight and bias gradients are averaged over the batch (`dW = input · dzᵀ / n`,
/// `db = mean(dz)`), matching the per-observation average of every output layer's loss.
/// The gradient handed to the previous layer, `W · dz`, is not averaged because that
/// layer averages its own parameter gradients.
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use rustynn::prelude::*;
///
/// let mut layer = Dense::<ReLU>::new(2, 1).unwrap();
/// layer.set_parameters(&[1.0, 1.0, 0.0]).unwrap();
///
/// let x = array![[1.0_f32, 2.0], [3.0, 4.0]];
/// layer.forward(&x).unwrap();
/// assert_eq!(layer.output(), &array![[4.0_f32, 6.0]]);
/// ```
pub struct Dense<A: Activation> {
    in_size: usize,
    out_size: usize,
    /// Weight matrix with shape (in_size, out_size), column-major
    weight: Matrix,
    /// Bias vector with shape (out_size)
    bias: Array1<f32>,
    /// Weight gradient, same shape and layout as `weight`
    dw: Matrix,
    /// Bias gradient, same shape as `bias`
    db: Array1<f32>,
    /// Pre-activation cache, (out_size, batch_size)
    z: Matrix,
    /// Activation output cache, (out_size, batch_size)
    a: Matrix,
    /// Gradient with respect to the input, (in_size, batch_size)
    din: Matrix,
    state: LayerState,
    _activation: PhantomData<A>,
}

impl<A: Activation> Dense<A> {
    /// Creates a new dense layer. No storage is allocated until the layer is initialized.
    ///
    /// # Parameters
    ///
    /// - `in_size` - Number of input units
    /// - `out_size` - Number of output units
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - A new uninitialized layer
    /// - `Err(ModelError::InputValidationError)` - If either size is zero
    pub fn new(in_size: usize, out_size: usize) -> Result<Self, ModelError> {
        if in_size == 0 || out_size == 0 {
            return Err(ModelError::InputValidationError(format!(
                "Dense layer sizes must be positive, got ({}, {})",
                in_size, out_size
            )));
        }

        Ok(Self {
            in_size,
            out_size,
            weight: Matrix::zeros((0, 0)),
            bias: Array1::zeros(0),
            dw: Matrix::zeros((0, 0)),
            db: Array1::zeros(0),
            z: Matrix::zeros((out_size, 0)),
            a: Matrix::zeros((out_size, 0)),
            din: Matrix::zeros((in_size, 0)),
            state: LayerState::Uninitialized,
            _activation: PhantomData,
        })
    }

    /// Weight matrix with shape (in_size, out_size).
    pub fn weight(&self) -> &Matrix {
        &self.weight
    }

    /// Bias vector with shape (out_size).
    pub fn bias(&self) -> &Array1<f32> {
        &self.bias
    }

    /// Pre-activation values from the last forward pass.
    pub fn pre_activation(&self) -> &Matrix {
        &self.z
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LayerState {
        self.state
    }

    fn check_columns(&self, what: &str, m: &Matrix, rows: usize) -> Result<(), ModelError> {
        if m.nrows() != rows || m.ncols() != self.a.ncols() {
            return Err(ModelError::DimensionMismatch(format!(
                "[Dense] {} has shape ({}, {}), expected ({}, {})",
                what,
                m.nrows(),
                m.ncols(),
                rows,
                self.a.ncols()
            )));
        }
        Ok(())
    }
}

fn not_contiguous(name: &str) -> ModelError {
    ModelError::ProcessingError(format!("[Dense] {} buffer is not contiguous", name))
}

/// Flattens a column-major weight and its bias into one vector.
fn flatten(weight: &Matrix, bias: &Array1<f32>) -> Vec<f32> {
    weight.t().iter().chain(bias.iter()).copied().collect()
}

impl<A: Activation> Layer for Dense<A> {
    fn in_size(&self) -> usize {
        self.in_size
    }

    fn out_size(&self) -> usize {
        self.out_size
    }

    fn init(&mut self) {
        self.weight = Matrix::zeros((self.in_size, self.out_size).f());
        self.bias = Array1::zeros(self.out_size);
        self.dw = Matrix::zeros((self.in_size, self.out_size).f());
        self.db = Array1::zeros(self.out_size);
        self.state = LayerState::Initialized;
    }

    fn init_random(&mut self, mu: f32, sigma: f32, rng: &mut dyn RandomSource) {
        self.init();
        // Draws fill the weight column by column
        if let Some(w) = self.weight.as_slice_memory_order_mut() {
            set_normal_random(w, rng, mu, sigma);
        }
        if let Some(b) = self.bias.as_slice_mut() {
            set_normal_random(b, rng, mu, sigma);
        }
    }

    fn forward(&mut self, prev_layer_data: &Matrix) -> Result<(), ModelError> {
        if self.state == LayerState::Uninitialized {
            return Err(ModelError::ProcessingError(
                "[Dense] layer has not been initialized".to_string(),
            ));
        }
        if prev_layer_data.nrows() != self.in_size {
            return Err(ModelError::DimensionMismatch(format!(
                "[Dense] input has {} rows, expected {}",
                prev_layer_data.nrows(),
                self.in_size
            )));
        }

        let nobs = prev_layer_data.ncols();
        if self.z.ncols() != nobs {
            self.z = Matrix::zeros((self.out_size, nobs));
            self.a = Matrix::zeros((self.out_size, nobs));
        }

        // z = W' * in + b
        general_mat_mul(1.0, &self.weight.t(), prev_layer_data, 0.0, &mut self.z);
        self.z += &self.bias.view().insert_axis(Axis(1));

        A::activate(&self.z, &mut self.a);
        self.state = LayerState::Forwarded;
        Ok(())
    }

    fn output(&self) -> &Matrix {
        &self.a
    }

    fn backprop(
        &mut self,
        prev_layer_data: &Matrix,
        next_layer_data: &Matrix,
    ) -> Result<(), ModelError> {
        if !matches!(
            self.state,
            LayerState::Forwarded | LayerState::BackPropagated
        ) {
            return Err(ModelError::ProcessingError(
                "[Dense] forward pass has not been run".to_string(),
            ));
        }
        self.check_columns("previous layer data", prev_layer_data, self.in_size)?;
        self.check_columns("next layer gradient", next_layer_data, self.out_size)?;

        let nobs = self.a.ncols();

        // dL/dz through the activation's Jacobian
        let mut dz = Matrix::zeros((self.out_size, nobs));
        A::apply_jacobian(&self.z, &self.a, next_layer_data, &mut dz);

        let scale = 1.0 / nobs as f32;
        general_mat_mul(scale, prev_layer_data, &dz.t(), 0.0, &mut self.dw);
        self.db = dz.sum_axis(Axis(1)) * scale;

        if self.din.ncols() != nobs {
            self.din = Matrix::zeros((self.in_size, nobs));
        }
        general_mat_mul(1.0, &self.weight, &dz, 0.0, &mut self.din);

        self.state = LayerState::BackPropagated;
        Ok(())
    }

    fn backprop_data(&self) -> &Matrix {
        &self.din
    }

    fn update(&mut self, optimizer: &mut dyn Optimizer) -> Result<(), ModelError> {
        if self.state != LayerState::BackPropagated {
            return Err(ModelError::ProcessingError(
                "[Dense] update called before backprop".to_string(),
            ));
        }

        let dw = self
            .dw
            .as_slice_memory_order()
            .ok_or_else(|| not_contiguous("weight gradient"))?;
        let w = self
            .weight
            .as_slice_memory_order_mut()
            .ok_or_else(|| not_contiguous("weight"))?;
        optimizer.update(dw, w)?;

        let db = self
            .db
            .as_slice()
            .ok_or_else(|| not_contiguous("bias gradient"))?;
        let b = self
            .bias
            .as_slice_mut()
            .ok_or_else(|| not_contiguous("bias"))?;
        optimizer.update(db, b)?;

        Ok(())
    }

    /// Weight in column-major order, then bias.
    fn get_parameters(&self) -> Vec<f32> {
        flatten(&self.weight, &self.bias)
    }

    /// Allocates storage first if the layer has not been initialized yet.
    fn set_parameters(&mut self, params: &[f32]) -> Result<(), ModelError> {
        if params.len() != self.param_count() {
            return Err(ModelError::DimensionMismatch(format!(
                "[Dense] parameter vector has length {}, expected {}",
                params.len(),
                self.param_count()
            )));
        }
        if self.state == LayerState::Uninitialized {
            self.init();
        }

        let (w, b) = params.split_at(self.in_size * self.out_size);
        self.weight
            .as_slice_memory_order_mut()
            .ok_or_else(|| not_contiguous("weight"))?
            .copy_from_slice(w);
        self.bias
            .as_slice_mut()
            .ok_or_else(|| not_contiguous("bias"))?
            .copy_from_slice(b);
        Ok(())
    }

    fn get_derivatives(&self) -> Vec<f32> {
        flatten(&self.dw, &self.db)
    }

    fn param_count(&self) -> usize {
        self.in_size * self.out_size + self.out_size
    }

    fn layer_type(&self) -> &str {
        "Dense"
    }

    fn activation_type(&self) -> &str {
        A::name()
    }
}

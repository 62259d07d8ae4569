use crate::error::ModelError;
use crate::neural_network::callback::TrainingProgress;
use crate::neural_network::network::Network;
use crate::neural_network::{Labels, Matrix, Target};

/// Defines the interface for neural network layers.
///
/// A layer maps an `in_size × batch` input matrix to an `out_size × batch` output
/// matrix and propagates gradients backward through the same mapping. The network
/// drives every layer through the same fixed cycle per training step:
/// `forward` → `backprop` → `update`. Outputs and gradients are cached inside the
/// layer and read back through [`Layer::output`] and [`Layer::backprop_data`].
pub trait Layer {
    /// Number of input units.
    fn in_size(&self) -> usize;

    /// Number of output units.
    fn out_size(&self) -> usize;

    /// Allocates (or reshapes) parameter and gradient storage without setting values.
    fn init(&mut self);

    /// Allocates storage and fills every parameter with independent `N(mu, sigma²)` draws.
    ///
    /// # Parameters
    ///
    /// - `mu` - Mean of the normal distribution
    /// - `sigma` - Standard deviation of the normal distribution
    /// - `rng` - Random stream shared by the whole network
    fn init_random(&mut self, mu: f32, sigma: f32, rng: &mut dyn RandomSource);

    /// Computes the output of this layer for `prev_layer_data` (`in_size × batch`).
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The output is cached and available from [`Layer::output`]
    /// - `Err(ModelError)` - If the input has the wrong number of rows or the layer is uninitialized
    fn forward(&mut self, prev_layer_data: &Matrix) -> Result<(), ModelError>;

    /// Output cached by the last [`Layer::forward`] call (`out_size × batch`).
    fn output(&self) -> &Matrix;

    /// Computes parameter gradients and the gradient with respect to this layer's input.
    ///
    /// # Parameters
    ///
    /// - `prev_layer_data` - The input this layer saw in the matching forward pass
    /// - `next_layer_data` - Gradient of the loss with respect to this layer's output
    fn backprop(
        &mut self,
        prev_layer_data: &Matrix,
        next_layer_data: &Matrix,
    ) -> Result<(), ModelError>;

    /// Gradient with respect to this layer's input, cached by the last [`Layer::backprop`].
    fn backprop_data(&self) -> &Matrix;

    /// Hands every parameter buffer and its gradient to `optimizer`, always in the same order.
    fn update(&mut self, optimizer: &mut dyn Optimizer) -> Result<(), ModelError>;

    /// All parameters flattened into one contiguous vector.
    fn get_parameters(&self) -> Vec<f32>;

    /// Loads parameters previously produced by [`Layer::get_parameters`].
    ///
    /// Fails with `ModelError::DimensionMismatch` if `params` has the wrong length.
    fn set_parameters(&mut self, params: &[f32]) -> Result<(), ModelError>;

    /// All parameter gradients flattened in the same order as [`Layer::get_parameters`].
    fn get_derivatives(&self) -> Vec<f32>;

    /// Total number of trainable scalars.
    fn param_count(&self) -> usize;

    /// Returns the type name of the layer (e.g. "Dense").
    fn layer_type(&self) -> &str {
        "Unknown"
    }

    /// Returns the type name of the activation used by the layer (e.g. "ReLU").
    fn activation_type(&self) -> &str {
        "Unknown"
    }
}

/// Element-wise (or column-wise) activation rule applied by a layer.
///
/// Implementors are stateless; both operations write into caller-owned buffers
/// that already have the shape of `z`.
pub trait Activation {
    /// `a = act(z)`
    fn activate(z: &Matrix, a: &mut Matrix);

    /// Applies the Jacobian `da/dz` to the upstream gradient `f`, writing `g = J^T f`.
    ///
    /// # Parameters
    ///
    /// - `z` - Pre-activation values
    /// - `a` - Activation output computed from `z`
    /// - `f` - Gradient of the loss with respect to `a`
    /// - `g` - Receives the gradient of the loss with respect to `z`
    fn apply_jacobian(z: &Matrix, a: &Matrix, f: &Matrix, g: &mut Matrix);

    /// Type tag used in summaries and metadata.
    fn name() -> &'static str;
}

/// Defines the interface for optimization algorithms.
///
/// An optimizer only ever sees flat `(gradient, parameter)` slice pairs; it has no
/// knowledge of which layer or tensor they belong to. Stateful optimizers key their
/// memory on the position of each `update` call within a training step, so callers
/// must present the same parameters in the same order every step, and open each
/// step with [`Optimizer::begin_step`]. A stateful optimizer rejects an `update`
/// made outside a step, or one more than its first step made.
pub trait Optimizer {
    /// Clears all internal memory (moment buffers, step counters).
    fn reset(&mut self);

    /// Marks the start of a training step, before any call to [`Optimizer::update`].
    fn begin_step(&mut self) {}

    /// Updates `param` in place from its gradient `grad`.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The parameters were updated
    /// - `Err(ModelError::DimensionMismatch)` - If `grad` and `param` lengths differ or a slot changed length
    /// - `Err(ModelError::ProcessingError)` - If a stateful optimizer is called outside a step
    fn update(&mut self, grad: &[f32], param: &mut [f32]) -> Result<(), ModelError>;
}

/// Terminal stage of a network that compares predictions to targets.
///
/// `evaluate` computes and caches the gradient of the loss with respect to the last
/// layer's output; [`Output::loss`] and [`Output::backprop_data`] read that cache.
pub trait Output {
    /// Validates the format of a target matrix before training starts.
    fn check_target_data(&self, _target: &Matrix) -> Result<(), ModelError> {
        Ok(())
    }

    /// Validates class-label targets before training starts.
    fn check_label_data(&self, _target: &Labels) -> Result<(), ModelError> {
        Err(ModelError::Unsupported(format!(
            "{} cannot take class labels as target data",
            self.output_type()
        )))
    }

    /// Compares `prev_layer_data` with a target matrix of the same shape.
    fn evaluate(&mut self, prev_layer_data: &Matrix, target: &Matrix) -> Result<(), ModelError>;

    /// Compares `prev_layer_data` with one class label per observation.
    fn evaluate_labels(
        &mut self,
        _prev_layer_data: &Matrix,
        _target: &Labels,
    ) -> Result<(), ModelError> {
        Err(ModelError::Unsupported(format!(
            "{} cannot take class labels as target data",
            self.output_type()
        )))
    }

    /// Gradient of the loss with respect to the last layer's output.
    fn backprop_data(&self) -> &Matrix;

    /// Loss of the last evaluated batch.
    ///
    /// Fails with `ModelError::ProcessingError` if nothing has been evaluated yet.
    fn loss(&self) -> Result<f32, ModelError>;

    /// Type tag used in summaries and metadata.
    fn output_type(&self) -> &str;
}

/// Observer notified around every minibatch of [`Network::fit`].
///
/// Callbacks are informational only and receive the network by shared reference.
pub trait Callback {
    /// Called before the forward pass of a minibatch.
    fn pre_training_batch(
        &mut self,
        _net: &Network<'_>,
        _progress: &TrainingProgress,
        _x: &Matrix,
        _y: Target<'_>,
    ) {
    }

    /// Called after the parameter update of a minibatch.
    fn post_training_batch(
        &mut self,
        _net: &Network<'_>,
        _progress: &TrainingProgress,
        _x: &Matrix,
        _y: Target<'_>,
    ) {
    }
}

impl<C: Callback + ?Sized> Callback for &mut C {
    fn pre_training_batch(
        &mut self,
        net: &Network<'_>,
        progress: &TrainingProgress,
        x: &Matrix,
        y: Target<'_>,
    ) {
        (**self).pre_training_batch(net, progress, x, y);
    }

    fn post_training_batch(
        &mut self,
        net: &Network<'_>,
        progress: &TrainingProgress,
        x: &Matrix,
        y: Target<'_>,
    ) {
        (**self).post_training_batch(net, progress, x, y);
    }
}

/// Deterministic stream of uniform draws, shared by shuffling and initialization.
pub trait RandomSource {
    /// Restarts the stream from `seed`.
    fn seed(&mut self, seed: u64);

    /// Next draw, strictly inside `(0, 1)`.
    fn draw(&mut self) -> f64;
}

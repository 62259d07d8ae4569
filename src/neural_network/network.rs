use super::*;
use crate::random::Rng;
use crate::traits::RandomSource;
use log::{debug, warn};

/// Step used for the central differences of [`Network::check_gradient`].
///
/// Losses are `f32`, so smaller steps lose more to rounding than they gain in truncation.
const GRADIENT_CHECK_STEP: f32 = 1e-2;

/// Random stream of a network: either owned by the network or borrowed from the caller.
enum RngSource<'a> {
    Owned(Box<dyn RandomSource + 'a>),
    Borrowed(&'a mut dyn RandomSource),
}

impl RngSource<'_> {
    fn get(&mut self) -> &mut dyn RandomSource {
        match self {
            RngSource::Owned(rng) => rng.as_mut(),
            RngSource::Borrowed(rng) => &mut **rng,
        }
    }
}

/// One sampled parameter of [`Network::check_gradient`].
///
/// # Fields
///
/// - `layer` - Index of the layer that owns the parameter
/// - `index` - Position of the parameter in the layer's flattened parameter vector
/// - `analytic` - Derivative computed by back-propagation
/// - `numeric` - Central finite-difference estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientCheck {
    pub layer: usize,
    pub index: usize,
    pub analytic: f32,
    pub numeric: f32,
}

impl GradientCheck {
    /// Absolute difference between the two estimates.
    pub fn abs_error(&self) -> f32 {
        (self.analytic - self.numeric).abs()
    }
}

/// A feedforward neural network: an ordered stack of layers followed by an output head.
///
/// The network owns its layers, output and callback. Its random stream, used for
/// parameter initialization and minibatch shuffling, is either owned (a default
/// [`Rng`] or any boxed [`RandomSource`]) or borrowed from the caller for the
/// network's lifetime `'a`.
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use rustynn::prelude::*;
///
/// let mut net = Network::new();
/// net.add_layer(Dense::<Tanh>::new(2, 4).unwrap())
///     .add_layer(Dense::<Identity>::new(4, 1).unwrap())
///     .set_output(RegressionMSE::new());
/// net.init(0.0, 0.1, 42).unwrap();
///
/// let x = array![[0.0_f32, 1.0, 2.0, 3.0], [1.0, 0.0, 1.0, 0.0]];
/// let y = array![[1.0_f32, 1.0, 3.0, 3.0]];
///
/// let mut opt = SGD::new(0.05).unwrap();
/// assert!(net.fit(&mut opt, &x, &y, 2, 10, 1).unwrap());
///
/// let pred = net.predict(&x).unwrap();
/// assert_eq!(pred.dim(), (1, 4));
/// ```
pub struct Network<'a> {
    rng: RngSource<'a>,
    layers: Vec<Box<dyn Layer + 'a>>,
    output: Option<Box<dyn Output + 'a>>,
    callback: Box<dyn Callback + 'a>,
}

impl<'a> Network<'a> {
    /// Creates an empty network that owns a default [`Rng`] (seed 1).
    pub fn new() -> Self {
        Self::with_owned_rng(Box::new(Rng::default()))
    }

    /// Creates an empty network that draws from a caller-owned random stream.
    ///
    /// The stream must outlive the network; every draw advances the caller's state.
    pub fn with_rng(rng: &'a mut dyn RandomSource) -> Self {
        Self::from_source(RngSource::Borrowed(rng))
    }

    /// Creates an empty network that owns the given random stream.
    pub fn with_owned_rng(rng: Box<dyn RandomSource + 'a>) -> Self {
        Self::from_source(RngSource::Owned(rng))
    }

    fn from_source(rng: RngSource<'a>) -> Self {
        Self {
            rng,
            layers: Vec::new(),
            output: None,
            callback: Box::new(NoOpCallback),
        }
    }

    /// Appends a layer to the end of the stack.
    ///
    /// Shapes are not checked here; see [`Network::check_unit_sizes`].
    pub fn add_layer<L: Layer + 'a>(&mut self, layer: L) -> &mut Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Sets the output head, replacing any previous one.
    pub fn set_output<O: Output + 'a>(&mut self, output: O) -> &mut Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Sets the observer notified around every training minibatch.
    pub fn set_callback<C: Callback + 'a>(&mut self, callback: C) -> &mut Self {
        self.callback = Box::new(callback);
        self
    }

    /// Restores the default [`NoOpCallback`].
    pub fn set_default_callback(&mut self) -> &mut Self {
        self.callback = Box::new(NoOpCallback);
        self
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn get_layers(&self) -> &[Box<dyn Layer + 'a>] {
        &self.layers
    }

    pub fn get_output(&self) -> Option<&dyn Output> {
        self.output.as_deref()
    }

    /// Checks that every layer's input size equals the previous layer's output size.
    ///
    /// Layers are scanned front to back and the first inconsistency is reported.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - All adjacent layers are compatible (trivially true for zero or one layer)
    /// - `Err(ModelError::DimensionMismatch)` - Naming the first incompatible pair
    pub fn check_unit_sizes(&self) -> Result<(), ModelError> {
        for (i, pair) in self.layers.windows(2).enumerate() {
            if pair[1].in_size() != pair[0].out_size() {
                return Err(ModelError::DimensionMismatch(format!(
                    "unit sizes do not match between layer {} ({} outputs) and layer {} ({} inputs)",
                    i,
                    pair[0].out_size(),
                    i + 1,
                    pair[1].in_size()
                )));
            }
        }
        Ok(())
    }

    /// Initializes every layer's parameters with `N(mu, sigma²)` draws.
    ///
    /// Layers are initialized in order from the shared random stream, so layer 0
    /// consumes its draws before layer 1.
    ///
    /// # Parameters
    ///
    /// - `mu` - Mean of the normal distribution
    /// - `sigma` - Standard deviation, non-negative and finite
    /// - `seed` - Reseeds the random stream when positive; otherwise the stream continues
    ///
    /// # Returns
    ///
    /// - `Ok(())` - All layers are initialized
    /// - `Err(ModelError::DimensionMismatch)` - If adjacent layers do not fit together
    /// - `Err(ModelError::InputValidationError)` - If `mu` or `sigma` is invalid
    pub fn init(&mut self, mu: f32, sigma: f32, seed: i64) -> Result<(), ModelError> {
        self.check_unit_sizes()?;

        if !mu.is_finite() {
            return Err(ModelError::InputValidationError(format!(
                "mu must be finite, got {}",
                mu
            )));
        }
        if !(sigma >= 0.0 && sigma.is_finite()) {
            return Err(ModelError::InputValidationError(format!(
                "sigma must be non-negative and finite, got {}",
                sigma
            )));
        }

        let rng = self.rng.get();
        if seed > 0 {
            rng.seed(seed as u64);
        }
        for layer in self.layers.iter_mut() {
            layer.init_random(mu, sigma, rng);
        }

        debug!(
            "initialized {} layers with N({}, {}²)",
            self.layers.len(),
            mu,
            sigma
        );
        Ok(())
    }

    /// Trains the network with minibatch gradient descent.
    ///
    /// The optimizer is reset once, then the observations are shuffled and split into
    /// minibatches a single time. The same batches are visited in the same order in
    /// every epoch. For each batch the callback's pre-batch hook runs, followed by the
    /// forward pass, back-propagation, the parameter update, and the post-batch hook.
    ///
    /// # Parameters
    ///
    /// - `opt` - Optimizer used for every update
    /// - `x` - Input data, one column per observation
    /// - `y` - Target matrix or class labels, one entry per observation
    /// - `batch_size` - Observations per minibatch, clamped to the dataset size
    /// - `epoch` - Number of passes over the batches
    /// - `seed` - Reseeds the random stream before shuffling when positive
    ///
    /// # Returns
    ///
    /// - `Ok(true)` - Training completed
    /// - `Ok(false)` - The network has no layers; nothing was done
    /// - `Err(ModelError)` - On invalid input or a shape mismatch; training stops at the failing batch
    pub fn fit<Y: TargetData>(
        &mut self,
        opt: &mut dyn Optimizer,
        x: &Matrix,
        y: &Y,
        batch_size: usize,
        epoch: usize,
        seed: i64,
    ) -> Result<bool, ModelError> {
        if self.layers.is_empty() {
            warn!("fit called on a network with no layers");
            return Ok(false);
        }

        self.check_unit_sizes()?;
        if epoch == 0 {
            return Err(ModelError::InputValidationError(
                "epoch must be greater than 0".to_string(),
            ));
        }
        let output = self.output.as_deref().ok_or_else(|| {
            ModelError::ProcessingError("no output layer has been set".to_string())
        })?;
        y.as_target().check(output)?;
        batch::check_batch_input(x, y, batch_size)?;

        opt.reset();

        let rng = self.rng.get();
        if seed > 0 {
            rng.seed(seed as u64);
        }
        let batches = create_shuffled_batches(x, y, batch_size, rng)?;

        debug!(
            "training on {} observations: {} batches x {} epochs",
            x.ncols(),
            batches.len(),
            epoch
        );

        let mut callback = std::mem::replace(&mut self.callback, Box::new(NoOpCallback));
        let result = self.run_epochs(opt, &batches, epoch, callback.as_mut());
        self.callback = callback;
        result?;

        debug!("training completed");
        Ok(true)
    }

    fn run_epochs<Y: TargetData>(
        &mut self,
        opt: &mut dyn Optimizer,
        batches: &[Batch<Y>],
        nepoch: usize,
        callback: &mut dyn Callback,
    ) -> Result<(), ModelError> {
        for epoch_id in 0..nepoch {
            for (batch_id, batch) in batches.iter().enumerate() {
                let progress = TrainingProgress {
                    epoch_id,
                    nepoch,
                    batch_id,
                    nbatch: batches.len(),
                };
                let target = batch.y.as_target();

                callback.pre_training_batch(self, &progress, &batch.x, target);

                self.forward(&batch.x)?;
                self.backprop(&batch.x, target)?;
                self.update(opt)?;

                callback.post_training_batch(self, &progress, &batch.x, target);
            }
        }
        Ok(())
    }

    /// Runs the forward pass and returns the last layer's output (`out_size × ncols(x)`).
    ///
    /// Returns an empty `0 × 0` matrix if the network has no layers.
    pub fn predict(&mut self, x: &Matrix) -> Result<Matrix, ModelError> {
        if self.layers.is_empty() {
            warn!("predict called on a network with no layers");
            return Ok(Matrix::zeros((0, 0)));
        }

        self.forward(x)?;
        Ok(self.last_output().clone())
    }

    /// Parameters of every layer, in layer order.
    pub fn get_parameters(&self) -> Vec<Vec<f32>> {
        self.layers.iter().map(|l| l.get_parameters()).collect()
    }

    /// Loads one parameter vector per layer.
    ///
    /// Every length is checked before any layer is modified.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - All layers were updated
    /// - `Err(ModelError::DimensionMismatch)` - If the layer count or any vector length is wrong
    pub fn set_parameters(&mut self, params: &[Vec<f32>]) -> Result<(), ModelError> {
        if params.len() != self.layers.len() {
            return Err(ModelError::DimensionMismatch(format!(
                "got parameters for {} layers, network has {}",
                params.len(),
                self.layers.len()
            )));
        }
        for (i, (layer, p)) in self.layers.iter().zip(params).enumerate() {
            if layer.param_count() != p.len() {
                return Err(ModelError::DimensionMismatch(format!(
                    "layer {} expects {} parameters, got {}",
                    i,
                    layer.param_count(),
                    p.len()
                )));
            }
        }

        for (layer, p) in self.layers.iter_mut().zip(params) {
            layer.set_parameters(p)?;
        }
        Ok(())
    }

    /// Parameter gradients of every layer from the last back-propagation.
    pub fn get_derivatives(&self) -> Vec<Vec<f32>> {
        self.layers.iter().map(|l| l.get_derivatives()).collect()
    }

    /// Compares back-propagated derivatives with central finite differences.
    ///
    /// Samples `npoints` (layer, parameter) pairs with the network's random stream and,
    /// for each, evaluates the loss on the whole of `(x, y)` with the parameter moved by
    /// a small step in both directions. Every parameter is restored afterwards.
    ///
    /// # Parameters
    ///
    /// - `x` - Input data
    /// - `y` - Target matrix or class labels
    /// - `npoints` - Number of parameters to sample
    /// - `seed` - Reseeds the random stream first when positive
    pub fn check_gradient<Y: TargetData>(
        &mut self,
        x: &Matrix,
        y: &Y,
        npoints: usize,
        seed: i64,
    ) -> Result<Vec<GradientCheck>, ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::ProcessingError(
                "cannot check gradients of a network with no layers".to_string(),
            ));
        }
        self.check_unit_sizes()?;
        let target = y.as_target();
        if target.n_obs() != x.ncols() {
            return Err(ModelError::DimensionMismatch(format!(
                "input data have {} observations but target data have {}",
                x.ncols(),
                target.n_obs()
            )));
        }

        if seed > 0 {
            self.rng.get().seed(seed as u64);
        }

        self.forward(x)?;
        self.backprop(x, target)?;
        let derivatives = self.get_derivatives();
        let params = self.get_parameters();

        let mut checks = Vec::with_capacity(npoints);
        for _ in 0..npoints {
            let rng = self.rng.get();
            let layer = pick(rng, params.len());
            if params[layer].is_empty() {
                continue;
            }
            let index = pick(rng, params[layer].len());

            let value = params[layer][index];
            let (up, down) = (value + GRADIENT_CHECK_STEP, value - GRADIENT_CHECK_STEP);

            let mut perturbed = params[layer].clone();
            perturbed[index] = up;
            self.layers[layer].set_parameters(&perturbed)?;
            let loss_plus = self.batch_loss(x, target)?;

            perturbed[index] = down;
            self.layers[layer].set_parameters(&perturbed)?;
            let loss_minus = self.batch_loss(x, target)?;

            self.layers[layer].set_parameters(&params[layer])?;

            // Divide by the step actually taken after rounding `value ± step`
            let numeric = (loss_plus as f64 - loss_minus as f64) / (up as f64 - down as f64);
            checks.push(GradientCheck {
                layer,
                index,
                analytic: derivatives[layer][index],
                numeric: numeric as f32,
            });
        }

        debug!("checked {} gradient entries", checks.len());
        Ok(checks)
    }

    /// Renders a table of the layers, their shapes and parameter counts.
    pub fn summary(&self) -> String {
        let col1_width = 28;
        let col2_width = 14;
        let col3_width = 16;
        let col4_width = 12;

        let mut out = String::from("Model: \"network\"\n");
        out += &format!(
            "┏{}┳{}┳{}┳{}┓\n",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width),
            "━".repeat(col4_width)
        );
        out += &format!(
            "┃ {:<26} ┃ {:<12} ┃ {:<14} ┃ {:>10} ┃\n",
            "Layer (type)", "Activation", "Units (in→out)", "Param #"
        );
        out += &format!(
            "┡{}╇{}╇{}╇{}┩\n",
            "━".repeat(col1_width),
            "━".repeat(col2_width),
            "━".repeat(col3_width),
            "━".repeat(col4_width)
        );

        let mut total_params = 0;
        for (i, layer) in self.layers.iter().enumerate() {
            total_params += layer.param_count();
            out += &format!(
                "│ {:<26} │ {:<12} │ {:<14} │ {:>10} │\n",
                format!("Layer_{} ({})", i, layer.layer_type()),
                layer.activation_type(),
                format!("{}→{}", layer.in_size(), layer.out_size()),
                layer.param_count()
            );
        }
        out += &format!(
            "└{}┴{}┴{}┴{}┘\n",
            "─".repeat(col1_width),
            "─".repeat(col2_width),
            "─".repeat(col3_width),
            "─".repeat(col4_width)
        );
        out += &format!(
            " Output: {}\n",
            self.output.as_ref().map_or("(none)", |o| o.output_type())
        );
        // f32 parameters, 4 bytes each
        out += &format!(" Total params: {} ({} B)\n", total_params, total_params * 4);
        out
    }

    fn last_output(&self) -> &Matrix {
        self.layers[self.layers.len() - 1].output()
    }

    /// Chains every layer front to back; layer 0 consumes `input`.
    fn forward(&mut self, input: &Matrix) -> Result<(), ModelError> {
        let Some(first) = self.layers.first_mut() else {
            return Ok(());
        };
        if input.nrows() != first.in_size() {
            return Err(ModelError::DimensionMismatch(format!(
                "input data have {} rows, first layer expects {}",
                input.nrows(),
                first.in_size()
            )));
        }
        first.forward(input)?;

        for i in 1..self.layers.len() {
            let (head, tail) = self.layers.split_at_mut(i);
            tail[0].forward(head[i - 1].output())?;
        }
        Ok(())
    }

    /// Evaluates the output head against `target`, then walks the layers back to front.
    fn backprop(&mut self, input: &Matrix, target: Target<'_>) -> Result<(), ModelError> {
        let nlayer = self.layers.len();
        let output = self.output.as_deref_mut().ok_or_else(|| {
            ModelError::ProcessingError("no output layer has been set".to_string())
        })?;
        target.evaluate(output, self.layers[nlayer - 1].output())?;

        for i in (0..nlayer).rev() {
            let (head, tail) = self.layers.split_at_mut(i);
            let (current, next) = tail.split_at_mut(1);
            let prev_layer_data = if i == 0 { input } else { head[i - 1].output() };
            let next_layer_data = if i == nlayer - 1 {
                output.backprop_data()
            } else {
                next[0].backprop_data()
            };
            current[0].backprop(prev_layer_data, next_layer_data)?;
        }
        Ok(())
    }

    fn update(&mut self, opt: &mut dyn Optimizer) -> Result<(), ModelError> {
        opt.begin_step();
        for layer in self.layers.iter_mut() {
            layer.update(&mut *opt)?;
        }
        Ok(())
    }

    fn batch_loss(&mut self, x: &Matrix, target: Target<'_>) -> Result<f32, ModelError> {
        self.forward(x)?;
        let last = self.layers[self.layers.len() - 1].output();
        let output = self.output.as_deref_mut().ok_or_else(|| {
            ModelError::ProcessingError("no output layer has been set".to_string())
        })?;
        target.evaluate(output, last)?;
        output.loss()
    }
}

impl Default for Network<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform index in `0..len`; `len` must be positive.
fn pick(rng: &mut dyn RandomSource, len: usize) -> usize {
    ((rng.draw() * len as f64) as usize).min(len - 1)
}

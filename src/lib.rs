//! A small feedforward neural network engine built on `ndarray`.
//!
//! Data are laid out one column per observation: an input matrix has one row per
//! feature, and every layer maps an `in_size × n` matrix to an `out_size × n` matrix.
//!
//! # Example
//! ```rust
//! use ndarray::array;
//! use rustynn::prelude::*;
//!
//! let mut net = Network::new();
//! net.add_layer(Dense::<ReLU>::new(2, 8).unwrap())
//!     .add_layer(Dense::<Identity>::new(8, 1).unwrap())
//!     .set_output(RegressionMSE::new());
//! net.init(0.0, 0.1, 7).unwrap();
//!
//! let x = array![[0.0_f32, 0.5, 1.0, 1.5], [1.0, 0.5, 0.0, 0.5]];
//! let y = array![[1.0_f32, 1.0, 1.0, 2.0]];
//!
//! let mut opt = Adam::new(0.01, 0.9, 0.999, 1e-8, 0.0).unwrap();
//! net.set_callback(VerboseCallback);
//! net.fit(&mut opt, &x, &y, 2, 20, 1).unwrap();
//! ```

/// Error type returned by every fallible operation
pub mod error;

/// Components for building and training feedforward networks.
///
/// # Core Components
///
/// ## Layers
/// - **Dense**: fully connected layer, generic over its activation
///
/// ## Activations
/// - **ReLU**, **Identity**, **Sigmoid**, **Tanh**, **Softmax**
///
/// ## Optimizers
/// - **SGD**: plain gradient descent with optional weight decay
/// - **Momentum**: SGD with classic or Nesterov momentum
/// - **AdaGrad**, **RMSprop**, **Adam**: adaptive learning-rate methods
///
/// ## Outputs
/// - **RegressionMSE**: mean squared error for regression
/// - **BinaryClassEntropy**: binary cross-entropy for sigmoid outputs
/// - **MultiClassEntropy**: categorical cross-entropy for softmax outputs
///
/// ## Training
/// - **Network**: layer stack, training loop and prediction
/// - **Callback**: observers such as `VerboseCallback` and `ProgressBarCallback`
pub mod neural_network;

/// A convenience module that re-exports the most commonly used types and traits from this crate.
pub mod prelude;

/// Deterministic random streams and the normal-random parameter fill
pub mod random;

/// Traits shared across the crate: layers, activations, optimizers, outputs, callbacks and random sources
pub mod traits;

pub use error::ModelError;

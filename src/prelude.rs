pub use crate::error::ModelError;
pub use crate::neural_network::{
    AdaGrad, Adam, BinaryClassEntropy, Dense, GradientCheck, Identity, Labels, LayerState, Matrix,
    Momentum, MultiClassEntropy, Network, NoOpCallback, ProgressBarCallback, RMSprop, ReLU,
    RegressionMSE, SGD, Sigmoid, Softmax, Tanh, Target, TargetData, TrainingProgress,
    VerboseCallback,
};
pub use crate::random::{RandAdapter, Rng, set_normal_random};
pub use crate::traits::{Activation, Callback, Layer, Optimizer, Output, RandomSource};

/// Identity (linear) activation
pub mod identity;
/// Rectified linear unit
pub mod relu;
/// Logistic sigmoid
pub mod sigmoid;
/// Column-wise softmax
pub mod softmax;
/// Hyperbolic tangent
pub mod tanh;

pub use identity::*;
pub use relu::*;
pub use sigmoid::*;
pub use softmax::*;
pub use tanh::*;

use super::Matrix;
use crate::traits::Activation;
use ndarray::Zip;

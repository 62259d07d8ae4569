/// Callback that does nothing
pub mod no_op;
/// Callback that drives an `indicatif` progress bar
pub mod progress_bar;
/// Callback that logs the loss of every minibatch
pub mod verbose;

pub use no_op::*;
pub use progress_bar::*;
pub use verbose::*;

use super::{Matrix, Target};
use crate::neural_network::network::Network;
use crate::traits::Callback;

/// Position of the current minibatch within a call to `Network::fit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrainingProgress {
    /// Index of the current epoch, `0..nepoch`
    pub epoch_id: usize,
    /// Total number of epochs
    pub nepoch: usize,
    /// Index of the current minibatch within the epoch, `0..nbatch`
    pub batch_id: usize,
    /// Number of minibatches per epoch
    pub nbatch: usize,
}

impl TrainingProgress {
    /// Number of training steps completed before this batch, across all epochs.
    pub fn step(&self) -> usize {
        self.epoch_id * self.nbatch + self.batch_id
    }

    /// Total number of training steps in the run.
    pub fn total_steps(&self) -> usize {
        self.nepoch * self.nbatch
    }

    /// Returns `true` for the final minibatch of the final epoch.
    pub fn is_last(&self) -> bool {
        self.step() + 1 == self.total_steps()
    }
}

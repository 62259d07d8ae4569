use super::*;
use log::{info, warn};

/// Logs `[Epoch e, batch b] Loss = l` at info level after every minibatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerboseCallback;

impl Callback for VerboseCallback {
    fn post_training_batch(
        &mut self,
        net: &Network<'_>,
        progress: &TrainingProgress,
        _x: &Matrix,
        _y: Target<'_>,
    ) {
        let Some(output) = net.get_output() else {
            return;
        };
        match output.loss() {
            Ok(loss) => info!(
                "[Epoch {}, batch {}] Loss = {}",
                progress.epoch_id, progress.batch_id, loss
            ),
            Err(e) => warn!(
                "[Epoch {}, batch {}] {}",
                progress.epoch_id, progress.batch_id, e
            ),
        }
    }
}

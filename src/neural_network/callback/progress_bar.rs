use super::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Shows training progress as a terminal progress bar.
///
/// The bar is created at the first minibatch of a run with one tick per training
/// step (`nepoch * nbatch`), shows the current epoch and loss, and is finished
/// after the last step.
#[derive(Default)]
pub struct ProgressBarCallback {
    bar: Option<ProgressBar>,
    hidden: bool,
}

impl ProgressBarCallback {
    /// Creates a callback that draws to stderr.
    pub fn new() -> Self {
        Self {
            bar: None,
            hidden: false,
        }
    }

    /// Creates a callback whose bar tracks progress without drawing anything.
    pub fn hidden() -> Self {
        Self {
            bar: None,
            hidden: true,
        }
    }

    /// Current bar position, if a run has started.
    pub fn position(&self) -> Option<u64> {
        self.bar.as_ref().map(ProgressBar::position)
    }

    /// Returns `true` once the bar has been finished.
    pub fn is_finished(&self) -> bool {
        self.bar.as_ref().is_some_and(ProgressBar::is_finished)
    }

    fn start(&mut self, total: u64) -> ProgressBar {
        let bar = if self.hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total)
        };
        bar.set_length(total);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        bar.set_style(style);
        self.bar = Some(bar.clone());
        bar
    }
}

impl Callback for ProgressBarCallback {
    fn pre_training_batch(
        &mut self,
        _net: &Network<'_>,
        progress: &TrainingProgress,
        _x: &Matrix,
        _y: Target<'_>,
    ) {
        if progress.step() == 0 {
            self.start(progress.total_steps() as u64);
        }
    }

    fn post_training_batch(
        &mut self,
        net: &Network<'_>,
        progress: &TrainingProgress,
        _x: &Matrix,
        _y: Target<'_>,
    ) {
        let bar = match self.bar.clone() {
            Some(bar) => bar,
            None => self.start(progress.total_steps() as u64),
        };

        let loss = net.get_output().and_then(|o| o.loss().ok());
        match loss {
            Some(loss) => bar.set_message(format!(
                "Epoch {}/{} | Loss: {:.6}",
                progress.epoch_id + 1,
                progress.nepoch,
                loss
            )),
            None => bar.set_message(format!("Epoch {}/{}", progress.epoch_id + 1, progress.nepoch)),
        }
        bar.inc(1);

        if progress.is_last() {
            bar.finish_with_message("Training completed");
        }
    }
}

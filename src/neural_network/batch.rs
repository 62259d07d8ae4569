use super::*;
use crate::traits::RandomSource;
use ndarray::Axis;

/// A collection of observations that can be subset by observation index.
///
/// For matrices an observation is a column; for label vectors it is an element.
pub trait Observations: Sized {
    /// Number of observations.
    fn n_obs(&self) -> usize;

    /// Copies the observations at `indices`, in that order, into a new value.
    fn gather(&self, indices: &[usize]) -> Self;
}

impl Observations for Matrix {
    fn n_obs(&self) -> usize {
        self.ncols()
    }

    fn gather(&self, indices: &[usize]) -> Self {
        self.select(Axis(1), indices)
    }
}

impl Observations for Labels {
    fn n_obs(&self) -> usize {
        self.len()
    }

    fn gather(&self, indices: &[usize]) -> Self {
        self.select(Axis(0), indices)
    }
}

/// One minibatch: owned copies of the input columns and the matching targets.
#[derive(Debug, Clone)]
pub struct Batch<Y> {
    pub x: Matrix,
    pub y: Y,
}

/// Shuffles `arr` in place with a Fisher–Yates pass driven by `rng`.
///
/// Walks `i` from the last index down to 1, drawing `j = floor(draw * (i + 1))`
/// and swapping positions `i` and `j`.
///
/// # Parameters
///
/// - `arr` - Slice to permute
/// - `rng` - Random stream; one draw is consumed per position except the first
pub fn shuffle<T>(arr: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..arr.len()).rev() {
        // draw() < 1 keeps j <= i; min() guards against rounding at the top end
        let j = ((rng.draw() * (i + 1) as f64) as usize).min(i);
        arr.swap(i, j);
    }
}

/// Checks that `(x, y)` can be split into minibatches of `batch_size`.
pub(crate) fn check_batch_input<Y: Observations>(
    x: &Matrix,
    y: &Y,
    batch_size: usize,
) -> Result<(), ModelError> {
    let nobs = x.ncols();

    if y.n_obs() != nobs {
        return Err(ModelError::DimensionMismatch(format!(
            "input data have {} observations but target data have {}",
            nobs,
            y.n_obs()
        )));
    }

    if nobs == 0 {
        return Err(ModelError::InputValidationError(
            "dataset contains no observations".to_string(),
        ));
    }

    if batch_size == 0 {
        return Err(ModelError::InputValidationError(
            "batch_size must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Shuffles the observations of `(x, y)` and partitions them into minibatches.
///
/// `batch_size` is clamped to the number of observations. Every batch holds exactly
/// `batch_size` observations except the last, which holds the remainder. Values are
/// copied, so batches never alias the source data.
///
/// # Parameters
///
/// - `x` - Input matrix, one column per observation
/// - `y` - Targets with the same number of observations as `x`
/// - `batch_size` - Requested number of observations per batch
/// - `rng` - Random stream used for the shuffle
///
/// # Returns
///
/// - `Ok(Vec<Batch<Y>>)` - `ceil(n / batch_size)` batches in shuffled order
/// - `Err(ModelError::DimensionMismatch)` - If `x` and `y` have different observation counts
/// - `Err(ModelError::InputValidationError)` - If `batch_size` is zero or the dataset is empty
pub fn create_shuffled_batches<Y: Observations>(
    x: &Matrix,
    y: &Y,
    batch_size: usize,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Batch<Y>>, ModelError> {
    check_batch_input(x, y, batch_size)?;
    let nobs = x.ncols();

    let mut ids: Vec<usize> = (0..nobs).collect();
    shuffle(&mut ids, rng);

    let batch_size = batch_size.min(nobs);

    Ok(ids
        .chunks(batch_size)
        .map(|chunk| Batch {
            x: x.gather(chunk),
            y: y.gather(chunk),
        })
        .collect())
}

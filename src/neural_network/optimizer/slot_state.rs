use super::*;

/// Optimizer memory for every parameter buffer seen during a training step.
///
/// Buffers are not keyed by name or address but by the position of the `update`
/// call within the step: the first call of a step uses slot 0, the second slot 1,
/// and so on. [`SlotState::rewind`] opens a step and moves back to slot 0.
/// A slot is allocated lazily, zero-filled, the first time its position is reached,
/// and holds `K` buffers of the parameter's length.
///
/// The first step fixes the number of slots. Asking for a slot outside a step, or
/// for more slots than the first step used, is an error.
#[derive(Debug, Clone)]
pub struct SlotState<const K: usize> {
    slots: Vec<[Vec<f32>; K]>,
    cursor: usize,
    /// A step has been opened since the last `clear`
    in_step: bool,
    /// The first step has completed and the slot count is fixed
    sealed: bool,
}

impl<const K: usize> SlotState<K> {
    /// Creates an empty state with no slots.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            cursor: 0,
            in_step: false,
            sealed: false,
        }
    }

    /// Drops every slot and closes the current step.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.cursor = 0;
        self.in_step = false;
        self.sealed = false;
    }

    /// Opens a new step at the first slot.
    pub fn rewind(&mut self) {
        if self.in_step && !self.slots.is_empty() {
            self.sealed = true;
        }
        self.in_step = true;
        self.cursor = 0;
    }

    /// Number of allocated slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot has been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the buffers for the next position in the step, allocating them if needed.
    ///
    /// # Parameters
    ///
    /// * `len` - Length of the parameter buffer being updated
    ///
    /// # Returns
    ///
    /// - `Ok(&mut [Vec<f32>; K])` - The slot's buffers
    /// - `Err(ModelError::ProcessingError)` - If no step is open or the first step's slot count is exceeded
    /// - `Err(ModelError::DimensionMismatch)` - If the slot holds buffers of another length
    pub fn next_slot(&mut self, len: usize) -> Result<&mut [Vec<f32>; K], ModelError> {
        if !self.in_step {
            return Err(ModelError::ProcessingError(
                "optimizer update called outside a training step; call begin_step first"
                    .to_string(),
            ));
        }

        let index = self.cursor;
        if index == self.slots.len() {
            if self.sealed {
                return Err(ModelError::ProcessingError(format!(
                    "optimizer step made more than {} updates; call begin_step once per step",
                    self.slots.len()
                )));
            }
            self.slots.push(std::array::from_fn(|_| vec![0.0; len]));
        }
        self.cursor += 1;

        let slot = &mut self.slots[index];
        if slot.iter().any(|buffer| buffer.len() != len) {
            return Err(ModelError::DimensionMismatch(format!(
                "optimizer slot {} holds {} values but the parameter has {}; \
                 parameters must be updated in the same order every step",
                index,
                slot.first().map_or(0, Vec::len),
                len
            )));
        }
        Ok(slot)
    }
}

impl<const K: usize> Default for SlotState<K> {
    fn default() -> Self {
        Self::new()
    }
}

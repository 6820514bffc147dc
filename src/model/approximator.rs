use crate::error::ModelError;

/// A trainable function approximator: the capability a session drives.
///
/// Implementors check vector lengths and return `ModelError` rather than
/// panicking, so malformed client input never takes a session down.
pub trait Approximator {
    /// Length of the vector `predict` and `fit` expect as input.
    fn input_size(&self) -> usize;

    /// Length of the vector `predict` returns and `fit` expects as target.
    fn output_size(&self) -> usize;

    /// Forward pass. Must not change the model.
    fn predict(&self, input: &[f64]) -> Result<Vec<f64>, ModelError>;

    /// Applies exactly one training step on a single sample and returns the
    /// loss measured before the update.
    fn fit(&mut self, input: &[f64], target: &[f64]) -> Result<f64, ModelError>;
}

/// Returns `ShapeMismatch` unless `values.len() == expected`.
pub fn check_len(what: &'static str, values: &[f64], expected: usize) -> Result<(), ModelError> {
    if values.len() != expected {
        return Err(ModelError::ShapeMismatch { what, got: values.len(), expected });
    }
    Ok(())
}

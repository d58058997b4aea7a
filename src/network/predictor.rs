use crate::*;

/// A trainable mapping from one input window to the six scalars of a draw.
///
/// The session owns the predictor exclusively for the whole run and only
/// touches it through these four operations. Failures are returned rather
/// than absorbed; the session has no recovery for a broken backend and ends
/// the run with [`Error::Predictor`].
pub trait Predictor {
    /// Discard all learned parameters and start from a fresh random configuration.
    fn reset(&mut self);
    /// Run one training iteration over the full example set and return the error.
    fn train(
        &mut self,
        inputs: &[Vec<Scalar>],
        targets: &[[Scalar; DRAW_SIZE]],
    ) -> anyhow::Result<Scalar>;
    /// Error measured by the most recent training iteration.
    fn error(&self) -> Scalar;
    /// Forward pass for a single input window.
    fn compute(&self, input: &[Scalar]) -> anyhow::Result<[Scalar; DRAW_SIZE]>;
}

use crate::*;

/// Result of a session that reached `Accept`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Outcome {
    /// The accepted prediction.
    pub prediction: Draw,
    /// Training examples reproduced exactly by the accepted model.
    pub passed: usize,
    /// Window depth, i.e. the number of training examples.
    pub depth: usize,
    /// Evaluations performed, the accepted one included.
    pub attempts: usize,
    /// Weight reinitializations after the initial one.
    pub reseeds: usize,
    /// Training error when the prediction was made.
    pub error: Scalar,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} ({}/{} passed, {} attempts, {} reseeds, error {:.6})",
            self.prediction, self.passed, self.depth, self.attempts, self.reseeds, self.error
        )
    }
}

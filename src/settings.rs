use crate::*;

/// Run-time knobs for one prediction run.
///
/// `Settings::default()` reproduces the crate constants; the binary overrides
/// individual fields from its command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Draws per input window, and number of training examples.
    pub depth: usize,
    /// Training stops once the error is at or below this.
    pub threshold: Scalar,
    /// Maximum training steps per convergence run.
    pub steps: usize,
    /// Fraction of examples that must be reproduced exactly.
    pub acceptance: Scalar,
    /// Give up after this many evaluations. `None` loops until accepted.
    pub max_attempts: Option<usize>,
    /// Seed for weight initialization. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Size of the gradient worker pool.
    pub threads: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            depth: WINDOW_DEPTH,
            threshold: CONVERGENCE_THRESHOLD,
            steps: TRAINING_STEPS,
            acceptance: ACCEPTANCE_RATIO,
            max_attempts: None,
            seed: None,
            threads: num_cpus::get(),
        }
    }
}

impl Settings {
    /// Reject combinations that would make the run meaningless.
    pub fn validate(&self) -> Result<(), Error> {
        if self.depth == 0 {
            return Err(Error::Depth);
        }
        if self.steps == 0 {
            return Err(Error::Settings("training steps must be positive".into()));
        }
        if !(self.threshold > 0.) {
            return Err(Error::Settings(format!(
                "convergence threshold must be positive, got {}",
                self.threshold
            )));
        }
        if !(self.acceptance > 0. && self.acceptance <= 1.) {
            return Err(Error::Settings(format!(
                "acceptance ratio must lie in (0, 1], got {}",
                self.acceptance
            )));
        }
        if self.max_attempts == Some(0) {
            return Err(Error::Settings("attempt limit must be positive".into()));
        }
        Ok(())
    }
    pub fn trainer(&self) -> Trainer {
        Trainer::new(self.threshold, self.steps)
    }
    pub fn gate(&self) -> Gate {
        Gate::new(self.acceptance)
    }
}

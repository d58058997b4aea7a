use crate::*;

/// Where a [`Session`] stands between two transitions.
///
/// ```text
/// Reseeded ─▶ Trained ─▶ Evaluated ─▶ Accept (terminal)
///                                  ├─▶ Retrain ─▶ Trained  (same weights)
///                                  └─▶ Reseed  ─▶ Reseeded (fresh weights)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Weights were just reinitialized.
    Reseeded,
    /// A convergence run finished at this error.
    Trained { error: Scalar },
    /// The model was evaluated and its prediction classified.
    Evaluated {
        error: Scalar,
        passed: usize,
        prediction: Draw,
        verdict: Verdict,
    },
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Evaluated {
                verdict: Verdict::Accept,
                ..
            }
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Reseeded => write!(f, "reseeded"),
            Self::Trained { error } => write!(f, "trained ({:.6})", error),
            Self::Evaluated {
                passed,
                prediction,
                verdict,
                ..
            } => write!(f, "evaluated {} ({} passed) → {}", prediction, passed, verdict),
        }
    }
}

/// What the session does next with the current model.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize)]
pub enum Verdict {
    /// The prediction is usable; stop.
    Accept,
    /// Keep the current weights and train further.
    Retrain,
    /// The model state is unusable; reinitialize it and train again.
    Reseed,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Retrain => write!(f, "retrain"),
            Self::Reseed => write!(f, "reseed"),
        }
    }
}

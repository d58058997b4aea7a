/// Everything that can end a run.
///
/// Configuration errors are raised before any training happens. A rejected
/// prediction is never an error: it is a [`Verdict`](crate::Verdict) that the
/// session acts on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("history holds {found} draws, window depth {depth} needs at least {needed}")]
    ShortHistory {
        found: usize,
        depth: usize,
        needed: usize,
    },
    #[error("window depth must be positive")]
    Depth,
    #[error("malformed history at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("invalid setting: {0}")]
    Settings(String),
    #[error("cannot read history: {0}")]
    Io(#[from] std::io::Error),
    #[error("no acceptable prediction after {attempts} attempts")]
    Exhausted { attempts: usize },
    #[error("predictor failure: {0:#}")]
    Predictor(#[source] anyhow::Error),
}

impl Error {
    /// True for errors caused by the input data or settings rather than by training.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ShortHistory { .. }
                | Self::Depth
                | Self::Malformed { .. }
                | Self::Settings(_)
                | Self::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_split() {
        assert!(Error::Depth.is_configuration());
        assert!(Error::Settings("zero steps".into()).is_configuration());
        assert!(!Error::Exhausted { attempts: 3 }.is_configuration());
        assert!(!Error::Predictor(anyhow::anyhow!("nan")).is_configuration());
    }

    #[test]
    fn short_history_message() {
        let e = Error::ShortHistory {
            found: 39,
            depth: 20,
            needed: 40,
        };
        assert_eq!(
            e.to_string(),
            "history holds 39 draws, window depth 20 needs at least 40"
        );
    }
}

use crate::Scalar;

/// Transfer function applied after each layer's weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activation {
    /// Logistic `1 / (1 + e^-x)`.
    Sigmoid,
    /// Identity.
    Linear,
}

impl Activation {
    pub fn activate(&self, x: Scalar) -> Scalar {
        match self {
            Self::Sigmoid => 1. / (1. + (-x).exp()),
            Self::Linear => x,
        }
    }
    /// Derivative expressed in terms of the activated output `y`.
    pub fn derivative(&self, y: Scalar) -> Scalar {
        match self {
            Self::Sigmoid => y * (1. - y),
            Self::Linear => 1.,
        }
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Sigmoid => write!(f, "sigmoid"),
            Self::Linear => write!(f, "linear"),
        }
    }
}

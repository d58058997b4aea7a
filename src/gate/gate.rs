use crate::*;

/// Decides whether a prediction is good enough to stop on.
///
/// Checks run in a fixed order and the first match wins:
/// 1. an out-of-range prediction means the weights are degenerate → `Reseed`
/// 2. too few exact reproductions, or repeated numbers → `Retrain`
/// 3. otherwise → `Accept`
///
/// Out-of-range is checked first so that a prediction failing on both
/// counts is treated as the more severe structural failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    ratio: Scalar,
    parts: u64,
}

/// The ratio is held as a whole number of parts per million.
const RESOLUTION: u64 = 1_000_000;

impl Default for Gate {
    fn default() -> Self {
        Self::new(ACCEPTANCE_RATIO)
    }
}

impl Gate {
    pub fn new(ratio: Scalar) -> Self {
        let parts = (ratio.clamp(0., 1.) * RESOLUTION as Scalar).round() as u64;
        Self { ratio, parts }
    }
    pub fn ratio(&self) -> Scalar {
        self.ratio
    }

    pub fn classify(&self, prediction: &Draw, passed: usize, depth: usize) -> Verdict {
        if prediction.is_out_of_range() {
            Verdict::Reseed
        } else if self.short(passed, depth) || !prediction.is_valid() {
            Verdict::Retrain
        } else {
            Verdict::Accept
        }
    }

    /// Smallest pass count that clears the bar, i.e. `ceil(ratio · depth)`.
    pub fn minimum(&self, depth: usize) -> usize {
        (self.parts * depth as u64).div_ceil(RESOLUTION) as usize
    }

    /// `passed < ratio · depth`, in exact integer arithmetic.
    fn short(&self, passed: usize, depth: usize) -> bool {
        passed as u64 * RESOLUTION < self.parts * depth as u64
    }
}

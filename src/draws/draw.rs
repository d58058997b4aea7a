use crate::*;

/// Six numbers from one draw, kept in the order they were recorded.
///
/// A `Draw` is not validated on construction: network outputs are truncated
/// into draws precisely so that they can be checked afterwards. Two separate
/// predicates describe how far a draw is from being usable:
/// - [`Draw::is_out_of_range`]: some number lies outside `[BALL_MIN, BALL_MAX]`
/// - [`Draw::is_valid`]: every number is in range and all six are distinct
///
/// Equality is field-wise and order-sensitive, matching the `1,2,3,4,5,6`
/// text form produced by `Display`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub struct Draw([Ball; DRAW_SIZE]);

impl Draw {
    pub fn balls(&self) -> [Ball; DRAW_SIZE] {
        self.0
    }
    /// Network-facing representation, one scalar per field.
    pub fn scalars(&self) -> [Scalar; DRAW_SIZE] {
        self.0.map(Scalar::from)
    }
    /// True if at least one number falls outside the allowed range,
    /// whether or not the numbers are distinct.
    pub fn is_out_of_range(&self) -> bool {
        self.0.iter().any(|b| !(BALL_MIN..=BALL_MAX).contains(b))
    }
    /// True if every number is in range and no number repeats.
    pub fn is_valid(&self) -> bool {
        !self.is_out_of_range()
            && self
                .0
                .iter()
                .enumerate()
                .all(|(i, a)| self.0[i + 1..].iter().all(|b| a != b))
    }
    /// Uniformly random valid draw, in ascending order.
    pub fn random() -> Self {
        let ref mut rng = rand::rng();
        let span = (BALL_MAX - BALL_MIN + 1) as usize;
        let mut balls = rand::seq::index::sample(rng, span, DRAW_SIZE)
            .into_iter()
            .map(|i| i as Ball + BALL_MIN)
            .collect::<Vec<Ball>>();
        balls.sort_unstable();
        let mut draw = [0; DRAW_SIZE];
        draw.copy_from_slice(&balls);
        Self(draw)
    }
}

impl From<[Ball; DRAW_SIZE]> for Draw {
    fn from(balls: [Ball; DRAW_SIZE]) -> Self {
        Self(balls)
    }
}

/// Truncation toward zero, the same cast applied to predictions and targets.
/// NaN becomes 0 and infinities saturate, so both land out of range.
impl From<[Scalar; DRAW_SIZE]> for Draw {
    fn from(scalars: [Scalar; DRAW_SIZE]) -> Self {
        Self(scalars.map(|x| x as Ball))
    }
}

impl std::fmt::Display for Draw {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text = self
            .0
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<String>>()
            .join(",");
        f.pad(&text)
    }
}

//! Classification of a fresh prediction into accept, retrain, or reseed.
mod gate;
mod verdict;

pub use gate::*;
pub use verdict::*;

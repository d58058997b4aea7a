//! Convergence runs, training-set evaluation, and the events they emit.
mod event;
mod trainer;

pub use event::*;
pub use trainer::*;

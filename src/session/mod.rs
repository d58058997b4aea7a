//! The retry/reseed state machine that drives a whole prediction run.
mod outcome;
mod phase;
mod session;

pub use outcome::*;
pub use phase::*;
pub use session::*;

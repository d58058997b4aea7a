//! Draw values and the chronological history they are read into.
mod draw;
mod history;

pub use draw::*;
pub use history::*;

//! Sliding-window training examples cut from a history.
mod windows;

pub use windows::*;

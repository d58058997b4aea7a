//! Trainable function approximators.
//!
//! The rest of the crate only sees the [`Predictor`] trait. [`Perceptron`] is
//! the default backend: a dense multilayer perceptron trained full-batch by
//! resilient propagation, with per-example gradients spread over a rayon pool.
//!
//! - [`Topology`]: Layer widths and activations
//! - [`Activation`]: Sigmoid and linear transfer functions
//! - [`Layer`]: One dense, biased weight matrix
//! - [`Resilient`]: iRPROP+ step-size state
mod activation;
mod layer;
mod perceptron;
mod predictor;
mod resilient;
mod topology;

pub use activation::*;
pub use layer::*;
pub use perceptron::*;
pub use predictor::*;
pub use resilient::*;
pub use topology::*;

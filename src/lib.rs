//! Windowed feed-forward predictor for six-number draws.
//!
//! A flat history of draws is cut into overlapping windows, a perceptron is
//! trained to map each window onto the draw that followed it, and a fresh
//! prediction is only accepted once it reproduces enough of the training set
//! and is itself a well-formed draw.
//!
//! # Module Structure
//!
//! - `draws`: Draw values and the chronological History
//! - `windows`: Sliding-window training examples
//! - `network`: Predictor trait and the default Perceptron backend
//! - `training`: Convergence loop, evaluation, and structured events
//! - `gate`: Accept / Retrain / Reseed classification
//! - `session`: The retry/reseed state machine
//! - `console`: Command line flags and terminal reporter (feature `server`)

mod draws;
mod error;
mod gate;
mod network;
mod session;
mod settings;
mod training;
mod windows;
#[cfg(feature = "server")]
mod console;

pub use draws::*;
pub use error::*;
pub use gate::*;
pub use network::*;
pub use session::*;
pub use settings::*;
pub use training::*;
pub use windows::*;
#[cfg(feature = "server")]
pub use console::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// A single drawn number.
pub type Ball = i32;
/// Network inputs, outputs, weights, and errors.
pub type Scalar = f64;

// ============================================================================
// DRAW DOMAIN
// ============================================================================
/// Numbers per draw.
pub const DRAW_SIZE: usize = 6;
/// Smallest number a valid draw may contain.
pub const BALL_MIN: Ball = 1;
/// Largest number a valid draw may contain.
pub const BALL_MAX: Ball = 45;

// ============================================================================
// WINDOWING & TOPOLOGY
// W draws per input window, and W examples per training set.
// ============================================================================
/// Draws per input window and examples per training set.
pub const WINDOW_DEPTH: usize = 20;
/// Hidden layer width as a multiple of the input width.
pub const HIDDEN_FACTOR: usize = 5;
/// Number of hidden layers.
pub const HIDDEN_LAYERS: usize = 2;

// ============================================================================
// CONVERGENCE & ACCEPTANCE
// ============================================================================
/// Training stops once the error drops to or below this value.
pub const CONVERGENCE_THRESHOLD: Scalar = 0.001;
/// Maximum training steps per convergence run.
pub const TRAINING_STEPS: usize = 20;
/// Fraction of training examples that must be reproduced exactly.
/// Heuristic with no deeper derivation; override via `Settings::acceptance`.
pub const ACCEPTANCE_RATIO: Scalar = 0.9;

// ============================================================================
// RESILIENT PROPAGATION
// Per-weight step sizes grow while the gradient keeps its sign and shrink on a flip.
// ============================================================================
/// Step size every weight starts from after a reset.
pub const RPROP_INITIAL_STEP: Scalar = 0.1;
/// Multiplier applied when the gradient keeps its sign.
pub const RPROP_GROWTH: Scalar = 1.2;
/// Multiplier applied when the gradient flips sign.
pub const RPROP_SHRINK: Scalar = 0.5;
/// Upper bound on any single step.
pub const RPROP_MAX_STEP: Scalar = 50.0;
/// Lower bound on any single step.
pub const RPROP_MIN_STEP: Scalar = 1e-6;
/// Gradients smaller than this are treated as zero.
pub const RPROP_ZERO: Scalar = 1e-17;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

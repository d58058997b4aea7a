use crate::*;

/// Structured progress emitted while a session runs.
///
/// The core never formats anything itself; a [`Reporter`] decides whether
/// these end up on a terminal, in a log file, or in a test assertion.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Event {
    /// One training iteration finished with this error.
    Step { step: usize, error: Scalar },
    /// One training example was re-evaluated after training.
    Example {
        index: usize,
        target: Draw,
        predicted: Draw,
        passed: bool,
    },
    /// A fresh prediction was classified.
    Prediction {
        attempt: usize,
        draw: Draw,
        passed: usize,
        verdict: Verdict,
    },
}

/// Sink for [`Event`]s.
pub trait Reporter {
    fn report(&mut self, event: Event);
}

impl<R> Reporter for &mut R
where
    R: Reporter + ?Sized,
{
    fn report(&mut self, event: Event) {
        (**self).report(event)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Reporter for Silent {
    fn report(&mut self, _: Event) {}
}

/// Keeps every event in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Vec<Event>);

impl Recorder {
    pub fn events(&self) -> &[Event] {
        &self.0
    }
    /// Training errors in the order they were reported.
    pub fn errors(&self) -> Vec<Scalar> {
        self.0
            .iter()
            .filter_map(|e| match e {
                Event::Step { error, .. } => Some(*error),
                _ => None,
            })
            .collect()
    }
    /// Verdicts in the order they were reached.
    pub fn verdicts(&self) -> Vec<Verdict> {
        self.0
            .iter()
            .filter_map(|e| match e {
                Event::Prediction { verdict, .. } => Some(*verdict),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for Recorder {
    fn report(&mut self, event: Event) {
        self.0.push(event);
    }
}

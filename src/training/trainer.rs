use crate::*;

/// Trains a predictor to local convergence and measures how much of the
/// training set it reproduces.
///
/// A `Trainer` holds no model state and makes no retry decisions; it only
/// runs the predictor it is handed against a fixed set of windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trainer {
    threshold: Scalar,
    steps: usize,
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(CONVERGENCE_THRESHOLD, TRAINING_STEPS)
    }
}

impl Trainer {
    pub fn new(threshold: Scalar, steps: usize) -> Self {
        Self { threshold, steps }
    }
    pub fn threshold(&self) -> Scalar {
        self.threshold
    }
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Step the predictor over the full example set until the error is at or
    /// below the threshold or the step budget is spent. At least one step
    /// always runs. Returns the last error.
    pub fn converge<P>(
        &self,
        predictor: &mut P,
        windows: &Windows,
        reporter: &mut impl Reporter,
    ) -> Result<Scalar, Error>
    where
        P: Predictor + ?Sized,
    {
        let mut step = 0;
        loop {
            let error = predictor
                .train(windows.inputs(), windows.targets())
                .map_err(Error::Predictor)?;
            step += 1;
            reporter.report(Event::Step { step, error });
            if error <= self.threshold || step >= self.steps {
                log::debug!("converged to {:.6} in {} steps", error, step);
                return Ok(error);
            }
        }
    }

    /// Count the examples whose truncated prediction equals their target
    /// exactly, field by field and in order.
    pub fn evaluate<P>(
        &self,
        predictor: &P,
        windows: &Windows,
        reporter: &mut impl Reporter,
    ) -> Result<usize, Error>
    where
        P: Predictor + ?Sized,
    {
        let mut passed = 0;
        for (index, (input, target)) in windows.examples().enumerate() {
            let predicted = predictor
                .compute(input)
                .map(Draw::from)
                .map_err(Error::Predictor)?;
            let target = Draw::from(*target);
            let hit = predicted == target;
            passed += hit as usize;
            reporter.report(Event::Example {
                index,
                target,
                predicted,
                passed: hit,
            });
        }
        Ok(passed)
    }

    /// Truncated prediction for the window following the newest training target.
    pub fn predict<P>(&self, predictor: &P, windows: &Windows) -> Result<Draw, Error>
    where
        P: Predictor + ?Sized,
    {
        predictor
            .compute(windows.latest())
            .map(Draw::from)
            .map_err(Error::Predictor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed error schedule and echoes the first draw of every window.
    struct Scripted {
        errors: Vec<Scalar>,
        calls: usize,
    }

    impl Predictor for Scripted {
        fn reset(&mut self) {}
        fn train(&mut self, _: &[Vec<Scalar>], _: &[[Scalar; DRAW_SIZE]]) -> anyhow::Result<Scalar> {
            let error = self.errors[self.calls.min(self.errors.len() - 1)];
            self.calls += 1;
            Ok(error)
        }
        fn error(&self) -> Scalar {
            self.errors[self.calls.saturating_sub(1).min(self.errors.len() - 1)]
        }
        fn compute(&self, input: &[Scalar]) -> anyhow::Result<[Scalar; DRAW_SIZE]> {
            let mut out = [0.; DRAW_SIZE];
            out.copy_from_slice(&input[..DRAW_SIZE]);
            Ok(out)
        }
    }

    struct Broken;

    impl Predictor for Broken {
        fn reset(&mut self) {}
        fn train(&mut self, _: &[Vec<Scalar>], _: &[[Scalar; DRAW_SIZE]]) -> anyhow::Result<Scalar> {
            anyhow::bail!("backend unavailable")
        }
        fn error(&self) -> Scalar {
            Scalar::NAN
        }
        fn compute(&self, _: &[Scalar]) -> anyhow::Result<[Scalar; DRAW_SIZE]> {
            anyhow::bail!("backend unavailable")
        }
    }

    fn windows(n: usize, depth: usize) -> Windows {
        let history: History = (0..n as Ball)
            .map(|k| Draw::from(std::array::from_fn::<Ball, DRAW_SIZE, _>(|f| k + 1 + f as Ball)))
            .collect::<Vec<Draw>>()
            .into();
        Windows::build(&history, depth).unwrap()
    }

    #[test]
    fn stops_at_threshold() {
        let mut predictor = Scripted {
            errors: vec![0.5, 0.1, 0.001, 0.0001],
            calls: 0,
        };
        let mut recorder = Recorder::default();
        let error = Trainer::default()
            .converge(&mut predictor, &windows(8, 4), &mut recorder)
            .unwrap();
        assert_eq!(error, 0.001);
        assert_eq!(predictor.calls, 3);
        assert_eq!(recorder.errors(), vec![0.5, 0.1, 0.001]);
    }

    #[test]
    fn stops_at_step_budget() {
        let mut predictor = Scripted {
            errors: vec![1.0],
            calls: 0,
        };
        let mut recorder = Recorder::default();
        let error = Trainer::default()
            .converge(&mut predictor, &windows(8, 4), &mut recorder)
            .unwrap();
        assert_eq!(error, 1.0);
        assert_eq!(predictor.calls, TRAINING_STEPS);
        assert_eq!(recorder.errors().len(), TRAINING_STEPS);
    }

    #[test]
    fn always_runs_one_step() {
        let mut predictor = Scripted {
            errors: vec![0.0],
            calls: 0,
        };
        Trainer::new(0.5, 10)
            .converge(&mut predictor, &windows(8, 4), &mut Silent)
            .unwrap();
        assert_eq!(predictor.calls, 1);
    }

    #[test]
    fn evaluate_counts_exact_matches() {
        // echoing the oldest draw of each window never equals its target
        let predictor = Scripted {
            errors: vec![0.],
            calls: 0,
        };
        let windows = windows(10, 5);
        let mut recorder = Recorder::default();
        let passed = Trainer::default()
            .evaluate(&predictor, &windows, &mut recorder)
            .unwrap();
        assert_eq!(passed, 0);
        assert_eq!(recorder.events().len(), 5);
        assert!(recorder.events().iter().all(|e| matches!(
            e,
            Event::Example { passed: false, .. }
        )));
    }

    #[test]
    fn predict_reads_latest_window() {
        let predictor = Scripted {
            errors: vec![0.],
            calls: 0,
        };
        let windows = windows(10, 5);
        let draw = Trainer::default().predict(&predictor, &windows).unwrap();
        // latest window starts at H[W-1] = H[4], which is [5..=10]
        assert_eq!(draw, Draw::from([5, 6, 7, 8, 9, 10]));
    }

    #[test]
    fn predictor_failures_propagate() {
        let windows = windows(8, 4);
        let trainer = Trainer::default();
        assert!(matches!(
            trainer.converge(&mut Broken, &windows, &mut Silent),
            Err(Error::Predictor(_))
        ));
        assert!(matches!(
            trainer.evaluate(&Broken, &windows, &mut Silent),
            Err(Error::Predictor(_))
        ));
        assert!(matches!(
            trainer.predict(&Broken, &windows),
            Err(Error::Predictor(_))
        ));
    }
}

use crate::*;

/// Drives a predictor through train → evaluate → classify until a
/// prediction is accepted.
///
/// The windows are fixed for the whole run; only the predictor's weights
/// change. A `Retrain` verdict keeps training from the current weights, a
/// `Reseed` verdict reinitializes them first. Without an attempt limit the
/// loop has no other way out than acceptance.
pub struct Session<'run, P>
where
    P: Predictor + ?Sized,
{
    predictor: &'run mut P,
    windows: &'run Windows,
    trainer: Trainer,
    gate: Gate,
    max_attempts: Option<usize>,
    attempts: usize,
    reseeds: usize,
}

impl<'run, P> Session<'run, P>
where
    P: Predictor + ?Sized,
{
    pub fn new(predictor: &'run mut P, windows: &'run Windows) -> Self {
        Self {
            predictor,
            windows,
            trainer: Trainer::default(),
            gate: Gate::default(),
            max_attempts: None,
            attempts: 0,
            reseeds: 0,
        }
    }
    /// Session with every knob taken from `settings`.
    pub fn configured(
        predictor: &'run mut P,
        windows: &'run Windows,
        settings: &Settings,
    ) -> Result<Self, Error> {
        settings.validate()?;
        if settings.depth != windows.depth() {
            return Err(Error::Settings(format!(
                "windows were built with depth {}, settings ask for {}",
                windows.depth(),
                settings.depth
            )));
        }
        Ok(Self::new(predictor, windows)
            .trainer(settings.trainer())
            .gate(settings.gate())
            .max_attempts(settings.max_attempts))
    }
    pub fn trainer(mut self, trainer: Trainer) -> Self {
        self.trainer = trainer;
        self
    }
    pub fn gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }
    /// Stop with [`Error::Exhausted`] after this many rejected evaluations.
    pub fn max_attempts(mut self, limit: Option<usize>) -> Self {
        self.max_attempts = limit;
        self
    }

    /// Evaluations performed so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
    /// Reinitializations performed after the initial one.
    pub fn reseeds(&self) -> usize {
        self.reseeds
    }

    /// Enter the machine: reinitialize the predictor once.
    pub fn start(&mut self) -> Phase {
        self.predictor.reset();
        log::debug!("session started from fresh weights");
        Phase::Reseeded
    }

    /// Perform the single transition out of `phase`.
    /// Calling this on an accepted phase returns it unchanged.
    pub fn advance(
        &mut self,
        phase: Phase,
        reporter: &mut impl Reporter,
    ) -> Result<Phase, Error> {
        let next = match phase {
            Phase::Reseeded => self.train(reporter)?,
            Phase::Trained { error } => self.evaluate(error, reporter)?,
            Phase::Evaluated { verdict, .. } => match verdict {
                Verdict::Accept => phase,
                Verdict::Retrain => {
                    self.exhausted()?;
                    self.train(reporter)?
                }
                Verdict::Reseed => {
                    self.exhausted()?;
                    self.reseed()
                }
            },
        };
        log::trace!("{} → {}", phase, next);
        Ok(next)
    }

    /// Run from fresh weights until a prediction is accepted.
    pub fn run(mut self, reporter: &mut impl Reporter) -> Result<Outcome, Error> {
        let mut phase = self.start();
        loop {
            if let Phase::Evaluated {
                error,
                passed,
                prediction,
                verdict: Verdict::Accept,
            } = phase
            {
                log::debug!(
                    "accepted {} after {} attempts and {} reseeds",
                    prediction,
                    self.attempts,
                    self.reseeds
                );
                return Ok(Outcome {
                    prediction,
                    passed,
                    depth: self.windows.depth(),
                    attempts: self.attempts,
                    reseeds: self.reseeds,
                    error,
                });
            }
            phase = self.advance(phase, reporter)?;
        }
    }

    fn train(&mut self, reporter: &mut impl Reporter) -> Result<Phase, Error> {
        let error = self
            .trainer
            .converge(&mut *self.predictor, self.windows, reporter)?;
        Ok(Phase::Trained { error })
    }

    fn evaluate(&mut self, error: Scalar, reporter: &mut impl Reporter) -> Result<Phase, Error> {
        let passed = self.trainer.evaluate(&*self.predictor, self.windows, reporter)?;
        let prediction = self.trainer.predict(&*self.predictor, self.windows)?;
        let verdict = self
            .gate
            .classify(&prediction, passed, self.windows.depth());
        self.attempts += 1;
        log::debug!(
            "attempt {:>4} {:<20} {:>3}/{:<3} {}",
            self.attempts,
            prediction,
            passed,
            self.windows.depth(),
            verdict
        );
        reporter.report(Event::Prediction {
            attempt: self.attempts,
            draw: prediction,
            passed,
            verdict,
        });
        Ok(Phase::Evaluated {
            error,
            passed,
            prediction,
            verdict,
        })
    }

    fn reseed(&mut self) -> Phase {
        self.predictor.reset();
        self.reseeds += 1;
        Phase::Reseeded
    }

    fn exhausted(&self) -> Result<(), Error> {
        match self.max_attempts {
            Some(limit) if self.attempts >= limit => Err(Error::Exhausted {
                attempts: self.attempts,
            }),
            _ => Ok(()),
        }
    }
}

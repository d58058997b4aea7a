use crate::*;
use clap::Parser;
use colored::Colorize;

/// Train on a draw history until a prediction passes the gate.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Tab-separated history, newest draw first.
    #[arg(long, default_value = "Data.txt")]
    pub data: std::path::PathBuf,
    /// Draws per input window.
    #[arg(long, default_value_t = WINDOW_DEPTH)]
    pub depth: usize,
    /// Stop a convergence run once the error reaches this.
    #[arg(long, default_value_t = CONVERGENCE_THRESHOLD)]
    pub threshold: Scalar,
    /// Training steps per convergence run.
    #[arg(long, default_value_t = TRAINING_STEPS)]
    pub steps: usize,
    /// Fraction of examples a model must reproduce exactly.
    #[arg(long, default_value_t = ACCEPTANCE_RATIO)]
    pub acceptance: Scalar,
    /// Give up after this many evaluations.
    #[arg(long)]
    pub attempts: Option<usize>,
    /// Seed weight initialization for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Gradient worker threads. Defaults to the number of CPUs.
    #[arg(long)]
    pub threads: Option<usize>,
    /// Print the accepted outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

impl From<&Args> for Settings {
    fn from(args: &Args) -> Self {
        Self {
            depth: args.depth,
            threshold: args.threshold,
            steps: args.steps,
            acceptance: args.acceptance,
            max_attempts: args.attempts,
            seed: args.seed,
            threads: args.threads.unwrap_or_else(num_cpus::get),
        }
    }
}

/// Terminal presentation of session events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Reporter for Console {
    fn report(&mut self, event: Event) {
        match event {
            Event::Step { step, error } => log::info!(
                "{:<32}{:<32}",
                format!("train step {}", step),
                format!("train error {:.6}", error)
            ),
            Event::Example {
                target,
                predicted,
                passed,
                ..
            } => {
                let (eq, mark) = match passed {
                    true => ("==", "PASS".green()),
                    false => ("!=", "FAIL".red()),
                };
                println!("{:>17} {} {:<17} {}", target, eq, predicted, mark);
            }
            Event::Prediction {
                attempt,
                draw,
                passed,
                verdict,
            } => {
                println!(
                    "{} {:>3} passed  attempt {}  {}",
                    format!("predict {:<17}", draw).yellow(),
                    passed,
                    attempt,
                    verdict
                );
            }
        }
    }
}

/// Parse flags, load the history, and run a session to acceptance.
pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::from(&args);
    settings.validate()?;
    log::info!("{:<32}{:<32}", "loading history", args.data.display());
    let history = History::load(&args.data)?;
    let windows = Windows::build(&history, settings.depth)?;
    let mut predictor = Perceptron::try_from(&settings)?;
    log::info!("{:<32}{:<32}", "network topology", predictor.topology());
    let outcome = Session::configured(&mut predictor, &windows, &settings)?.run(&mut Console)?;
    match args.json {
        true => println!("{}", serde_json::to_string_pretty(&outcome)?),
        false => println!("{}", outcome.to_string().bold()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let args = Args::parse_from([
            "lottonet",
            "--data",
            "draws.tsv",
            "--depth",
            "12",
            "--attempts",
            "50",
            "--seed",
            "9",
            "--threads",
            "3",
        ]);
        let settings = Settings::from(&args);
        assert_eq!(args.data, std::path::PathBuf::from("draws.tsv"));
        assert_eq!(settings.depth, 12);
        assert_eq!(settings.max_attempts, Some(50));
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.threads, 3);
        assert_eq!(settings.acceptance, ACCEPTANCE_RATIO);
        assert!(!args.json);
    }

    #[test]
    fn defaults_match_constants() {
        let settings = Settings::from(&Args::parse_from(["lottonet"]));
        assert_eq!(
            settings,
            Settings {
                threads: settings.threads,
                ..Settings::default()
            }
        );
    }
}

//! Repeated train/prune/test trials that keep the best tree.
use colored::Colorize;
use tracing::info;

use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::{C45Error, Result};
use crate::common::checker;
use crate::sample::{DatasetReader, DEFAULT_SEED};
use crate::decision_tree::{C45, C45Builder, C45Config};

/// The number of trials run by default.
pub const DEFAULT_TRIALS: usize = 1_000;

const WIDTH: usize = 8;
const PREC_WIDTH: usize = 4;


/// Runs independent C4.5 trials over fresh random splits
/// of the same dataset and keeps the best tree.
///
/// Trial `i` (counted from `0`) shuffles with `seed + i`,
/// so a run is reproducible from its seed.
///
/// # Example
/// ```no_run
/// use c45tree::prelude::*;
///
/// let reader = DatasetReader::new()
///     .file("tests/dataset/tennis.csv")
///     .schema("tests/dataset/tennis-schema.json")
///     .percentage_split(66.0);
/// let summary = Trials::new(reader)
///     .n_trials(100)
///     .seed(777)
///     .verbose(true)
///     .run()
///     .unwrap();
/// println!("{}", summary.best.display_tree());
/// ```
pub struct Trials<P, Q> {
    reader: DatasetReader<P, Q>,
    config: C45Config,
    n_trials: usize,
    seed: u64,
    verbose: bool,
}


/// The outcome of [`Trials::run`].
#[derive(Debug, Clone)]
pub struct TrialSummary {
    /// The best learner, already trained, pruned and tested.
    pub best: C45,
    /// The trial (counted from `0`) that produced `best`.
    pub best_iteration: usize,
    /// Test accuracy of every trial, in trial order.
    pub accuracies: Vec<f64>,
    /// Wall time of the whole run.
    pub elapsed: Duration,
}


impl TrialSummary {
    /// Returns the mean test accuracy over the trials.
    #[inline]
    pub fn average_accuracy(&self) -> f64 {
        if self.accuracies.is_empty() { return 0.0; }
        self.accuracies.iter().sum::<f64>() / self.accuracies.len() as f64
    }


    /// Returns the test accuracy of the best trial.
    #[inline]
    pub fn best_accuracy(&self) -> f64 {
        self.best.accuracy()
    }
}


impl<P, Q> Trials<P, Q> {
    /// Construct a new instance of [`Trials`].
    /// By default, [`Trials`] sets the parameters as follows;
    /// ```text
    /// config: C45Config::default(),
    /// n_trials: DEFAULT_TRIALS == 1_000,
    /// seed: DEFAULT_SEED == 1234,
    /// verbose: false,
    /// ```
    pub fn new(reader: DatasetReader<P, Q>) -> Self {
        Self {
            reader,
            config: C45Config::default(),
            n_trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            verbose: false,
        }
    }


    /// Set the learner configuration shared by every trial.
    #[inline]
    pub fn config(mut self, config: C45Config) -> Self {
        self.config = config;
        self
    }


    /// Set the number of trials, in `1..=10_000`.
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = n_trials;
        self
    }


    /// Set the seed of the first trial.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Print one colored line per trial if `true`.
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}


impl<P, Q> Trials<P, Q>
    where P: AsRef<Path>,
          Q: AsRef<Path>,
{
    /// Run every trial and return the best learner.
    ///
    /// A trial replaces the current best one
    /// if it is more accurate, or if both accuracies agree
    /// to two significant digits and its tree has fewer nodes.
    pub fn run(&self) -> Result<TrialSummary> {
        checker::check_trials(self.n_trials)?;
        self.config.validate()?;

        if self.verbose { print_header(); }

        let now = Instant::now();
        let mut best: Option<(usize, C45)> = None;
        let mut accuracies = Vec::with_capacity(self.n_trials);
        for i in 0..self.n_trials {
            let seed = self.seed.wrapping_add(i as u64);
            let dataset = self.reader.read_with_seed(seed)?;
            let mut c45 = C45Builder::new(dataset)
                .config(self.config)
                .build()?;
            c45.run()?;

            let accuracy = c45.accuracy();
            accuracies.push(accuracy);

            if self.verbose {
                let time = now.elapsed().as_millis();
                print_trial(i, &c45, time);
            }

            let replace = match &best {
                None => true,
                Some((_, current)) => is_better(&c45, current),
            };
            if replace {
                best = Some((i, c45));
            }
        }
        let elapsed = now.elapsed();

        let (best_iteration, best) = best
            .ok_or_else(|| C45Error::invariant("no trial ran"))?;

        let summary = TrialSummary { best, best_iteration, accuracies, elapsed };
        info!(
            n_trials = self.n_trials,
            average_accuracy = summary.average_accuracy(),
            best_iteration,
            best_accuracy = summary.best_accuracy(),
            "trials finished"
        );
        Ok(summary)
    }
}


/// Returns `true` if `candidate` should replace `current`.
pub(crate) fn is_better(candidate: &C45, current: &C45) -> bool {
    let (acc, best) = (candidate.accuracy(), current.accuracy());
    acc > best
        || (two_digits(acc) == two_digits(best)
            && candidate.node_count() < current.node_count())
}


/// Rounds `x` to two significant digits.
#[inline]
fn two_digits(x: f64) -> String {
    format!("{x:.1e}")
}


fn print_header() {
    println!(
        "      {:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
        "TRIAL".bold().red(),
        "CORRECT".bold().blue(),
        "TESTED".bold().green(),
        "ACC.".bold().yellow(),
        "TIME".bold().cyan(),
    );
}


fn print_trial(i: usize, c45: &C45, time: u128) {
    println!(
        "{} {}\t{}\t{}\t{}\t{}",
        "[LOG]".bold().magenta(),
        format!("{:>WIDTH$}", i + 1).red(),
        format!("{:>WIDTH$}", c45.num_correct()).blue(),
        format!("{:>WIDTH$}", c45.results().len()).green(),
        format!("{:>WIDTH$.PREC_WIDTH$}", c45.accuracy()).yellow(),
        time_format(time).bold().cyan(),
    );
}


/// Formats milliseconds the way the trial log prints them.
pub fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_trial_count() {
        let trials = Trials::<&str, &str>::new(DatasetReader::new());
        assert_eq!(trials.n_trials, DEFAULT_TRIALS);
        assert!(checker::check_trials(trials.n_trials).is_ok());
    }

    #[test]
    fn two_significant_digits() {
        assert_eq!(two_digits(0.8333), two_digits(0.8349));
        assert_ne!(two_digits(0.84), two_digits(0.86));
    }

    #[test]
    fn time_is_formatted_by_magnitude() {
        assert_eq!(time_format(42), "  0.042s");
        assert_eq!(time_format(61_000), " 01m 01s");
    }
}

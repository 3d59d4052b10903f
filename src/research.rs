//! This directory provides the tools for experiments
//! - Running many trials and keeping the best tree
//! - Writing the results as a Markdown report

/// Runs repeated train/prune/test trials.
pub mod trials;

/// Renders the results of a trial.
pub mod report;


pub use trials::{Trials, TrialSummary, time_format, DEFAULT_TRIALS};
pub use report::Report;

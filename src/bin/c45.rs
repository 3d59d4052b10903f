//! Runs C4.5 trials on a CSV dataset and writes a Markdown report
//! of the best tree.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use c45tree::prelude::*;
use c45tree::research::{time_format, DEFAULT_TRIALS};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "c45")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Grow, prune and evaluate C4.5 decision trees", long_about = None)]
struct Args {
    /// CSV data file (no header, one instance per line)
    #[arg(short, long)]
    data: PathBuf,

    /// JSON schema naming and typing the columns
    #[arg(short, long)]
    schema: PathBuf,

    /// Percentage of instances used for training
    #[arg(short, long, default_value_t = DEFAULT_PERCENTAGE_SPLIT)]
    percentage_split: f64,

    /// Number of trials; the best tree is reported
    #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Seed of the first trial's shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// JSON file with the learner configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Z-value of the pruning confidence bound
    #[arg(short, long)]
    z_value: Option<f64>,

    /// Enable minimum-instances-per-leaf pruning
    #[arg(long)]
    min_instance_pruning: bool,

    /// Minimum number of training instances per leaf
    #[arg(long)]
    min_instances: Option<usize>,

    /// What to do with categorical values unseen during training
    #[arg(long, value_enum)]
    unseen_category: Option<UnseenArg>,

    /// Output directory for the report
    #[arg(short, long, default_value = "results")]
    output: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnseenArg {
    Reject,
    MajorityBranch,
}

impl From<UnseenArg> for UnseenCategory {
    fn from(arg: UnseenArg) -> Self {
        match arg {
            UnseenArg::Reject => Self::Reject,
            UnseenArg::MajorityBranch => Self::MajorityBranch,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    // Flags override the configuration file.
    let mut config = match &args.config {
        Some(path) => C45Config::from_json_file(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => C45Config::default(),
    };
    if let Some(z) = args.z_value {
        config.z_value = z;
    }
    if args.min_instance_pruning {
        config.use_min_instance_pruning = true;
    }
    if let Some(min_instances) = args.min_instances {
        config.min_instances_per_leaf = min_instances;
    }
    if let Some(policy) = args.unseen_category {
        config.unseen_category = policy.into();
    }

    let reader = DatasetReader::new()
        .file(&args.data)
        .schema(&args.schema)
        .percentage_split(args.percentage_split);

    info!(
        "Running {} trials on '{}'",
        args.trials,
        args.data.display()
    );
    let summary = Trials::new(reader)
        .config(config)
        .n_trials(args.trials)
        .seed(args.seed)
        .verbose(args.verbose)
        .run()
        .context("Trials failed")?;

    let title = format!("{}-trials-best", args.trials);
    let path = Report::new(&summary.best)
        .title(&title)
        .write(&args.output)
        .context("Failed to write the report")?;

    info!(
        "Ran {} trials in {}, with an average accuracy of {:.2}%",
        args.trials,
        time_format(summary.elapsed.as_millis()).trim(),
        summary.average_accuracy() * 100.0
    );
    info!(
        "Best decision tree was built during trial {}, with an accuracy of {:.2}%",
        summary.best_iteration + 1,
        summary.best_accuracy() * 100.0
    );
    info!("Results available in {}", path.display());

    Ok(())
}

//! Train command - Train a linear Q-learning agent on a table-driven world

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;
use tracing::info;

use crate::{
    adapters::{BagOfWords, TableWorld, Vocabulary},
    analysis::CurveSummary,
    cli::output::{print_curve_summary, print_kv, print_section},
    config::ExperimentConfig,
    export::CurvesCsvExporter,
    linear::{SavedModel, TrainingMetadata},
    pipeline::{
        ExperimentResult, JsonlObserver, MetricsObserver, Observer, ProgressObserver, RunMetrics,
        TrainingPipeline,
    },
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    world: String,
    vocabulary_size: usize,
    config: ExperimentConfig,
    curves: CurveSummary,
    runs: Vec<RunMetrics>,
    best_run: Option<usize>,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train an agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// World definition (JSON)
    #[arg(long, short = 'w')]
    pub world: PathBuf,

    /// Experiment configuration (JSON); flags below override its values
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of independent runs
    #[arg(long)]
    pub runs: Option<usize>,

    /// Epochs per run
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Training episodes per epoch
    #[arg(long)]
    pub train_episodes: Option<usize>,

    /// Evaluation episodes per epoch
    #[arg(long)]
    pub test_episodes: Option<usize>,

    /// Learning rate α
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Exploration probability while training (0.0-1.0)
    #[arg(long)]
    pub train_epsilon: Option<f64>,

    /// Exploration probability while evaluating (0.0-1.0)
    #[arg(long)]
    pub test_epsilon: Option<f64>,

    /// Abort any episode that runs longer than this many steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Save the best run's model (MessagePack)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Write a JSON training summary (file or directory)
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Write per-epoch curves to CSV
    #[arg(long)]
    pub curves: Option<PathBuf>,

    /// Write one JSON line per epoch sample
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Show a progress bar
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Print per-run metrics
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl TrainArgs {
    /// Resolve the experiment configuration: file (or defaults), then flags.
    fn experiment_config(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        let agent = &mut config.agent;
        if let Some(alpha) = self.alpha {
            agent.learning_rate = alpha;
        }
        if let Some(gamma) = self.gamma {
            agent.discount = gamma;
        }
        if let Some(epsilon) = self.train_epsilon {
            agent.train_epsilon = epsilon;
        }
        if let Some(epsilon) = self.test_epsilon {
            agent.test_epsilon = epsilon;
        }

        let schedule = &mut config.schedule;
        if let Some(runs) = self.runs {
            schedule.runs = runs;
        }
        if let Some(epochs) = self.epochs {
            schedule.epochs = epochs;
        }
        if let Some(episodes) = self.train_episodes {
            schedule.train_episodes = episodes;
        }
        if let Some(episodes) = self.test_episodes {
            schedule.test_episodes = episodes;
        }
        if self.max_steps.is_some() {
            schedule.max_steps_per_episode = self.max_steps;
        }
        if self.seed.is_some() {
            schedule.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.experiment_config()?;

    let mut world = TableWorld::load(&args.world)
        .with_context(|| format!("Failed to load world from {}", args.world.display()))?;
    if let Some(seed) = config.schedule.seed {
        world = world.with_seed(seed);
    }
    let features = BagOfWords::new(Vocabulary::from_texts(world.state_texts()));
    info!(
        world = %args.world.display(),
        vocabulary = features.vocabulary().len(),
        "loaded world"
    );

    let mut pipeline = TrainingPipeline::new(config);
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = pipeline.run(&mut world, &features)?;
    let curves = result.summary()?;
    print_curve_summary(&curves);

    let metrics = run_metrics(&result)?;
    if args.verbose {
        for run in &metrics {
            print_section(&format!("Run {}", run.run));
            print_kv("Mean sample", &format!("{:.6}", run.mean_sample));
            print_kv("Best sample", &format!("{:.6}", run.best_sample));
            print_kv("Final sample", &format!("{:.6}", run.final_sample));
            print_kv("Ewma sample", &format!("{:.6}", run.smoothed));
        }
    }

    let best = result.best_run();
    if let Some(path) = &args.output {
        let best = best.ok_or_else(|| anyhow!("No completed run to save"))?;
        let saved = SavedModel::new(
            best.model.clone(),
            features.vocabulary().tokens().to_vec(),
            config.agent,
            TrainingMetadata {
                run: best.run,
                epochs: best.samples.len(),
                seed: best.seed,
                final_sample: best.samples.last().copied(),
            },
        );
        saved.save_to_file(path)?;
        println!("\nModel from run {} saved to: {}", best.run, path.display());
    }

    if let Some(path) = &args.curves {
        CurvesCsvExporter::export(path, &result.curves())?;
        println!("Curves written to: {}", path.display());
    }

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create summary directory {}", parent.display())
            })?;
        }
        let summary = TrainingSummaryFile {
            world: args.world.display().to_string(),
            vocabulary_size: features.vocabulary().len(),
            config,
            curves,
            runs: metrics,
            best_run: best.map(|run| run.run),
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        to_writer_pretty(file, &summary)?;
        println!("Summary written to: {}", path.display());
    }

    Ok(())
}

fn run_metrics(result: &ExperimentResult) -> Result<Vec<RunMetrics>> {
    let mut observer = MetricsObserver::new();
    for run in &result.runs {
        observer.on_run_end(run.run, &run.samples)?;
    }
    Ok(observer.runs().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/summary")),
            PathBuf::from("out/summary.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/summary.JSON")),
            PathBuf::from("out/summary.JSON")
        );
        let dir = format!("out{}", std::path::MAIN_SEPARATOR);
        assert_eq!(
            sanitize_summary_path(Path::new(&dir)),
            PathBuf::from("out").join("training_summary.json")
        );
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = TrainArgs::parse_from([
            "train", "--world", "w.json", "--runs", "3", "--alpha", "0.1", "--gamma", "0.9",
            "--seed", "7",
        ]);
        let config = args.experiment_config().unwrap();
        assert_eq!(config.schedule.runs, 3);
        assert_eq!(config.schedule.epochs, 600);
        assert_eq!(config.schedule.seed, Some(7));
        assert_eq!(config.agent.learning_rate, 0.1);
        assert_eq!(config.agent.discount, 0.9);
        assert_eq!(config.agent.train_epsilon, 0.5);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = TrainArgs::parse_from(["train", "--world", "w.json", "--gamma", "1.5"]);
        assert!(args.experiment_config().is_err());
    }
}

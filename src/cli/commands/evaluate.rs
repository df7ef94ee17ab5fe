//! Evaluate command - Measure a saved model's discounted return

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::{
    adapters::{BagOfWords, TableWorld, Vocabulary},
    cli::output::{print_kv, print_returns, print_section},
    linear::SavedModel,
    pipeline::{EpisodeRunner, build_rng, epoch_performance, evaluate},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a saved model", allow_negative_numbers = true)]
pub struct EvaluateArgs {
    /// World definition (JSON)
    #[arg(long, short = 'w')]
    pub world: PathBuf,

    /// Saved model (MessagePack)
    #[arg(long, short = 'm')]
    pub model: PathBuf,

    /// Number of evaluation episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Exploration probability (defaults to the model's evaluation epsilon)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Abort any episode that runs longer than this many steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    model: String,
    world: String,
    episodes: usize,
    epsilon: f64,
    seed: Option<u64>,
    mean_return: f64,
    returns: Vec<f64>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    println!("Loading model from: {}", args.model.display());
    let saved = SavedModel::load_from_file(&args.model)
        .with_context(|| format!("Failed to load model from {}", args.model.display()))?;
    let model = saved.to_model()?;

    let mut agent = saved.agent;
    if let Some(epsilon) = args.epsilon {
        agent.test_epsilon = epsilon;
    }
    agent.validate()?;

    print_section("Loaded Model");
    print_kv("Run", &saved.metadata.run.to_string());
    print_kv("Epochs trained", &saved.metadata.epochs.to_string());
    if let Some(sample) = saved.metadata.final_sample {
        print_kv("Final sample", &format!("{sample:.6}"));
    }
    print_kv("Vocabulary", &saved.vocabulary.len().to_string());

    let mut world = TableWorld::load(&args.world)
        .with_context(|| format!("Failed to load world from {}", args.world.display()))?;
    if let Some(seed) = args.seed {
        world = world.with_seed(seed);
    }
    let features = BagOfWords::new(Vocabulary::from_tokens(saved.vocabulary.clone()));

    let mut rng = build_rng(args.seed);
    let mut runner =
        EpisodeRunner::new(&mut world, &features, agent).with_max_steps(args.max_steps);
    runner.check_model(&model)?;

    info!(episodes = args.episodes, epsilon = agent.test_epsilon, "evaluating");
    let returns = evaluate(&mut runner, &model, args.episodes, &mut rng)?;
    let mean_return = epoch_performance(&returns)?;
    print_returns(&returns, mean_return);

    if let Some(path) = &args.export {
        let report = EvaluationReport {
            model: args.model.display().to_string(),
            world: args.world.display().to_string(),
            episodes: args.episodes,
            epsilon: agent.test_epsilon,
            seed: args.seed,
            mean_return,
            returns,
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create export file {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}

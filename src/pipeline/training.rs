//! Multi-run training pipeline

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    analysis::CurveSummary,
    config::ExperimentConfig,
    linear::{ActionSpace, LinearQModel},
    pipeline::{episode::EpisodeRunner, epoch::run_epoch},
    ports::{Environment, FeatureExtractor, Observer},
};

/// Seeded generator when a seed is given, otherwise one seeded from the OS.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Result of one independent run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Run index (0-based)
    pub run: usize,
    /// Seed of the run's random number generator, if seeded
    pub seed: Option<u64>,
    /// One performance sample per epoch
    pub samples: Vec<f64>,
    /// Model at the end of the run
    pub model: LinearQModel,
}

/// Result of a whole experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub config: ExperimentConfig,
    pub runs: Vec<RunResult>,
}

impl ExperimentResult {
    /// Per-run sample curves, `runs x epochs`
    pub fn curves(&self) -> Vec<Vec<f64>> {
        self.runs.iter().map(|run| run.samples.clone()).collect()
    }

    pub fn summary(&self) -> Result<CurveSummary> {
        CurveSummary::from_curves(&self.curves())
    }

    /// Run with the highest final sample
    pub fn best_run(&self) -> Option<&RunResult> {
        self.runs.iter().max_by(|a, b| {
            let a = a.samples.last().copied().unwrap_or(f64::NEG_INFINITY);
            let b = b.samples.last().copied().unwrap_or(f64::NEG_INFINITY);
            a.total_cmp(&b)
        })
    }
}

/// Training pipeline: repeated independent runs of the epoch schedule
pub struct TrainingPipeline {
    config: ExperimentConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: ExperimentConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run every configured run and collect their curves.
    ///
    /// Each run starts from a zero model and its own random stream; the
    /// environment is reseeded at the start of each seeded run.
    pub fn run<E, F>(&mut self, env: &mut E, features: &F) -> Result<ExperimentResult>
    where
        E: Environment,
        F: FeatureExtractor,
    {
        self.config.validate()?;
        let schedule = self.config.schedule;
        let action_space = ActionSpace::new(env.num_actions(), env.num_objects())?;

        info!(
            runs = schedule.runs,
            epochs = schedule.epochs,
            actions = action_space.num_actions(),
            objects = action_space.num_objects(),
            features = features.dimension(),
            "starting experiment"
        );
        for observer in &mut self.observers {
            observer.on_experiment_start(schedule.runs, schedule.epochs)?;
        }

        let mut runs = Vec::with_capacity(schedule.runs);
        for run in 0..schedule.runs {
            runs.push(self.run_single(run, action_space, env, features)?);
        }

        for observer in &mut self.observers {
            observer.on_experiment_end()?;
        }

        let result = ExperimentResult {
            config: self.config,
            runs,
        };
        if let Ok(summary) = result.summary() {
            info!(
                final_mean = summary.final_mean,
                smoothed = summary.smoothed,
                "experiment finished"
            );
        }
        Ok(result)
    }

    fn run_single<E, F>(
        &mut self,
        run: usize,
        action_space: ActionSpace,
        env: &mut E,
        features: &F,
    ) -> Result<RunResult>
    where
        E: Environment,
        F: FeatureExtractor,
    {
        let schedule = self.config.schedule;
        let seed = schedule.run_seed(run);
        let mut rng = build_rng(seed);
        if let Some(seed) = seed {
            env.set_rng_seed(seed)?;
        }

        let mut model = LinearQModel::zeros(action_space, features.dimension());
        let mut runner = EpisodeRunner::new(env, features, self.config.agent)
            .with_max_steps(schedule.max_steps_per_episode);
        runner.check_model(&model)?;

        info!(run, ?seed, "starting run");
        for observer in &mut self.observers {
            observer.on_run_start(run)?;
        }

        let mut samples = Vec::with_capacity(schedule.epochs);
        for epoch in 0..schedule.epochs {
            let report = run_epoch(
                &mut runner,
                &mut model,
                schedule.train_episodes,
                schedule.test_episodes,
                &mut rng,
            )?;
            debug!(run, epoch, sample = report.sample, "epoch finished");
            for observer in &mut self.observers {
                observer.on_epoch_end(run, epoch, report.sample)?;
            }
            samples.push(report.sample);
        }

        for observer in &mut self.observers {
            observer.on_run_end(run, &samples)?;
        }
        info!(run, final_sample = samples.last().copied(), "run finished");

        Ok(RunResult {
            run,
            seed,
            samples,
            model,
        })
    }
}

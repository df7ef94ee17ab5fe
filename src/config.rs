//! Configuration types for agents and training schedules.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, linear::TdParams};

/// Learning and exploration constants of the agent.
///
/// # Examples
///
/// ```
/// use questlearn::config::AgentConfig;
///
/// let agent = AgentConfig::default()
///     .with_learning_rate(0.1)
///     .with_discount(0.9)
///     .with_epsilons(1.0, 0.0);
/// assert!(agent.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Discount factor γ
    pub discount: f64,
    /// Learning rate α
    pub learning_rate: f64,
    /// Exploration probability while training
    pub train_epsilon: f64,
    /// Exploration probability while evaluating
    pub test_epsilon: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            discount: 0.5,
            learning_rate: 10.0,
            train_epsilon: 0.5,
            test_epsilon: 0.05,
        }
    }
}

impl AgentConfig {
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the training and evaluation exploration probabilities.
    pub fn with_epsilons(mut self, train: f64, test: f64) -> Self {
        self.train_epsilon = train;
        self.test_epsilon = test;
        self
    }

    pub fn td_params(&self) -> TdParams {
        TdParams {
            learning_rate: self.learning_rate,
            discount: self.discount,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_unit_interval("discount", self.discount)?;
        check_unit_interval("train_epsilon", self.train_epsilon)?;
        check_unit_interval("test_epsilon", self.test_epsilon)?;
        if !self.learning_rate.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("learning_rate must be finite, got {}", self.learning_rate),
            });
        }
        Ok(())
    }
}

/// How many runs, epochs and episodes an experiment performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Independent runs, each from a fresh zero model
    pub runs: usize,
    /// Epochs per run
    pub epochs: usize,
    /// Training episodes per epoch
    pub train_episodes: usize,
    /// Evaluation episodes per epoch
    pub test_episodes: usize,
    /// Abort an episode after this many steps (no cap when unset)
    pub max_steps_per_episode: Option<usize>,
    /// Base seed; run `i` uses `seed + i`
    pub seed: Option<u64>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            runs: 2,
            epochs: 600,
            train_episodes: 25,
            test_episodes: 50,
            max_steps_per_episode: None,
            seed: None,
        }
    }
}

impl ScheduleConfig {
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set training and evaluation episodes per epoch.
    pub fn with_episodes(mut self, train: usize, test: usize) -> Self {
        self.train_episodes = train;
        self.test_episodes = test;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps_per_episode = Some(max_steps);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed for a given run, if the schedule is seeded
    pub fn run_seed(&self, run: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(run as u64))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("runs", self.runs),
            ("epochs", self.epochs),
            ("test_episodes", self.test_episodes),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be at least 1"),
                });
            }
        }
        if self.max_steps_per_episode == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "max_steps_per_episode must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

/// Full experiment configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub agent: AgentConfig,
    pub schedule: ScheduleConfig,
}

impl ExperimentConfig {
    pub fn new(agent: AgentConfig, schedule: ScheduleConfig) -> Self {
        Self { agent, schedule }
    }

    pub fn validate(&self) -> Result<()> {
        self.agent.validate()?;
        self.schedule.validate()
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {path:?}"),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidConfiguration {
            message: format!("{name} must lie in [0, 1], got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_the_reference_constants() {
        let config = ExperimentConfig::default();
        assert_eq!(config.agent.discount, 0.5);
        assert_eq!(config.agent.learning_rate, 10.0);
        assert_eq!(config.agent.train_epsilon, 0.5);
        assert_eq!(config.agent.test_epsilon, 0.05);
        assert_eq!(config.schedule.runs, 2);
        assert_eq!(config.schedule.epochs, 600);
        assert_eq!(config.schedule.train_episodes, 25);
        assert_eq!(config.schedule.test_episodes, 50);
        assert_eq!(config.schedule.max_steps_per_episode, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_epsilon_out_of_range_rejected() {
        let agent = AgentConfig::default().with_epsilons(1.5, 0.0);
        assert!(matches!(
            agent.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_test_episodes_rejected() {
        let schedule = ScheduleConfig::default().with_episodes(5, 0);
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_run_seed_offsets() {
        let schedule = ScheduleConfig::default().with_seed(100);
        assert_eq!(schedule.run_seed(0), Some(100));
        assert_eq!(schedule.run_seed(3), Some(103));
        assert_eq!(ScheduleConfig::default().run_seed(3), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ExperimentConfig =
            serde_json::from_str(r#"{"agent": {"learning_rate": 0.1}, "schedule": {"epochs": 3}}"#)
                .unwrap();
        assert_eq!(config.agent.learning_rate, 0.1);
        assert_eq!(config.agent.discount, 0.5);
        assert_eq!(config.schedule.epochs, 3);
        assert_eq!(config.schedule.runs, 2);
    }
}

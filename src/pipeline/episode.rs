//! Single-episode interaction with the environment

use rand::Rng;
use tracing::trace;

use crate::{
    Error, Result,
    config::AgentConfig,
    linear::{LinearQModel, Transition, epsilon_greedy, td_update},
    ports::{Environment, FeatureExtractor, Observation},
};

/// Whether an episode learns or measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeMode {
    /// Online TD updates after every step, exploring with `train_epsilon`
    Training,
    /// Frozen model, discounted return collected, exploring with `test_epsilon`
    Evaluation,
}

enum ModelAccess<'m> {
    Train(&'m mut LinearQModel),
    Evaluate(&'m LinearQModel),
}

impl ModelAccess<'_> {
    fn model(&self) -> &LinearQModel {
        match self {
            ModelAccess::Train(model) => &**model,
            ModelAccess::Evaluate(model) => *model,
        }
    }

    fn mode(&self) -> EpisodeMode {
        match self {
            ModelAccess::Train(_) => EpisodeMode::Training,
            ModelAccess::Evaluate(_) => EpisodeMode::Evaluation,
        }
    }
}

/// Runs complete episodes against an environment
///
/// The runner borrows the environment and the feature extractor; the model
/// is passed per episode so a single run can thread its one model through
/// every episode.
pub struct EpisodeRunner<'a, E, F> {
    env: &'a mut E,
    features: &'a F,
    agent: AgentConfig,
    max_steps: Option<usize>,
}

impl<'a, E: Environment, F: FeatureExtractor> EpisodeRunner<'a, E, F> {
    pub fn new(env: &'a mut E, features: &'a F, agent: AgentConfig) -> Self {
        Self {
            env,
            features,
            agent,
            max_steps: None,
        }
    }

    /// Fail episodes that run longer than `max_steps` (unbounded when `None`)
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn agent(&self) -> &AgentConfig {
        &self.agent
    }

    /// Play one training episode, updating `model` after every step.
    ///
    /// Returns the number of steps taken.
    pub fn run_training<R: Rng>(&mut self, model: &mut LinearQModel, rng: &mut R) -> Result<usize> {
        let (steps, _) = self.play(ModelAccess::Train(model), rng)?;
        Ok(steps)
    }

    /// Play one evaluation episode and return its discounted return.
    pub fn run_evaluation<R: Rng>(&mut self, model: &LinearQModel, rng: &mut R) -> Result<f64> {
        let (_, episode_return) = self.play(ModelAccess::Evaluate(model), rng)?;
        Ok(episode_return)
    }

    /// Check that the model fits this environment and feature extractor
    pub fn check_model(&self, model: &LinearQModel) -> Result<()> {
        let space = model.action_space();
        if space.num_actions() != self.env.num_actions()
            || space.num_objects() != self.env.num_objects()
        {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "model action space is {}x{} but the environment declares {}x{}",
                    space.num_actions(),
                    space.num_objects(),
                    self.env.num_actions(),
                    self.env.num_objects()
                ),
            });
        }
        if model.state_dim() != self.features.dimension() {
            return Err(Error::ShapeMismatch {
                expected: model.state_dim(),
                got: self.features.dimension(),
                context: "feature extractor dimension".to_string(),
            });
        }
        Ok(())
    }

    fn vectorize(&self, observation: &Observation) -> Vec<f64> {
        self.features.vectorize(&observation.state_text())
    }

    fn play<R: Rng>(&mut self, mut access: ModelAccess<'_>, rng: &mut R) -> Result<(usize, f64)> {
        self.check_model(access.model())?;
        let mode = access.mode();
        let epsilon = match mode {
            EpisodeMode::Training => self.agent.train_epsilon,
            EpisodeMode::Evaluation => self.agent.test_epsilon,
        };
        let params = self.agent.td_params();

        let mut current = self.env.new_game()?;
        let mut steps = 0;
        let mut episode_return = 0.0;
        let mut discount_product = 1.0;

        while !current.terminal {
            if let Some(limit) = self.max_steps {
                if steps >= limit {
                    return Err(Error::StepLimitExceeded { limit });
                }
            }

            let state = self.vectorize(&current);
            let action_index = epsilon_greedy(access.model(), &state, epsilon, rng)?;
            let (action, object) = access.model().action_space().decode(action_index)?;
            let outcome = self.env.step(&current, action, object)?;

            match &mut access {
                ModelAccess::Train(model) => {
                    let next_state = self.vectorize(&outcome.observation);
                    let transition = Transition {
                        state: &state,
                        action: action_index,
                        reward: outcome.reward,
                        next_state: &next_state,
                        terminal: outcome.observation.terminal,
                    };
                    td_update(&mut **model, &transition, params)?;
                }
                ModelAccess::Evaluate(_) => {
                    episode_return += discount_product * outcome.reward;
                    discount_product *= params.discount;
                }
            }

            current = outcome.observation;
            steps += 1;
        }

        trace!(?mode, steps, episode_return, "episode finished");
        Ok((steps, episode_return))
    }
}

//! One epoch: a block of training episodes then a block of evaluation episodes

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    linear::LinearQModel,
    pipeline::episode::EpisodeRunner,
    ports::{Environment, FeatureExtractor},
};

/// Outcome of one epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochReport {
    /// Steps taken by each training episode
    pub train_steps: Vec<usize>,
    /// Discounted return of each evaluation episode
    pub returns: Vec<f64>,
    /// Mean evaluation return, the epoch's performance sample
    pub sample: f64,
}

/// Arithmetic mean of evaluation returns
pub fn epoch_performance(returns: &[f64]) -> Result<f64> {
    if returns.is_empty() {
        return Err(Error::EmptyEvaluation);
    }
    Ok(returns.iter().sum::<f64>() / returns.len() as f64)
}

/// Run `episodes` evaluation episodes against a frozen model.
pub fn evaluate<E, F, R>(
    runner: &mut EpisodeRunner<'_, E, F>,
    model: &LinearQModel,
    episodes: usize,
    rng: &mut R,
) -> Result<Vec<f64>>
where
    E: Environment,
    F: FeatureExtractor,
    R: Rng,
{
    let mut returns = Vec::with_capacity(episodes);
    for _ in 0..episodes {
        returns.push(runner.run_evaluation(model, rng)?);
    }
    Ok(returns)
}

/// Train for `train_episodes`, then evaluate for `test_episodes`.
pub fn run_epoch<E, F, R>(
    runner: &mut EpisodeRunner<'_, E, F>,
    model: &mut LinearQModel,
    train_episodes: usize,
    test_episodes: usize,
    rng: &mut R,
) -> Result<EpochReport>
where
    E: Environment,
    F: FeatureExtractor,
    R: Rng,
{
    let mut train_steps = Vec::with_capacity(train_episodes);
    for _ in 0..train_episodes {
        train_steps.push(runner.run_training(model, rng)?);
    }

    let returns = evaluate(runner, model, test_episodes, rng)?;
    let sample = epoch_performance(&returns)?;

    Ok(EpochReport {
        train_steps,
        returns,
        sample,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_performance_is_mean() {
        assert_eq!(epoch_performance(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
        assert_eq!(epoch_performance(&[-0.5]).unwrap(), -0.5);
    }

    #[test]
    fn test_empty_evaluation_rejected() {
        assert!(matches!(
            epoch_performance(&[]),
            Err(Error::EmptyEvaluation)
        ));
    }
}

//! Linear state-action value model

use serde::{Deserialize, Serialize};

use crate::{Error, Result, linear::codec::ActionSpace};

/// Linear Q-function approximator
///
/// Holds a `[A*O, D]` weight matrix in row-major order. The Q-value of flat
/// action `i` in state `s` is the dot product of row `i` with `s`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LinearQModelData")]
pub struct LinearQModel {
    action_space: ActionSpace,
    state_dim: usize,
    /// Row-major weights, `action_space.len() * state_dim` entries
    weights: Vec<f64>,
}

/// Unchecked serialized form, validated through [`LinearQModel::from_weights`]
#[derive(Deserialize)]
struct LinearQModelData {
    action_space: ActionSpace,
    state_dim: usize,
    weights: Vec<f64>,
}

impl TryFrom<LinearQModelData> for LinearQModel {
    type Error = Error;

    fn try_from(data: LinearQModelData) -> Result<Self> {
        Self::from_weights(data.action_space, data.state_dim, data.weights)
    }
}

impl LinearQModel {
    /// Create a zero-initialized model
    pub fn zeros(action_space: ActionSpace, state_dim: usize) -> Self {
        Self {
            action_space,
            state_dim,
            weights: vec![0.0; action_space.len() * state_dim],
        }
    }

    /// Build a model from explicit row-major weights
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the weight count does not
    /// match `action_space.len() * state_dim`.
    pub fn from_weights(
        action_space: ActionSpace,
        state_dim: usize,
        weights: Vec<f64>,
    ) -> Result<Self> {
        let expected = action_space.len() * state_dim;
        if weights.len() != expected {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "expected {expected} weights for a {}x{state_dim} model, got {}",
                    action_space.len(),
                    weights.len()
                ),
            });
        }
        Ok(Self {
            action_space,
            state_dim,
            weights,
        })
    }

    pub fn action_space(&self) -> ActionSpace {
        self.action_space
    }

    /// Number of state features (`D`)
    pub fn state_dim(&self) -> usize {
        self.state_dim
    }

    /// Number of rows (`A * O`)
    pub fn action_dim(&self) -> usize {
        self.action_space.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight row of a flat action index
    pub fn row(&self, index: usize) -> Result<&[f64]> {
        self.action_space.check_index(index)?;
        let start = index * self.state_dim;
        Ok(&self.weights[start..start + self.state_dim])
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> Result<&mut [f64]> {
        self.action_space.check_index(index)?;
        let start = index * self.state_dim;
        Ok(&mut self.weights[start..start + self.state_dim])
    }

    /// Verify that a state vector has the model's column count
    pub fn check_state(&self, state: &[f64], context: &str) -> Result<()> {
        if state.len() != self.state_dim {
            return Err(Error::ShapeMismatch {
                expected: self.state_dim,
                got: state.len(),
                context: context.to_string(),
            });
        }
        Ok(())
    }

    /// Q-values of every flat action for `state` (`W · s`)
    pub fn q_values(&self, state: &[f64]) -> Result<Vec<f64>> {
        self.check_state(state, "q_values")?;
        let dim = self.state_dim;
        Ok((0..self.action_dim())
            .map(|index| dot(&self.weights[index * dim..(index + 1) * dim], state))
            .collect())
    }

    /// Q-value of a single flat action for `state`
    pub fn q_value(&self, state: &[f64], index: usize) -> Result<f64> {
        self.check_state(state, "q_value")?;
        Ok(dot(self.row(index)?, state))
    }

    /// Flat index of the largest Q-value, first index on ties; the first NaN wins outright
    pub fn greedy_action(&self, state: &[f64]) -> Result<usize> {
        let q_values = self.q_values(state)?;
        Ok(argmax(&q_values))
    }
}

fn dot(row: &[f64], state: &[f64]) -> f64 {
    row.iter().zip(state).map(|(w, s)| w * s).sum()
}

/// Index of the first maximum. A NaN counts as the maximum, so the first NaN wins.
pub(crate) fn argmax(values: &[f64]) -> usize {
    if let Some(index) = values.iter().position(|value| value.is_nan()) {
        return index;
    }
    let mut best = 0;
    for (index, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = index;
        }
    }
    best
}

/// Maximum that propagates NaN instead of skipping it.
pub(crate) fn max_propagating_nan(values: &[f64]) -> f64 {
    values.iter().fold(f64::NEG_INFINITY, |acc, &value| {
        if value.is_nan() || acc.is_nan() {
            f64::NAN
        } else {
            acc.max(value)
        }
    })
}

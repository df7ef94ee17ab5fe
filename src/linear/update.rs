//! Semi-gradient TD(0) update for the linear model
//!
//! The target `r + γ max_a' Q(s', a')` is treated as a constant. Since
//! `Q(s, a) = W[a] · s`, the gradient with respect to row `a` is `s` and the
//! update reduces to
//!
//! ```text
//! W[a] ← W[a] + α (target − Q(s, a)) s
//! ```
//!
//! Only the row of the action taken moves. Nothing is clipped, so NaN and
//! infinities produced by an oversized learning rate surface in the weights.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    linear::model::{LinearQModel, max_propagating_nan},
};

/// One observed environment step
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    pub state: &'a [f64],
    pub action: usize,
    pub reward: f64,
    pub next_state: &'a [f64],
    pub terminal: bool,
}

/// Step size and discount used by the update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdParams {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount: f64,
}

/// Quantities computed by a single update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdUpdate {
    pub target: f64,
    pub current: f64,
    pub td_error: f64,
}

/// Bootstrapped target `r + γ max Q(s', ·)`, with no bootstrap on terminal steps
pub fn td_target(model: &LinearQModel, transition: &Transition<'_>, discount: f64) -> Result<f64> {
    if transition.terminal {
        return Ok(transition.reward);
    }
    let next_q = model.q_values(transition.next_state)?;
    Ok(transition.reward + discount * max_propagating_nan(&next_q))
}

/// Apply one Q-learning update to `model` in place.
///
/// Both state vectors are shape-checked before the weight row is touched.
pub fn td_update(
    model: &mut LinearQModel,
    transition: &Transition<'_>,
    params: TdParams,
) -> Result<TdUpdate> {
    model.check_state(transition.state, "current state")?;
    model.check_state(transition.next_state, "next state")?;

    let target = td_target(model, transition, params.discount)?;
    let current = model.q_value(transition.state, transition.action)?;
    let td_error = target - current;
    let step = params.learning_rate * td_error;

    let row = model.row_mut(transition.action)?;
    for (weight, feature) in row.iter_mut().zip(transition.state) {
        *weight += step * feature;
    }

    Ok(TdUpdate {
        target,
        current,
        td_error,
    })
}

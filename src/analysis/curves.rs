//! Aggregation of per-run performance curves

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::{Error, Result};

/// Smoothing factor of the running EWMA shown during training
pub const DEFAULT_EWMA_FACTOR: f64 = 0.9;

/// Exponentially weighted average of `values`.
///
/// The most recent value has weight 1, the one before it `factor`, then
/// `factor^2`, and so on; the result is the weighted mean. Returns `None`
/// for an empty slice.
pub fn ewma(values: &[f64], factor: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len();
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for (i, value) in values.iter().enumerate() {
        let weight = factor.powi((n - 1 - i) as i32);
        weighted += weight * value;
        total_weight += weight;
    }
    Some(weighted / total_weight)
}

fn check_rectangular(curves: &[Vec<f64>]) -> Result<usize> {
    let Some(first) = curves.first() else {
        return Err(Error::InvalidConfiguration {
            message: "no curves to aggregate".to_string(),
        });
    };
    let len = first.len();
    if let Some(bad) = curves.iter().position(|curve| curve.len() != len) {
        return Err(Error::InvalidConfiguration {
            message: format!(
                "curve {bad} has {} epochs, expected {len}",
                curves[bad].len()
            ),
        });
    }
    Ok(len)
}

fn column(curves: &[Vec<f64>], epoch: usize) -> impl Iterator<Item = f64> + '_ {
    curves.iter().map(move |curve| curve[epoch])
}

/// Per-epoch mean across runs
pub fn mean_curve(curves: &[Vec<f64>]) -> Result<Vec<f64>> {
    let len = check_rectangular(curves)?;
    Ok((0..len).map(|epoch| column(curves, epoch).mean()).collect())
}

/// Per-epoch sample standard deviation across runs (zero with a single run)
pub fn std_dev_curve(curves: &[Vec<f64>]) -> Result<Vec<f64>> {
    let len = check_rectangular(curves)?;
    if curves.len() < 2 {
        return Ok(vec![0.0; len]);
    }
    Ok((0..len)
        .map(|epoch| column(curves, epoch).std_dev())
        .collect())
}

/// Aggregate view of an experiment's curves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSummary {
    pub runs: usize,
    pub epochs: usize,
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
    /// Mean of the final epoch across runs
    pub final_mean: f64,
    /// EWMA of the mean curve
    pub smoothed: f64,
}

impl CurveSummary {
    pub fn from_curves(curves: &[Vec<f64>]) -> Result<Self> {
        let mean = mean_curve(curves)?;
        let std_dev = std_dev_curve(curves)?;
        let final_mean = mean.last().copied().unwrap_or(f64::NAN);
        let smoothed = ewma(&mean, DEFAULT_EWMA_FACTOR).unwrap_or(f64::NAN);
        Ok(Self {
            runs: curves.len(),
            epochs: mean.len(),
            mean,
            std_dev,
            final_mean,
            smoothed,
        })
    }
}

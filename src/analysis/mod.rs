//! Analysis of training results
//!
//! Aggregation of performance curves across independent runs.

pub mod curves;

pub use curves::{CurveSummary, DEFAULT_EWMA_FACTOR, ewma, mean_curve, std_dev_curve};

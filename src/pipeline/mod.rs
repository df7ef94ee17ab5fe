//! Training and evaluation pipeline
//!
//! This module drives the learning core:
//! - Episodes in training mode (online TD updates) or evaluation mode
//!   (discounted return of a frozen model)
//! - Epochs of training episodes followed by evaluation episodes
//! - Independent runs, each from a fresh zero model
//! - Observers recording progress along the way

pub mod episode;
pub mod epoch;
pub mod observers;
pub mod training;

pub use episode::{EpisodeMode, EpisodeRunner};
pub use epoch::{EpochReport, epoch_performance, evaluate, run_epoch};
pub use observers::{EpochRecord, JsonlObserver, MetricsObserver, ProgressObserver, RunMetrics};
pub use training::{ExperimentResult, RunResult, TrainingPipeline, build_rng};

pub use crate::ports::Observer;

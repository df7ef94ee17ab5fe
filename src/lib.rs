//! Linear Q-learning agent for text-based games
//!
//! This crate provides:
//! - A linear state-action value model over a factored (action, object) command space
//! - Epsilon-greedy selection and semi-gradient TD(0) updates
//! - An episode/epoch/run training pipeline with observers
//! - Aggregation and export of per-epoch performance curves
//! - Reference adapters: a bag-of-words feature extractor and a table-driven world
//!
//! The learning core only talks to the outside world through the traits in
//! [`ports`]; any game that reports its command grammar and produces
//! observations can be plugged in.

pub mod adapters;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod linear;
pub mod pipeline;
pub mod ports;

pub use config::{AgentConfig, ExperimentConfig, ScheduleConfig};
pub use error::{Error, Result};
pub use linear::{ActionSpace, LinearQModel, SavedModel};

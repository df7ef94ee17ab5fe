//! Ports (trait boundaries) for external collaborators.
//!
//! The learning core depends only on these traits. Games, feature extractors
//! and observers are adapters implemented elsewhere (or by tests).

pub mod environment;
pub mod features;
pub mod observer;

pub use environment::{Environment, Observation, StepResult};
pub use features::FeatureExtractor;
pub use observer::Observer;

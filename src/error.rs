//! Error types for the questlearn crate

use thiserror::Error;

/// Main error type for the questlearn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("action category {category} is out of range (must be below {num_actions})")]
    InvalidActionCategory { category: usize, num_actions: usize },

    #[error("object {object} is out of range (must be below {num_objects})")]
    InvalidObject { object: usize, num_objects: usize },

    #[error("flat action index {index} is out of range (must be below {action_dim})")]
    InvalidActionIndex { index: usize, action_dim: usize },

    #[error("state vector has {got} features but the model expects {expected} ({context})")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("action space must have at least one action and one object (got {num_actions}x{num_objects})")]
    EmptyActionSpace {
        num_actions: usize,
        num_objects: usize,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("episode exceeded the step limit of {limit} without reaching a terminal state")]
    StepLimitExceeded { limit: usize },

    #[error("cannot aggregate an epoch with no evaluation episodes")]
    EmptyEvaluation,

    #[error("invalid world definition: {message}")]
    InvalidWorld { message: String },

    #[error("unknown {kind} '{name}' in world definition")]
    UnknownWorldEntry { kind: String, name: String },

    #[error("step called before new_game")]
    GameNotStarted,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported saved model version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

//! Environment port - the text game the agent plays
//!
//! The learning core never looks inside the game. It starts episodes,
//! submits `(action, object)` commands and reads back text descriptions,
//! rewards and the terminal flag.

use crate::Result;

/// Textual state of the game as seen by the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Description of the current room
    pub room: String,
    /// Description of the current quest
    pub quest: String,
    /// Whether the episode has ended
    pub terminal: bool,
}

impl Observation {
    pub fn new(room: impl Into<String>, quest: impl Into<String>, terminal: bool) -> Self {
        Self {
            room: room.into(),
            quest: quest.into(),
            terminal,
        }
    }

    /// Text handed to the feature extractor: room then quest, concatenated as-is.
    pub fn state_text(&self) -> String {
        format!("{}{}", self.room, self.quest)
    }
}

/// Result of submitting one command
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
}

/// Environment trait - a text adventure with a fixed command grammar
///
/// # Contract
///
/// * `num_actions()` and `num_objects()` are constant for the lifetime of the
///   environment and define the command space `[0, A) x [0, O)`.
/// * `step` is only called with indices inside that space and only while the
///   current observation is not terminal.
///
/// # Examples
///
/// ```
/// use questlearn::ports::{Environment, Observation, StepResult};
///
/// /// One-step game: any command ends it with reward 1.
/// struct OneShot;
///
/// impl Environment for OneShot {
///     fn num_actions(&self) -> usize { 1 }
///     fn num_objects(&self) -> usize { 1 }
///
///     fn new_game(&mut self) -> questlearn::Result<Observation> {
///         Ok(Observation::new("A hall. ", "Leave.", false))
///     }
///
///     fn step(
///         &mut self,
///         _current: &Observation,
///         _action: usize,
///         _object: usize,
///     ) -> questlearn::Result<StepResult> {
///         Ok(StepResult {
///             observation: Observation::new("Outside. ", "Done.", true),
///             reward: 1.0,
///         })
///     }
/// }
/// ```
pub trait Environment {
    /// Number of action categories (`A`)
    fn num_actions(&self) -> usize;

    /// Number of objects (`O`)
    fn num_objects(&self) -> usize;

    /// Start a new episode.
    fn new_game(&mut self) -> Result<Observation>;

    /// Apply the command `(action, object)` to the current state.
    fn step(&mut self, current: &Observation, action: usize, object: usize)
    -> Result<StepResult>;

    /// Seed the environment's internal random number generator.
    ///
    /// Called at the start of every run when the experiment is seeded.
    /// Deterministic environments can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}

impl<E: Environment + ?Sized> Environment for &mut E {
    fn num_actions(&self) -> usize {
        (**self).num_actions()
    }

    fn num_objects(&self) -> usize {
        (**self).num_objects()
    }

    fn new_game(&mut self) -> Result<Observation> {
        (**self).new_game()
    }

    fn step(
        &mut self,
        current: &Observation,
        action: usize,
        object: usize,
    ) -> Result<StepResult> {
        (**self).step(current, action, object)
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        (**self).set_rng_seed(seed)
    }
}

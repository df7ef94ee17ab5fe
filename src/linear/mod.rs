//! Linear Q-learning over a flat (action, object) command space
//!
//! The agent keeps one weight row per command. A state is a feature vector
//! `s`, and the value of command `i` is `W[i] · s`.
//!
//! ## Components
//!
//! - [`ActionSpace`]: bijection between `(action, object)` and a flat index
//! - [`LinearQModel`]: the `[A*O, D]` weight matrix and its Q-values
//! - [`epsilon_greedy`]: exploration/exploitation choice over the model
//! - [`td_update`]: one-step semi-gradient Q-learning update
//!
//! ## Usage Example
//!
//! ```
//! use questlearn::linear::{ActionSpace, LinearQModel, TdParams, Transition, td_update};
//!
//! let space = ActionSpace::new(2, 3)?;
//! let mut model = LinearQModel::zeros(space, 4);
//!
//! let state = [1.0, 0.0, 0.0, 1.0];
//! let next_state = [0.0, 1.0, 0.0, 0.0];
//! let transition = Transition {
//!     state: &state,
//!     action: space.encode(1, 2)?,
//!     reward: 1.0,
//!     next_state: &next_state,
//!     terminal: true,
//! };
//! td_update(&mut model, &transition, TdParams { learning_rate: 0.1, discount: 0.5 })?;
//! assert_eq!(model.q_value(&state, 5)?, 0.2);
//! # Ok::<(), questlearn::Error>(())
//! ```

pub mod codec;
pub mod model;
pub mod selector;
pub mod serialization;
pub mod update;

pub use codec::ActionSpace;
pub use model::LinearQModel;
pub use selector::epsilon_greedy;
pub use serialization::{SavedModel, TrainingMetadata};
pub use update::{TdParams, TdUpdate, Transition, td_target, td_update};

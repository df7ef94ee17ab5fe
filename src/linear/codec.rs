//! Flat encoding of (action category, object) commands

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Product space of action categories and objects.
///
/// A command `(action, object)` is stored as the flat index
/// `action * num_objects + object`, so every row of the value model
/// corresponds to exactly one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActionSpaceData")]
pub struct ActionSpace {
    num_actions: usize,
    num_objects: usize,
}

/// Unchecked serialized form, validated through [`ActionSpace::new`]
#[derive(Deserialize)]
struct ActionSpaceData {
    num_actions: usize,
    num_objects: usize,
}

impl TryFrom<ActionSpaceData> for ActionSpace {
    type Error = Error;

    fn try_from(data: ActionSpaceData) -> Result<Self> {
        Self::new(data.num_actions, data.num_objects)
    }
}

impl ActionSpace {
    /// Create an action space with `num_actions` categories and `num_objects` objects
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyActionSpace`] if either dimension is zero.
    pub fn new(num_actions: usize, num_objects: usize) -> Result<Self> {
        if num_actions == 0 || num_objects == 0 {
            return Err(Error::EmptyActionSpace {
                num_actions,
                num_objects,
            });
        }
        Ok(Self {
            num_actions,
            num_objects,
        })
    }

    /// Number of action categories (`A`)
    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Number of objects (`O`)
    pub fn num_objects(&self) -> usize {
        self.num_objects
    }

    /// Size of the flat action space (`A * O`)
    pub fn len(&self) -> usize {
        self.num_actions * self.num_objects
    }

    /// Always false: construction rejects empty spaces.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Map a command to its flat index.
    pub fn encode(&self, action: usize, object: usize) -> Result<usize> {
        if action >= self.num_actions {
            return Err(Error::InvalidActionCategory {
                category: action,
                num_actions: self.num_actions,
            });
        }
        if object >= self.num_objects {
            return Err(Error::InvalidObject {
                object,
                num_objects: self.num_objects,
            });
        }
        Ok(action * self.num_objects + object)
    }

    /// Map a flat index back to its `(action, object)` command.
    pub fn decode(&self, index: usize) -> Result<(usize, usize)> {
        self.check_index(index)?;
        Ok((index / self.num_objects, index % self.num_objects))
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(Error::InvalidActionIndex {
                index,
                action_dim: self.len(),
            });
        }
        Ok(())
    }
}

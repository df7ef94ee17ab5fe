//! Table-driven text world
//!
//! A small deterministic game described in JSON: named states with room and
//! quest text, a command grammar of actions and objects, and a transition
//! table. Commands missing from the table leave the state unchanged and pay
//! the default reward. Episodes end on a terminal state or when the horizon
//! is reached.
//!
//! ```json
//! {
//!   "actions": ["go", "eat"],
//!   "objects": ["north", "apple"],
//!   "states": [
//!     { "name": "kitchen", "room": "This is the kitchen. ", "quest": "You are hungry." },
//!     { "name": "done", "room": "This is the kitchen. ", "quest": "You are full.", "terminal": true }
//!   ],
//!   "start_states": ["kitchen"],
//!   "transitions": [
//!     { "from": "kitchen", "action": "eat", "object": "apple", "to": "done", "reward": 1.0 }
//!   ]
//! }
//! ```

use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Environment, Observation, StepResult},
};

fn default_unmatched_reward() -> f64 {
    -0.1
}

fn default_horizon() -> Option<usize> {
    Some(20)
}

/// A named state of the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDefinition {
    pub name: String,
    pub room: String,
    pub quest: String,
    #[serde(default)]
    pub terminal: bool,
}

/// One entry of the transition table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionDefinition {
    pub from: String,
    pub action: String,
    pub object: String,
    pub to: String,
    pub reward: f64,
}

/// Serialized form of a [`TableWorld`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldDefinition {
    pub actions: Vec<String>,
    pub objects: Vec<String>,
    pub states: Vec<StateDefinition>,
    /// States a new game may start in, chosen uniformly
    pub start_states: Vec<String>,
    pub transitions: Vec<TransitionDefinition>,
    /// Reward for a command with no table entry
    #[serde(default = "default_unmatched_reward")]
    pub unmatched_reward: f64,
    /// Steps after which an episode is over regardless of state
    #[serde(default = "default_horizon")]
    pub horizon: Option<usize>,
}

/// Deterministic, table-driven [`Environment`]
#[derive(Debug, Clone)]
pub struct TableWorld {
    actions: Vec<String>,
    objects: Vec<String>,
    states: Vec<StateDefinition>,
    starts: Vec<usize>,
    transitions: HashMap<(usize, usize, usize), (usize, f64)>,
    unmatched_reward: f64,
    horizon: Option<usize>,
    rng: StdRng,
    current: Option<usize>,
    steps: usize,
}

fn lookup(names: &[String], name: &str, kind: &str) -> Result<usize> {
    names
        .iter()
        .position(|candidate| candidate == name)
        .ok_or_else(|| Error::UnknownWorldEntry {
            kind: kind.to_string(),
            name: name.to_string(),
        })
}

impl TableWorld {
    /// Resolve and validate a world definition
    pub fn from_definition(definition: WorldDefinition) -> Result<Self> {
        if definition.actions.is_empty() || definition.objects.is_empty() {
            return Err(Error::InvalidWorld {
                message: "at least one action and one object are required".to_string(),
            });
        }
        if definition.start_states.is_empty() {
            return Err(Error::InvalidWorld {
                message: "at least one start state is required".to_string(),
            });
        }
        if definition.horizon == Some(0) {
            return Err(Error::InvalidWorld {
                message: "horizon must be at least 1 when set".to_string(),
            });
        }

        let state_names: Vec<String> = definition.states.iter().map(|s| s.name.clone()).collect();
        if let Some(dup) = state_names
            .iter()
            .enumerate()
            .find(|(i, name)| state_names[..*i].contains(name))
        {
            return Err(Error::InvalidWorld {
                message: format!("duplicate state '{}'", dup.1),
            });
        }

        let starts = definition
            .start_states
            .iter()
            .map(|name| lookup(&state_names, name, "state"))
            .collect::<Result<Vec<_>>>()?;

        let mut transitions = HashMap::new();
        for entry in &definition.transitions {
            let key = (
                lookup(&state_names, &entry.from, "state")?,
                lookup(&definition.actions, &entry.action, "action")?,
                lookup(&definition.objects, &entry.object, "object")?,
            );
            let to = lookup(&state_names, &entry.to, "state")?;
            if transitions.insert(key, (to, entry.reward)).is_some() {
                return Err(Error::InvalidWorld {
                    message: format!(
                        "duplicate transition for '{}' + '{} {}'",
                        entry.from, entry.action, entry.object
                    ),
                });
            }
        }

        Ok(Self {
            actions: definition.actions,
            objects: definition.objects,
            states: definition.states,
            starts,
            transitions,
            unmatched_reward: definition.unmatched_reward,
            horizon: definition.horizon,
            rng: StdRng::from_rng(&mut rand::rng()),
            current: None,
            steps: 0,
        })
    }

    /// Load a world definition from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open world {path:?}"),
            source,
        })?;
        let definition: WorldDefinition = serde_json::from_reader(BufReader::new(file))?;
        Self::from_definition(definition)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn objects(&self) -> &[String] {
        &self.objects
    }

    /// Concatenated room and quest text of every state, for building a vocabulary
    pub fn state_texts(&self) -> impl Iterator<Item = String> + '_ {
        self.states
            .iter()
            .map(|state| self.observation(state, false).state_text())
    }

    fn observation(&self, state: &StateDefinition, horizon_reached: bool) -> Observation {
        Observation::new(
            state.room.clone(),
            state.quest.clone(),
            state.terminal || horizon_reached,
        )
    }
}

impl Environment for TableWorld {
    fn num_actions(&self) -> usize {
        self.actions.len()
    }

    fn num_objects(&self) -> usize {
        self.objects.len()
    }

    fn new_game(&mut self) -> Result<Observation> {
        let pick = self.rng.random_range(0..self.starts.len());
        let start = self.starts[pick];
        self.current = Some(start);
        self.steps = 0;
        Ok(self.observation(&self.states[start], false))
    }

    fn step(
        &mut self,
        _current: &Observation,
        action: usize,
        object: usize,
    ) -> Result<StepResult> {
        let state = self.current.ok_or(Error::GameNotStarted)?;
        if action >= self.actions.len() {
            return Err(Error::InvalidActionCategory {
                category: action,
                num_actions: self.actions.len(),
            });
        }
        if object >= self.objects.len() {
            return Err(Error::InvalidObject {
                object,
                num_objects: self.objects.len(),
            });
        }

        let (next, reward) = self
            .transitions
            .get(&(state, action, object))
            .copied()
            .unwrap_or((state, self.unmatched_reward));
        self.current = Some(next);
        self.steps += 1;

        let horizon_reached = self.horizon.is_some_and(|h| self.steps >= h);
        Ok(StepResult {
            observation: self.observation(&self.states[next], horizon_reached),
            reward,
        })
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> WorldDefinition {
        serde_json::from_str(
            r#"{
                "actions": ["go", "eat"],
                "objects": ["north", "apple"],
                "states": [
                    { "name": "hall", "room": "A hall. ", "quest": "Find food." },
                    { "name": "kitchen", "room": "A kitchen. ", "quest": "Find food." },
                    { "name": "fed", "room": "A kitchen. ", "quest": "Done.", "terminal": true }
                ],
                "start_states": ["hall"],
                "transitions": [
                    { "from": "hall", "action": "go", "object": "north", "to": "kitchen", "reward": 0.0 },
                    { "from": "kitchen", "action": "eat", "object": "apple", "to": "fed", "reward": 1.0 }
                ],
                "horizon": 5
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_scripted_walkthrough() {
        let mut world = TableWorld::from_definition(definition()).unwrap().with_seed(1);
        let start = world.new_game().unwrap();
        assert_eq!(start.room, "A hall. ");
        assert!(!start.terminal);

        let step = world.step(&start, 0, 0).unwrap();
        assert_eq!(step.observation.room, "A kitchen. ");
        assert_eq!(step.reward, 0.0);

        let step = world.step(&step.observation, 1, 1).unwrap();
        assert!(step.observation.terminal);
        assert_eq!(step.reward, 1.0);
    }

    #[test]
    fn test_unmatched_command_stays_and_pays_default() {
        let mut world = TableWorld::from_definition(definition()).unwrap();
        let start = world.new_game().unwrap();
        let step = world.step(&start, 1, 0).unwrap();
        assert_eq!(step.observation, start);
        assert_eq!(step.reward, -0.1);
    }

    #[test]
    fn test_horizon_ends_episode() {
        let mut world = TableWorld::from_definition(definition()).unwrap();
        let mut obs = world.new_game().unwrap();
        for _ in 0..5 {
            assert!(!obs.terminal);
            obs = world.step(&obs, 1, 0).unwrap().observation;
        }
        assert!(obs.terminal);
    }

    #[test]
    fn test_unknown_names_rejected() {
        let mut def = definition();
        def.transitions[0].object = "south".to_string();
        assert!(matches!(
            TableWorld::from_definition(def),
            Err(Error::UnknownWorldEntry { .. })
        ));
    }

    #[test]
    fn test_step_before_new_game_fails() {
        let mut world = TableWorld::from_definition(definition()).unwrap();
        let obs = Observation::new("", "", false);
        assert!(matches!(
            world.step(&obs, 0, 0),
            Err(Error::GameNotStarted)
        ));
    }

    #[test]
    fn test_state_texts_concatenate_room_and_quest() {
        let world = TableWorld::from_definition(definition()).unwrap();
        let texts: Vec<String> = world.state_texts().collect();
        assert_eq!(texts[0], "A hall. Find food.");
        assert_eq!(texts.len(), 3);
    }
}

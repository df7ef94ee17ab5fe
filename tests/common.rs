//! Common test doubles for the questlearn test suite.
//!
//! Small deterministic environments and a one-hot feature extractor keyed on
//! the room text, so expected weights and returns can be computed by hand.

#![allow(dead_code)]

use questlearn::{
    Result,
    ports::{Environment, FeatureExtractor, Observation, StepResult},
};

/// One-hot vector over a fixed list of room names; unknown text maps to zeros.
pub struct OneHotRooms {
    pub rooms: Vec<&'static str>,
}

impl OneHotRooms {
    pub fn new(rooms: &[&'static str]) -> Self {
        Self {
            rooms: rooms.to_vec(),
        }
    }
}

impl FeatureExtractor for OneHotRooms {
    fn dimension(&self) -> usize {
        self.rooms.len()
    }

    fn vectorize(&self, text: &str) -> Vec<f64> {
        self.rooms
            .iter()
            .map(|room| if *room == text { 1.0 } else { 0.0 })
            .collect()
    }
}

/// `start -> middle -> end` with two actions and two objects.
///
/// Every command advances one room. The reward depends on the room and the
/// flat command index `action * 2 + object`.
pub struct TwoStepWorld {
    position: usize,
    /// Commands issued since construction
    pub commands: Vec<(usize, usize)>,
}

pub const ROOMS: [&str; 3] = ["start", "middle", "end"];

impl TwoStepWorld {
    pub fn new() -> Self {
        Self {
            position: 0,
            commands: Vec::new(),
        }
    }

    pub fn reward(position: usize, flat: usize) -> f64 {
        match position {
            0 => (flat + 1) as f64,
            _ => 10.0 * (flat + 1) as f64,
        }
    }
}

impl Environment for TwoStepWorld {
    fn num_actions(&self) -> usize {
        2
    }

    fn num_objects(&self) -> usize {
        2
    }

    fn new_game(&mut self) -> Result<Observation> {
        self.position = 0;
        Ok(Observation::new(ROOMS[0], "", false))
    }

    fn step(&mut self, _current: &Observation, action: usize, object: usize) -> Result<StepResult> {
        self.commands.push((action, object));
        let reward = Self::reward(self.position, action * 2 + object);
        self.position += 1;
        Ok(StepResult {
            observation: Observation::new(ROOMS[self.position], "", self.position == 2),
            reward,
        })
    }
}

/// One-step episodes whose rewards cycle through a script.
pub struct ScriptedRewards {
    pub rewards: Vec<f64>,
    episode: usize,
}

impl ScriptedRewards {
    pub fn new(rewards: Vec<f64>) -> Self {
        Self {
            rewards,
            episode: 0,
        }
    }
}

impl Environment for ScriptedRewards {
    fn num_actions(&self) -> usize {
        1
    }

    fn num_objects(&self) -> usize {
        1
    }

    fn new_game(&mut self) -> Result<Observation> {
        Ok(Observation::new("start", "", false))
    }

    fn step(&mut self, _current: &Observation, _action: usize, _object: usize) -> Result<StepResult> {
        let reward = self.rewards[self.episode % self.rewards.len()];
        self.episode += 1;
        Ok(StepResult {
            observation: Observation::new("end", "", true),
            reward,
        })
    }
}

/// A room the agent can never leave.
pub struct Treadmill;

impl Environment for Treadmill {
    fn num_actions(&self) -> usize {
        1
    }

    fn num_objects(&self) -> usize {
        1
    }

    fn new_game(&mut self) -> Result<Observation> {
        Ok(Observation::new("start", "", false))
    }

    fn step(&mut self, current: &Observation, _action: usize, _object: usize) -> Result<StepResult> {
        Ok(StepResult {
            observation: current.clone(),
            reward: 0.0,
        })
    }
}

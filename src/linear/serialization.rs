//! Serialization support for trained linear models.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, config::AgentConfig, linear::model::LinearQModel};

/// Provenance recorded next to a saved model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Run index the weights come from
    pub run: usize,
    /// Epochs trained
    pub epochs: usize,
    /// Seed of the run, if it was seeded
    pub seed: Option<u64>,
    /// Last epoch performance sample of the run
    pub final_sample: Option<f64>,
}

/// Versioned on-disk form of a trained model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    pub version: u32,
    model: LinearQModel,
    /// Feature vocabulary the model's columns were trained against
    pub vocabulary: Vec<String>,
    pub agent: AgentConfig,
    pub metadata: TrainingMetadata,
}

impl SavedModel {
    pub const VERSION: u32 = 1;

    pub fn new(
        model: LinearQModel,
        vocabulary: Vec<String>,
        agent: AgentConfig,
        metadata: TrainingMetadata,
    ) -> Self {
        Self {
            version: Self::VERSION,
            model,
            vocabulary,
            agent,
            metadata,
        }
    }

    /// Recover the model, rejecting unknown format versions.
    pub fn to_model(&self) -> Result<LinearQModel> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(self.model.clone())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).map_err(|e| Error::SerializationContext {
            operation: "serialize model to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).map_err(|e| Error::SerializationContext {
            operation: "deserialize model from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}

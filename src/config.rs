//! Lab configuration.
//!
//! All fields have defaults matching the interactive lab, so an empty JSON
//! object (or no file at all) yields a working configuration.

use crate::algorithms::{bb84, bell};
use crate::core::bloch::ProjectionConfig;
use crate::core::measurement::{RandomSource, SeededRandom, ThreadRandom, DEFAULT_HISTORY_CAPACITY};
use crate::error::{LabError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Configuration for a lab session and its demonstrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Measurement outcomes retained for display.
    pub history_capacity: usize,
    /// Decimals used when formatting amplitudes.
    pub display_precision: usize,
    /// Bloch-sphere screen projection.
    pub projection: ProjectionConfig,
    /// Rounds per BB84 exchange.
    pub bb84_rounds: usize,
    /// Shots per Bell-pair batch.
    pub bell_shots: usize,
    /// Fixed seed for reproducible sampling; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            display_precision: crate::core::complex::DEFAULT_PRECISION,
            projection: ProjectionConfig::default(),
            bb84_rounds: bb84::DEFAULT_ROUNDS,
            bell_shots: bell::DEFAULT_SHOTS,
            seed: None,
        }
    }
}

impl LabConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(LabError::invalid_config("history_capacity", "must be at least 1"));
        }
        if self.display_precision > 12 {
            return Err(LabError::invalid_config("display_precision", "must be at most 12"));
        }
        let radius = self.projection.sphere_radius;
        if radius.is_nan() || radius <= 0.0 {
            return Err(LabError::invalid_config("projection.sphere_radius", "must be positive"));
        }
        if self.bb84_rounds == 0 {
            return Err(LabError::invalid_config("bb84_rounds", "must be at least 1"));
        }
        if self.bell_shots == 0 {
            return Err(LabError::invalid_config("bell_shots", "must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("no config file given, using defaults");
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        debug!(path = %path.display(), "loaded lab config");
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Random source honouring `seed`.
    pub fn rng(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => {
                debug!("no seed configured, sampling from thread rng");
                Box::new(ThreadRandom)
            }
        }
    }
}

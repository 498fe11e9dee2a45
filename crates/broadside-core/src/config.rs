//! Simulation configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH, DT};
use crate::enums::Difficulty;

/// Errors raised while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena must have finite positive size, got {width} x {height}")]
    InvalidArena { width: f64, height: f64 },
    #[error("step length must be positive, got {0}")]
    InvalidStep(f64),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for creating a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and commands give the same run.
    pub seed: u64,
    pub difficulty: Difficulty,
    pub arena_width: f64,
    pub arena_height: f64,
    /// Seconds advanced by each fixed step.
    pub dt: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::default(),
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            dt: DT,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !(positive(self.arena_width) && positive(self.arena_height)) {
            return Err(ConfigError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !positive(self.dt) {
            return Err(ConfigError::InvalidStep(self.dt));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

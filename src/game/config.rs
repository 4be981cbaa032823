use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::difficulty::Difficulty;

/// Side length used when nothing else is configured
pub const DEFAULT_FIELD_SIZE: usize = 20;

/// Smallest field that fits the two-cell starting snake plus a food cell
/// without the head starting on top of a wrapped tail.
pub const MIN_FIELD_SIZE: usize = 3;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square, wrap-around field
    pub field_size: usize,
    /// Speed used for the first run
    pub difficulty: Difficulty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("field size {actual} is too small, need at least {min}")]
    FieldTooSmall { actual: usize, min: usize },
    #[error("field size {actual} does not fit in a grid coordinate")]
    FieldTooLarge { actual: usize },
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_size: DEFAULT_FIELD_SIZE,
            difficulty: Difficulty::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom field size
    pub fn new(field_size: usize) -> Self {
        Self {
            field_size,
            ..Default::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Create a small field for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_size < MIN_FIELD_SIZE {
            return Err(ConfigError::FieldTooSmall {
                actual: self.field_size,
                min: MIN_FIELD_SIZE,
            });
        }
        if i32::try_from(self.field_size).is_err() {
            return Err(ConfigError::FieldTooLarge {
                actual: self.field_size,
            });
        }
        Ok(())
    }
}

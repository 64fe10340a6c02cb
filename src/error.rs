//! Error types

use thiserror::Error;

/// Errors that prevent a run from starting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The level identifier is not in the table.
    #[error("unknown level: {0}")]
    UnknownLevel(String),
    /// Minimum obstacle speed exceeds maximum, or is negative.
    #[error("level {level}: invalid obstacle speed range {min}..={max}")]
    InvalidSpeedRange {
        /// Level name.
        level: String,
        /// Configured minimum.
        min: f32,
        /// Configured maximum.
        max: f32,
    },
    /// Spawn interval must be at least one tick.
    #[error("level {level}: spawn interval must be positive")]
    InvalidSpawnInterval {
        /// Level name.
        level: String,
    },
    /// Player speed cap must be positive.
    #[error("level {level}: player max speed must be positive")]
    InvalidPlayerSpeed {
        /// Level name.
        level: String,
    },
    /// The same level name appears twice.
    #[error("duplicate level: {0}")]
    DuplicateLevel(String),
    /// Level table JSON could not be parsed.
    #[error("malformed level table: {0}")]
    Parse(String),
}

/// Errors from reading or writing a JSON file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

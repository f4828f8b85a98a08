//! Error types for the parkspot index and command codec.

use thiserror::Error;

/// Errors produced by the index, its configuration and the wire codec.
#[derive(Debug, Error)]
pub enum ParkspotError {
    /// A coordinate token could not be parsed as a number
    #[error("invalid number {token:?} at position {position}")]
    InvalidNumber { token: String, position: usize },

    /// A latitude without a matching longitude
    #[error("coordinate list has {count} values, expected an even number")]
    UnpairedValue { count: usize },

    /// A query needs exactly two corners
    #[error("expected {expected} coordinates, found {found}")]
    CoordinateCount { expected: usize, found: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ParkspotError>;

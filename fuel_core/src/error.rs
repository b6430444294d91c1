//! Error types for the fuel_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fuel_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An embedded-record cell failed to parse as a literal expression
    #[error("Literal decode error: {0}")]
    Decode(String),

    /// A decoded record lacks a field a statistic needs
    #[error("Missing key '{0}' in decoded record")]
    MissingKey(String),

    /// A statistic was computed over zero rows
    #[error("Cannot compute {0} over an empty dataset")]
    EmptyDataset(&'static str),

    /// A workout timestamp did not match the expected format
    #[error("Malformed timestamp: {0}")]
    Timestamp(String),

    /// Meal-plan response error
    #[error("Plan error: {0}")]
    Plan(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

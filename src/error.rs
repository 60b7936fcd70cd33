//! Error types for envsense
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for envsense operations
pub type Result<T> = std::result::Result<T, EnvsenseError>;

/// Main error type for envsense operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvsenseError {
    /// Unknown sensor kind name
    #[error("Unknown sensor kind: {0}")]
    ParseKind(String),

    /// Unknown status name
    #[error("Unknown sensor status: {0}")]
    ParseStatus(String),

    /// Unknown analysis mode name
    #[error("Unknown analysis type: {0}")]
    ParseMode(String),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Errors while analysing a single sensor's series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// No retained values for the sensor
    #[error("No retained values for sensor {sensor_id}")]
    EmptySeries { sensor_id: String },

    /// The computation produced NaN or infinity
    #[error("Non-finite {field} for sensor {sensor_id}")]
    NonFinite {
        sensor_id: String,
        field: &'static str,
    },
}

//! Error types for the shift pay engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading pay rules or
//! preparing a shift for calculation.

use thiserror::Error;

/// The main error type for the shift pay engine.
///
/// The core calculation is infallible; these errors come from configuration
/// loading, clock-time parsing and the checked calculation entry point.
///
/// # Example
///
/// ```
/// use shift_pay_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/pay_rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/pay_rules.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Pay rules were parsed but contain values the engine cannot use.
    #[error("Invalid pay rule '{field}': {message}")]
    InvalidPayRules {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A shift was rejected by the checked calculation entry point.
    #[error("Invalid shift input: {message}")]
    InvalidShiftInput {
        /// A description of what made the shift invalid.
        message: String,
    },

    /// A clock time string could not be parsed.
    #[error("Invalid clock time '{value}': {message}")]
    InvalidClockTime {
        /// The raw value that failed to parse.
        value: String,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

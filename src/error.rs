//! Error types for the Break Placement Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate for
//! input and configuration faults. Expected placement outcomes (a rule that
//! does not apply, a break that falls outside the shift) are not errors; they
//! are reported as [`FailureReason`](crate::models::FailureReason) values.

use thiserror::Error;

/// The main error type for the Break Placement Engine.
///
/// # Example
///
/// ```
/// use break_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/ruleset.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/ruleset.yaml");
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

    /// A break rule id was not found in the loaded ruleset.
    #[error("Break rule not found: {id}")]
    RuleNotFound {
        /// The rule id that was not found.
        id: String,
    },

    /// Two rule files declared the same rule id.
    #[error("Duplicate break rule '{id}' in {path}")]
    DuplicateRule {
        /// The duplicated rule id.
        id: String,
        /// The file that declared the duplicate.
        path: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// An `HH:MM` duration could not be parsed.
    #[error("Invalid duration '{value}': {message}")]
    InvalidDuration {
        /// The raw value that failed to parse.
        value: String,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Error types for the salary calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every validation failure a calculator can report. All of them are
//! raised before any arithmetic begins.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the salary calculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use brutoneto::error::EngineError;
///
/// let error = EngineError::UnknownMunicipality {
///     key: "atlantis".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown municipality: atlantis");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A monetary amount was negative, not a finite number, or above its maximum.
    #[error("Invalid amount for '{field}': {value} (must be a finite number between 0 and {max})")]
    InvalidAmount {
        /// The name of the input that was rejected.
        field: String,
        /// The rejected value as the caller supplied it.
        value: String,
        /// The largest accepted value for this input.
        max: Decimal,
    },

    /// A municipality key was not found in the rate table.
    #[error("Unknown municipality: {key}")]
    UnknownMunicipality {
        /// The key that was not found.
        key: String,
    },

    /// A configuration value was outside its permitted range.
    #[error("Invalid value for '{field}': {message}")]
    OutOfRange {
        /// The configuration field that was rejected.
        field: String,
        /// A description of the permitted range.
        message: String,
    },

    /// The rate table file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The rate table could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

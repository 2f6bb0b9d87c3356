//! Error types for the paystub engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can abort a batch, plus configuration errors.

use thiserror::Error;

/// The main error type for the paystub engine.
///
/// Every fatal condition in the batch pipeline surfaces as one of these
/// variants; there is no partial-success type.
///
/// # Example
///
/// ```
/// use paystub_engine::error::EngineError;
///
/// let error = EngineError::MissingColumns {
///     columns: vec!["net_payment".to_string()],
/// };
/// assert_eq!(error.to_string(), "Missing required columns: net_payment");
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

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field, dotted (e.g. `auth.user`).
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The CSV header lacks one or more required columns.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Required columns absent from the header, in canonical order.
        columns: Vec<String>,
    },

    /// A data row holds a value that cannot be used.
    #[error("Invalid value in row {row}, column '{field}': {message}")]
    InvalidRecord {
        /// 1-based data row number (the header is not counted).
        row: usize,
        /// The column holding the bad value.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The input is not well-formed CSV.
    #[error("Malformed payroll input: {message}")]
    MalformedInput {
        /// A description of the structural problem.
        message: String,
    },

    /// A branding asset exists but could not be read.
    #[error("Branding asset '{path}' could not be read: {message}")]
    AssetUnavailable {
        /// Path of the asset that failed.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// Branding asset bytes are not a decodable image.
    #[error("Branding asset is not a decodable image: {message}")]
    AssetDecode {
        /// The decoder error.
        message: String,
    },

    /// The PDF writer failed.
    #[error("Failed to render paystub for '{recipient}': {message}")]
    RenderFailed {
        /// Email of the record being rendered.
        recipient: String,
        /// A description of the failure.
        message: String,
    },

    /// The dispatch sink could not deliver a paystub.
    #[error("Failed to dispatch paystub to '{recipient}': {message}")]
    DispatchFailed {
        /// Email of the intended recipient.
        recipient: String,
        /// A description of the failure.
        message: String,
    },

    /// The country selector is not one of the recognized codes.
    #[error("Unknown country code: '{code}'")]
    UnknownCountry {
        /// The code that was supplied.
        code: String,
    },
}

impl EngineError {
    /// Returns true for structural problems with the uploaded table.
    ///
    /// These errors are raised before any asset resolution, rendering or
    /// dispatch takes place.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            EngineError::MissingColumns { .. }
                | EngineError::InvalidRecord { .. }
                | EngineError::MalformedInput { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

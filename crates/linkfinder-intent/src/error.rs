//! Advisor error types.
//!
//! The router itself never fails: an unmatched message is a no-op. Errors
//! only surface at the edges of the crate, when a caller hands in a ZIP code
//! or a pattern from outside, or when configuration is loaded from disk.

use std::path::PathBuf;

/// Unified error type for the linkfinder intent crate.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    // -- Input errors -------------------------------------------------------
    /// A ZIP code supplied through an explicit setter is not five digits.
    #[error("invalid ZIP code `{value}`: expected exactly five digits")]
    InvalidZipCode { value: String },

    /// A provider or technology pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // -- Configuration errors -----------------------------------------------
    /// The configuration file exists but could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected shape.
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // -- Serialization ------------------------------------------------------
    /// JSON serialization of a snapshot failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the intent crate.
pub type Result<T> = std::result::Result<T, AdvisorError>;

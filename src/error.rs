//! Unified error types for trendpack.
//!
//! Rendering and splitting never fail: every input degrades to a defined
//! output. Errors only come from the edges of the library, such as loading a
//! report or configuration file, or parsing a platform name, report mode or
//! timestamp supplied by a caller.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for trendpack operations.
///
/// # Example
///
/// ```rust
/// use trendpack::error::Result;
/// use trendpack::ReportData;
///
/// fn load() -> Result<ReportData> {
///     Ok(ReportData::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, TrendpackError>;

/// The error type for all fallible trendpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrendpackError {
    /// An I/O error occurred while reading a report or config, or while
    /// writing generated messages.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A report or configuration document could not be decoded, or batch
    /// output could not be encoded.
    #[cfg(feature = "json")]
    #[error("JSON error in {what}{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Json {
        /// What was being decoded (e.g., "report", "push config")
        what: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The platform name is not one of the supported destinations.
    #[error("Unknown platform '{input}'. Expected one of: {expected}")]
    InvalidPlatform {
        /// The name that was provided
        input: String,
        /// Comma-separated list of accepted names
        expected: String,
    },

    /// The report mode is not one of `daily`, `incremental`, `current`.
    #[error("Unknown report mode '{input}'. Expected one of: daily, incremental, current")]
    InvalidMode {
        /// The mode that was provided
        input: String,
    },

    /// A timestamp argument could not be parsed.
    #[error("Invalid time '{input}'. Expected format: {expected}")]
    InvalidTime {
        /// The invalid timestamp string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TrendpackError {
    /// Creates a JSON decoding error for a report document.
    #[cfg(feature = "json")]
    pub fn report_json(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        TrendpackError::Json {
            what: "report",
            source,
            path,
        }
    }

    /// Creates a JSON decoding error for a push configuration document.
    #[cfg(feature = "json")]
    pub fn config_json(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        TrendpackError::Json {
            what: "push config",
            source,
            path,
        }
    }

    /// Creates a JSON encoding error for generated batches.
    #[cfg(feature = "json")]
    pub fn output_json(source: serde_json::Error) -> Self {
        TrendpackError::Json {
            what: "batch output",
            source,
            path: None,
        }
    }

    /// Creates an unknown platform error.
    pub fn invalid_platform(input: impl Into<String>) -> Self {
        TrendpackError::InvalidPlatform {
            input: input.into(),
            expected: crate::platform::Platform::all_names().join(", "),
        }
    }

    /// Creates an unknown report mode error.
    pub fn invalid_mode(input: impl Into<String>) -> Self {
        TrendpackError::InvalidMode {
            input: input.into(),
        }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_time(input: impl Into<String>) -> Self {
        TrendpackError::InvalidTime {
            input: input.into(),
            expected: "YYYY-MM-DD HH:MM:SS",
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        TrendpackError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, TrendpackError::Io(_))
    }

    /// Returns `true` if a document could not be decoded.
    pub fn is_decode(&self) -> bool {
        #[cfg(feature = "json")]
        {
            matches!(self, TrendpackError::Json { .. })
        }
        #[cfg(not(feature = "json"))]
        {
            false
        }
    }

    /// Returns `true` if a caller-supplied argument was rejected.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            TrendpackError::InvalidPlatform { .. }
                | TrendpackError::InvalidMode { .. }
                | TrendpackError::InvalidTime { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, TrendpackError::InvalidConfig { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

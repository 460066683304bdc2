//! Error types for orrery.
//!
//! All fallible operations return `Result<T, OrreryError>` instead of
//! panicking. Failures are local and synchronous: an operation either fully
//! succeeds with its documented invariants holding on return, or fully fails
//! with no partial mutation.

use thiserror::Error;

use crate::catalog::body::BodyId;

/// Result type alias for orrery operations.
pub type OrreryResult<T> = Result<T, OrreryError>;

/// Unified error type for all orrery operations.
#[derive(Debug, Error)]
pub enum OrreryError {
    /// Time step is NaN or infinite. Rejected before any mutation.
    #[error("invalid time step: {value} is not finite")]
    InvalidTimeStep {
        /// The rejected time step value.
        value: f64,
    },

    /// Query or role reference for an identity not in the current catalog.
    #[error("unknown body: {id}")]
    UnknownBody {
        /// The identity that failed to resolve.
        id: BodyId,
    },

    /// Orbital elements rejected at catalog-build time.
    ///
    /// A non-positive period or semi-major axis, or an eccentricity outside
    /// [0, 1), would silently produce NaN/Inf during updates; such bodies
    /// are rejected up front.
    #[error("invalid elements for '{name}': {reason}")]
    InvalidElements {
        /// Display name of the offending body definition.
        name: String,
        /// What was wrong with the elements.
        reason: String,
    },

    /// Invalid configuration parameter.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl OrreryError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-elements error for a named body definition.
    #[must_use]
    pub fn invalid_elements(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidElements {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

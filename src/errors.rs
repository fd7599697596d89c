//! Shared error types for the estimator

use thiserror::Error;

/// Main error type for valuemap operations
#[derive(Debug, Error)]
pub enum EstimateError {
    /// Industry name absent from the coefficient catalog. The catalog is the
    /// source of truth; callers are not trusted to pre-validate.
    #[error("unknown industry: {name}")]
    UnknownIndustry { name: String },

    /// Product name that does not map to a known toggle
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, EstimateError>;

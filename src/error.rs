//! Heimdall error types

/// Heimdall error types
#[derive(Debug, thiserror::Error)]
pub enum HeimdallError {
    // Assembly-time errors
    /// Include/exclude patterns could not be compiled into a matcher.
    #[error("failed to create metrics filter: {0}")]
    FilterConstruction(#[source] PatternError),

    // Per-batch errors
    /// The filter engine could not evaluate a batch.
    #[error("filter transform error: {0}")]
    FilterTransform(String),

    /// A downstream consumer rejected a batch.
    #[error("consumer error: {0}")]
    Consumer(String),

    // Request context errors
    #[error("context cancelled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HeimdallError {
    /// Whether this error can only occur while assembling a stage.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            HeimdallError::FilterConstruction(_) | HeimdallError::Configuration(_)
        )
    }

    /// Whether this error is data-dependent and raised per batch.
    pub fn is_per_batch(&self) -> bool {
        matches!(
            self,
            HeimdallError::FilterTransform(_)
                | HeimdallError::Consumer(_)
                | HeimdallError::Cancelled
                | HeimdallError::DeadlineExceeded
        )
    }
}

/// A match pattern that failed to compile.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid regexp pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for Heimdall operations
pub type Result<T> = std::result::Result<T, HeimdallError>;

use thiserror::Error;

/// An error in the configuration of the compiler.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration is not valid JSON or has fields of the wrong type.
    #[error("invalid compiler configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// A sort direction other than `ASC` or `DESC`.
    #[error("invalid sort direction '{0}', expected ASC or DESC")]
    InvalidSortDirection(String),
    /// A maximum recursion depth of zero would reject every concept.
    #[error("the maximum recursion depth must be at least 1")]
    InvalidRecursionDepth,
}

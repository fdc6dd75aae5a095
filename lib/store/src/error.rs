use askql_model::{AskParseError, IriParseError};
use oxrdfio::RdfParseError;
use std::error::Error;
use std::io;

/// An error related to reading or writing the facts of a store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A writer panicked while holding the lock of the facts.
    #[error("the fact store lock is poisoned")]
    Poisoned,
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl From<StorageError> for io::Error {
    #[inline]
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io(error) => error,
            StorageError::Poisoned => Self::other(error.to_string()),
            StorageError::Other(error) => Self::other(error),
        }
    }
}

/// An error raised while loading a file into a [`SparqlStore`](crate::SparqlStore).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoaderError {
    /// An error raised while reading the file.
    #[error(transparent)]
    Parsing(#[from] RdfParseError),
    /// An error raised during the insertion in the store.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The base IRI is invalid.
    #[error("Invalid base IRI '{iri}': {error}")]
    InvalidBaseIri {
        /// The IRI itself.
        iri: String,
        /// The parsing error.
        #[source]
        error: IriParseError,
    },
}

impl From<LoaderError> for io::Error {
    #[inline]
    fn from(error: LoaderError) -> Self {
        match error {
            LoaderError::Storage(error) => error.into(),
            LoaderError::Parsing(error) => error.into(),
            LoaderError::InvalidBaseIri { .. } => {
                Self::new(io::ErrorKind::InvalidInput, error.to_string())
            }
        }
    }
}

/// An error raised while turning an ask query into SPARQL.
///
/// Problems of the query that still allow a compile (e.g. circular concepts) are reported as
/// diagnostics of the [`CompiledQuery`](crate::CompiledQuery) instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryError {
    /// The ask query is malformed.
    #[error(transparent)]
    Parse(#[from] AskParseError),
}

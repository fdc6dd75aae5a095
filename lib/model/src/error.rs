use crate::DataItemKind;
use oxiri::IriParseError;
use thiserror::Error;

/// An error raised while parsing an ask query.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AskParseError {
    /// The query text does not follow the ask-query grammar.
    #[error("invalid ask query at {location}: expected {expected}")]
    Syntax { location: String, expected: String },
    /// A namespace filter names a namespace that is not known.
    #[error("unknown namespace '{0}'")]
    UnknownNamespace(String),
    /// A condition has no value.
    #[error("empty value in condition on '{0}'")]
    EmptyValue(String),
    /// A value does not fit the type of its property.
    #[error(transparent)]
    InvalidValue(#[from] DataItemError),
}

/// An error raised while building a data item from its textual form.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DataItemError {
    /// The text is not a valid value of the kind.
    #[error("'{value}' is not a valid {kind} value")]
    InvalidValue { kind: DataItemKind, value: String },
    /// The text is a date whose components are out of range.
    #[error("'{0}' is not a valid point in time")]
    InvalidTime(String),
}

/// An error raised while configuring the resource exporter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// The base IRI of the wiki is not a valid absolute IRI.
    #[error("invalid wiki base IRI '{iri}': {error}")]
    InvalidBaseIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
}

//! Wiki facts in memory and the caches and registries that answer the questions of the ask-query
//! compiler, behind a [`SparqlStore`] that turns ask queries into SPARQL.

mod concepts;
mod config;
mod error;
mod facts;
mod hierarchy;
mod property_types;
mod redirects;
mod store;

pub use concepts::ConceptRegistry;
pub use config::StoreConfig;
pub use error::{LoaderError, QueryError, StorageError};
pub use facts::{parse_triples, MemoryFactStore, TripleSource, TripleSourceRef};
pub use hierarchy::HierarchyCache;
pub use property_types::PropertyTypeRegistry;
pub use redirects::RedirectCache;
pub use store::{CompiledQuery, SparqlStore};

mod data_item;
mod description;
mod error;
mod export;
mod page;
mod parser;
mod property;
pub mod vocab;

pub use data_item::*;
pub use description::*;
pub use error::*;
pub use export::*;
pub use page::*;
pub use parser::{AskParser, PropertyKindLookup, PropertyKindLookupRef};
pub use property::*;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    Graph, IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNode, Subject,
    SubjectRef, Term, TermRef, Triple, TripleRef,
};

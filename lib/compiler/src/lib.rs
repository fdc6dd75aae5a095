//! Compiles ask-query [`Description`](askql_model::Description)s into SPARQL [`Condition`]s and
//! assembles conditions into query text.

mod assembler;
mod builder;
mod condition;
mod context;
mod error;
mod guard;
mod interpreter;
pub mod lookup;
mod options;
mod variables;

pub use assembler::*;
pub use builder::*;
pub use condition::*;
pub use context::*;
pub use error::*;
pub use guard::*;
pub use options::*;
pub use variables::replace_variable;

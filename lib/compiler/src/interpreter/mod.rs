//! One module per description variant. Each `interpret` function compiles its variant with the
//! builder and the context of the call.

pub(crate) mod class;
pub(crate) mod concept;
pub(crate) mod conjunction;
pub(crate) mod disjunction;
pub(crate) mod namespace;
pub(crate) mod some_property;
pub(crate) mod thing;
pub(crate) mod value;

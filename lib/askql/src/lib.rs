#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod model {
    pub use askql_model::*;
}

pub mod compiler {
    pub use askql_compiler::*;
}

pub mod store {
    pub use askql_store::*;
}

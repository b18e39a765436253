//! RDF graphs for scholarly articles and their reviews.
//!
//! The crate provides an immutable term model with a total order ([`term`]), a set-valued
//! dataset container ([`dataset`]), blank node splitting and canonical forms for comparing
//! graphs ([`split`], [`canonical`]), and a streaming, prefix-aware Turtle writer
//! ([`serializer`]). Parsing goes through oxigraph ([`util`], [`convert`]).

extern crate derive_builder;

pub mod article;
pub mod canonical;
pub mod config;
pub mod consts;
pub mod convert;
pub mod dataset;
pub mod errors;
pub mod namespace;
pub mod report;
pub mod serializer;
pub mod split;
pub mod term;
pub mod util;

pub use crate::dataset::Dataset;
pub use crate::errors::{Error, Result};
pub use crate::namespace::{Namespace, Prefixes};
pub use crate::serializer::TurtleSerializer;
pub use crate::split::{split_shared_blank_nodes, StructuralPredicates};
pub use crate::term::{
    BlankNode, BlankNodeAllocator, GraphName, Literal, NamedNode, Object, Quad, Subject, Term,
};

/// Initializes logging for the library.
///
/// If `REVIEWGRAPH_LOG` is set, `RUST_LOG` is set to its value, so `REVIEWGRAPH_LOG` takes
/// precedence. The logger itself (e.g. `env_logger::init()`) must be initialized after this
/// call for the level to take effect.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var("REVIEWGRAPH_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}

//! N-Quads reading and writing.
//!
//! The parser is the textual input adapter for [`crate::nquads_to_jsonld`];
//! the serializer provides the canonical term form used to order values.

pub mod escape;
pub mod parser;
pub mod serializer;

pub use parser::parse;
pub use serializer::{serialize_dataset, serialize_object, serialize_quad};

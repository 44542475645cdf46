pub mod error;
pub mod jsonld;
pub mod model;
pub mod nquads;
pub mod options;

pub use error::{RdfError, Result};
pub use jsonld::{compact, flatten, from_rdf, from_rdf_value};
pub use model::{
    BlankNode, Dataset, GraphLabel, Literal, NamedNode, Object, Quad, Subject, rdf, xsd,
};
pub use options::FromRdfOptions;

/// Convenience: parse an N-Quads document and serialize it as JSON-LD.
pub fn nquads_to_jsonld(input: &str, options: &FromRdfOptions) -> Result<String> {
    let dataset = nquads::parse(input)?;
    Ok(jsonld::from_rdf(dataset.quads(), options))
}

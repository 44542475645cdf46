use std::fmt;

/// Errors raised by the input adapters (N-Quads parsing, JSON-LD to RDF).
///
/// Serializing quads as JSON-LD never fails; malformed input degrades locally.
#[derive(Debug, thiserror::Error)]
pub enum RdfError {
    #[error("N-Quads parse error: {0}")]
    NQuadsParseError(String),

    #[error("To-RDF conversion error: {0}")]
    ToRdfError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for RDF operations.
pub type Result<T> = std::result::Result<T, RdfError>;

impl RdfError {
    pub fn parse(msg: impl fmt::Display) -> Self {
        Self::NQuadsParseError(msg.to_string())
    }

    pub fn to_rdf(msg: impl fmt::Display) -> Self {
        Self::ToRdfError(msg.to_string())
    }
}

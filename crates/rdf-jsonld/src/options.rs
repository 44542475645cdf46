/*!
 * Options controlling RDF to JSON-LD serialization
 */

use serde::{Deserialize, Serialize};

/// Options for [`crate::jsonld::from_rdf`].
///
/// Field names follow the JSON-LD API option names so the struct can be
/// loaded straight from a JSON configuration blob:
/// ```
/// use rdf_jsonld::FromRdfOptions;
///
/// let options: FromRdfOptions = serde_json::from_str(r#"{"useNativeTypes": true}"#).unwrap();
/// assert!(options.use_native_types);
/// assert!(!options.use_rdf_type);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FromRdfOptions {
    /// Keep `rdf:type` as an ordinary property. The `@type` pseudo-predicate
    /// then carries the node types instead.
    #[serde(alias = "useRdfTypeKeyword")]
    pub use_rdf_type: bool,

    /// Coerce `xsd:boolean`, `xsd:integer` (and derived types) and
    /// `xsd:double` literals into native JSON values.
    pub use_native_types: bool,
}

impl FromRdfOptions {
    /// Returns a builder for `FromRdfOptions`
    /// Example:
    /// ```
    /// use rdf_jsonld::FromRdfOptions;
    ///
    /// let options = FromRdfOptions::builder().use_native_types(true).build();
    /// assert!(options.use_native_types);
    /// ```
    pub fn builder() -> FromRdfOptionsBuilder {
        FromRdfOptionsBuilder::default()
    }
}

/// Builder for `FromRdfOptions`.
#[derive(Default)]
pub struct FromRdfOptionsBuilder {
    /// Treat `rdf:type` as an ordinary predicate
    /// Default: false
    use_rdf_type: bool,

    /// Convert boolean, integer and double literals to native JSON values
    /// Default: false
    use_native_types: bool,
}

impl FromRdfOptionsBuilder {
    pub fn use_rdf_type(mut self, enabled: bool) -> Self {
        self.use_rdf_type = enabled;
        self
    }

    pub fn use_native_types(mut self, enabled: bool) -> Self {
        self.use_native_types = enabled;
        self
    }

    pub fn build(self) -> FromRdfOptions {
        FromRdfOptions {
            use_rdf_type: self.use_rdf_type,
            use_native_types: self.use_native_types,
        }
    }
}

//! Node object serialization for a single subject.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value, json};

use super::list::ListIndex;
use super::literal::literal_to_json;
use crate::model::{BlankNode, Object, Quad, Subject, rdf};
use crate::nquads::serialize_object;
use crate::options::FromRdfOptions;

/// Rendered list items keyed by list head.
pub(crate) type ResolvedLists<'a> = HashMap<&'a BlankNode, Vec<Value>>;

/// The pseudo-predicate that always feeds the `@type` slot.
const TYPE_KEYWORD: &str = "@type";

/// Serialize one subject's quads (all from the same graph) into a node object.
///
/// Predicates become keys in lexicographic order, each mapped to an array of
/// values. Values under one key are ordered by their N-Quads form so the
/// result does not depend on input order.
pub fn serialize_node(
    subject: &Subject,
    quads: &[&Quad],
    lists: &ListIndex<'_>,
    options: &FromRdfOptions,
) -> Map<String, Value> {
    let mut types: Vec<&Object> = Vec::new();
    let mut properties: BTreeMap<&str, Vec<&Object>> = BTreeMap::new();

    for quad in quads {
        let predicate = quad.predicate.iri.as_str();
        if is_type_slot(predicate, options) {
            types.push(&quad.object);
        } else {
            properties.entry(predicate).or_default().push(&quad.object);
        }
    }

    let mut node = Map::new();
    node.insert("@id".into(), Value::String(subject.jsonld_id()));

    if !types.is_empty() {
        sort_objects(&mut types);
        let types = types.into_iter().map(|o| Value::String(type_name(o))).collect();
        node.insert(TYPE_KEYWORD.into(), Value::Array(types));
    }

    for (predicate, mut objects) in properties {
        sort_objects(&mut objects);
        let values = objects
            .into_iter()
            .map(|o| object_to_json(o, lists.resolved(), options.use_native_types))
            .collect();
        node.insert(predicate.to_string(), Value::Array(values));
    }

    node
}

/// Serialize an object position value.
///
/// A blank node that heads a reconstructed list becomes `{"@list": [...]}`,
/// `rdf:nil` the empty list, other nodes a reference, literals a value object.
pub(crate) fn object_to_json(
    object: &Object,
    lists: &ResolvedLists<'_>,
    use_native_types: bool,
) -> Value {
    match object {
        Object::Blank(b) => match lists.get(b) {
            Some(items) => json!({ "@list": items }),
            None => json!({ "@id": b.jsonld_id() }),
        },
        Object::Named(n) if n.is_nil() => json!({ "@list": [] }),
        Object::Named(n) => json!({ "@id": n.iri }),
        Object::Literal(l) => literal_to_json(l, use_native_types),
    }
}

/// Which predicate populates `@type` for this call.
///
/// `rdf:type` does unless `use_rdf_type` keeps it as a plain property; the
/// `@type` pseudo-predicate always does, since a keyword is never a property.
pub(crate) fn is_type_slot(predicate: &str, options: &FromRdfOptions) -> bool {
    predicate == TYPE_KEYWORD || (!options.use_rdf_type && predicate == rdf::TYPE)
}

fn type_name(object: &Object) -> String {
    match object {
        Object::Named(n) => n.iri.clone(),
        Object::Blank(b) => b.jsonld_id(),
        Object::Literal(l) => l.value.clone(),
    }
}

fn sort_objects(objects: &mut [&Object]) {
    objects.sort_by_cached_key(|o| serialize_object(o));
}

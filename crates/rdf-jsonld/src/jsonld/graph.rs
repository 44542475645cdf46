//! Dataset level aggregation: graph partitioning, named graph wrapping and
//! merging of node objects that share an `@id`.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde_json::{Map, Value};

use super::list::ListIndex;
use super::node::serialize_node;
use crate::model::{Quad, Subject};
use crate::options::FromRdfOptions;

/// Node objects keyed by `@id`, in `@id` order.
pub type NodeMap = BTreeMap<String, Map<String, Value>>;

/// Serialize a whole dataset into the top-level JSON-LD array.
///
/// Default graph nodes land directly in the array. Every other graph becomes
/// `{"@id": <graph>, "@graph": [...]}`. Graphs are serialized independently
/// and then folded into one [`NodeMap`], default graph first.
pub fn serialize_dataset(quads: &[Quad], options: &FromRdfOptions) -> Value {
    let mut graphs: BTreeMap<Option<String>, Vec<&Quad>> = BTreeMap::new();
    for quad in quads {
        graphs.entry(quad.graph.jsonld_id()).or_default().push(quad);
    }
    tracing::debug!(quads = quads.len(), graphs = graphs.len(), "serializing RDF as JSON-LD");

    let mut result = NodeMap::new();
    for (graph, graph_quads) in graphs {
        let nodes = serialize_graph(&graph_quads, options);
        match graph {
            None => {
                for (id, node) in nodes {
                    merge_into(&mut result, id, node);
                }
            }
            Some(graph_id) => {
                let mut wrapper = Map::new();
                wrapper.insert("@id".into(), Value::String(graph_id.clone()));
                wrapper.insert(
                    "@graph".into(),
                    Value::Array(nodes.into_iter().map(|(_, n)| Value::Object(n)).collect()),
                );
                merge_into(&mut result, graph_id, wrapper);
            }
        }
    }

    Value::Array(result.into_values().map(Value::Object).collect())
}

/// Serialize the quads of a single graph, skipping list cells.
///
/// Returns `(@id, node)` pairs ordered by `@id`.
pub fn serialize_graph(
    quads: &[&Quad],
    options: &FromRdfOptions,
) -> Vec<(String, Map<String, Value>)> {
    let lists = ListIndex::build(quads, options);

    let mut subjects: BTreeMap<String, (&Subject, Vec<&Quad>)> = BTreeMap::new();
    for &quad in quads {
        if let Subject::Blank(b) = &quad.subject
            && lists.is_consumed(b)
        {
            continue;
        }
        subjects
            .entry(quad.subject.jsonld_id())
            .or_insert_with(|| (&quad.subject, Vec::new()))
            .1
            .push(quad);
    }

    subjects
        .into_iter()
        .map(|(id, (subject, subject_quads))| {
            let node = serialize_node(subject, &subject_quads, &lists, options);
            (id, node)
        })
        .collect()
}

/// Insert `node` under `id`, merging with an existing entry if there is one.
pub fn merge_into(result: &mut NodeMap, id: String, node: Map<String, Value>) {
    match result.entry(id) {
        Entry::Vacant(entry) => {
            entry.insert(node);
        }
        Entry::Occupied(mut entry) => merge_node(entry.get_mut(), node),
    }
}

/// Merge `incoming` into `existing`.
///
/// Keys missing from `existing` are added. When both sides hold arrays they are
/// concatenated, existing values first, without deduplication. Any other
/// collision is won by `incoming`.
pub fn merge_node(existing: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        match value {
            Value::Array(mut extra) => {
                if let Some(Value::Array(current)) = existing.get_mut(&key) {
                    current.append(&mut extra);
                    continue;
                }
                existing.insert(key, Value::Array(extra));
            }
            other => {
                existing.insert(key, other);
            }
        }
    }
}

//! Expanded JSON-LD back to RDF.
//!
//! Accepts the shape [`super::from_rdf`] produces: a top-level array of node
//! objects, `@graph` wrappers for named graphs, value objects (annotated or
//! native), node references, nested node objects and `@list` values.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::{RdfError, Result};
use crate::model::*;

/// Parse a JSON-LD document from text and convert it to RDF.
pub fn to_rdf_str(document: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_str(document)?;
    to_rdf(&value)
}

/// Convert an expanded JSON-LD document to an RDF Dataset.
pub fn to_rdf(document: &Value) -> Result<Dataset> {
    let nodes = document
        .as_array()
        .ok_or_else(|| RdfError::to_rdf("expanded JSON-LD must be an array"))?;

    let mut converter = Converter {
        dataset: Dataset::new(),
        labels: BlankLabels::new(document),
    };
    for node in nodes {
        let obj = node
            .as_object()
            .ok_or_else(|| RdfError::to_rdf("top-level entries must be node objects"))?;
        converter.node(obj, &GraphLabel::Default)?;
    }
    Ok(converter.dataset)
}

/// Issues `_:bN` labels, skipping any label the document already uses.
struct BlankLabels {
    next: u64,
    taken: HashSet<String>,
}

impl BlankLabels {
    fn new(document: &Value) -> Self {
        let mut taken = HashSet::new();
        let mut stack = vec![document];
        while let Some(value) = stack.pop() {
            match value {
                Value::String(s) => {
                    if let Some(label) = s.strip_prefix("_:") {
                        taken.insert(label.to_string());
                    }
                }
                Value::Array(items) => stack.extend(items),
                Value::Object(map) => stack.extend(map.values()),
                _ => {}
            }
        }
        Self { next: 0, taken }
    }

    fn issue(&mut self) -> BlankNode {
        loop {
            let id = format!("b{}", self.next);
            self.next += 1;
            if !self.taken.contains(&id) {
                return BlankNode::new(id);
            }
        }
    }
}

struct Converter {
    dataset: Dataset,
    labels: BlankLabels,
}

impl Converter {
    fn node(&mut self, node: &Map<String, Value>, graph: &GraphLabel) -> Result<Subject> {
        let subject = match node.get("@id") {
            Some(id) => {
                let id = id
                    .as_str()
                    .ok_or_else(|| RdfError::to_rdf("@id must be a string"))?;
                subject_for(id)
            }
            None => Subject::Blank(self.labels.issue()),
        };

        if let Some(types) = node.get("@type") {
            for type_val in one_or_many(types) {
                let type_id = type_val
                    .as_str()
                    .ok_or_else(|| RdfError::to_rdf("@type values must be strings"))?;
                self.dataset.add(Quad::new(
                    subject.clone(),
                    NamedNode::new(rdf::TYPE),
                    Object::from(subject_for(type_id)),
                    graph.clone(),
                ));
            }
        }

        if let Some(members) = node.get("@graph") {
            let inner = match &subject {
                Subject::Named(n) => GraphLabel::Named(n.clone()),
                Subject::Blank(b) => GraphLabel::Blank(b.clone()),
            };
            for member in one_or_many(members) {
                let member = member
                    .as_object()
                    .ok_or_else(|| RdfError::to_rdf("@graph entries must be node objects"))?;
                self.node(member, &inner)?;
            }
        }

        for (key, value) in node {
            if key.starts_with('@') {
                continue;
            }
            let predicate = NamedNode::new(key.as_str());
            for item in one_or_many(value) {
                if let Some(object) = self.value(item, graph)? {
                    self.dataset.add(Quad::new(
                        subject.clone(),
                        predicate.clone(),
                        object,
                        graph.clone(),
                    ));
                }
            }
        }

        Ok(subject)
    }

    /// Convert a property value. `None` for a `null` `@value`.
    fn value(&mut self, value: &Value, graph: &GraphLabel) -> Result<Option<Object>> {
        let obj = value
            .as_object()
            .ok_or_else(|| RdfError::to_rdf(format!("expected an object, found {value}")))?;

        if let Some(val) = obj.get("@value") {
            return Ok(value_object_to_literal(val, obj)?.map(Object::Literal));
        }
        if let Some(list) = obj.get("@list") {
            return self.list(list, graph).map(Some);
        }
        if obj.len() == 1
            && let Some(id) = obj.get("@id")
        {
            let id = id
                .as_str()
                .ok_or_else(|| RdfError::to_rdf("@id must be a string"))?;
            return Ok(Some(subject_for(id).into()));
        }
        self.node(obj, graph).map(|s| Some(s.into()))
    }

    /// Emit `rdf:first` / `rdf:rest` cells for `list` and return its head.
    fn list(&mut self, list: &Value, graph: &GraphLabel) -> Result<Object> {
        let items = list
            .as_array()
            .ok_or_else(|| RdfError::to_rdf("@list must be an array"))?;

        let mut objects = Vec::with_capacity(items.len());
        for item in items {
            if let Some(object) = self.value(item, graph)? {
                objects.push(object);
            }
        }

        let mut current = Object::Named(NamedNode::new(rdf::NIL));
        for object in objects.into_iter().rev() {
            let cell = self.labels.issue();
            self.dataset.add(Quad::new(
                cell.clone(),
                NamedNode::new(rdf::FIRST),
                object,
                graph.clone(),
            ));
            self.dataset.add(Quad::new(
                cell.clone(),
                NamedNode::new(rdf::REST),
                current,
                graph.clone(),
            ));
            current = Object::Blank(cell);
        }
        Ok(current)
    }
}

fn subject_for(id: &str) -> Subject {
    match id.strip_prefix("_:") {
        Some(label) => Subject::Blank(BlankNode::new(label)),
        None => Subject::Named(NamedNode::new(id)),
    }
}

fn one_or_many(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        other => std::slice::from_ref(other),
    }
}

/// Convert a `@value` object to a literal. Native JSON values pick up the
/// matching XSD datatype unless an explicit `@type` is given.
fn value_object_to_literal(val: &Value, obj: &Map<String, Value>) -> Result<Option<Literal>> {
    let lexical = match val {
        Value::Null => return Ok(None),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !(n.is_i64() || n.is_u64()) => format!("{f:E}"),
            _ => n.to_string(),
        },
        other => {
            return Err(RdfError::to_rdf(format!("unsupported @value: {other}")));
        }
    };

    if let Some(lang) = obj.get("@language").and_then(Value::as_str) {
        return Ok(Some(Literal::lang(lexical, lang)));
    }
    if let Some(datatype) = obj.get("@type").and_then(Value::as_str) {
        return Ok(Some(Literal::typed(lexical, NamedNode::new(datatype))));
    }

    let literal = match val {
        Value::Bool(_) => Literal::typed(lexical, NamedNode::new(xsd::BOOLEAN)),
        Value::Number(n) if n.is_i64() || n.is_u64() => {
            Literal::typed(lexical, NamedNode::new(xsd::INTEGER))
        }
        Value::Number(_) => Literal::typed(lexical, NamedNode::new(xsd::DOUBLE)),
        _ => Literal::new(lexical),
    };
    Ok(Some(literal))
}

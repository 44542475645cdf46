use super::escape::escape_into;
use crate::model::{BlankNode, GraphLabel, Literal, NamedNode, Object, Quad, Subject};

fn push_iri(out: &mut String, node: &NamedNode) {
    out.push('<');
    out.push_str(&node.iri);
    out.push('>');
}

fn push_blank(out: &mut String, node: &BlankNode) {
    out.push_str("_:");
    out.push_str(&node.id);
}

fn push_literal(out: &mut String, lit: &Literal) {
    out.push('"');
    escape_into(out, &lit.value);
    out.push('"');
    if let Some(ref lang) = lit.language {
        out.push('@');
        out.push_str(lang);
    } else if let Some(ref datatype) = lit.datatype {
        out.push_str("^^");
        push_iri(out, datatype);
    }
}

fn push_object(out: &mut String, object: &Object) {
    match object {
        Object::Named(n) => push_iri(out, n),
        Object::Blank(b) => push_blank(out, b),
        Object::Literal(lit) => push_literal(out, lit),
    }
}

/// Serialize an object term in N-Quads form.
///
/// Also used as the ordering key for values sharing a predicate.
pub fn serialize_object(object: &Object) -> String {
    let mut out = String::with_capacity(64);
    push_object(&mut out, object);
    out
}

/// Serialize a single quad to an N-Quads line (without trailing newline).
pub fn serialize_quad(quad: &Quad) -> String {
    let mut out = String::with_capacity(128);

    match &quad.subject {
        Subject::Named(n) => push_iri(&mut out, n),
        Subject::Blank(b) => push_blank(&mut out, b),
    }
    out.push(' ');
    push_iri(&mut out, &quad.predicate);
    out.push(' ');
    push_object(&mut out, &quad.object);
    out.push(' ');

    match &quad.graph {
        GraphLabel::Named(n) => {
            push_iri(&mut out, n);
            out.push(' ');
        }
        GraphLabel::Blank(b) => {
            push_blank(&mut out, b);
            out.push(' ');
        }
        GraphLabel::Default => {}
    }

    out.push('.');
    out
}

/// Serialize quads to N-Quads format (one line per quad, newline-terminated).
pub fn serialize_dataset(quads: &[Quad]) -> String {
    let mut out = String::new();
    for q in quads {
        out.push_str(&serialize_quad(q));
        out.push('\n');
    }
    out
}

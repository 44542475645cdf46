//! Literal to JSON-LD value object conversion.

use serde_json::{Map, Number, Value};

use crate::model::{Literal, xsd};

/// Serialize a literal as a JSON-LD value object.
///
/// | literal                         | output                                  |
/// |---------------------------------|-----------------------------------------|
/// | simple                          | `{"@value": lexical}`                   |
/// | language-tagged                 | `{"@value": lexical, "@language": tag}` |
/// | typed                           | `{"@value": lexical, "@type": iri}`     |
/// | typed, native, coercible        | `{"@value": native}`                    |
///
/// Native coercion only applies to `xsd:boolean`, the `xsd:integer` family and
/// `xsd:double`. A lexical form that does not parse keeps the annotated form.
pub fn literal_to_json(literal: &Literal, use_native_types: bool) -> Value {
    let mut out = Map::new();

    if let Some(ref lang) = literal.language {
        out.insert("@value".into(), Value::String(literal.value.clone()));
        out.insert("@language".into(), Value::String(lang.clone()));
        return Value::Object(out);
    }

    match literal.datatype {
        None => {
            out.insert("@value".into(), Value::String(literal.value.clone()));
        }
        Some(ref datatype) => {
            let native = if use_native_types {
                native_value(&literal.value, &datatype.iri)
            } else {
                None
            };
            match native {
                Some(value) => {
                    out.insert("@value".into(), value);
                }
                None => {
                    out.insert("@value".into(), Value::String(literal.value.clone()));
                    out.insert("@type".into(), Value::String(datatype.iri.clone()));
                }
            }
        }
    }

    Value::Object(out)
}

/// Coerce a lexical form into a native JSON value, if the datatype allows it.
fn native_value(lexical: &str, datatype: &str) -> Option<Value> {
    if datatype == xsd::BOOLEAN {
        match lexical {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        }
    } else if xsd::INTEGER_FAMILY.contains(&datatype) {
        if let Ok(i) = lexical.parse::<i64>() {
            Some(Value::Number(i.into()))
        } else {
            lexical.parse::<u64>().ok().map(|u| Value::Number(u.into()))
        }
    } else if datatype == xsd::DOUBLE {
        // from_f64 rejects NaN and infinities, which JSON cannot carry.
        lexical
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
    } else {
        None
    }
}

use serde_json::{Value, json};

use rdf_jsonld::jsonld::graph::{NodeMap, merge_into, serialize_graph};
use rdf_jsonld::model::*;
use rdf_jsonld::{FromRdfOptions, from_rdf, from_rdf_value};

const ITEMS: &str = "http://ex/items";

fn iri(s: &str) -> NamedNode {
    NamedNode::new(s)
}

fn blank(s: &str) -> BlankNode {
    BlankNode::new(s)
}

/// `ex:a ex:items ( "1" "2" "3" )` with cells `_:l0 .. _:l2`.
fn list_dataset() -> Vec<Quad> {
    vec![
        Quad::triple(iri("ex:a"), iri(ITEMS), blank("l0")),
        Quad::triple(blank("l0"), iri(rdf::FIRST), Literal::new("1")),
        Quad::triple(blank("l0"), iri(rdf::REST), blank("l1")),
        Quad::triple(blank("l1"), iri(rdf::FIRST), Literal::new("2")),
        Quad::triple(blank("l1"), iri(rdf::REST), blank("l2")),
        Quad::triple(blank("l2"), iri(rdf::FIRST), Literal::new("3")),
        Quad::triple(blank("l2"), iri(rdf::REST), iri(rdf::NIL)),
    ]
}

#[test]
fn list_round_trip() {
    let out = from_rdf(&list_dataset(), &FromRdfOptions::default());
    assert_eq!(
        out,
        r#"[{"@id":"ex:a","http://ex/items":[{"@list":[{"@value":"1"},{"@value":"2"},{"@value":"3"}]}]}]"#
    );
    for cell in ["_:l0", "_:l1", "_:l2"] {
        assert!(!out.contains(cell), "{cell} leaked into output");
    }
}

#[test]
fn native_coercion_toggle() {
    let quads = vec![Quad::triple(
        iri("ex:a"),
        iri("ex:flag"),
        Literal::typed("true", iri(xsd::BOOLEAN)),
    )];

    let native = from_rdf_value(
        &quads,
        &FromRdfOptions::builder().use_native_types(true).build(),
    );
    assert_eq!(native, json!([{"@id": "ex:a", "ex:flag": [{"@value": true}]}]));

    let annotated = from_rdf_value(&quads, &FromRdfOptions::default());
    assert_eq!(
        annotated,
        json!([{
            "@id": "ex:a",
            "ex:flag": [{
                "@value": "true",
                "@type": "http://www.w3.org/2001/XMLSchema#boolean"
            }]
        }])
    );
}

#[test]
fn type_serialization() {
    let quads = vec![Quad::triple(iri("ex:a"), iri(rdf::TYPE), iri("ex:Person"))];
    assert_eq!(
        from_rdf(&quads, &FromRdfOptions::default()),
        r#"[{"@id":"ex:a","@type":["ex:Person"]}]"#
    );
}

#[test]
fn named_graph_wrapping() {
    let graph = GraphLabel::Named(iri("ex:g"));
    let quads = vec![
        Quad::triple(iri("ex:a"), iri("ex:p"), Literal::new("default")),
        Quad::new(iri("ex:b"), iri("ex:p"), Literal::new("in g"), graph.clone()),
        Quad::new(iri("ex:c"), iri("ex:p"), iri("ex:b"), graph),
    ];

    assert_eq!(
        from_rdf_value(&quads, &FromRdfOptions::default()),
        json!([
            {"@id": "ex:a", "ex:p": [{"@value": "default"}]},
            {
                "@id": "ex:g",
                "@graph": [
                    {"@id": "ex:b", "ex:p": [{"@value": "in g"}]},
                    {"@id": "ex:c", "ex:p": [{"@id": "ex:b"}]}
                ]
            }
        ])
    );
}

#[test]
fn blank_graph_label_wraps_as_blank_id() {
    let quads = vec![Quad::new(
        iri("ex:a"),
        iri("ex:p"),
        Literal::new("v"),
        GraphLabel::Blank(blank("g")),
    )];

    assert_eq!(
        from_rdf_value(&quads, &FromRdfOptions::default()),
        json!([{
            "@id": "_:g",
            "@graph": [{"@id": "ex:a", "ex:p": [{"@value": "v"}]}]
        }])
    );
}

#[test]
fn type_keyword_and_rdf_type_share_the_type_slot() {
    let quads = vec![
        Quad::triple(iri("ex:b"), iri("@type"), iri("ex:T")),
        Quad::triple(iri("ex:b"), iri(rdf::TYPE), iri("ex:U")),
    ];

    assert_eq!(
        from_rdf_value(&quads, &FromRdfOptions::default()),
        json!([{"@id": "ex:b", "@type": ["ex:T", "ex:U"]}])
    );
}

#[test]
fn lists_are_reconstructed_per_graph() {
    let graph = GraphLabel::Named(iri("ex:g"));
    let quads: Vec<Quad> = list_dataset()
        .into_iter()
        .map(|q| Quad { graph: graph.clone(), ..q })
        .collect();

    assert_eq!(
        from_rdf_value(&quads, &FromRdfOptions::default()),
        json!([{
            "@id": "ex:g",
            "@graph": [{
                "@id": "ex:a",
                (ITEMS): [{"@list": [{"@value": "1"}, {"@value": "2"}, {"@value": "3"}]}]
            }]
        }])
    );
}

#[test]
fn graph_name_merges_with_default_graph_subject() {
    let quads = vec![
        Quad::triple(iri("ex:g"), iri("ex:label"), Literal::new("the graph")),
        Quad::new(
            iri("ex:a"),
            iri("ex:p"),
            Literal::new("x"),
            GraphLabel::Named(iri("ex:g")),
        ),
    ];

    assert_eq!(
        from_rdf_value(&quads, &FromRdfOptions::default()),
        json!([{
            "@id": "ex:g",
            "ex:label": [{"@value": "the graph"}],
            "@graph": [{"@id": "ex:a", "ex:p": [{"@value": "x"}]}]
        }])
    );
}

#[test]
fn merge_law_preserves_order_without_dedup() {
    let first = [Quad::triple(iri("ex:a"), iri("ex:p"), Literal::new("x"))];
    let second = [Quad::triple(iri("ex:a"), iri("ex:p"), Literal::new("y"))];
    let options = FromRdfOptions::default();

    let mut result = NodeMap::new();
    for partition in [&first, &second] {
        let refs: Vec<&Quad> = partition.iter().collect();
        for (id, node) in serialize_graph(&refs, &options) {
            merge_into(&mut result, id, node);
        }
    }

    assert_eq!(
        result["ex:a"]["ex:p"],
        json!([{"@value": "x"}, {"@value": "y"}])
    );
}

#[test]
fn output_is_independent_of_input_order() {
    let mut quads = list_dataset();
    quads.extend([
        Quad::triple(iri("ex:b"), iri("ex:p"), Literal::new("z")),
        Quad::triple(iri("ex:b"), iri("ex:p"), Literal::new("a")),
        Quad::triple(blank("x"), iri(rdf::TYPE), iri("ex:T2")),
        Quad::triple(blank("x"), iri(rdf::TYPE), iri("ex:T1")),
        Quad::new(
            iri("ex:c"),
            iri("ex:q"),
            blank("x"),
            GraphLabel::Named(iri("ex:g")),
        ),
    ]);
    let options = FromRdfOptions::default();
    let expected = from_rdf(&quads, &options);

    let mut reversed = quads.clone();
    reversed.reverse();
    assert_eq!(from_rdf(&reversed, &options), expected);

    for shift in 1..quads.len() {
        let mut rotated = quads.clone();
        rotated.rotate_left(shift);
        assert_eq!(from_rdf(&rotated, &options), expected);
    }

    // idempotent on repeated calls
    assert_eq!(from_rdf(&quads, &options), expected);
}

#[test]
fn malformed_list_is_ordinary_node() {
    let quads = vec![
        Quad::triple(iri("http://example.org/s"), iri("http://example.org/p"), blank("b")),
        Quad::triple(blank("b"), iri(rdf::FIRST), Literal::new("a")),
        Quad::triple(blank("b"), iri(rdf::FIRST), Literal::new("b")),
        Quad::triple(blank("b"), iri(rdf::REST), iri(rdf::NIL)),
    ];

    assert_eq!(
        from_rdf_value(&quads, &FromRdfOptions::default()),
        json!([
            {
                "@id": "_:b",
                (rdf::FIRST): [{"@value": "a"}, {"@value": "b"}],
                (rdf::REST): [{"@list": []}]
            },
            {"@id": "http://example.org/s", "http://example.org/p": [{"@id": "_:b"}]}
        ])
    );
}

#[test]
fn shared_tail_falls_back_to_nodes() {
    let quads = vec![
        Quad::triple(blank("a"), iri(rdf::FIRST), Literal::new("a")),
        Quad::triple(blank("a"), iri(rdf::REST), blank("t")),
        Quad::triple(blank("b"), iri(rdf::FIRST), Literal::new("b")),
        Quad::triple(blank("b"), iri(rdf::REST), blank("t")),
        Quad::triple(blank("t"), iri(rdf::FIRST), Literal::new("t")),
        Quad::triple(blank("t"), iri(rdf::REST), iri(rdf::NIL)),
    ];

    let out = from_rdf_value(&quads, &FromRdfOptions::default());
    let ids: Vec<&str> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["@id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["_:a", "_:b", "_:t"]);
}

/// `_:l0` holding the single item `"1"`, in the default graph.
fn single_cell_list() -> Vec<Quad> {
    vec![
        Quad::triple(blank("l0"), iri(rdf::FIRST), Literal::new("1")),
        Quad::triple(blank("l0"), iri(rdf::REST), iri(rdf::NIL)),
    ]
}

fn single_cell_node() -> Value {
    json!({
        "@id": "_:l0",
        (rdf::FIRST): [{"@value": "1"}],
        (rdf::REST): [{"@list": []}]
    })
}

#[test]
fn unreferenced_list_keeps_its_statements() {
    assert_eq!(
        from_rdf_value(&single_cell_list(), &FromRdfOptions::default()),
        json!([single_cell_node()])
    );
}

#[test]
fn list_referenced_from_another_graph_keeps_its_statements() {
    let mut quads = single_cell_list();
    quads.push(Quad::new(
        iri("ex:a"),
        iri("ex:p"),
        blank("l0"),
        GraphLabel::Named(iri("ex:g")),
    ));

    assert_eq!(
        from_rdf_value(&quads, &FromRdfOptions::default()),
        json!([
            single_cell_node(),
            {
                "@id": "ex:g",
                "@graph": [{"@id": "ex:a", "ex:p": [{"@id": "_:l0"}]}]
            }
        ])
    );
}

#[test]
fn list_used_only_as_a_type_keeps_its_statements() {
    let mut quads = single_cell_list();
    quads.push(Quad::triple(iri("ex:a"), iri(rdf::TYPE), blank("l0")));

    assert_eq!(
        from_rdf_value(&quads, &FromRdfOptions::default()),
        json!([single_cell_node(), {"@id": "ex:a", "@type": ["_:l0"]}])
    );
}

#[test]
fn self_containing_list_stays_a_node() {
    let quads = vec![
        Quad::triple(iri("ex:a"), iri("ex:p"), blank("l0")),
        Quad::triple(blank("l0"), iri(rdf::FIRST), blank("l0")),
        Quad::triple(blank("l0"), iri(rdf::REST), iri(rdf::NIL)),
    ];

    assert_eq!(
        from_rdf_value(&quads, &FromRdfOptions::default()),
        json!([
            {
                "@id": "_:l0",
                (rdf::FIRST): [{"@id": "_:l0"}],
                (rdf::REST): [{"@list": []}]
            },
            {"@id": "ex:a", "ex:p": [{"@id": "_:l0"}]}
        ])
    );
}

#[test]
fn empty_input() {
    assert_eq!(from_rdf(&[], &FromRdfOptions::default()), "[]");
}

#[test]
fn concurrent_calls_do_not_interfere() {
    let inputs: Vec<Vec<Quad>> = (0..8)
        .map(|i| {
            let mut quads = list_dataset();
            quads.push(Quad::triple(
                iri("ex:a"),
                iri("ex:n"),
                Literal::new(i.to_string()),
            ));
            quads
        })
        .collect();
    let options = FromRdfOptions::default();
    let sequential: Vec<String> = inputs.iter().map(|q| from_rdf(q, &options)).collect();

    let parallel: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|q| scope.spawn(move || from_rdf(q, &options)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(parallel, sequential);
}

#[test]
fn output_parses_as_json_array() {
    let out = from_rdf(&list_dataset(), &FromRdfOptions::default());
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert!(parsed.is_array());
}

//! Parser-level coverage for the properties that don't need a renderer to
//! observe: shape recipes, determinism, and the fatal/silent split in the
//! error taxonomy across diagram families.

use glyphgraph_core::model::{Diagram, NodeShape};

fn flow(source: &str) -> glyphgraph_core::model::FlowGraph {
    match glyphgraph_core::parse(source).expect("parse should succeed") {
        Diagram::Flow(g) => g,
        other => panic!("expected a flow graph, got {other:?}"),
    }
}

#[test]
fn repeated_parses_of_the_same_source_are_byte_for_byte_identical() {
    let source = "graph TD\n  A[Start] --> B{Decision}\n  B -->|yes| C[Done]\n  B -->|no| A";
    let first = flow(source);
    let second = flow(source);
    assert_eq!(first.nodes.len(), second.nodes.len());
    assert_eq!(first.edges.len(), second.edges.len());
    for (a, b) in first.edges.iter().zip(second.edges.iter()) {
        assert_eq!(a.source, b.source);
        assert_eq!(a.target, b.target);
    }
}

#[test]
fn every_bracket_delimiter_maps_to_its_shape() {
    let g = flow(
        "graph TD\n\
         a(round)\n\
         b([stadium])\n\
         c[[subroutine]]\n\
         d[(cylinder)]\n\
         e((circle))\n\
         f(((double)))\n\
         g{diamond}\n\
         h{{hexagon}}",
    );
    assert_eq!(g.nodes["a"].shape, NodeShape::Rounded);
    assert_eq!(g.nodes["b"].shape, NodeShape::Stadium);
    assert_eq!(g.nodes["c"].shape, NodeShape::Subroutine);
    assert_eq!(g.nodes["d"].shape, NodeShape::Cylinder);
    assert_eq!(g.nodes["e"].shape, NodeShape::Circle);
    assert_eq!(g.nodes["f"].shape, NodeShape::DoubleCircle);
    assert_eq!(g.nodes["g"].shape, NodeShape::Diamond);
    assert_eq!(g.nodes["h"].shape, NodeShape::Hexagon);
}

#[test]
fn pseudostate_edges_never_dangle() {
    let g = flow("stateDiagram-v2\n[*] --> Idle\nIdle --> [*]");
    let node_ids: std::collections::HashSet<&str> = g.nodes.keys().map(String::as_str).collect();
    for edge in &g.edges {
        assert!(node_ids.contains(edge.source.as_str()), "dangling source {}", edge.source);
        assert!(node_ids.contains(edge.target.as_str()), "dangling target {}", edge.target);
    }
}

#[test]
fn composite_state_nests_its_own_nodes_and_leaves_the_outer_graph_alone() {
    let g = flow(
        "stateDiagram-v2\n\
         Idle --> Processing\n\
         state Processing {\n\
         parse --> validate\n\
         }\n\
         Processing --> Done",
    );
    assert_eq!(g.subgraphs.len(), 1);
    let composite = &g.subgraphs[0];
    assert_eq!(composite.id, "Processing");
    assert!(composite.child_nodes.contains(&"parse".to_string()));
    assert!(composite.child_nodes.contains(&"validate".to_string()));
    assert!(g.edges.iter().any(|e| e.source == "Idle" && e.target == "Processing"));
    assert!(g.edges.iter().any(|e| e.source == "Processing" && e.target == "Done"));
}

#[test]
fn sequence_block_imbalance_never_fails_the_parse() {
    assert!(glyphgraph_core::parse("sequenceDiagram\nend\nA->>B: hi").is_ok());
    assert!(glyphgraph_core::parse("sequenceDiagram\nloop retry\nA->>B: hi").is_ok());
    assert!(glyphgraph_core::parse("sequenceDiagram\nalt a\nA->>B: x\nalt b\nA->>B: y").is_ok());
}

#[test]
fn class_body_left_open_at_eof_is_a_fatal_error() {
    assert!(glyphgraph_core::parse("classDiagram\nclass Foo {\n+int bar").is_err());
}

#[test]
fn er_entity_body_left_open_at_eof_is_a_fatal_error() {
    assert!(glyphgraph_core::parse("erDiagram\nCUSTOMER {\nstring name").is_err());
}

#[test]
fn balanced_class_and_er_bodies_parse_cleanly() {
    assert!(glyphgraph_core::parse("classDiagram\nclass Foo {\n+int bar\n}").is_ok());
    assert!(glyphgraph_core::parse("erDiagram\nCUSTOMER {\nstring name\n}").is_ok());
}

#[test]
fn subgraph_cannot_contain_itself() {
    let src = "graph TD\nsubgraph s1\nsubgraph s1\nA-->B\nend\nend";
    assert!(glyphgraph_core::parse(src).is_err());
}

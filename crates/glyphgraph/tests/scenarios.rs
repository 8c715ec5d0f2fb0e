//! End-to-end coverage driving the facade the way a caller actually would:
//! one Mermaid-dialect source string in, one rendered document out, with no
//! knowledge of which crate did the parsing, layout, or drawing.

use glyphgraph::{AsciiOptions, RenderOptions};

fn render(source: &str, opts: &RenderOptions) -> String {
    glyphgraph::render(source, opts).expect("render should succeed")
}

#[test]
fn flowchart_with_default_theme_renders_nodes_and_arrowheads() {
    let svg = render("graph TD\n  A[Start] --> B[End]", &RenderOptions::default());
    assert!(svg.contains(">Start</text>"));
    assert!(svg.contains(">End</text>"));
    assert!(svg.contains(r#"marker-end="url(#arrow-end)""#));
    assert!(svg.contains("--bg:#FFFFFF"));
    roxmltree::Document::parse(&svg).expect("output must be well-formed XML");
}

#[test]
fn custom_colours_land_verbatim_in_the_style_attribute() {
    let opts = RenderOptions {
        bg: "#18181B".to_string(),
        fg: "#FAFAFA".to_string(),
        ..RenderOptions::default()
    };
    let svg = render("graph TD\n  A --> B", &opts);
    assert!(svg.contains("--bg:#18181B;--fg:#FAFAFA"));
}

#[test]
fn er_diagram_renders_entities_relationship_label_and_crows_foot_line() {
    let svg = render("erDiagram\n  CUSTOMER ||--o{ ORDER : places", &RenderOptions::default());
    assert!(svg.contains(">CUSTOMER</text>"));
    assert!(svg.contains(">ORDER</text>"));
    assert!(svg.contains(">places</text>"));
    assert!(svg.contains("<polyline"));
    assert!(svg.matches("<line ").count() >= 2);
    roxmltree::Document::parse(&svg).expect("output must be well-formed XML");
}

#[test]
fn state_diagram_composite_state_label_appears_exactly_once() {
    let source = "stateDiagram-v2\n\
        [*] --> Idle\n\
        Idle --> Processing : submit\n\
        state Processing { parse --> validate }\n\
        Processing --> Complete : done";
    let svg = render(source, &RenderOptions::default());
    assert_eq!(svg.matches(">Processing</text>").count(), 1);
    assert!(svg.contains(">parse</text>"));
    assert!(svg.contains(">submit</text>"));
    roxmltree::Document::parse(&svg).expect("output must be well-formed XML");
}

#[test]
fn sequence_diagram_renders_a_note_and_the_dashed_reply_style() {
    let source = "sequenceDiagram\n  A->>B: Hello\n  Note right of B: Think\n  B-->>A: Hi";
    let svg = render(source, &RenderOptions::default());
    assert!(svg.contains("stroke-dasharray"));
    assert!(svg.contains(">Think</text>"));
}

#[test]
fn flowchart_renders_a_hexagon_and_a_cylinder_cap() {
    let svg = render("graph TD\n  A{{Decision}} --> B[(Database)]", &RenderOptions::default());
    assert!(svg.contains("<polygon"));
    assert!(svg.contains(">Decision</text>"));
    assert!(svg.contains(">Database</text>"));
}

#[test]
fn pseudostate_edges_do_not_dangle_the_layout() {
    // Regression: `[*]` used to parse to an empty node id and the edge to it
    // would fail the layout engine's dangling-edge check.
    let svg = render("stateDiagram-v2\n[*] --> Idle\nIdle --> [*]", &RenderOptions::default());
    assert!(svg.contains(">Idle</text>"));
}

#[test]
fn ascii_flowchart_bundles_a_fan_out_at_a_shared_junction() {
    let source = "flowchart LR\n  A --> B\n  A --> C\n";
    let text = glyphgraph::render_ascii(source, &AsciiOptions::default()).unwrap();
    assert!(text.contains('●'));
    assert!(!text.contains('/'));
    assert!(!text.contains('\\'));
}

#[test]
fn unclosed_sequence_block_does_not_fail_the_whole_diagram() {
    let diagram = glyphgraph::parse("sequenceDiagram\nA->>B: hi\nloop retry\nA->>B: again");
    assert!(diagram.is_ok());
}

#[test]
fn unclosed_class_body_is_a_fatal_parse_error() {
    let result = glyphgraph::parse("classDiagram\nclass Foo {\n+int bar");
    assert!(result.is_err());
}

#![forbid(unsafe_code)]

//! Mermaid-dialect parsing and the semantic data model it produces.
//!
//! [`parse`] runs detection and dispatches to the matching family parser,
//! returning a [`model::Diagram`] that [`glyphgraph-render`] and
//! [`glyphgraph-ascii`] turn into pixels or characters. Parsing never talks
//! to a layout engine or a renderer — this crate only understands grammar.

pub mod common;
pub mod detect;
pub mod diagrams;
pub mod error;
pub mod model;
pub mod theme;

pub use error::{Error, Result};
pub use model::Diagram;
pub use theme::Theme;

use detect::DiagramFamily;

/// Detects the diagram family and parses `source` into its semantic model.
#[tracing::instrument(skip(source))]
pub fn parse(source: &str) -> Result<Diagram> {
    let (family, cleaned) = detect::detect(source);
    match family {
        DiagramFamily::Flow => diagrams::flow::parse(&cleaned, "flow").map(Diagram::Flow),
        DiagramFamily::Sequence => diagrams::sequence::parse(&cleaned).map(Diagram::Sequence),
        DiagramFamily::Class => diagrams::class::parse(&cleaned).map(Diagram::Class),
        DiagramFamily::Er => diagrams::er::parse(&cleaned).map(Diagram::Er),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dispatches_on_detected_family() {
        assert!(matches!(parse("graph TD\nA-->B").unwrap(), Diagram::Flow(_)));
        assert!(matches!(parse("sequenceDiagram\nA->>B: hi").unwrap(), Diagram::Sequence(_)));
        assert!(matches!(parse("classDiagram\nclass A").unwrap(), Diagram::Class(_)));
        assert!(matches!(parse("erDiagram\nA ||--o{ B : x").unwrap(), Diagram::Er(_)));
    }

    #[test]
    fn unrecognised_header_still_parses_as_an_empty_flow_graph() {
        let diagram = parse("pie title x\n\"a\" : 10").unwrap();
        match diagram {
            Diagram::Flow(g) => assert!(g.nodes.is_empty()),
            _ => panic!("expected flow fallback"),
        }
    }
}

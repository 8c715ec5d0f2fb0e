#![forbid(unsafe_code)]

//! Headless SVG rendering for glyphgraph diagrams: parses with
//! `glyphgraph-core`, lays graph-shaped families out with
//! `glyphgraph-layout`, and emits the themed SVG contract.

mod class;
mod er;
mod error;
mod flowchart;
mod options;
mod sequence;
mod shapes;
mod style;
mod svg;
mod text;

pub use error::{Error, Result};
pub use options::RenderOptions;

use glyphgraph_core::Diagram;

/// Parses `source` and renders it as SVG per `opts`.
#[tracing::instrument(skip(source, opts))]
pub fn render(source: &str, opts: &RenderOptions) -> Result<String> {
    let diagram = glyphgraph_core::parse(source)?;
    render_diagram(&diagram, opts)
}

/// Renders an already-parsed diagram, for callers that inspected or
/// post-processed the model before rendering it.
pub fn render_diagram(diagram: &Diagram, opts: &RenderOptions) -> Result<String> {
    match diagram {
        Diagram::Flow(g) => flowchart::render(g, opts),
        Diagram::Sequence(m) => sequence::render(m, opts),
        Diagram::Class(m) => class::render(m, opts),
        Diagram::Er(m) => er::render(m, opts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_flowchart_to_an_svg_document() {
        let svg = render("graph TD\nA[Start] --> B{Done?}", &RenderOptions::default()).unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("viewBox="));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn style_attribute_leads_with_bg_and_fg() {
        let svg = render("graph TD\nA-->B", &RenderOptions::default()).unwrap();
        let style_pos = svg.find("style=\"").unwrap() + "style=\"".len();
        assert!(svg[style_pos..].starts_with("--bg:#FFFFFF;--fg:#27272A"));
    }

    #[test]
    fn escapes_label_text() {
        let svg = render("graph TD\nA[\"<script>\"] --> B", &RenderOptions::default()).unwrap();
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn renders_each_family_without_error() {
        assert!(render("sequenceDiagram\nA->>B: hi", &RenderOptions::default()).is_ok());
        assert!(render("classDiagram\nclass A", &RenderOptions::default()).is_ok());
        assert!(render("erDiagram\nA ||--o{ B : owns", &RenderOptions::default()).is_ok());
    }

    #[test]
    fn output_is_well_formed_xml_for_every_family() {
        let sources = [
            "graph TD\nA[Start] --> B{Done?}\nsubgraph S\nC\nend",
            "sequenceDiagram\nA->>B: hi\nB-->>A: ok",
            "classDiagram\nclass A\nA <|-- B",
            "erDiagram\nA ||--o{ B : owns",
        ];
        for source in sources {
            let svg = render(source, &RenderOptions::default()).unwrap();
            roxmltree::Document::parse(&svg).unwrap_or_else(|e| panic!("invalid XML for {source:?}: {e}"));
        }
    }
}

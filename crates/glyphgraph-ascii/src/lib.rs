mod boxes;
mod canvas;
mod error;
mod grid;
mod options;
mod route;
mod validate;

pub use error::{Error, Result};
pub use options::{AsciiOptions, GraphDirection};

use std::collections::BTreeMap;
use std::collections::HashSet;

use canvas::Canvas;
use glyphgraph_core::model::Diagram;
use unicode_width::UnicodeWidthStr;

/// Renders Mermaid-dialect source to a plain-text character diagram.
///
/// Flowcharts and state diagrams get the full grid-packed, Manhattan-routed
/// treatment. The remaining families (sequence, class, entity-relationship)
/// have no natural grid-cell shape, so they fall back to a simple stacked
/// list of labeled boxes with no routed edges: enough to see what the
/// diagram contains from a terminal, not a faithful rendering of its
/// relationships.
#[tracing::instrument(skip(source))]
pub fn render_ascii(source: &str, opts: &AsciiOptions) -> Result<String> {
    let diagram = glyphgraph_core::parse(source)?;
    match diagram {
        Diagram::Flow(graph) => render_flow(&graph, opts),
        Diagram::Sequence(model) => {
            let labels = model.participants.iter().map(|p| p.label.clone()).collect();
            Ok(render_stack(&labels, opts))
        }
        Diagram::Class(model) => {
            let labels = model.classes.values().map(|c| c.label.clone()).collect();
            Ok(render_stack(&labels, opts))
        }
        Diagram::Er(model) => {
            let labels = model.entities.values().map(|e| e.label.clone()).collect();
            Ok(render_stack(&labels, opts))
        }
    }
}

fn render_flow(graph: &glyphgraph_core::model::FlowGraph, opts: &AsciiOptions) -> Result<String> {
    let layout = grid::layout(graph, opts);
    let mut canvas = Canvas::new(layout.width.max(1), layout.height.max(1));

    for (id, b) in &layout.boxes {
        let label = &graph.nodes[id.as_str()].label;
        boxes::draw(&mut canvas, opts, b, label);
    }

    // Edges that share a source or a target are bundled: they converge on a
    // junction cell one step away from the common node instead of each
    // drawing its own independent path all the way there.
    let mut by_source: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    let mut by_target: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, edge) in graph.edges.iter().enumerate() {
        if layout.boxes.contains_key(&edge.source) && layout.boxes.contains_key(&edge.target) {
            by_source.entry(edge.source.as_str()).or_default().push(i);
            by_target.entry(edge.target.as_str()).or_default().push(i);
        }
    }

    let mut bundled: HashSet<usize> = HashSet::new();
    for (&source_id, idxs) in &by_source {
        if idxs.len() < 2 {
            continue;
        }
        let source_box = &layout.boxes[source_id];
        let targets: Vec<&grid::NodeBox> = idxs.iter().map(|&i| &layout.boxes[graph.edges[i].target.as_str()]).collect();
        route::route_fan_out(&mut canvas, opts, source_box, &targets);
        bundled.extend(idxs);
    }
    for (&target_id, idxs) in &by_target {
        let remaining: Vec<usize> = idxs.iter().copied().filter(|i| !bundled.contains(i)).collect();
        if remaining.len() < 2 {
            continue;
        }
        let target_box = &layout.boxes[target_id];
        let sources: Vec<&grid::NodeBox> = remaining.iter().map(|&i| &layout.boxes[graph.edges[i].source.as_str()]).collect();
        route::route_fan_in(&mut canvas, opts, &sources, target_box);
        bundled.extend(remaining);
    }

    for (i, edge) in graph.edges.iter().enumerate() {
        if bundled.contains(&i) {
            continue;
        }
        if let (Some(source), Some(target)) = (layout.boxes.get(&edge.source), layout.boxes.get(&edge.target)) {
            route::route_edge(&mut canvas, opts, source, target);
        }
    }

    validate::check_no_diagonals(&canvas)?;
    Ok(canvas.to_text())
}

fn render_stack(labels: &[String], opts: &AsciiOptions) -> String {
    let border = 1usize;
    let width = labels
        .iter()
        .map(|l| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0)
        + 2 * opts.box_border_padding
        + 2 * border;
    let height_per_box = 1 + 2 * opts.box_border_padding + 2 * border;
    let total_height = labels.len() * height_per_box + labels.len().saturating_sub(1) * opts.padding_y;

    let mut canvas = Canvas::new(width.max(1), total_height.max(1));
    let mut y = 0;
    for label in labels {
        let b = grid::NodeBox { x: 0, y, w: width, h: height_per_box };
        boxes::draw(&mut canvas, opts, &b, label);
        y += height_per_box + opts.padding_y;
    }
    canvas.to_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_simple_flowchart_with_no_diagonals() {
        let source = "flowchart LR\n  A[Start] --> B[End]\n";
        let text = render_ascii(source, &AsciiOptions::default()).unwrap();
        assert!(text.contains("Start"));
        assert!(text.contains("End"));
        assert!(!text.contains('/'));
        assert!(!text.contains('\\'));
    }

    #[test]
    fn ascii_mode_uses_plus_and_dash_glyphs() {
        let source = "flowchart LR\n  A[Start] --> B[End]\n";
        let opts = AsciiOptions { use_ascii: true, ..Default::default() };
        let text = render_ascii(source, &opts).unwrap();
        assert!(text.contains('+'));
        assert!(!text.contains('┌'));
    }

    #[test]
    fn sequence_diagram_falls_back_to_a_stacked_list() {
        let source = "sequenceDiagram\n  Alice->>Bob: hi\n";
        let text = render_ascii(source, &AsciiOptions::default()).unwrap();
        assert!(text.contains("Alice"));
        assert!(text.contains("Bob"));
    }

    #[test]
    fn empty_graph_renders_without_panicking() {
        let text = render_ascii("flowchart LR\n", &AsciiOptions::default()).unwrap();
        assert!(text.is_empty() || text.trim().is_empty());
    }

    #[test]
    fn fan_out_edges_share_a_junction_glyph() {
        let source = "flowchart LR\n  A --> B\n  A --> C\n";
        let text = render_ascii(source, &AsciiOptions::default()).unwrap();
        assert!(text.contains('●'));
        assert!(!text.contains('/'));
        assert!(!text.contains('\\'));
    }

    #[test]
    fn fan_in_edges_share_a_junction_glyph() {
        let source = "flowchart LR\n  A --> C\n  B --> C\n";
        let text = render_ascii(source, &AsciiOptions::default()).unwrap();
        assert!(text.contains('●'));
    }

    #[test]
    fn unshared_edges_are_not_bundled() {
        let source = "flowchart LR\n  A --> B\n  C --> D\n";
        let text = render_ascii(source, &AsciiOptions::default()).unwrap();
        assert!(!text.contains('●'));
    }
}

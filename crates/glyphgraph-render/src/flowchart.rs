//! `graph`/`flowchart` (and `stateDiagram-v2`, which shares the same model)
//! SVG emission: node boxes, edges with labels, and subgraph cluster frames.

use glyphgraph_core::model::{Direction as CoreDirection, EdgeStyle, FlowGraph, NodeShape, Subgraph};
use glyphgraph_layout::{self as layout, Direction as LayoutDirection, EdgeSpec, NodeSpec, SubgraphSpec};

use crate::error::Result;
use crate::options::RenderOptions;
use crate::shapes;
use crate::style;
use crate::svg::Svg;
use crate::text;

const NODE_PAD_X: f64 = 20.0;
const NODE_PAD_Y: f64 = 14.0;

fn to_layout_direction(d: CoreDirection) -> LayoutDirection {
    match d {
        CoreDirection::Td => LayoutDirection::Td,
        CoreDirection::Lr => LayoutDirection::Lr,
        CoreDirection::Bt => LayoutDirection::Bt,
        CoreDirection::Rl => LayoutDirection::Rl,
    }
}

fn shape_size_multiplier(shape: NodeShape) -> (f64, f64) {
    match shape {
        NodeShape::Diamond => (1.8, 1.9),
        NodeShape::Hexagon => (1.5, 1.2),
        NodeShape::Circle | NodeShape::DoubleCircle => (1.5, 1.5),
        NodeShape::StateStart | NodeShape::StateEnd => (0.3, 0.4),
        _ => (1.0, 1.0),
    }
}

fn flatten_subgraphs(subgraphs: &[Subgraph], out: &mut Vec<SubgraphSpec>) {
    for sg in subgraphs {
        let mut children = sg.child_nodes.clone();
        children.extend(sg.child_subgraphs.iter().map(|c| c.id.clone()));
        out.push(SubgraphSpec {
            id: sg.id.clone(),
            header_height: if sg.label.is_empty() { 0.0 } else { text::LINE_HEIGHT + 8.0 },
            children,
        });
        flatten_subgraphs(&sg.child_subgraphs, out);
    }
}

fn class_suffix(graph: &FlowGraph, id: &str) -> String {
    graph.node_classes.get(id).map(|c| format!(" node-{c}")).unwrap_or_default()
}

pub fn render(graph: &FlowGraph, opts: &RenderOptions) -> Result<String> {
    let node_ids: Vec<&String> = graph.nodes.keys().collect();
    let node_specs: Vec<NodeSpec> = node_ids
        .iter()
        .map(|id| {
            let node = &graph.nodes[id.as_str()];
            let (tw, th) = text::block_size(&node.label, 220.0);
            let (mx, my) = shape_size_multiplier(node.shape);
            NodeSpec {
                id: (*id).clone(),
                width: ((tw + 2.0 * NODE_PAD_X) * mx).max(48.0),
                height: ((th + 2.0 * NODE_PAD_Y) * my).max(36.0),
            }
        })
        .collect();

    let edge_specs: Vec<EdgeSpec> = graph
        .edges
        .iter()
        .map(|e| {
            let (w, h) = e.label.as_deref().map(|l| text::block_size(l, 160.0)).unwrap_or((0.0, 0.0));
            EdgeSpec { from: e.source.clone(), to: e.target.clone(), label_width: w, label_height: h }
        })
        .collect();

    let mut subgraph_specs = Vec::new();
    flatten_subgraphs(&graph.subgraphs, &mut subgraph_specs);
    // A composite state (`state X { ... }`) shares its id with whatever plain
    // node an edge referencing `X` already materialized. The cluster frame
    // carries that label, so the plain box is skipped to avoid drawing it twice.
    let composite_ids: std::collections::HashSet<&str> = subgraph_specs.iter().map(|s| s.id.as_str()).collect();

    let layout_opts = opts.layout_options(to_layout_direction(graph.direction));
    let result = layout::layout(&node_specs, &edge_specs, &subgraph_specs, &layout_opts)?;

    let mut svg = Svg::new();
    svg.raw(&style::svg_open(result.width, result.height, opts));
    svg.raw(style::common_markers());

    svg.raw(r#"<g class="clusters">"#);
    for sg in flatten_subgraph_order(&graph.subgraphs) {
        if let Some(b) = result.subgraphs.get(&sg.id) {
            svg.rect(b.x, b.y, b.width, b.height, 4.0, "cluster");
            if !sg.label.is_empty() {
                svg.text(b.x + 10.0, b.y + text::LINE_HEIGHT, "start", "cluster-label", &sg.label);
            }
        }
    }
    svg.raw("</g>");

    svg.raw(r#"<g class="edges">"#);
    for (edge, route) in graph.edges.iter().zip(result.edges.iter()) {
        let class = match edge.style {
            EdgeStyle::Solid => "edge",
            EdgeStyle::Dotted => "edge dotted",
            EdgeStyle::Thick => "edge thick",
        };
        let marker = edge.has_arrow_end.then_some("arrow-end");
        svg.polyline(&route.points, class, marker);
        if let Some((lx, ly)) = route.label_anchor {
            if let Some(label) = &edge.label {
                svg.text(lx, ly, "middle", "edge-label", label);
            }
        }
    }
    svg.raw("</g>");

    svg.raw(r#"<g class="nodes">"#);
    for id in &node_ids {
        if composite_ids.contains(id.as_str()) {
            continue;
        }
        let node = &graph.nodes[id.as_str()];
        let b = result.nodes[id.as_str()];
        let class = format!("node{}", class_suffix(graph, id));
        shapes::draw(&mut svg, node.shape, b, &class);
        let (_, th) = text::block_size(&node.label, 220.0);
        let cy = b.y + b.height / 2.0 + th / 2.0 - (text::LINE_HEIGHT - text::FONT_SIZE);
        for (i, line) in text::wrap_lines(&node.label, 220.0).iter().enumerate() {
            svg.text(
                b.x + b.width / 2.0,
                cy - th + (i as f64 + 1.0) * text::LINE_HEIGHT,
                "middle",
                "node-label",
                line,
            );
        }
    }
    svg.raw("</g>");

    svg.raw("</svg>");
    Ok(svg.body)
}

fn flatten_subgraph_order(subgraphs: &[Subgraph]) -> Vec<&Subgraph> {
    let mut out = Vec::new();
    for sg in subgraphs {
        out.push(sg);
        out.extend(flatten_subgraph_order(&sg.child_subgraphs));
    }
    out
}

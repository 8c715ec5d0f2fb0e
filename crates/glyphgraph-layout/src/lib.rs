//! A layered (Sugiyama-style) graph layout engine: rank assignment, crossing
//! reduction, coordinate assignment, and orthogonal edge routing through
//! dummy-node chains for edges that span more than one rank.
//!
//! This crate is deliberately independent of any single diagram family —
//! flowcharts, class diagrams and ER diagrams all feed it the same
//! `NodeSpec`/`EdgeSpec`/`SubgraphSpec` triple and get back absolute boxes
//! and polylines. Sequence diagrams use their own column/row slotting
//! instead (see `glyphgraph-render::sequence`), and the ASCII renderer uses
//! its own grid packer — this engine only serves the four graph-shaped SVG
//! families.

mod acyclic;
mod dummy;
mod error;
mod geometry;
mod order;
mod position;
mod rank;

pub use error::LayoutError;
pub use geometry::arc_length_midpoint;

use glyphgraph_graph::Graph;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Td,
    Lr,
    Bt,
    Rl,
}

#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub label_width: f64,
    pub label_height: f64,
}

#[derive(Debug, Clone)]
pub struct SubgraphSpec {
    pub id: String,
    /// Height of the label band reserved at the top of the frame.
    pub header_height: f64,
    /// Node ids and nested subgraph ids directly contained in this subgraph
    /// (not transitively — callers pass the tree, we recurse).
    pub children: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub direction: Direction,
    pub padding: f64,
    pub node_spacing: f64,
    pub layer_spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Td,
            padding: 40.0,
            node_spacing: 24.0,
            layer_spacing: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct EdgeRoute {
    pub points: Vec<(f64, f64)>,
    pub label_anchor: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubgraphBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub nodes: FxHashMap<String, NodeBox>,
    /// Parallel to the `edges` slice passed into [`layout`].
    pub edges: Vec<EdgeRoute>,
    pub subgraphs: FxHashMap<String, SubgraphBox>,
    pub width: f64,
    pub height: f64,
}

/// Runs the full pipeline: cycle breaking, ranking, ordering, coordinate
/// assignment, edge routing, and subgraph bounding-box computation.
pub fn layout(
    nodes: &[NodeSpec],
    edges: &[EdgeSpec],
    subgraphs: &[SubgraphSpec],
    opts: &LayoutOptions,
) -> Result<LayoutResult, LayoutError> {
    for n in nodes {
        if n.width < 0.0 || n.height < 0.0 {
            return Err(LayoutError::NegativeDimensions { id: n.id.clone() });
        }
    }

    let node_ids: std::collections::HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    for e in edges {
        if !node_ids.contains(e.from.as_str()) {
            return Err(LayoutError::DanglingEdge { id: e.from.clone() });
        }
        if !node_ids.contains(e.to.as_str()) {
            return Err(LayoutError::DanglingEdge { id: e.to.clone() });
        }
    }

    let span = tracing::debug_span!("layout", nodes = nodes.len(), edges = edges.len());
    let _g = span.enter();

    // Self-loops are routed separately; they never enter the ranked graph.
    let (self_edges, plain_edges): (Vec<usize>, Vec<usize>) = edges
        .iter()
        .enumerate()
        .partition(|(_, e)| e.from == e.to);

    let mut base: Graph<(), ()> = Graph::new();
    for n in nodes {
        base.set_node(n.id.clone(), ());
    }
    for &ix in &plain_edges {
        let e = &edges[ix];
        base.set_edge(e.from.clone(), e.to.clone(), Some(format!("e{ix}")), ());
    }

    let reversed = acyclic::reversed_edges(&base);
    let ranks = rank::assign_ranks(&base, &reversed);

    let chains = dummy::build_chains(nodes, edges, &plain_edges, &ranks);
    let ordered = order::order_layers(&chains.expanded, &chains.all_ranks);
    let (coords, layer_extent) = position::assign_coordinates(&ordered, &chains, opts);

    let mut node_boxes: FxHashMap<String, NodeBox> = FxHashMap::default();
    for n in nodes {
        let (cx, cy) = coords[&n.id];
        node_boxes.insert(
            n.id.clone(),
            NodeBox {
                x: cx - n.width / 2.0,
                y: cy - n.height / 2.0,
                width: n.width,
                height: n.height,
            },
        );
    }

    let mut routes = vec![
        EdgeRoute {
            points: Vec::new(),
            label_anchor: None,
        };
        edges.len()
    ];

    for &ix in &plain_edges {
        let e = &edges[ix];
        let chain = &chains[ix];
        let mut pts: Vec<(f64, f64)> = chain.iter().map(|id| coords[id]).collect();
        if reversed.contains(&(e.from.clone(), e.to.clone())) {
            pts.reverse();
        }
        let from_box = node_boxes[&e.from];
        let to_box = node_boxes[&e.to];
        let points = geometry::clip_polyline_to_boxes(&pts, from_box, to_box);
        let label_anchor = (e.label_width > 0.0 || e.label_height > 0.0)
            .then(|| arc_length_midpoint(&points));
        routes[ix] = EdgeRoute { points, label_anchor };
    }

    for &ix in &self_edges {
        let e = &edges[ix];
        let b = node_boxes[&e.from];
        let points = geometry::self_loop_points(b, opts.node_spacing.max(20.0));
        let label_anchor = (e.label_width > 0.0 || e.label_height > 0.0)
            .then(|| arc_length_midpoint(&points));
        routes[ix] = EdgeRoute { points, label_anchor };
    }

    let mut subgraph_boxes: FxHashMap<String, SubgraphBox> = FxHashMap::default();
    for sg in order_subgraphs_leaves_first(subgraphs) {
        let descendants = collect_descendant_node_ids(sg, subgraphs);
        if descendants.is_empty() {
            // Empty subgraph: a small labelled frame anchored at the canvas origin area;
            // callers typically reposition it via their own placeholder-node convention.
            subgraph_boxes.insert(
                sg.id.clone(),
                SubgraphBox {
                    x: opts.padding,
                    y: opts.padding,
                    width: 160.0,
                    height: 80.0 + sg.header_height,
                },
            );
            continue;
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for id in &descendants {
            if let Some(b) = node_boxes.get(id) {
                min_x = min_x.min(b.x);
                min_y = min_y.min(b.y);
                max_x = max_x.max(b.x + b.width);
                max_y = max_y.max(b.y + b.height);
            }
            if let Some(b) = subgraph_boxes.get(id) {
                min_x = min_x.min(b.x);
                min_y = min_y.min(b.y);
                max_x = max_x.max(b.x + b.width);
                max_y = max_y.max(b.y + b.height);
            }
        }
        const FRAME_PAD: f64 = 12.0;
        subgraph_boxes.insert(
            sg.id.clone(),
            SubgraphBox {
                x: min_x - FRAME_PAD,
                y: min_y - FRAME_PAD - sg.header_height,
                width: (max_x - min_x) + 2.0 * FRAME_PAD,
                height: (max_y - min_y) + 2.0 * FRAME_PAD + sg.header_height,
            },
        );
    }

    let mut width = 2.0 * opts.padding + layer_extent.0;
    let mut height = 2.0 * opts.padding + layer_extent.1;
    for b in node_boxes.values() {
        width = width.max(b.x + b.width + opts.padding);
        height = height.max(b.y + b.height + opts.padding);
    }
    for b in subgraph_boxes.values() {
        width = width.max(b.x + b.width + opts.padding);
        height = height.max(b.y + b.height + opts.padding);
    }

    Ok(LayoutResult {
        nodes: node_boxes,
        edges: routes,
        subgraphs: subgraph_boxes,
        width,
        height,
    })
}

fn collect_descendant_node_ids(sg: &SubgraphSpec, all: &[SubgraphSpec]) -> Vec<String> {
    let mut out = Vec::new();
    for child in &sg.children {
        if let Some(nested) = all.iter().find(|s| &s.id == child) {
            out.extend(collect_descendant_node_ids(nested, all));
        } else {
            out.push(child.clone());
        }
    }
    out
}

fn order_subgraphs_leaves_first(subgraphs: &[SubgraphSpec]) -> Vec<&SubgraphSpec> {
    // A subgraph containing nested subgraphs must be sized after its children,
    // so process in depth order, deepest first.
    fn depth(id: &str, all: &[SubgraphSpec]) -> usize {
        match all.iter().find(|s| s.id == id) {
            None => 0,
            Some(sg) => 1 + sg
                .children
                .iter()
                .map(|c| depth(c, all))
                .max()
                .unwrap_or(0),
        }
    }
    let mut v: Vec<&SubgraphSpec> = subgraphs.iter().collect();
    v.sort_by_key(|sg| std::cmp::Reverse(depth(&sg.id, subgraphs)));
    v
}

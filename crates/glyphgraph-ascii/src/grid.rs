//! Grid packing: each node gets a `(column, row)` cell on a logical grid,
//! columns/rows are sized to the widest/tallest box they hold, and those
//! sizes accumulate into absolute pixel-free character coordinates.

use std::collections::HashMap;

use glyphgraph_core::model::FlowGraph;
use unicode_width::UnicodeWidthStr;

use crate::options::{AsciiOptions, GraphDirection};

#[derive(Debug, Clone, Copy)]
pub struct NodeBox {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

pub struct GridLayout {
    pub boxes: HashMap<String, NodeBox>,
    pub width: usize,
    pub height: usize,
}

/// Longest-path rank assignment; tolerant of cycles (a back edge just never
/// increases a rank past the fixed iteration budget, so layout always
/// terminates).
fn assign_ranks(order: &[&String], out_edges: &HashMap<&str, Vec<&str>>) -> HashMap<String, usize> {
    let mut rank: HashMap<String, usize> = order.iter().map(|id| (id.to_string(), 0)).collect();
    for _ in 0..order.len() {
        let mut changed = false;
        for id in order {
            let r = rank[id.as_str()];
            if let Some(targets) = out_edges.get(id.as_str()) {
                for t in targets {
                    let next = r + 1;
                    if next > *rank.get(*t).unwrap_or(&0) {
                        rank.insert((*t).to_string(), next);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }
    rank
}

pub fn layout(graph: &FlowGraph, opts: &AsciiOptions) -> GridLayout {
    let ids: Vec<&String> = graph.nodes.keys().collect();
    let mut out_edges: HashMap<&str, Vec<&str>> = HashMap::new();
    for e in &graph.edges {
        out_edges.entry(e.source.as_str()).or_default().push(e.target.as_str());
    }

    let ranks = assign_ranks(&ids, &out_edges);
    let max_rank = ranks.values().copied().max().unwrap_or(0);

    let mut lanes: Vec<Vec<&String>> = vec![Vec::new(); max_rank + 1];
    for id in &ids {
        lanes[ranks[id.as_str()]].push(id);
    }

    let border = 1usize;
    let node_size = |id: &str| -> (usize, usize) {
        let label_w = UnicodeWidthStr::width(graph.nodes[id].label.as_str());
        let w = label_w + 2 * opts.box_border_padding + 2 * border;
        let h = 1 + 2 * opts.box_border_padding + 2 * border;
        (w.max(5), h.max(3))
    };

    let column_major = opts.graph_direction == GraphDirection::Lr;
    let lane_count = lanes.len();
    let max_lane_len = lanes.iter().map(Vec::len).max().unwrap_or(1).max(1);

    let mut lane_extent = vec![0usize; lane_count];
    let mut cross_extent = vec![0usize; max_lane_len];
    let mut sizes: HashMap<String, (usize, usize)> = HashMap::new();
    for (lane_ix, lane) in lanes.iter().enumerate() {
        for (cross_ix, id) in lane.iter().enumerate() {
            let (w, h) = node_size(id);
            sizes.insert(id.to_string(), (w, h));
            let lane_dim = if column_major { w } else { h };
            let cross_dim = if column_major { h } else { w };
            lane_extent[lane_ix] = lane_extent[lane_ix].max(lane_dim);
            cross_extent[cross_ix] = cross_extent[cross_ix].max(cross_dim);
        }
    }

    let mut lane_offset = vec![0usize; lane_count];
    for i in 1..lane_count {
        lane_offset[i] = lane_offset[i - 1] + lane_extent[i - 1] + opts.padding_x;
    }
    let mut cross_offset = vec![0usize; max_lane_len];
    for i in 1..max_lane_len {
        cross_offset[i] = cross_offset[i - 1] + cross_extent[i - 1] + opts.padding_y;
    }

    let mut boxes = HashMap::new();
    for (lane_ix, lane) in lanes.iter().enumerate() {
        for (cross_ix, id) in lane.iter().enumerate() {
            let (w, h) = sizes[id.as_str()];
            let (x, y) = if column_major {
                (lane_offset[lane_ix], cross_offset[cross_ix])
            } else {
                (cross_offset[cross_ix], lane_offset[lane_ix])
            };
            boxes.insert(id.to_string(), NodeBox { x, y, w, h });
        }
    }

    let width = boxes.values().map(|b| b.x + b.w).max().unwrap_or(0) + opts.padding_x;
    let height = boxes.values().map(|b| b.y + b.h).max().unwrap_or(0) + opts.padding_y;

    GridLayout { boxes, width, height }
}

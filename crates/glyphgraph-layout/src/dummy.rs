use crate::{EdgeSpec, NodeSpec};
use glyphgraph_graph::Graph;
use rustc_hash::FxHashMap;

/// Per-edge node-id chains (endpoints plus one dummy per intermediate rank),
/// the merged rank map covering both real and dummy nodes, per-node sizes
/// for the position pass, and the "expanded" graph — chain edges strung
/// together — that the ordering pass runs its barycenter sweeps over.
pub struct Chains {
    pub by_edge: Vec<Vec<String>>,
    pub all_ranks: FxHashMap<String, usize>,
    pub sizes: FxHashMap<String, (f64, f64)>,
    pub expanded: Graph<(), ()>,
}

impl std::ops::Index<usize> for Chains {
    type Output = Vec<String>;
    fn index(&self, ix: usize) -> &Vec<String> {
        &self.by_edge[ix]
    }
}

const DUMMY_SIZE: f64 = 1.0;

pub fn build_chains(
    nodes: &[NodeSpec],
    edges: &[EdgeSpec],
    plain_edges: &[usize],
    ranks: &FxHashMap<String, usize>,
) -> Chains {
    let mut all_ranks = ranks.clone();
    let mut sizes: FxHashMap<String, (f64, f64)> = nodes
        .iter()
        .map(|n| (n.id.clone(), (n.width, n.height)))
        .collect();
    let mut expanded: Graph<(), ()> = Graph::new();
    for id in ranks.keys() {
        expanded.set_node(id.clone(), ());
    }

    let mut by_edge = vec![Vec::new(); edges.len()];

    for &ix in plain_edges {
        let e = &edges[ix];
        let r_from = ranks[&e.from];
        let r_to = ranks[&e.to];
        let (lo, hi) = (r_from.min(r_to), r_from.max(r_to));

        let mut chain = vec![e.from.clone()];
        let span = hi.saturating_sub(lo);
        for (i, r) in ((lo + 1)..hi).enumerate() {
            let dummy_id = format!("__dummy_{ix}_{r}");
            expanded.set_node(dummy_id.clone(), ());
            all_ranks.insert(dummy_id.clone(), r);
            // Reserve the edge label's footprint at the dummy nearest the
            // path's midpoint so ordering gives it breathing room.
            let is_mid = span > 1 && i == (hi - lo - 1) / 2;
            let size = if is_mid && (e.label_width > 0.0 || e.label_height > 0.0) {
                (e.label_width.max(DUMMY_SIZE), e.label_height.max(DUMMY_SIZE))
            } else {
                (DUMMY_SIZE, DUMMY_SIZE)
            };
            sizes.insert(dummy_id.clone(), size);
            chain.push(dummy_id);
        }
        chain.push(e.to.clone());

        for pair in chain.windows(2) {
            expanded.set_edge(pair[0].clone(), pair[1].clone(), None::<String>, ());
        }
        by_edge[ix] = chain;
    }

    Chains {
        by_edge,
        all_ranks,
        sizes,
        expanded,
    }
}

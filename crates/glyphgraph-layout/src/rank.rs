use glyphgraph_graph::Graph;
use rustc_hash::FxHashMap;
use std::collections::HashSet;

/// Longest-path layering over the acyclic orientation of `g` (edges in
/// `reversed` are walked `w -> v` instead of `v -> w`). Every node without a
/// predecessor in that orientation starts at rank 0; everything else sits
/// one rank below its deepest predecessor.
pub fn assign_ranks<N, E>(
    g: &Graph<N, E>,
    reversed: &HashSet<(String, String)>,
) -> FxHashMap<String, usize> {
    let mut acyclic: Graph<(), ()> = Graph::new();
    for id in g.node_ids() {
        acyclic.set_node(id, ());
    }
    for (key, _) in g.edges() {
        let (v, w) = if reversed.contains(&(key.v.clone(), key.w.clone())) {
            (key.w.clone(), key.v.clone())
        } else {
            (key.v.clone(), key.w.clone())
        };
        acyclic.set_edge(v, w, None::<String>, ());
    }

    let order = glyphgraph_graph::alg::topo_sort(&acyclic).unwrap_or_else(|| acyclic.node_ids());
    let mut ranks: FxHashMap<String, usize> = FxHashMap::default();
    for v in &order {
        let r = acyclic
            .predecessors(v)
            .into_iter()
            .filter_map(|p| ranks.get(p).copied())
            .map(|r| r + 1)
            .max()
            .unwrap_or(0);
        ranks.insert(v.clone(), r);
    }
    ranks
}

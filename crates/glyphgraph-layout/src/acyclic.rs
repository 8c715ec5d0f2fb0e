use glyphgraph_graph::Graph;
use std::collections::HashSet;

/// Identifies back edges via a DFS over the node insertion order (the same
/// order the parser saw them in, for determinism) and returns them as
/// `(from, to)` pairs. The caller treats these as reversed when computing
/// ranks, then reverses the resulting polyline back before handing it to
/// the renderer — this is the standard depth-first greedy cycle-breaking
/// heuristic, sufficient for the "detect by descent" contract in spec
/// §4.11 (cyclic *subgraph containment* is a separate, harder check done
/// by the parser itself before layout ever runs).
pub fn reversed_edges<N, E>(g: &Graph<N, E>) -> HashSet<(String, String)> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut on_stack: HashSet<String> = HashSet::new();
    let mut reversed: HashSet<(String, String)> = HashSet::new();

    fn dfs<N, E>(
        g: &Graph<N, E>,
        v: &str,
        visited: &mut HashSet<String>,
        on_stack: &mut HashSet<String>,
        reversed: &mut HashSet<(String, String)>,
    ) {
        visited.insert(v.to_string());
        on_stack.insert(v.to_string());
        for w in g.successors(v) {
            if on_stack.contains(w) {
                reversed.insert((v.to_string(), w.to_string()));
            } else if !visited.contains(w) {
                dfs(g, w, visited, on_stack, reversed);
            }
        }
        on_stack.remove(v);
    }

    for id in g.node_ids() {
        if !visited.contains(&id) {
            dfs(g, &id, &mut visited, &mut on_stack, &mut reversed);
        }
    }
    reversed
}

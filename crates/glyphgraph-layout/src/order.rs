use glyphgraph_graph::Graph;
use rustc_hash::FxHashMap;

/// Barycenter-heuristic crossing reduction: a handful of down/up sweeps,
/// each re-sorting every layer by the median position of its neighbors in
/// the adjacent layer, keeping whichever sweep produced the fewest edge
/// crossings (the same "try several passes, keep the best" approach dagre
/// uses, without its incremental transpose step; good enough for a layered
/// layout solver that isn't chasing optimal crossing counts).
pub fn order_layers(
    expanded: &Graph<(), ()>,
    all_ranks: &FxHashMap<String, usize>,
) -> Vec<Vec<String>> {
    let max_rank = all_ranks.values().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<String>> = vec![Vec::new(); max_rank + 1];
    for (id, &r) in all_ranks {
        layers[r].push(id.clone());
    }
    for layer in &mut layers {
        layer.sort();
    }

    let mut best = layers.clone();
    let mut best_crossings = count_crossings(expanded, &best);

    for _ in 0..4 {
        sweep(expanded, &mut layers, true);
        sweep(expanded, &mut layers, false);
        let c = count_crossings(expanded, &layers);
        if c < best_crossings {
            best_crossings = c;
            best = layers.clone();
        }
        if best_crossings == 0 {
            break;
        }
    }

    best
}

fn sweep(expanded: &Graph<(), ()>, layers: &mut [Vec<String>], downward: bool) {
    let n = layers.len();
    let rng: Vec<usize> = if downward { (1..n).collect() } else { (0..n.saturating_sub(1)).rev().collect() };
    for i in rng {
        let neighbor_layer = if downward { i - 1 } else { i + 1 };
        let pos: FxHashMap<&str, usize> = layers[neighbor_layer]
            .iter()
            .enumerate()
            .map(|(ix, id)| (id.as_str(), ix))
            .collect();
        let mut keyed: Vec<(f64, String)> = layers[i]
            .iter()
            .map(|id| {
                let neighbors: Vec<usize> = if downward {
                    expanded.predecessors(id).into_iter().filter_map(|p| pos.get(p).copied()).collect()
                } else {
                    expanded.successors(id).into_iter().filter_map(|s| pos.get(s).copied()).collect()
                };
                let key = median(&neighbors);
                (key, id.clone())
            })
            .collect();
        keyed.sort_by(|a, b| match (a.0.is_nan(), b.0.is_nan()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => a.0.partial_cmp(&b.0).unwrap(),
        });
        layers[i] = keyed.into_iter().map(|(_, id)| id).collect();
    }
}

fn median(xs: &[usize]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_unstable();
    let m = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[m] as f64
    } else if sorted.len() == 2 {
        (sorted[0] + sorted[1]) as f64 / 2.0
    } else {
        let left = sorted[m - 1] as f64 - sorted[0] as f64;
        let right = sorted[sorted.len() - 1] as f64 - sorted[m] as f64;
        if (left + right).abs() < f64::EPSILON {
            (sorted[m - 1] + sorted[m]) as f64 / 2.0
        } else {
            (sorted[m - 1] as f64 * right + sorted[m] as f64 * left) / (left + right)
        }
    }
}

fn count_crossings(expanded: &Graph<(), ()>, layers: &[Vec<String>]) -> usize {
    let mut total = 0;
    for pair in layers.windows(2) {
        let pos_lo: FxHashMap<&str, usize> =
            pair[0].iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
        let pos_hi: FxHashMap<&str, usize> =
            pair[1].iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for v in &pair[0] {
            for w in expanded.successors(v) {
                if let Some(&hw) = pos_hi.get(w) {
                    edges.push((pos_lo[v.as_str()], hw));
                }
            }
        }
        for i in 0..edges.len() {
            for j in (i + 1)..edges.len() {
                let (a, b) = edges[i];
                let (c, d) = edges[j];
                if (a < c && b > d) || (a > c && b < d) {
                    total += 1;
                }
            }
        }
    }
    total
}

//! A small directed multigraph, the shared substrate for the layered layout
//! engine in `glyphgraph-layout`.
//!
//! Nodes and edges both carry an arbitrary label. Edges are keyed by
//! `(source, target, name)` so that parallel edges between the same pair of
//! nodes (two flow arrows `A --> B` declared twice, or a class diagram with
//! more than one relationship between two classes) are distinct entries
//! rather than silently merged.

mod edge_key;
pub mod alg;

pub use edge_key::EdgeKey;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    key: EdgeKey,
    label: E,
}

/// A directed multigraph with string node identities.
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: IndexMap<String, N>,
    edges: Vec<EdgeEntry<E>>,
    edge_index: FxHashMap<EdgeKey, usize>,
    out: FxHashMap<String, Vec<usize>>,
    r#in: FxHashMap<String, Vec<usize>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            edge_index: FxHashMap::default(),
            out: FxHashMap::default(),
            r#in: FxHashMap::default(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.nodes.get_mut(id)
    }

    /// Inserts a node, or replaces the label of an existing one.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) {
        let id = id.into();
        if !self.nodes.contains_key(&id) {
            self.out.entry(id.clone()).or_default();
            self.r#in.entry(id.clone()).or_default();
        }
        self.nodes.insert(id, label);
    }

    /// Returns node ids in insertion order — the order callers rely on for
    /// deterministic tie-breaks during layer ordering.
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &N)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) {
        if !self.nodes.shift_remove(id).is_some() {
            return;
        }
        let doomed: Vec<EdgeKey> = self
            .edges
            .iter()
            .filter(|e| e.key.v == id || e.key.w == id)
            .map(|e| e.key.clone())
            .collect();
        for key in doomed {
            self.remove_edge(&key.v, &key.w, key.name.as_deref());
        }
        self.out.remove(id);
        self.r#in.remove(id);
    }

    pub fn set_edge(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: E,
    ) {
        let v = v.into();
        let w = w.into();
        let name = name.map(Into::into);
        let key = EdgeKey::new(v.clone(), w.clone(), name);
        if let Some(&ix) = self.edge_index.get(&key) {
            self.edges[ix].label = label;
            return;
        }
        let ix = self.edges.len();
        self.edge_index.insert(key.clone(), ix);
        self.edges.push(EdgeEntry { key, label });
        self.out.entry(v).or_default().push(ix);
        self.r#in.entry(w).or_default().push(ix);
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edge_index.contains_key(&EdgeKey::view(v, w, name))
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        let ix = *self.edge_index.get(&EdgeKey::view(v, w, name))?;
        Some(&self.edges[ix].label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let ix = *self.edge_index.get(&EdgeKey::view(v, w, name))?;
        Some(&mut self.edges[ix].label)
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) {
        let Some(ix) = self.edge_index.remove(&EdgeKey::view(v, w, name)) else {
            return;
        };
        if let Some(list) = self.out.get_mut(v) {
            list.retain(|&e| e != ix);
        }
        if let Some(list) = self.r#in.get_mut(w) {
            list.retain(|&e| e != ix);
        }
        // Leave a tombstone rather than compacting `edges`: compacting would
        // invalidate every other index stored in `out`/`in`/`edge_index`.
    }

    /// All edges as `(key, label)` pairs, in insertion order, skipping
    /// tombstones left by `remove_edge`.
    pub fn edges(&self) -> impl Iterator<Item = (&EdgeKey, &E)> {
        self.edges.iter().enumerate().filter_map(move |(ix, e)| {
            self.edge_index
                .get(&e.key)
                .filter(|&&live| live == ix)
                .map(|_| (&e.key, &e.label))
        })
    }

    pub fn out_edges(&self, v: &str) -> Vec<&EdgeKey> {
        self.out
            .get(v)
            .into_iter()
            .flatten()
            .filter_map(|&ix| {
                let e = &self.edges[ix];
                (self.edge_index.get(&e.key) == Some(&ix)).then_some(&e.key)
            })
            .collect()
    }

    pub fn in_edges(&self, w: &str) -> Vec<&EdgeKey> {
        self.r#in
            .get(w)
            .into_iter()
            .flatten()
            .filter_map(|&ix| {
                let e = &self.edges[ix];
                (self.edge_index.get(&e.key) == Some(&ix)).then_some(&e.key)
            })
            .collect()
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        self.out_edges(v).into_iter().map(|k| k.w.as_str()).collect()
    }

    pub fn predecessors(&self, w: &str) -> Vec<&str> {
        self.in_edges(w).into_iter().map(|k| k.v.as_str()).collect()
    }

    pub fn in_degree(&self, v: &str) -> usize {
        self.in_edges(v).len()
    }

    pub fn out_degree(&self, v: &str) -> usize {
        self.out_edges(v).len()
    }
}

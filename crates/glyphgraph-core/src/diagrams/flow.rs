//! Flow/state grammar: the `graph`/`flowchart`/`stateDiagram-v2` family all
//! reduce to the same node-and-edge model, so one parser serves all three.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Direction, EdgeStyle, FlowEdge, FlowGraph, FlowNode, NodeShape, Subgraph};

struct ShapeDelim {
    open: &'static str,
    close: &'static str,
    shape: NodeShape,
}

// Ordered longest-delimiter-first so `[[x]]` is tried before `[x]`.
const SHAPE_DELIMS: &[ShapeDelim] = &[
    ShapeDelim { open: "(((", close: ")))", shape: NodeShape::DoubleCircle },
    ShapeDelim { open: "([", close: "])", shape: NodeShape::Stadium },
    ShapeDelim { open: "[[", close: "]]", shape: NodeShape::Subroutine },
    ShapeDelim { open: "[(", close: ")]", shape: NodeShape::Cylinder },
    ShapeDelim { open: "((", close: "))", shape: NodeShape::Circle },
    ShapeDelim { open: "{{", close: "}}", shape: NodeShape::Hexagon },
    ShapeDelim { open: "[/", close: "\\]", shape: NodeShape::Trapezoid },
    ShapeDelim { open: "[\\", close: "/]", shape: NodeShape::TrapezoidAlt },
    ShapeDelim { open: "[/", close: "/]", shape: NodeShape::AsymmetricFlag },
    ShapeDelim { open: "[\\", close: "\\]", shape: NodeShape::AsymmetricFlag },
    ShapeDelim { open: "(", close: ")", shape: NodeShape::Rounded },
    ShapeDelim { open: "{", close: "}", shape: NodeShape::Diamond },
    ShapeDelim { open: ">", close: "]", shape: NodeShape::AsymmetricFlag },
    ShapeDelim { open: "[", close: "]", shape: NodeShape::Rectangle },
];

/// Splits `id[text]` into `(id, label, shape)`. A bare id with no trailing
/// delimiter yields `(id, id, Rectangle)`.
pub(crate) fn parse_node_ref(token: &str) -> (String, String, NodeShape) {
    let token = token.trim();
    let id_end = token
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-' || c == '.'))
        .unwrap_or(token.len());
    let id = &token[..id_end];
    let rest = &token[id_end..];
    if rest.is_empty() {
        return (id.to_string(), id.to_string(), NodeShape::Rectangle);
    }
    for delim in SHAPE_DELIMS {
        if rest.starts_with(delim.open) && rest.ends_with(delim.close) && rest.len() >= delim.open.len() + delim.close.len() {
            let inner = &rest[delim.open.len()..rest.len() - delim.close.len()];
            return (id.to_string(), unquote(inner), delim.shape);
        }
    }
    (id.to_string(), id.to_string(), NodeShape::Rectangle)
}

fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

struct EdgeOp {
    token: &'static str,
    style: EdgeStyle,
    start_arrow: bool,
    end_arrow: bool,
}

// Longest tokens first so `<-->` isn't mistaken for `-->`.
const EDGE_OPS: &[EdgeOp] = &[
    EdgeOp { token: "<-.->", style: EdgeStyle::Dotted, start_arrow: true, end_arrow: true },
    EdgeOp { token: "<-->", style: EdgeStyle::Solid, start_arrow: true, end_arrow: true },
    EdgeOp { token: "<==>", style: EdgeStyle::Thick, start_arrow: true, end_arrow: true },
    EdgeOp { token: "-.->", style: EdgeStyle::Dotted, start_arrow: false, end_arrow: true },
    EdgeOp { token: "<-.-", style: EdgeStyle::Dotted, start_arrow: true, end_arrow: false },
    EdgeOp { token: "==>", style: EdgeStyle::Thick, start_arrow: false, end_arrow: true },
    EdgeOp { token: "<==", style: EdgeStyle::Thick, start_arrow: true, end_arrow: false },
    EdgeOp { token: "-->", style: EdgeStyle::Solid, start_arrow: false, end_arrow: true },
    EdgeOp { token: "<--", style: EdgeStyle::Solid, start_arrow: true, end_arrow: false },
    EdgeOp { token: "-.-", style: EdgeStyle::Dotted, start_arrow: false, end_arrow: false },
    EdgeOp { token: "===", style: EdgeStyle::Thick, start_arrow: false, end_arrow: false },
    EdgeOp { token: "---", style: EdgeStyle::Solid, start_arrow: false, end_arrow: false },
];

fn pipe_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\|([^|]*)\|").unwrap())
}

struct Split<'a> {
    left: &'a str,
    op: &'static EdgeOp,
    label: Option<String>,
    right: &'a str,
}

/// Finds the first edge operator in `line`, preferring the longest match at
/// the earliest position so `<-->` wins over a later `-->`.
fn find_edge_op(line: &str) -> Option<(usize, usize, &'static EdgeOp)> {
    let mut best: Option<(usize, usize, &'static EdgeOp)> = None;
    for op in EDGE_OPS {
        if let Some(pos) = line.find(op.token) {
            let end = pos + op.token.len();
            let better = match best {
                None => true,
                Some((bpos, bend, _)) => pos < bpos || (pos == bpos && end - pos > bend - bpos),
            };
            if better {
                best = Some((pos, end, op));
            }
        }
    }
    best
}

fn split_edge(line: &str) -> Option<Split<'_>> {
    let (pos, end, op) = find_edge_op(line)?;
    let left = &line[..pos];
    let mut right = &line[end..];
    let label = if let Some(m) = pipe_label_re().find(right) {
        if m.start() == 0 {
            let text = pipe_label_re().captures(right).unwrap().get(1).unwrap().as_str().to_string();
            right = &right[m.end()..];
            Some(text)
        } else {
            None
        }
    } else {
        None
    };
    Some(Split { left, op, label, right })
}

fn split_ampersand(s: &str) -> Vec<&str> {
    s.split('&').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Parses `graph`/`flowchart`/`stateDiagram-v2` source (already stripped of
/// comments and directives by [`crate::detect::detect`]) into a [`FlowGraph`].
pub fn parse(source: &str, diagram_type: &'static str) -> Result<FlowGraph> {
    let mut graph = FlowGraph::default();
    let mut subgraph_stack: Vec<Subgraph> = Vec::new();
    // Parallel to `subgraph_stack`: whether the entry at this depth closes on
    // `end` (a `subgraph` block) or on a bare `}` (a `state ... {` composite).
    let mut closer_is_brace: Vec<bool> = Vec::new();
    let mut pseudostate_counter: usize = 0;
    let mut first_line = true;

    for raw_line in source.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if first_line {
            first_line = false;
            if let Some(dir) = line.split_whitespace().nth(1).and_then(Direction::parse) {
                graph.direction = dir;
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("subgraph ").or_else(|| line.strip_prefix("subgraph")) {
            let rest = rest.trim();
            let (id, label) = match rest.split_once('[') {
                Some((id, tail)) => (id.trim().to_string(), unquote(tail.trim_end_matches(']'))),
                None if rest.is_empty() => (format!("subgraph-{}", subgraph_stack.len()), String::new()),
                None => (rest.to_string(), rest.to_string()),
            };
            subgraph_stack.push(Subgraph {
                id,
                label,
                direction: None,
                child_nodes: Vec::new(),
                child_subgraphs: Vec::new(),
            });
            closer_is_brace.push(false);
            continue;
        }

        if let Some(rest) = line.strip_prefix("state ") {
            if let Some(open_idx) = rest.find('{') {
                let header = rest[..open_idx].trim();
                let (id, label) = parse_state_header(header);
                if let Some(close_idx) = rest.rfind('}') {
                    if close_idx > open_idx {
                        let inner = &rest[open_idx + 1..close_idx];
                        let mut child = Subgraph { id, label, direction: None, child_nodes: Vec::new(), child_subgraphs: Vec::new() };
                        parse_inline_composite(inner, &mut graph, &mut child, &mut pseudostate_counter);
                        match subgraph_stack.last_mut() {
                            Some(parent) => parent.child_subgraphs.push(child),
                            None => graph.subgraphs.push(child),
                        }
                        continue;
                    }
                }
                subgraph_stack.push(Subgraph { id, label, direction: None, child_nodes: Vec::new(), child_subgraphs: Vec::new() });
                closer_is_brace.push(true);
                continue;
            }
            if let Some((label, id)) = rest.split_once(" as ") {
                resolve_endpoint(&mut graph, id.trim(), &mut subgraph_stack, true, &mut pseudostate_counter, Some(unquote(label.trim())));
                continue;
            }
            materialize_node(&mut graph, rest.trim(), &mut subgraph_stack);
            continue;
        }

        if line == "end" {
            if closer_is_brace.last() == Some(&false) {
                if let Some(finished) = subgraph_stack.pop() {
                    closer_is_brace.pop();
                    if subgraph_contains(&finished, &finished.id) {
                        return Err(Error::CyclicSubgraph { id: finished.id });
                    }
                    match subgraph_stack.last_mut() {
                        Some(parent) => parent.child_subgraphs.push(finished),
                        None => graph.subgraphs.push(finished),
                    }
                }
            }
            continue;
        }

        if line == "}" {
            if closer_is_brace.last() == Some(&true) {
                if let Some(finished) = subgraph_stack.pop() {
                    closer_is_brace.pop();
                    match subgraph_stack.last_mut() {
                        Some(parent) => parent.child_subgraphs.push(finished),
                        None => graph.subgraphs.push(finished),
                    }
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("classDef ") {
            let mut parts = rest.splitn(2, char::is_whitespace);
            if let (Some(name), Some(props)) = (parts.next(), parts.next()) {
                graph.class_defs.insert(name.trim().to_string(), parse_props(props));
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("class ") {
            let mut parts = rest.rsplitn(2, char::is_whitespace);
            if let (Some(class_name), Some(ids)) = (parts.next(), parts.next()) {
                for id in ids.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    graph.node_classes.insert(id.to_string(), class_name.trim().to_string());
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("style ") {
            let mut parts = rest.splitn(2, char::is_whitespace);
            if let (Some(id), Some(props)) = (parts.next(), parts.next()) {
                graph.node_styles.insert(id.trim().to_string(), parse_props(props));
            }
            continue;
        }

        if line.starts_with("click ") || line.starts_with("%%") {
            continue;
        }

        if let Some(rest) = line.strip_prefix("accTitle:") {
            graph.acc_title = Some(rest.trim().to_string());
            continue;
        }

        if let Some(rest) = line.strip_prefix("accDescr:") {
            graph.acc_descr = Some(rest.trim().trim_matches('{').trim_matches('}').trim().to_string());
            continue;
        }

        if let Some(split) = split_edge(line) {
            let lefts = split_ampersand(split.left);
            let rights = split_ampersand(split.right);
            let left_ids: Vec<String> = lefts
                .iter()
                .map(|l| resolve_endpoint(&mut graph, l, &mut subgraph_stack, true, &mut pseudostate_counter, None))
                .collect();
            let right_ids: Vec<String> = rights
                .iter()
                .map(|r| resolve_endpoint(&mut graph, r, &mut subgraph_stack, false, &mut pseudostate_counter, None))
                .collect();
            for lid in &left_ids {
                for rid in &right_ids {
                    graph.edges.push(FlowEdge {
                        source: lid.clone(),
                        target: rid.clone(),
                        label: split.label.clone(),
                        style: split.op.style,
                        has_arrow_start: split.op.start_arrow,
                        has_arrow_end: split.op.end_arrow,
                    });
                }
            }
            continue;
        }

        // A bare node declaration with no edge: `id[label]`.
        materialize_node(&mut graph, line, &mut subgraph_stack);
    }

    while let Some(finished) = subgraph_stack.pop() {
        match subgraph_stack.last_mut() {
            Some(parent) => parent.child_subgraphs.push(finished),
            None => graph.subgraphs.push(finished),
        }
    }

    let _ = diagram_type;
    Ok(graph)
}

/// Parses the header of a `state X { ... }` or `state X as id { ... }`
/// composite block into `(id, label)`.
fn parse_state_header(header: &str) -> (String, String) {
    if let Some((label_part, id_part)) = header.split_once(" as ") {
        (id_part.trim().to_string(), unquote(label_part.trim()))
    } else {
        let h = unquote(header.trim());
        (h.clone(), h)
    }
}

/// Parses the `;`-separated statements inside an inline `state X { ... }`
/// block, attaching materialized nodes and edges to `child` instead of the
/// enclosing flowchart.
fn parse_inline_composite(inner: &str, graph: &mut FlowGraph, child: &mut Subgraph, pseudostate_counter: &mut usize) {
    for stmt in inner.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let stack = std::slice::from_mut(child);
        if let Some(split) = split_edge(stmt) {
            let lefts = split_ampersand(split.left);
            let rights = split_ampersand(split.right);
            let left_ids: Vec<String> = lefts.iter().map(|l| resolve_endpoint(graph, l, stack, true, pseudostate_counter, None)).collect();
            let right_ids: Vec<String> = rights.iter().map(|r| resolve_endpoint(graph, r, stack, false, pseudostate_counter, None)).collect();
            for lid in &left_ids {
                for rid in &right_ids {
                    graph.edges.push(FlowEdge {
                        source: lid.clone(),
                        target: rid.clone(),
                        label: split.label.clone(),
                        style: split.op.style,
                        has_arrow_start: split.op.start_arrow,
                        has_arrow_end: split.op.end_arrow,
                    });
                }
            }
        } else {
            materialize_node(graph, stmt, stack);
        }
    }
}

/// Resolves an edge endpoint token to a node id, materializing the node if
/// needed. The bare `[*]` pseudostate token is special-cased: each
/// occurrence synthesizes its own node (mermaid allows one state diagram to
/// have several independent start/end points), shaped as `StateStart` when
/// it's used as an edge source and `StateEnd` when used as a target.
fn resolve_endpoint(
    graph: &mut FlowGraph,
    token: &str,
    subgraph_stack: &mut [Subgraph],
    is_source: bool,
    pseudostate_counter: &mut usize,
    label_override: Option<String>,
) -> String {
    if token.trim() == "[*]" {
        let shape = if is_source { NodeShape::StateStart } else { NodeShape::StateEnd };
        let id = format!("__pseudostate_{pseudostate_counter}");
        *pseudostate_counter += 1;
        graph.nodes.insert(id.clone(), FlowNode { label: String::new(), shape });
        if let Some(top) = subgraph_stack.last_mut() {
            if !top.child_nodes.contains(&id) {
                top.child_nodes.push(id.clone());
            }
        }
        return id;
    }
    materialize_node(graph, token, subgraph_stack);
    let (id, _, _) = parse_node_ref(token);
    if let Some(label) = label_override {
        if let Some(node) = graph.nodes.get_mut(&id) {
            node.label = label;
        }
    }
    id
}

fn parse_props(props: &str) -> Vec<(String, String)> {
    props
        .split(',')
        .filter_map(|kv| kv.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

fn materialize_node(graph: &mut FlowGraph, token: &str, subgraph_stack: &mut [Subgraph]) {
    let (id, label, shape) = parse_node_ref(token);
    if id.is_empty() {
        return;
    }
    graph.nodes.entry(id.clone()).or_insert(FlowNode { label, shape });
    if let Some(top) = subgraph_stack.last_mut() {
        if !top.child_nodes.contains(&id) {
            top.child_nodes.push(id);
        }
    }
}

fn subgraph_contains(sg: &Subgraph, needle: &str) -> bool {
    sg.child_subgraphs.iter().any(|c| c.id == needle || subgraph_contains(c, needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_edge_with_shapes() {
        let g = parse("graph TD\nA[Start] --> B{Decision}", "flow").unwrap();
        assert_eq!(g.direction, Direction::Td);
        assert_eq!(g.nodes["A"].label, "Start");
        assert_eq!(g.nodes["B"].shape, NodeShape::Diamond);
        assert_eq!(g.edges.len(), 1);
        assert!(g.edges[0].has_arrow_end);
    }

    #[test]
    fn parses_parallel_links_and_pipe_label() {
        let g = parse("graph LR\nA & B --> C", "flow").unwrap();
        assert_eq!(g.edges.len(), 2);
        let g2 = parse("graph LR\nA -->|go| B", "flow").unwrap();
        assert_eq!(g2.edges[0].label.as_deref(), Some("go"));
    }

    #[test]
    fn rejects_subgraph_cycles() {
        // A subgraph cannot nest one that shares its own id.
        let src = "graph TD\nsubgraph s1\nsubgraph s1\nA-->B\nend\nend";
        assert!(parse(src, "flow").is_err());
    }

    #[test]
    fn tracks_class_and_style_assignments() {
        let g = parse(
            "graph TD\nclassDef big fill:#f00,stroke-width:4px\nA-->B\nclass A big\nstyle B fill:#0f0",
            "flow",
        )
        .unwrap();
        assert_eq!(g.node_classes["A"], "big");
        assert_eq!(g.node_styles["B"][0], ("fill".to_string(), "#0f0".to_string()));
    }

    #[test]
    fn pseudostate_tokens_materialize_start_and_end_nodes() {
        let g = parse("stateDiagram-v2\n[*] --> Idle\nIdle --> [*]", "state").unwrap();
        assert_eq!(g.edges.len(), 2);
        let start = &g.nodes[g.edges[0].source.as_str()];
        assert_eq!(start.shape, NodeShape::StateStart);
        let end = &g.nodes[g.edges[1].target.as_str()];
        assert_eq!(end.shape, NodeShape::StateEnd);
        assert_ne!(g.edges[0].source, g.edges[1].target);
    }

    #[test]
    fn repeated_pseudostates_get_distinct_ids() {
        let g = parse("stateDiagram-v2\n[*] --> A\n[*] --> B", "state").unwrap();
        assert_ne!(g.edges[0].source, g.edges[1].source);
        assert_eq!(g.nodes.len(), 4);
    }

    #[test]
    fn inline_composite_state_builds_a_subgraph() {
        let g = parse("stateDiagram-v2\nstate Processing { parse --> validate }", "state").unwrap();
        assert_eq!(g.subgraphs.len(), 1);
        let composite = &g.subgraphs[0];
        assert_eq!(composite.id, "Processing");
        assert!(composite.child_nodes.contains(&"parse".to_string()));
        assert!(composite.child_nodes.contains(&"validate".to_string()));
        assert!(g.edges.iter().any(|e| e.source == "parse" && e.target == "validate"));
    }

    #[test]
    fn multiline_composite_state_closes_on_brace() {
        let src = "stateDiagram-v2\nstate Processing {\nparse --> validate\n}\nProcessing --> Done";
        let g = parse(src, "state").unwrap();
        assert_eq!(g.subgraphs.len(), 1);
        assert_eq!(g.subgraphs[0].id, "Processing");
        assert!(g.edges.iter().any(|e| e.source == "Processing" && e.target == "Done"));
    }
}

//! `classDiagram` SVG emission: each class is a three-section box (name,
//! attributes, methods) laid out by the shared graph engine; relationships
//! draw the UML marker that matches their kind.

use glyphgraph_core::model::{ClassModel, Member, RelationshipKind, Visibility};
use glyphgraph_layout::{self as layout, Direction, EdgeSpec, NodeSpec};

use crate::error::Result;
use crate::options::RenderOptions;
use crate::style;
use crate::svg::Svg;
use crate::text;

const PAD: f64 = 10.0;
const HEADER_HEIGHT: f64 = text::LINE_HEIGHT + 6.0;

fn visibility_glyph(v: Option<Visibility>) -> &'static str {
    match v {
        Some(Visibility::Public) => "+",
        Some(Visibility::Private) => "-",
        Some(Visibility::Protected) => "#",
        Some(Visibility::Package) => "~",
        None => "",
    }
}

fn member_line(m: &Member) -> String {
    let mut s = visibility_glyph(m.visibility).to_string();
    s.push_str(&m.name);
    if let Some(args) = &m.args {
        s.push('(');
        s.push_str(args);
        s.push(')');
    }
    if let Some(ty) = &m.type_hint {
        s.push_str(": ");
        s.push_str(ty);
    }
    if m.is_abstract {
        s.push('*');
    }
    if m.is_static {
        s.push('$');
    }
    s
}

fn marker_for(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::Inheritance => "marker-triangle",
        RelationshipKind::Realization => "marker-triangle-open",
        RelationshipKind::Composition => "marker-diamond-filled",
        RelationshipKind::Aggregation => "marker-diamond-open",
        RelationshipKind::Dependency => "marker-open-dashed",
        RelationshipKind::Association => "arrow-open-end",
    }
}

fn class_defs() -> &'static str {
    r#"<defs>
<marker id="marker-triangle" viewBox="0 0 12 12" refX="11" refY="6" markerWidth="10" markerHeight="10" orient="auto-start-reverse"><path d="M0 0 L12 6 L0 12 Z" class="arrow"/></marker>
<marker id="marker-triangle-open" viewBox="0 0 12 12" refX="11" refY="6" markerWidth="10" markerHeight="10" orient="auto-start-reverse"><path d="M0 0 L12 6 L0 12 Z" fill="var(--_node-fill)" stroke="var(--_arrow)"/></marker>
<marker id="marker-diamond-filled" viewBox="0 0 14 10" refX="13" refY="5" markerWidth="12" markerHeight="10" orient="auto-start-reverse"><path d="M0 5 L7 0 L14 5 L7 10 Z" class="arrow"/></marker>
<marker id="marker-diamond-open" viewBox="0 0 14 10" refX="13" refY="5" markerWidth="12" markerHeight="10" orient="auto-start-reverse"><path d="M0 5 L7 0 L14 5 L7 10 Z" fill="var(--_node-fill)" stroke="var(--_arrow)"/></marker>
</defs>"#
}

pub fn render(model: &ClassModel, opts: &RenderOptions) -> Result<String> {
    let ids: Vec<&String> = model.classes.keys().collect();
    let node_specs: Vec<NodeSpec> = ids
        .iter()
        .map(|id| {
            let def = &model.classes[id.as_str()];
            let mut lines = vec![def.label.clone()];
            lines.extend(def.attributes.iter().map(member_line));
            lines.extend(def.methods.iter().map(member_line));
            let width = lines.iter().map(|l| text::measure_width(l)).fold(100.0_f64, f64::max) + 2.0 * PAD;
            let row_count = (def.attributes.len() + def.methods.len()).max(1) as f64;
            let height = HEADER_HEIGHT + row_count * text::LINE_HEIGHT + 2.0 * PAD;
            NodeSpec { id: (*id).clone(), width, height }
        })
        .collect();

    let edge_specs: Vec<EdgeSpec> = model
        .relationships
        .iter()
        .map(|r| {
            let (w, h) = r.label.as_deref().map(|l| text::block_size(l, 140.0)).unwrap_or((0.0, 0.0));
            EdgeSpec { from: r.from.clone(), to: r.to.clone(), label_width: w, label_height: h }
        })
        .collect();

    let layout_opts = opts.layout_options(Direction::Td);
    let result = layout::layout(&node_specs, &edge_specs, &[], &layout_opts)?;

    let mut svg = Svg::new();
    svg.raw(&style::svg_open(result.width, result.height, opts));
    svg.raw(class_defs());

    svg.raw(r#"<g class="edges">"#);
    for (rel, route) in model.relationships.iter().zip(result.edges.iter()) {
        svg.polyline(&route.points, "edge", Some(marker_for(rel.kind)));
        if let Some((lx, ly)) = route.label_anchor {
            if let Some(label) = &rel.label {
                svg.text(lx, ly, "middle", "edge-label", label);
            }
        }
    }
    svg.raw("</g>");

    svg.raw(r#"<g class="nodes">"#);
    for id in &ids {
        let def = &model.classes[id.as_str()];
        let b = result.nodes[id.as_str()];
        svg.rect(b.x, b.y, b.width, b.height, 2.0, "node");
        svg.text(b.x + b.width / 2.0, b.y + HEADER_HEIGHT - 4.0, "middle", "node-label", &def.label);
        svg.raw(&format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" class="divider"/>"#,
            x1 = b.x,
            x2 = b.x + b.width,
            y = b.y + HEADER_HEIGHT
        ));
        let mut row = 0.0;
        for m in def.attributes.iter().chain(def.methods.iter()) {
            let ty = b.y + HEADER_HEIGHT + PAD + row * text::LINE_HEIGHT + text::FONT_SIZE;
            svg.text(b.x + PAD, ty, "start", "node-label", &member_line(m));
            row += 1.0;
        }
    }
    svg.raw("</g>");
    svg.raw("</svg>");
    Ok(svg.body)
}

//! `erDiagram` SVG emission: entity attribute tables plus crow's-foot
//! relationship markers at both ends of every connecting line.

use glyphgraph_core::model::{Cardinality, ErModel, KeyKind};
use glyphgraph_layout::{self as layout, Direction, EdgeSpec, NodeSpec};

use crate::error::Result;
use crate::options::RenderOptions;
use crate::style;
use crate::svg::Svg;
use crate::text;

const PAD: f64 = 10.0;
const HEADER_HEIGHT: f64 = text::LINE_HEIGHT + 8.0;

/// The crow's-foot marker geometry: `One` is a single perpendicular tick,
/// `ZeroOne` adds a small ring, `Many` fans into three tines, `ZeroMany`
/// combines the ring with the fan.
fn marker_id(card: Cardinality) -> &'static str {
    match card {
        Cardinality::One => "card-one",
        Cardinality::ZeroOne => "card-zero-one",
        Cardinality::Many => "card-many",
        Cardinality::ZeroMany => "card-zero-many",
    }
}

fn er_defs() -> &'static str {
    r#"<defs>
<marker id="card-one" viewBox="0 0 12 12" refX="9" refY="6" markerWidth="10" markerHeight="10" orient="auto">
<path d="M6 0 L6 12 M9 0 L9 12" stroke="var(--_line)" fill="none"/>
</marker>
<marker id="card-zero-one" viewBox="0 0 16 12" refX="13" refY="6" markerWidth="14" markerHeight="10" orient="auto">
<circle cx="4" cy="6" r="3" fill="var(--_node-fill)" stroke="var(--_line)"/>
<path d="M9 0 L9 12" stroke="var(--_line)" fill="none"/>
</marker>
<marker id="card-many" viewBox="0 0 12 12" refX="9" refY="6" markerWidth="10" markerHeight="10" orient="auto">
<path d="M9 0 L9 12 M9 6 L0 0 M9 6 L0 6 M9 6 L0 12" stroke="var(--_line)" fill="none"/>
</marker>
<marker id="card-zero-many" viewBox="0 0 16 12" refX="13" refY="6" markerWidth="14" markerHeight="10" orient="auto">
<circle cx="4" cy="6" r="3" fill="var(--_node-fill)" stroke="var(--_line)"/>
<path d="M9 6 L9 0 M9 6 L16 0 M9 6 L16 6 M9 6 L16 12" stroke="var(--_line)" fill="none"/>
</marker>
</defs>"#
}

fn key_badge(keys: &[KeyKind]) -> String {
    keys.iter()
        .map(|k| match k {
            KeyKind::Pk => "PK",
            KeyKind::Fk => "FK",
            KeyKind::Uk => "UK",
        })
        .collect::<Vec<_>>()
        .join(",")
}

pub fn render(model: &ErModel, opts: &RenderOptions) -> Result<String> {
    let ids: Vec<&String> = model.entities.keys().collect();
    let node_specs: Vec<NodeSpec> = ids
        .iter()
        .map(|id| {
            let e = &model.entities[id.as_str()];
            let widest = e
                .attributes
                .iter()
                .map(|a| text::measure_width(&format!("{} {} {}", a.type_name, a.name, key_badge(&a.keys))))
                .fold(text::measure_width(&e.label), f64::max);
            let row_count = e.attributes.len().max(1) as f64;
            NodeSpec {
                id: (*id).clone(),
                width: widest + 2.0 * PAD,
                height: HEADER_HEIGHT + row_count * text::LINE_HEIGHT + 2.0 * PAD,
            }
        })
        .collect();

    let edge_specs: Vec<EdgeSpec> = model
        .relationships
        .iter()
        .map(|r| {
            let (w, h) = text::block_size(&r.label, 140.0);
            EdgeSpec { from: r.entity1.clone(), to: r.entity2.clone(), label_width: w, label_height: h }
        })
        .collect();

    let layout_opts = opts.layout_options(Direction::Lr);
    let result = layout::layout(&node_specs, &edge_specs, &[], &layout_opts)?;

    let mut svg = Svg::new();
    svg.raw(&style::svg_open(result.width, result.height, opts));
    svg.raw(er_defs());

    svg.raw(r#"<g class="edges">"#);
    for (rel, route) in model.relationships.iter().zip(result.edges.iter()) {
        let class = if rel.identifying { "edge" } else { "edge dotted" };
        svg.polyline_markers(&route.points, class, Some(marker_id(rel.cardinality1)), Some(marker_id(rel.cardinality2)));
        if let Some((lx, ly)) = route.label_anchor {
            svg.text(lx, ly, "middle", "edge-label", &rel.label);
        }
    }
    svg.raw("</g>");

    svg.raw(r#"<g class="nodes">"#);
    for id in &ids {
        let e = &model.entities[id.as_str()];
        let b = result.nodes[id.as_str()];
        svg.rect(b.x, b.y, b.width, b.height, 2.0, "node");
        svg.text(b.x + b.width / 2.0, b.y + HEADER_HEIGHT - 6.0, "middle", "node-label", &e.label);
        svg.raw(&format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" class="divider"/>"#,
            x1 = b.x,
            x2 = b.x + b.width,
            y = b.y + HEADER_HEIGHT
        ));
        for (i, a) in e.attributes.iter().enumerate() {
            let ty = b.y + HEADER_HEIGHT + PAD + i as f64 * text::LINE_HEIGHT + text::FONT_SIZE;
            svg.text(b.x + PAD, ty, "start", "node-label", &format!("{} {}", a.type_name, a.name));
            if !a.keys.is_empty() {
                svg.text(b.x + b.width - PAD, ty, "end", "key-badge", &key_badge(&a.keys));
            }
        }
    }
    svg.raw("</g>");
    svg.raw("</svg>");
    Ok(svg.body)
}

//! `sequenceDiagram` SVG emission. Unlike the graph-shaped families this
//! doesn't go through the layered layout engine at all: participants sit in
//! fixed columns and events stack in fixed rows, exactly as the grammar
//! orders them.

use std::collections::HashMap;

use glyphgraph_core::model::{
    ActivationEdge, BlockKind, DividerKind, NotePosition, SequenceEvent, SequenceModel,
};

use crate::error::Result;
use crate::options::RenderOptions;
use crate::style;
use crate::svg::Svg;
use crate::text;

const COLUMN_WIDTH: f64 = 150.0;
const ROW_HEIGHT: f64 = 34.0;
const HEADER_HEIGHT: f64 = 40.0;
const TOP_PAD: f64 = 20.0;
const SIDE_PAD: f64 = 30.0;
const ACTIVATION_WIDTH: f64 = 10.0;

fn seq_defs() -> &'static str {
    r#"<defs>
<marker id="seq-arrow-filled" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M0 0 L10 5 L0 10 Z" class="arrow"/></marker>
<marker id="seq-arrow-open" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M0 0 L10 5 L0 10" fill="none" stroke="var(--_arrow)"/></marker>
</defs>"#
}

pub fn render(model: &SequenceModel, opts: &RenderOptions) -> Result<String> {
    let mut column_x: HashMap<&str, f64> = HashMap::new();
    for (i, p) in model.participants.iter().enumerate() {
        column_x.insert(p.id.as_str(), SIDE_PAD + (i as f64 + 0.5) * COLUMN_WIDTH);
    }
    let width = SIDE_PAD * 2.0 + model.participants.len().max(1) as f64 * COLUMN_WIDTH;
    let body_height = model.events.len().max(1) as f64 * ROW_HEIGHT;
    let height = HEADER_HEIGHT * 2.0 + TOP_PAD * 2.0 + body_height;

    let mut svg = Svg::new();
    svg.raw(&style::svg_open(width, height, opts));
    svg.raw(seq_defs());

    svg.raw(r#"<g class="blocks">"#);
    for block in &model.blocks {
        let y0 = HEADER_HEIGHT + TOP_PAD + block.first_event as f64 * ROW_HEIGHT - ROW_HEIGHT * 0.3;
        let y1 = HEADER_HEIGHT + TOP_PAD + (block.last_event as f64 + 1.0) * ROW_HEIGHT - ROW_HEIGHT * 0.3;
        svg.rect(SIDE_PAD * 0.5, y0, width - SIDE_PAD, y1 - y0, 2.0, "cluster");
        svg.text(SIDE_PAD * 0.5 + 8.0, y0 + text::LINE_HEIGHT, "start", "cluster-label", &block_tag(block.kind, &block.label));
        for divider in &block.dividers {
            let dy = HEADER_HEIGHT + TOP_PAD + divider.at_event as f64 * ROW_HEIGHT - ROW_HEIGHT * 0.3;
            svg.raw(&format!(
                r#"<line x1="{x1:.2}" y1="{dy:.2}" x2="{x2:.2}" y2="{dy:.2}" class="divider"/>"#,
                x1 = SIDE_PAD * 0.5,
                x2 = width - SIDE_PAD * 0.5
            ));
            let tag = match divider.kind {
                DividerKind::Else => "else",
                DividerKind::And => "and",
            };
            svg.text(SIDE_PAD * 0.5 + 8.0, dy + text::LINE_HEIGHT, "start", "label-muted", &format!("[{tag} {}]", divider.label));
        }
    }
    svg.raw("</g>");

    svg.raw(r#"<g class="lifelines">"#);
    for p in &model.participants {
        let x = column_x[p.id.as_str()];
        svg.rect(x - COLUMN_WIDTH * 0.35, TOP_PAD, COLUMN_WIDTH * 0.7, HEADER_HEIGHT, 3.0, "node");
        svg.text(x, TOP_PAD + HEADER_HEIGHT / 2.0 + 5.0, "middle", "node-label", &p.label);
        svg.raw(&format!(
            r#"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" class="edge"/>"#,
            y1 = TOP_PAD + HEADER_HEIGHT,
            y2 = TOP_PAD + HEADER_HEIGHT + TOP_PAD + body_height
        ));
        let foot_y = TOP_PAD + HEADER_HEIGHT + TOP_PAD + body_height;
        svg.rect(x - COLUMN_WIDTH * 0.35, foot_y, COLUMN_WIDTH * 0.7, HEADER_HEIGHT, 3.0, "node");
        svg.text(x, foot_y + HEADER_HEIGHT / 2.0 + 5.0, "middle", "node-label", &p.label);
    }
    svg.raw("</g>");

    svg.raw(r#"<g class="activations">"#);
    let mut open: HashMap<&str, f64> = HashMap::new();
    for (i, event) in model.events.iter().enumerate() {
        if let SequenceEvent::Activation(a) = event {
            let y = HEADER_HEIGHT + TOP_PAD + i as f64 * ROW_HEIGHT;
            match a.edge {
                ActivationEdge::Start => {
                    open.insert(a.participant.as_str(), y);
                }
                ActivationEdge::End => {
                    if let Some(start_y) = open.remove(a.participant.as_str()) {
                        if let Some(&x) = column_x.get(a.participant.as_str()) {
                            svg.rect(x - ACTIVATION_WIDTH / 2.0, start_y, ACTIVATION_WIDTH, y - start_y, 0.0, "activation");
                        }
                    }
                }
            }
        }
    }
    svg.raw("</g>");

    svg.raw(r#"<g class="events">"#);
    for (i, event) in model.events.iter().enumerate() {
        let y = HEADER_HEIGHT + TOP_PAD + i as f64 * ROW_HEIGHT + ROW_HEIGHT / 2.0;
        match event {
            SequenceEvent::Message(m) => {
                let class = if m.arrow.is_dashed() { "edge dotted" } else { "edge" };
                let marker = if m.arrow.is_filled() { "seq-arrow-filled" } else { "seq-arrow-open" };
                if m.is_self {
                    let x = column_x.get(m.from.as_str()).copied().unwrap_or(SIDE_PAD);
                    let loop_w = COLUMN_WIDTH * 0.4;
                    let pts = [(x, y - 8.0), (x + loop_w, y - 8.0), (x + loop_w, y + 8.0), (x, y + 8.0)];
                    svg.polyline_markers(&pts, class, None, Some(marker));
                    svg.text(x + loop_w + 6.0, y, "start", "edge-label", &m.label);
                } else {
                    let x1 = column_x.get(m.from.as_str()).copied().unwrap_or(SIDE_PAD);
                    let x2 = column_x.get(m.to.as_str()).copied().unwrap_or(SIDE_PAD);
                    svg.polyline_markers(&[(x1, y), (x2, y)], class, None, Some(marker));
                    svg.text((x1 + x2) / 2.0, y - 6.0, "middle", "edge-label", &m.label);
                }
            }
            SequenceEvent::Note(n) => {
                let xs: Vec<f64> = n.participants.iter().filter_map(|p| column_x.get(p.as_str()).copied()).collect();
                let (mut x0, mut x1) = (xs.iter().cloned().fold(f64::INFINITY, f64::min), xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max));
                match n.position {
                    NotePosition::LeftOf => {
                        x1 = x0;
                        x0 -= COLUMN_WIDTH * 0.6;
                    }
                    NotePosition::RightOf => {
                        x0 = x1;
                        x1 += COLUMN_WIDTH * 0.6;
                    }
                    NotePosition::Over => {
                        x0 -= COLUMN_WIDTH * 0.3;
                        x1 += COLUMN_WIDTH * 0.3;
                    }
                }
                svg.rect(x0, y - ROW_HEIGHT * 0.35, x1 - x0, ROW_HEIGHT * 0.7, 2.0, "cluster");
                svg.text((x0 + x1) / 2.0, y + 4.0, "middle", "node-label", &n.text);
            }
            SequenceEvent::Activation(_) => {}
        }
    }
    svg.raw("</g>");

    svg.raw("</svg>");
    Ok(svg.body)
}

fn block_tag(kind: BlockKind, label: &str) -> String {
    let tag = match kind {
        BlockKind::Loop => "loop",
        BlockKind::Alt => "alt",
        BlockKind::Opt => "opt",
        BlockKind::Par => "par",
    };
    format!("[{tag} {label}]")
}

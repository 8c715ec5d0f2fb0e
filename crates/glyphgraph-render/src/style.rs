//! The shared `<style>` block every diagram family embeds: the theme's
//! derived-variable lattice plus one fixed rule set that only ever
//! references `var(--_xxx)`, never a literal colour.

use glyphgraph_core::Theme;

use crate::options::RenderOptions;

/// The `<svg>` root tag, the Google Fonts `@import`, and the derived-theme
/// `<style>` block, in that order (spec §6.3's fixed z-order starts here).
pub fn svg_open(width: f64, height: f64, opts: &RenderOptions) -> String {
    let theme = opts.theme();
    let bg_attr = if opts.transparent { String::new() } else { format!(";background:{}", theme.bg) };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width:.2} {height:.2}" width="{width:.2}" height="{height:.2}" style="{vars}{bg_attr}">
<style>@import url('https://fonts.googleapis.com/css2?family={font}:wght@400;500;600;700&amp;family=JetBrains+Mono:wght@400;500&amp;display=swap');</style>
{style}"#,
        vars = theme.svg_style_vars(),
        font = opts.font.replace(' ', "+"),
        style = style_block(&theme, &opts.font),
    )
}

pub fn style_block(theme: &Theme, font: &str) -> String {
    format!(
        r#"<style>
:root {{
{vars}}}
.node {{ fill: var(--_node-fill); stroke: var(--_node-stroke); stroke-width: 1.5; }}
.node-label, .edge-label, text {{ fill: var(--_text); font-family: "{font}", "Segoe UI", Helvetica, Arial, sans-serif; font-size: 14px; }}
.label-sec {{ fill: var(--_text-sec); }}
.label-muted {{ fill: var(--_text-muted); }}
.edge {{ stroke: var(--_line); stroke-width: 1.5; }}
.edge.dotted {{ stroke-dasharray: 4 3; }}
.edge.thick {{ stroke-width: 3; }}
.arrow {{ fill: var(--_arrow); stroke: none; }}
.cluster {{ fill: var(--_group-hdr); stroke: var(--_node-stroke); stroke-width: 1; }}
.cluster-label {{ fill: var(--_text-sec); }}
.divider {{ stroke: var(--_inner-stroke); stroke-width: 1; stroke-dasharray: 2 2; }}
.key-badge {{ fill: var(--_key-badge); }}
.activation {{ fill: var(--_node-fill); stroke: var(--_node-stroke); }}
.state-start {{ fill: var(--_node-stroke); stroke: none; }}
.state-end-ring {{ fill: none; stroke: var(--_node-stroke); stroke-width: 1.5; }}
.state-end-dot {{ fill: var(--_node-stroke); stroke: none; }}
</style>"#,
        vars = theme.derived_css_block(),
        font = font,
    )
}

/// Standard marker defs. Every arrow-drawing family shares the same two
/// arrowhead shapes; the crow's-foot markers live with the ER renderer since
/// nothing else needs them.
pub fn common_markers() -> &'static str {
    r#"<defs>
<marker id="arrow-end" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse">
<path d="M 0 0 L 10 5 L 0 10 z" class="arrow"/>
</marker>
<marker id="arrow-open-end" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse">
<path d="M 0 0 L 10 5 L 0 10" class="arrow" fill="none" stroke="var(--_arrow)"/>
</marker>
</defs>"#
}

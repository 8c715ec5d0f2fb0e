#![forbid(unsafe_code)]

//! `glyphgraph` is a headless, dependency-free-of-a-browser Mermaid-dialect
//! diagram renderer.
//!
//! It parses flow/state, sequence, class, and entity-relationship diagrams
//! and renders them either to SVG or to a plain-text ASCII/Unicode canvas.
//! There is no DOM, no headless browser, and no network access anywhere in
//! the pipeline: `render`/`render_ascii` are pure functions of their input
//! string and options.

pub use glyphgraph_core::theme::{NamedTheme, PALETTES, named_theme};
pub use glyphgraph_core::{Diagram, Theme};
pub use glyphgraph_ascii::{AsciiOptions, GraphDirection};
pub use glyphgraph_render::RenderOptions;

/// Composes every stage's error type the way the pipeline can actually
/// fail: a malformed source document, a layout invariant the input
/// violates, or (ASCII only) a routing invariant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] glyphgraph_core::Error),
    #[error(transparent)]
    Render(#[from] glyphgraph_render::Error),
    #[error(transparent)]
    Ascii(#[from] glyphgraph_ascii::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Renders Mermaid-dialect `source` to an SVG document.
pub fn render(source: &str, options: &RenderOptions) -> Result<String> {
    Ok(glyphgraph_render::render(source, options)?)
}

/// Renders Mermaid-dialect `source` to a plain-text ASCII/Unicode diagram.
pub fn render_ascii(source: &str, options: &AsciiOptions) -> Result<String> {
    Ok(glyphgraph_ascii::render_ascii(source, options)?)
}

/// Parses `source` without rendering it, for callers that only need the
/// diagram model (e.g. a linter).
pub fn parse(source: &str) -> Result<Diagram> {
    Ok(glyphgraph_core::parse(source)?)
}

/// Builds [`RenderOptions`] seeded from a named palette in the theme
/// registry (`"dracula"`, `"nord"`, ...). Returns `None` for an unknown key.
pub fn render_options_for_theme(key: &str) -> Option<RenderOptions> {
    let named = named_theme(key)?;
    let theme: Theme = named.into();
    Some(RenderOptions {
        bg: theme.bg,
        fg: theme.fg,
        line: theme.line,
        accent: theme.accent,
        muted: theme.muted,
        surface: theme.surface,
        border: theme.border,
        ..RenderOptions::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_flowchart_end_to_end() {
        let svg = render("flowchart LR\n  A[Start] --> B{Done?}\n", &RenderOptions::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Start"));
        roxmltree::Document::parse(&svg).expect("facade output must be well-formed XML");
    }

    #[test]
    fn renders_ascii_end_to_end() {
        let text = render_ascii("flowchart LR\n  A[Start] --> B[End]\n", &AsciiOptions::default()).unwrap();
        assert!(text.contains("Start"));
    }

    #[test]
    fn named_theme_seeds_render_options() {
        let opts = render_options_for_theme("dracula").unwrap();
        assert_eq!(opts.bg, "#282a36");
    }

    #[test]
    fn unknown_theme_key_returns_none() {
        assert!(render_options_for_theme("does-not-exist").is_none());
    }
}

use glyphgraph_core::Theme;
use serde::Deserialize;

/// Rendering knobs. Mirrors the theme/layout/typography table consumers
/// configure `render()` with; defaults match [`Theme::default`] and
/// [`glyphgraph_layout::LayoutOptions::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub bg: String,
    pub fg: String,
    pub line: Option<String>,
    pub accent: Option<String>,
    pub muted: Option<String>,
    pub surface: Option<String>,
    pub border: Option<String>,
    pub font: String,
    pub padding: f64,
    pub node_spacing: f64,
    pub layer_spacing: f64,
    pub transparent: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            bg: theme.bg,
            fg: theme.fg,
            line: None,
            accent: None,
            muted: None,
            surface: None,
            border: None,
            font: "Inter".to_string(),
            padding: 40.0,
            node_spacing: 24.0,
            layer_spacing: 40.0,
            transparent: false,
        }
    }
}

impl RenderOptions {
    pub fn theme(&self) -> Theme {
        Theme {
            bg: self.bg.clone(),
            fg: self.fg.clone(),
            line: self.line.clone(),
            accent: self.accent.clone(),
            muted: self.muted.clone(),
            surface: self.surface.clone(),
            border: self.border.clone(),
        }
    }

    pub fn layout_options(&self, direction: glyphgraph_layout::Direction) -> glyphgraph_layout::LayoutOptions {
        glyphgraph_layout::LayoutOptions {
            direction,
            padding: self.padding,
            node_spacing: self.node_spacing,
            layer_spacing: self.layer_spacing,
        }
    }
}

//! Theme derivation. Unlike upstream Mermaid, which computes every derived
//! colour numerically in Rust/JS and bakes the result into each element,
//! this crate writes the *lattice itself* into the `<style>` block as
//! `color-mix(in srgb, var(--fg) N%, var(--bg))` expressions. The renderer
//! never computes a derived colour — it only ever emits `var(--_xxx)`. This
//! is what keeps a mounted SVG live-repaintable by mutating `--bg`/`--fg`.

use std::fmt::Write as _;

/// One entry in the derived-variable lattice: the variable name, the
/// `color-mix` percentage of `--fg` folded into `--bg`, and the name of the
/// user-facing override variable that replaces the mix entirely when set.
struct Derived {
    name: &'static str,
    percent: u8,
    override_var: Option<&'static str>,
}

const LATTICE: &[Derived] = &[
    Derived { name: "--_text", percent: 100, override_var: None },
    Derived { name: "--_text-sec", percent: 60, override_var: Some("--muted") },
    Derived { name: "--_text-muted", percent: 40, override_var: Some("--muted") },
    Derived { name: "--_text-faint", percent: 25, override_var: None },
    Derived { name: "--_line", percent: 30, override_var: Some("--line") },
    Derived { name: "--_arrow", percent: 50, override_var: Some("--accent") },
    Derived { name: "--_node-fill", percent: 3, override_var: Some("--surface") },
    Derived { name: "--_node-stroke", percent: 20, override_var: Some("--border") },
    Derived { name: "--_group-hdr", percent: 5, override_var: None },
    Derived { name: "--_inner-stroke", percent: 12, override_var: None },
    Derived { name: "--_key-badge", percent: 10, override_var: None },
];

/// A resolved set of user-facing theme variables. Only `bg`/`fg` are
/// required; the rest fall back to the `color-mix` lattice when absent.
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: String,
    pub fg: String,
    pub line: Option<String>,
    pub accent: Option<String>,
    pub muted: Option<String>,
    pub surface: Option<String>,
    pub border: Option<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: "#FFFFFF".to_string(),
            fg: "#27272A".to_string(),
            line: None,
            accent: None,
            muted: None,
            surface: None,
            border: None,
        }
    }
}

impl Theme {
    fn user_var(&self, override_var: &str) -> Option<&str> {
        match override_var {
            "--line" => self.line.as_deref(),
            "--accent" => self.accent.as_deref(),
            "--muted" => self.muted.as_deref(),
            "--surface" => self.surface.as_deref(),
            "--border" => self.border.as_deref(),
            _ => None,
        }
    }

    /// The `<svg>` inline `style` attribute value: `--bg:...;--fg:...` plus
    /// any optional user-facing overrides the caller set. Exactly the
    /// variables the caller provided — nothing derived lives here (spec
    /// property 15: the style attribute starts with `--bg:<bg>;--fg:<fg>`).
    pub fn svg_style_vars(&self) -> String {
        let mut out = format!("--bg:{};--fg:{}", self.bg, self.fg);
        for (name, value) in [
            ("--line", &self.line),
            ("--accent", &self.accent),
            ("--muted", &self.muted),
            ("--surface", &self.surface),
            ("--border", &self.border),
        ] {
            if let Some(v) = value {
                let _ = write!(out, ";{name}:{v}");
            }
        }
        out
    }

    /// The derived-variable declarations for the `<style>` block: one
    /// `color-mix` expression (or a direct override) per lattice entry.
    pub fn derived_css_block(&self) -> String {
        let mut out = String::new();
        for d in LATTICE {
            let expr = match d.override_var.and_then(|v| self.user_var(v)) {
                Some(override_value) => override_value.to_string(),
                None => {
                    if d.percent == 100 {
                        "var(--fg)".to_string()
                    } else {
                        format!("color-mix(in srgb, var(--fg) {}%, var(--bg))", d.percent)
                    }
                }
            };
            let _ = writeln!(out, "  {}: {};", d.name, expr);
        }
        out
    }
}

/// A single entry in the named-theme palette registry (spec §6.4).
#[derive(Debug, Clone, Copy)]
pub struct NamedTheme {
    pub key: &'static str,
    pub bg: &'static str,
    pub fg: &'static str,
    pub line: Option<&'static str>,
    pub accent: Option<&'static str>,
    pub muted: Option<&'static str>,
}

/// Static palette registry. Consumers enumerate it; there is no dynamic
/// registration.
pub const PALETTES: &[NamedTheme] = &[
    NamedTheme {
        key: "tokyo-night",
        bg: "#1a1b26",
        fg: "#c0caf5",
        line: Some("#414868"),
        accent: Some("#7aa2f7"),
        muted: Some("#565f89"),
    },
    NamedTheme {
        key: "dracula",
        bg: "#282a36",
        fg: "#f8f8f2",
        line: Some("#44475a"),
        accent: Some("#bd93f9"),
        muted: Some("#6272a4"),
    },
    NamedTheme {
        key: "github-light",
        bg: "#ffffff",
        fg: "#1f2328",
        line: Some("#d0d7de"),
        accent: Some("#0969da"),
        muted: Some("#656d76"),
    },
    NamedTheme {
        key: "solarized-dark",
        bg: "#002b36",
        fg: "#839496",
        line: Some("#073642"),
        accent: Some("#268bd2"),
        muted: Some("#586e75"),
    },
    NamedTheme {
        key: "nord",
        bg: "#2e3440",
        fg: "#eceff4",
        line: Some("#3b4252"),
        accent: Some("#88c0d0"),
        muted: Some("#4c566a"),
    },
    NamedTheme {
        key: "one-light",
        bg: "#fafafa",
        fg: "#383a42",
        line: Some("#e5e5e6"),
        accent: Some("#4078f2"),
        muted: Some("#a0a1a7"),
    },
];

pub fn named_theme(key: &str) -> Option<&'static NamedTheme> {
    PALETTES.iter().find(|t| t.key == key)
}

impl From<&NamedTheme> for Theme {
    fn from(t: &NamedTheme) -> Self {
        Self {
            bg: t.bg.to_string(),
            fg: t.fg.to_string(),
            line: t.line.map(str::to_string),
            accent: t.accent.map(str::to_string),
            muted: t.muted.map(str::to_string),
            surface: None,
            border: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_style_matches_spec_defaults() {
        let t = Theme::default();
        assert_eq!(t.svg_style_vars(), "--bg:#FFFFFF;--fg:#27272A");
    }

    #[test]
    fn derived_block_uses_color_mix_with_fixed_percentages() {
        let t = Theme::default();
        let css = t.derived_css_block();
        assert!(css.contains("--_text-sec: color-mix(in srgb, var(--fg) 60%, var(--bg));"));
        assert!(css.contains("--_node-fill: color-mix(in srgb, var(--fg) 3%, var(--bg));"));
        assert!(css.contains("--_text: var(--fg);"));
    }

    #[test]
    fn override_variable_replaces_the_mix_expression() {
        let mut t = Theme::default();
        t.accent = Some("#ff0000".to_string());
        let css = t.derived_css_block();
        assert!(css.contains("--_arrow: #ff0000;"));
    }

    #[test]
    fn palette_lookup_finds_known_keys() {
        assert!(named_theme("tokyo-night").is_some());
        assert!(named_theme("nonexistent-theme").is_none());
    }
}

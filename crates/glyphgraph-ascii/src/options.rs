use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum GraphDirection {
    Lr,
    Td,
}

/// Mirrors the knobs a terminal-facing caller tunes: glyph set, cell
/// padding, and packing direction.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AsciiOptions {
    pub use_ascii: bool,
    pub padding_x: usize,
    pub padding_y: usize,
    pub box_border_padding: usize,
    pub graph_direction: GraphDirection,
}

impl Default for AsciiOptions {
    fn default() -> Self {
        Self {
            use_ascii: false,
            padding_x: 5,
            padding_y: 5,
            box_border_padding: 1,
            graph_direction: GraphDirection::Lr,
        }
    }
}

pub(crate) struct Glyphs {
    pub corner_tl: char,
    pub corner_tr: char,
    pub corner_bl: char,
    pub corner_br: char,
    pub horizontal: char,
    pub vertical: char,
    pub tee_down: char,
    pub tee_up: char,
    pub tee_right: char,
    pub tee_left: char,
    pub cross: char,
    pub arrow_up: char,
    pub arrow_down: char,
    pub arrow_left: char,
    pub arrow_right: char,
    /// Marks the junction cell where a fan-out bundle splits away from a
    /// shared source.
    pub fan_out: char,
    /// Marks the junction cell where a fan-in bundle converges on a shared
    /// target.
    pub fan_in: char,
}

pub(crate) const ASCII_GLYPHS: Glyphs = Glyphs {
    corner_tl: '+',
    corner_tr: '+',
    corner_bl: '+',
    corner_br: '+',
    horizontal: '-',
    vertical: '|',
    tee_down: '+',
    tee_up: '+',
    tee_right: '+',
    tee_left: '+',
    cross: '+',
    arrow_up: '^',
    arrow_down: 'v',
    arrow_left: '<',
    arrow_right: '>',
    fan_out: '*',
    fan_in: '*',
};

pub(crate) const UNICODE_GLYPHS: Glyphs = Glyphs {
    corner_tl: '┌',
    corner_tr: '┐',
    corner_bl: '└',
    corner_br: '┘',
    horizontal: '─',
    vertical: '│',
    tee_down: '┬',
    tee_up: '┴',
    tee_right: '├',
    tee_left: '┤',
    cross: '┼',
    arrow_up: '▲',
    arrow_down: '▼',
    arrow_left: '◄',
    arrow_right: '►',
    fan_out: '●',
    fan_in: '●',
};

impl AsciiOptions {
    pub(crate) fn glyphs(&self) -> &'static Glyphs {
        if self.use_ascii { &ASCII_GLYPHS } else { &UNICODE_GLYPHS }
    }
}

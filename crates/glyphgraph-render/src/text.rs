//! Text metrics. Without a real font engine, width is approximated from
//! Unicode display width; this is accurate enough for monospace-ish layout
//! budgeting and is the same trick the ASCII renderer uses for character
//! cells.

use unicode_width::UnicodeWidthStr;

pub const FONT_SIZE: f64 = 14.0;
pub const LINE_HEIGHT: f64 = 18.0;
const AVG_CHAR_WIDTH_FACTOR: f64 = 0.58;

pub fn measure_width(s: &str) -> f64 {
    UnicodeWidthStr::width(s) as f64 * FONT_SIZE * AVG_CHAR_WIDTH_FACTOR
}

pub fn wrap_lines(s: &str, max_width: f64) -> Vec<String> {
    if s.is_empty() {
        return vec![String::new()];
    }
    let mut lines = Vec::new();
    for paragraph in s.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() { word.to_string() } else { format!("{current} {word}") };
            if measure_width(&candidate) > max_width && !current.is_empty() {
                lines.push(current);
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

pub fn block_size(s: &str, max_width: f64) -> (f64, f64) {
    let lines = wrap_lines(s, max_width);
    let width = lines.iter().map(|l| measure_width(l)).fold(0.0_f64, f64::max);
    (width, lines.len() as f64 * LINE_HEIGHT)
}

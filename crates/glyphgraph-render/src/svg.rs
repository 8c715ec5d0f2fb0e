//! Small string-building helpers for emitting SVG. No DOM, no templating:
//! every diagram family writes directly into one growing `String`.

use std::fmt::Write as _;

/// Escapes the five characters that are unsafe inside SVG text content or
/// attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub struct Svg {
    pub body: String,
}

impl Svg {
    pub fn new() -> Self {
        Self { body: String::new() }
    }

    pub fn raw(&mut self, s: &str) {
        self.body.push_str(s);
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, rx: f64, class: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" rx="{rx:.2}" class="{class}"/>"#
        );
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, class: &str) {
        let _ = writeln!(self.body, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" class="{class}"/>"#);
    }

    pub fn polygon(&mut self, points: &[(f64, f64)], class: &str) {
        let pts: Vec<String> = points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect();
        let _ = writeln!(self.body, r#"<polygon points="{}" class="{class}"/>"#, pts.join(" "));
    }

    pub fn path(&mut self, d: &str, class: &str) {
        let _ = writeln!(self.body, r#"<path d="{d}" class="{class}"/>"#);
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], class: &str, marker_end: Option<&str>) {
        self.polyline_markers(points, class, None, marker_end);
    }

    pub fn polyline_markers(
        &mut self,
        points: &[(f64, f64)],
        class: &str,
        marker_start: Option<&str>,
        marker_end: Option<&str>,
    ) {
        let pts: Vec<String> = points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect();
        let start = marker_start.map(|id| format!(r#" marker-start="url(#{id})""#)).unwrap_or_default();
        let end = marker_end.map(|id| format!(r#" marker-end="url(#{id})""#)).unwrap_or_default();
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" class="{class}" fill="none"{start}{end}/>"#,
            pts.join(" ")
        );
    }

    pub fn text(&mut self, x: f64, y: f64, anchor: &str, class: &str, content: &str) {
        let _ = writeln!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}" class="{class}">{}</text>"#,
            escape(content)
        );
    }
}

impl Default for Svg {
    fn default() -> Self {
        Self::new()
    }
}

//! Diagram family detection. Unlike upstream Mermaid's ~25-entry registry,
//! this only needs to distinguish the four families the rest of the crate
//! understands — everything else, including unrecognised headers, is routed
//! to flow (see spec §4.1 / §4.11: an unknown header still renders, just as
//! an empty graph rather than failing).

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramFamily {
    Flow,
    Sequence,
    Class,
    Er,
}

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*%%.*$").unwrap())
}

fn directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)%%\{.*?\}%%").unwrap())
}

/// Strips `%%{ ... }%%` directives and `%%` line comments. Directives are
/// never interpreted (see spec §2 supplement) — only stripped so they don't
/// confuse detection or the line-oriented parsers.
pub fn strip_comments_and_directives(source: &str) -> String {
    let no_directives = directive_re().replace_all(source, "");
    comment_re().replace_all(&no_directives, "").to_string()
}

/// Reads the trimmed first non-blank line (after comment/directive
/// stripping) and dispatches by case-insensitive exact family keyword.
pub fn detect(source: &str) -> (DiagramFamily, String) {
    let cleaned = strip_comments_and_directives(source);
    let first_line = cleaned
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let lower = first_line.to_ascii_lowercase();

    let family = if lower.starts_with("sequencediagram") {
        DiagramFamily::Sequence
    } else if lower.starts_with("classdiagram") {
        DiagramFamily::Class
    } else if lower.starts_with("erdiagram") {
        DiagramFamily::Er
    } else {
        DiagramFamily::Flow
    };

    (family, cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_family_by_exact_header() {
        assert_eq!(detect("sequenceDiagram\nA->>B: hi").0, DiagramFamily::Sequence);
        assert_eq!(detect("classDiagram\nclass X").0, DiagramFamily::Class);
        assert_eq!(detect("erDiagram\nA ||--o{ B : x").0, DiagramFamily::Er);
    }

    #[test]
    fn unrecognised_header_routes_to_flow() {
        assert_eq!(detect("pie title x\n\"a\": 10").0, DiagramFamily::Flow);
        assert_eq!(detect("graph TD\nA-->B").0, DiagramFamily::Flow);
        assert_eq!(detect("flowchart LR\nA-->B").0, DiagramFamily::Flow);
        assert_eq!(detect("stateDiagram-v2\n[*]-->Idle").0, DiagramFamily::Flow);
    }

    #[test]
    fn skips_leading_comments_and_directives() {
        let src = "%% a note\n%%{init: {\"theme\": \"dark\"}}%%\nsequenceDiagram\nA->>B: hi";
        assert_eq!(detect(src).0, DiagramFamily::Sequence);
    }
}

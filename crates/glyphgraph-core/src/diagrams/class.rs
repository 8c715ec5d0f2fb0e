//! `classDiagram` grammar: class bodies, member lists and relationship
//! arrows with UML cardinality markers.

use std::sync::OnceLock;

use regex::Regex;

use crate::common::parse_generic_types;
use crate::model::{
    ClassDef, ClassModel, ClassRelationship, Member, Visibility,
    MarkerAt, RelationshipKind,
};
use crate::error::{Error, Result};

struct RelOp {
    token: &'static str,
    kind: RelationshipKind,
    marker_at: MarkerAt,
}

// Longest first: `..|>` before `--`.
const REL_OPS: &[RelOp] = &[
    RelOp { token: "..|>", kind: RelationshipKind::Realization, marker_at: MarkerAt::To },
    RelOp { token: "--|>", kind: RelationshipKind::Inheritance, marker_at: MarkerAt::To },
    RelOp { token: "<|--", kind: RelationshipKind::Inheritance, marker_at: MarkerAt::From },
    RelOp { token: "*--", kind: RelationshipKind::Composition, marker_at: MarkerAt::From },
    RelOp { token: "--*", kind: RelationshipKind::Composition, marker_at: MarkerAt::To },
    RelOp { token: "o--", kind: RelationshipKind::Aggregation, marker_at: MarkerAt::From },
    RelOp { token: "--o", kind: RelationshipKind::Aggregation, marker_at: MarkerAt::To },
    RelOp { token: "..>", kind: RelationshipKind::Dependency, marker_at: MarkerAt::To },
    RelOp { token: "-->", kind: RelationshipKind::Association, marker_at: MarkerAt::To },
    RelOp { token: "--", kind: RelationshipKind::Association, marker_at: MarkerAt::To },
    RelOp { token: "..", kind: RelationshipKind::Dependency, marker_at: MarkerAt::To },
];

fn member_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<vis>[+\-#~])?(?P<rest>.+?)(?P<abstract>\*)?(?P<static>\$)?$").unwrap()
    })
}

fn visibility_of(c: Option<char>) -> Option<Visibility> {
    match c {
        Some('+') => Some(Visibility::Public),
        Some('-') => Some(Visibility::Private),
        Some('#') => Some(Visibility::Protected),
        Some('~') => Some(Visibility::Package),
        _ => None,
    }
}

fn parse_member(raw: &str) -> Member {
    let raw = raw.trim();
    let caps = member_re().captures(raw);
    let vis_char = raw.chars().next().filter(|c| "+-#~".contains(*c));
    let body = caps
        .as_ref()
        .map(|c| c.name("rest").unwrap().as_str())
        .unwrap_or(raw)
        .trim();
    let is_static = raw.ends_with('$');
    let is_abstract = raw.trim_end_matches('$').ends_with('*');
    let body = body.trim_end_matches(['*', '$']).trim();

    if let Some(paren) = body.find('(') {
        let name = parse_generic_types(body[..paren].trim());
        let close = body.rfind(')').unwrap_or(body.len());
        let args = body[paren + 1..close.max(paren + 1)].to_string();
        let type_hint = body[close.saturating_add(1)..]
            .trim_start_matches(':')
            .trim();
        Member {
            visibility: visibility_of(vis_char),
            name,
            type_hint: if type_hint.is_empty() { None } else { Some(parse_generic_types(type_hint)) },
            args: Some(args),
            is_static,
            is_abstract,
        }
    } else if let Some((ty, name)) = body.split_once(' ') {
        Member {
            visibility: visibility_of(vis_char),
            name: parse_generic_types(name.trim()),
            type_hint: Some(parse_generic_types(ty.trim())),
            args: None,
            is_static,
            is_abstract,
        }
    } else {
        Member {
            visibility: visibility_of(vis_char),
            name: parse_generic_types(body),
            type_hint: None,
            args: None,
            is_static,
            is_abstract,
        }
    }
}

fn find_rel_op(line: &str) -> Option<(usize, usize, &'static RelOp)> {
    let mut best: Option<(usize, usize, &'static RelOp)> = None;
    for op in REL_OPS {
        if let Some(pos) = line.find(op.token) {
            let end = pos + op.token.len();
            let better = best.map(|(bpos, blen, _)| pos < bpos || (pos == bpos && end - pos > blen - bpos)).unwrap_or(true);
            if better {
                best = Some((pos, end, op));
            }
        }
    }
    best
}

fn class_entry<'a>(model: &'a mut ClassModel, id: &str) -> &'a mut ClassDef {
    model.classes.entry(id.to_string()).or_insert_with(|| ClassDef { label: id.to_string(), ..Default::default() })
}

/// Parses `classDiagram` source into a [`ClassModel`].
pub fn parse(source: &str) -> Result<ClassModel> {
    let mut model = ClassModel::default();
    let mut open_class: Option<String> = None;
    let mut namespace_stack: Vec<String> = Vec::new();
    let mut first_line = true;

    for raw_line in source.lines() {
        let line = raw_line.trim();
        if line.is_empty() || first_line {
            first_line = false;
            continue;
        }

        if let Some(rest) = line.strip_prefix("namespace ") {
            let name = rest.trim_end_matches('{').trim().to_string();
            model.namespaces.entry(name.clone()).or_default();
            namespace_stack.push(name);
            continue;
        }

        if let Some(rest) = line.strip_prefix("class ") {
            let rest = rest.trim();
            if let Some(id) = rest.strip_suffix('{') {
                let id = id.trim().to_string();
                class_entry(&mut model, &id);
                if let Some(ns) = namespace_stack.last() {
                    model.namespaces.get_mut(ns).unwrap().push(id.clone());
                }
                open_class = Some(id);
            } else {
                let id = rest.to_string();
                class_entry(&mut model, &id);
            }
            continue;
        }

        if line == "}" {
            if open_class.take().is_none() {
                namespace_stack.pop();
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("<<").and_then(|r| r.strip_suffix(">>")) {
            if let Some(id) = &open_class {
                class_entry(&mut model, id).annotation = Some(rest.trim().to_string());
            }
            continue;
        }

        if let Some(id) = &open_class {
            let def = class_entry(&mut model, id);
            let member = parse_member(line);
            if member.args.is_some() {
                def.methods.push(member);
            } else {
                def.attributes.push(member);
            }
            continue;
        }

        // Member declared via dotted form outside a class body: `A : +foo() int`
        if let Some((id, rest)) = line.split_once(':') {
            let id = id.trim();
            if !id.contains(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-')) && model.classes.contains_key(id) {
                let def = class_entry(&mut model, id);
                let member = parse_member(rest.trim());
                if member.args.is_some() {
                    def.methods.push(member);
                } else {
                    def.attributes.push(member);
                }
                continue;
            }
        }

        if let Some((pos, end, op)) = find_rel_op(line) {
            let left = line[..pos].trim();
            let mut right = line[end..].trim();
            let mut label = None;
            if let Some((rhs, lbl)) = right.split_once(':') {
                right = rhs.trim();
                label = Some(lbl.trim().to_string());
            }
            let (from, from_card) = split_cardinality(left);
            let (to, to_card) = split_cardinality(right);
            class_entry(&mut model, &from);
            class_entry(&mut model, &to);
            model.relationships.push(ClassRelationship {
                from,
                to,
                kind: op.kind,
                marker_at: op.marker_at,
                label,
                from_cardinality: from_card,
                to_cardinality: to_card,
            });
        }
    }

    if let Some(id) = open_class {
        return Err(Error::UnbalancedBlock {
            diagram_type: "class",
            message: format!("class body for `{id}` was never closed with `}}`"),
        });
    }
    if !namespace_stack.is_empty() {
        return Err(Error::UnbalancedBlock {
            diagram_type: "class",
            message: format!("namespace `{}` was never closed with `}}`", namespace_stack.join("::")),
        });
    }

    Ok(model)
}

fn split_cardinality(side: &str) -> (String, Option<String>) {
    let side = side.trim();
    if let Some(start) = side.find('"') {
        if let Some(end) = side[start + 1..].find('"') {
            let card = side[start + 1..start + 1 + end].to_string();
            let id = side[..start].trim().to_string();
            return (id, Some(card));
        }
    }
    (side.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_class_body_with_members() {
        let m = parse("classDiagram\nclass Animal {\n+String name\n+makeSound() void\n}").unwrap();
        let a = &m.classes["Animal"];
        assert_eq!(a.attributes.len(), 1);
        assert_eq!(a.methods.len(), 1);
        assert_eq!(a.attributes[0].visibility, Some(Visibility::Public));
    }

    #[test]
    fn parses_inheritance_relationship() {
        let m = parse("classDiagram\nAnimal <|-- Dog").unwrap();
        assert_eq!(m.relationships.len(), 1);
        assert_eq!(m.relationships[0].kind, RelationshipKind::Inheritance);
        assert_eq!(m.relationships[0].marker_at, MarkerAt::From);
    }

    #[test]
    fn parses_cardinalities_and_label() {
        let m = parse(r#"classDiagram
Customer "1" --> "many" Order : places"#).unwrap();
        let r = &m.relationships[0];
        assert_eq!(r.from_cardinality.as_deref(), Some("1"));
        assert_eq!(r.to_cardinality.as_deref(), Some("many"));
        assert_eq!(r.label.as_deref(), Some("places"));
    }

    #[test]
    fn generic_type_syntax_is_normalised() {
        let m = parse("classDiagram\nclass Box {\n+List~T~ items\n}").unwrap();
        assert_eq!(m.classes["Box"].attributes[0].type_hint.as_deref(), Some("List<T>"));
    }

    #[test]
    fn unclosed_class_body_is_a_fatal_error() {
        assert!(parse("classDiagram\nclass Animal {\n+String name").is_err());
    }

    #[test]
    fn unclosed_namespace_is_a_fatal_error() {
        assert!(parse("classDiagram\nnamespace shapes {\nclass Circle").is_err());
    }
}

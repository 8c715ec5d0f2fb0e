//! `erDiagram` grammar: entity attribute blocks and crow's-foot
//! relationships.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Cardinality, ErAttribute, ErEntity, ErModel, ErRelationship, KeyKind};

struct CardToken {
    token: &'static str,
    card: Cardinality,
}

// Ordered so two-character tokens are tried before their one-character
// prefixes (`o{` before `o`).
const LEFT_TOKENS: &[CardToken] = &[
    CardToken { token: "|o", card: Cardinality::ZeroOne },
    CardToken { token: "||", card: Cardinality::One },
    CardToken { token: "}o", card: Cardinality::ZeroMany },
    CardToken { token: "}|", card: Cardinality::Many },
];

const RIGHT_TOKENS: &[CardToken] = &[
    CardToken { token: "o|", card: Cardinality::ZeroOne },
    CardToken { token: "||", card: Cardinality::One },
    CardToken { token: "o{", card: Cardinality::ZeroMany },
    CardToken { token: "|{", card: Cardinality::Many },
];

fn rel_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^(?P<e1>[A-Za-z0-9_-]+)\s*(?P<left>\|\||\}o|\}\|)(?P<line>--|\.\.)(?P<right>o\||o\{|\|\{|\|\|)\s*(?P<e2>[A-Za-z0-9_-]+)\s*:\s*"?(?P<label>[^"]*)"?$"#,
        )
        .unwrap()
    })
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^(?P<type>\S+)\s+(?P<name>\S+)(?:\s+(?P<keys>[A-Za-z,]+))?(?:\s+"(?P<comment>[^"]*)")?$"#).unwrap()
    })
}

fn parse_keys(s: &str) -> Vec<KeyKind> {
    s.split(',')
        .filter_map(|k| match k.trim().to_ascii_uppercase().as_str() {
            "PK" => Some(KeyKind::Pk),
            "FK" => Some(KeyKind::Fk),
            "UK" => Some(KeyKind::Uk),
            _ => None,
        })
        .collect()
}

fn entity_entry<'a>(model: &'a mut ErModel, id: &str) -> &'a mut ErEntity {
    model.entities.entry(id.to_string()).or_insert_with(|| ErEntity { label: id.to_string(), ..Default::default() })
}

/// Parses `erDiagram` source into an [`ErModel`]. Relationship ends that
/// reference an entity never declared with its own block materialize it
/// with no attributes, identically to a bare flow node reference.
pub fn parse(source: &str) -> Result<ErModel> {
    let mut model = ErModel::default();
    let mut open_entity: Option<String> = None;
    let mut first_line = true;

    for raw_line in source.lines() {
        let line = raw_line.trim();
        if line.is_empty() || first_line {
            first_line = false;
            continue;
        }

        if line == "}" {
            open_entity = None;
            continue;
        }

        if let Some(id) = &open_entity {
            if let Some(caps) = attr_re().captures(line) {
                let entity = entity_entry(&mut model, id);
                entity.attributes.push(ErAttribute {
                    type_name: caps["type"].to_string(),
                    name: caps["name"].to_string(),
                    keys: caps.name("keys").map(|m| parse_keys(m.as_str())).unwrap_or_default(),
                });
            }
            continue;
        }

        if let Some(rest) = line.strip_suffix('{') {
            let id = rest.trim().to_string();
            entity_entry(&mut model, &id);
            open_entity = Some(id);
            continue;
        }

        if let Some(caps) = rel_re().captures(line) {
            let e1 = caps["e1"].to_string();
            let e2 = caps["e2"].to_string();
            let c1 = LEFT_TOKENS.iter().find(|t| t.token == &caps["left"]).map(|t| t.card).unwrap_or(Cardinality::One);
            let c2 = RIGHT_TOKENS.iter().find(|t| t.token == &caps["right"]).map(|t| t.card).unwrap_or(Cardinality::One);
            let identifying = &caps["line"] == "--";
            entity_entry(&mut model, &e1);
            entity_entry(&mut model, &e2);
            model.relationships.push(ErRelationship {
                entity1: e1,
                entity2: e2,
                cardinality1: c1,
                cardinality2: c2,
                label: caps["label"].trim().to_string(),
                identifying,
            });
        }
    }

    if let Some(id) = open_entity {
        return Err(Error::UnbalancedBlock {
            diagram_type: "er",
            message: format!("entity body for `{id}` was never closed with `}}`"),
        });
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_relationship_with_crows_foot_cardinality() {
        let m = parse(r#"erDiagram
CUSTOMER ||--o{ ORDER : places"#).unwrap();
        assert_eq!(m.relationships.len(), 1);
        let r = &m.relationships[0];
        assert_eq!(r.cardinality1, Cardinality::One);
        assert_eq!(r.cardinality2, Cardinality::ZeroMany);
        assert_eq!(r.label, "places");
        assert!(r.identifying);
    }

    #[test]
    fn undeclared_entity_materializes_with_no_attributes() {
        let m = parse(r#"erDiagram
CUSTOMER ||--o{ ORDER : places"#).unwrap();
        assert!(m.entities["CUSTOMER"].attributes.is_empty());
        assert!(m.entities["ORDER"].attributes.is_empty());
    }

    #[test]
    fn parses_attribute_block_with_keys() {
        let m = parse("erDiagram\nCUSTOMER {\nstring id PK\nstring name\n}").unwrap();
        let c = &m.entities["CUSTOMER"];
        assert_eq!(c.attributes.len(), 2);
        assert_eq!(c.attributes[0].keys, vec![KeyKind::Pk]);
    }

    #[test]
    fn unclosed_entity_body_is_a_fatal_error() {
        assert!(parse("erDiagram\nCUSTOMER {\nstring id PK").is_err());
    }
}

//! `sequenceDiagram` grammar: participants, messages, nested blocks,
//! notes and activation toggles.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;
use crate::model::{
    Activation, ActivationEdge, Block, BlockKind, Divider, DividerKind, Message, Note,
    NotePosition, Participant, ParticipantKind, SequenceArrow, SequenceEvent, SequenceModel,
};

fn message_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<from>[^-]+?)(?P<arrow>-->>|->>|-->|->)(?P<to>[^:]+):\s*(?P<label>.*)$").unwrap()
    })
}

fn arrow_kind(token: &str) -> SequenceArrow {
    match token {
        "->" => SequenceArrow::AsyncOpen,
        "->>" => SequenceArrow::SyncFilled,
        "-->" => SequenceArrow::ReturnOpen,
        "-->>" => SequenceArrow::ReturnFilled,
        _ => SequenceArrow::AsyncOpen,
    }
}

fn ensure_participant(model: &mut SequenceModel, id: &str) {
    if !model.participants.iter().any(|p| p.id == id) {
        model.participants.push(Participant {
            id: id.to_string(),
            label: id.to_string(),
            kind: ParticipantKind::Participant,
        });
    }
}

enum OpenBlock {
    Block { idx: usize },
}

/// Parses `sequenceDiagram` source into a [`SequenceModel`]. Block and
/// divider keywords (`loop`/`alt`/`else`/`opt`/`par`/`and`/`end`) nest via an
/// explicit stack rather than recursion, since the grammar is flat line by
/// line.
pub fn parse(source: &str) -> Result<SequenceModel> {
    let mut model = SequenceModel::default();
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut first_line = true;

    for raw_line in source.lines() {
        let line = raw_line.trim();
        if line.is_empty() || first_line {
            first_line = false;
            continue;
        }

        if let Some(rest) = line.strip_prefix("participant ") {
            let (id, label) = split_as(rest);
            model.participants.push(Participant { id, label, kind: ParticipantKind::Participant });
            continue;
        }
        if let Some(rest) = line.strip_prefix("actor ") {
            let (id, label) = split_as(rest);
            model.participants.push(Participant { id, label, kind: ParticipantKind::Actor });
            continue;
        }

        if let Some(rest) = line.strip_prefix("activate ") {
            ensure_participant(&mut model, rest.trim());
            model.events.push(SequenceEvent::Activation(Activation {
                participant: rest.trim().to_string(),
                edge: ActivationEdge::Start,
                at_event: model.events.len(),
            }));
            continue;
        }
        if let Some(rest) = line.strip_prefix("deactivate ") {
            model.events.push(SequenceEvent::Activation(Activation {
                participant: rest.trim().to_string(),
                edge: ActivationEdge::End,
                at_event: model.events.len(),
            }));
            continue;
        }

        if let Some(rest) = line.strip_prefix("Note ") {
            if let Some((position, tail)) = parse_note_position(rest) {
                if let Some((who, text)) = tail.split_once(':') {
                    let participants: Vec<String> = who.split(',').map(|s| s.trim().to_string()).collect();
                    for p in &participants {
                        ensure_participant(&mut model, p);
                    }
                    model.events.push(SequenceEvent::Note(Note {
                        position,
                        participants,
                        text: text.trim().to_string(),
                        at_event: model.events.len(),
                    }));
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("loop ") {
            push_block(&mut model, &mut stack, BlockKind::Loop, rest.trim());
            continue;
        }
        if let Some(rest) = line.strip_prefix("alt ") {
            push_block(&mut model, &mut stack, BlockKind::Alt, rest.trim());
            continue;
        }
        if let Some(rest) = line.strip_prefix("opt ") {
            push_block(&mut model, &mut stack, BlockKind::Opt, rest.trim());
            continue;
        }
        if let Some(rest) = line.strip_prefix("par ") {
            push_block(&mut model, &mut stack, BlockKind::Par, rest.trim());
            continue;
        }
        if let Some(rest) = line.strip_prefix("else") {
            add_divider(&mut model, &stack, DividerKind::Else, rest.trim_start_matches(':').trim());
            continue;
        }
        if let Some(rest) = line.strip_prefix("and") {
            add_divider(&mut model, &stack, DividerKind::And, rest.trim_start_matches(':').trim());
            continue;
        }
        if line == "end" {
            // A stray `end` with nothing open is recoverable: the grammar
            // doesn't make block balance load-bearing, so it's a no-op
            // rather than a parse failure. Any mismatched `end` closes the
            // innermost open block.
            if let Some(OpenBlock::Block { idx }) = stack.pop() {
                model.blocks[idx].last_event = model.events.len().saturating_sub(1);
            }
            continue;
        }

        if let Some(caps) = message_re().captures(line) {
            let from = caps["from"].trim().to_string();
            let to = caps["to"].trim().to_string();
            let arrow = arrow_kind(&caps["arrow"]);
            ensure_participant(&mut model, &from);
            ensure_participant(&mut model, &to);
            model.events.push(SequenceEvent::Message(Message {
                is_self: from == to,
                from,
                to,
                label: caps["label"].trim().to_string(),
                arrow,
            }));
        }
    }

    // Any block still open at end of input is closed implicitly at the last
    // event rather than treated as a parse failure.
    for open in &stack {
        let OpenBlock::Block { idx } = open;
        model.blocks[*idx].last_event = model.events.len().saturating_sub(1);
    }

    Ok(model)
}

fn push_block(model: &mut SequenceModel, stack: &mut Vec<OpenBlock>, kind: BlockKind, label: &str) {
    let parent = match stack.last() {
        Some(OpenBlock::Block { idx }) => Some(*idx),
        None => None,
    };
    let idx = model.blocks.len();
    model.blocks.push(Block {
        kind,
        label: label.to_string(),
        parent,
        first_event: model.events.len(),
        last_event: model.events.len(),
        dividers: Vec::new(),
    });
    stack.push(OpenBlock::Block { idx });
}

fn add_divider(model: &mut SequenceModel, stack: &[OpenBlock], kind: DividerKind, label: &str) {
    // A divider with no enclosing block is a malformed line; skip it rather
    // than failing the whole document.
    if let Some(OpenBlock::Block { idx }) = stack.last() {
        model.blocks[*idx].dividers.push(Divider {
            kind,
            label: label.to_string(),
            at_event: model.events.len(),
        });
    }
}

fn split_as(rest: &str) -> (String, String) {
    match rest.split_once(" as ") {
        Some((id, label)) => (id.trim().to_string(), label.trim().to_string()),
        None => (rest.trim().to_string(), rest.trim().to_string()),
    }
}

fn parse_note_position(rest: &str) -> Option<(NotePosition, &str)> {
    if let Some(tail) = rest.strip_prefix("left of ") {
        Some((NotePosition::LeftOf, tail))
    } else if let Some(tail) = rest.strip_prefix("right of ") {
        Some((NotePosition::RightOf, tail))
    } else {
        rest.strip_prefix("over ").map(|tail| (NotePosition::Over, tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_participants_and_messages() {
        let m = parse("sequenceDiagram\nA->>B: hello\nB-->>A: hi").unwrap();
        assert_eq!(m.participants.len(), 2);
        assert_eq!(m.events.len(), 2);
    }

    #[test]
    fn self_message_is_flagged() {
        let m = parse("sequenceDiagram\nA->>A: think").unwrap();
        match &m.events[0] {
            SequenceEvent::Message(msg) => assert!(msg.is_self),
            _ => panic!("expected message"),
        }
    }

    #[test]
    fn alt_else_builds_one_block_with_a_divider() {
        let m = parse("sequenceDiagram\nalt ok\nA->>B: x\nelse bad\nA->>B: y\nend").unwrap();
        assert_eq!(m.blocks.len(), 1);
        assert_eq!(m.blocks[0].dividers.len(), 1);
        assert_eq!(m.blocks[0].dividers[0].kind, DividerKind::Else);
    }

    #[test]
    fn unmatched_end_is_silently_ignored() {
        let m = parse("sequenceDiagram\nend\nA->>B: hi").unwrap();
        assert_eq!(m.events.len(), 1);
    }

    #[test]
    fn unclosed_block_closes_implicitly_at_eof() {
        let m = parse("sequenceDiagram\nloop x\nA->>B: y").unwrap();
        assert_eq!(m.blocks.len(), 1);
        assert_eq!(m.blocks[0].last_event, m.events.len() - 1);
    }
}

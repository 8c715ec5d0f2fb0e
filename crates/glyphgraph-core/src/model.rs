//! Tier-A parsed models: pure logical structure, no coordinates. One struct
//! per diagram family, built by the parsers in `diagrams/` and consumed by
//! `glyphgraph-render`.

use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Td,
    Lr,
    Bt,
    Rl,
}

impl Direction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TD" | "TB" => Some(Self::Td),
            "LR" => Some(Self::Lr),
            "BT" => Some(Self::Bt),
            "RL" => Some(Self::Rl),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------- flow ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Rectangle,
    Rounded,
    Diamond,
    Stadium,
    Circle,
    Subroutine,
    DoubleCircle,
    Hexagon,
    Cylinder,
    AsymmetricFlag,
    Trapezoid,
    TrapezoidAlt,
    StateStart,
    StateEnd,
}

#[derive(Debug, Clone)]
pub struct FlowNode {
    pub label: String,
    pub shape: NodeShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    Solid,
    Dotted,
    Thick,
}

#[derive(Debug, Clone)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    pub style: EdgeStyle,
    pub has_arrow_start: bool,
    pub has_arrow_end: bool,
}

#[derive(Debug, Clone)]
pub struct Subgraph {
    pub id: String,
    pub label: String,
    pub direction: Option<Direction>,
    pub child_nodes: Vec<String>,
    pub child_subgraphs: Vec<Subgraph>,
}

#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub direction: Direction,
    pub nodes: IndexMap<String, FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub subgraphs: Vec<Subgraph>,
    /// `classDef name -> CSS-ish `key:value` pairs.
    pub class_defs: IndexMap<String, Vec<(String, String)>>,
    /// `class nodeId className` assignments, last write wins.
    pub node_classes: IndexMap<String, String>,
    /// `style nodeId k:v,k:v` inline overrides, last write wins.
    pub node_styles: IndexMap<String, Vec<(String, String)>>,
    /// `accTitle: ...`, stored but never rendered into SVG.
    pub acc_title: Option<String>,
    /// `accDescr: ...` (or the `accDescr { ... }` block form), ditto.
    pub acc_descr: Option<String>,
}

// ------------------------------------------------------------ sequence ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantKind {
    Participant,
    Actor,
}

#[derive(Debug, Clone)]
pub struct Participant {
    pub id: String,
    pub label: String,
    pub kind: ParticipantKind,
}

/// The four arrow forms spec §4.3 enumerates. `->`/`->>` are forward calls
/// (solid line), `-->`/`-->>` are returns (dashed line); `>>` suffix means a
/// filled arrowhead, bare `>` means open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceArrow {
    AsyncOpen,
    SyncFilled,
    ReturnOpen,
    ReturnFilled,
}

impl SequenceArrow {
    pub fn is_dashed(self) -> bool {
        matches!(self, Self::ReturnOpen | Self::ReturnFilled)
    }

    pub fn is_filled(self) -> bool {
        matches!(self, Self::SyncFilled | Self::ReturnFilled)
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub label: String,
    pub arrow: SequenceArrow,
    /// True when `from == to` — routed as a three-segment loop (§4.6).
    pub is_self: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Loop,
    Alt,
    Opt,
    Par,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DividerKind {
    Else,
    And,
}

#[derive(Debug, Clone)]
pub struct Divider {
    pub kind: DividerKind,
    pub label: String,
    /// Index into `SequenceModel::events` where the divider sits.
    pub at_event: usize,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    pub label: String,
    pub parent: Option<usize>,
    pub first_event: usize,
    pub last_event: usize,
    pub dividers: Vec<Divider>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePosition {
    LeftOf,
    RightOf,
    Over,
}

#[derive(Debug, Clone)]
pub struct Note {
    pub position: NotePosition,
    pub participants: Vec<String>,
    pub text: String,
    pub at_event: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationEdge {
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct Activation {
    pub participant: String,
    pub edge: ActivationEdge,
    pub at_event: usize,
}

/// A single row-slot event in the sequence: either a message, a note, or an
/// activation toggle. Blocks reference spans of event indices.
#[derive(Debug, Clone)]
pub enum SequenceEvent {
    Message(Message),
    Note(Note),
    Activation(Activation),
}

#[derive(Debug, Clone, Default)]
pub struct SequenceModel {
    pub participants: Vec<Participant>,
    pub events: Vec<SequenceEvent>,
    pub blocks: Vec<Block>,
}

// ---------------------------------------------------------------- class --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Package,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub visibility: Option<Visibility>,
    pub name: String,
    pub type_hint: Option<String>,
    pub args: Option<String>,
    pub is_static: bool,
    pub is_abstract: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ClassDef {
    pub label: String,
    pub annotation: Option<String>,
    pub attributes: Vec<Member>,
    pub methods: Vec<Member>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    Inheritance,
    Composition,
    Aggregation,
    Association,
    Dependency,
    Realization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAt {
    From,
    To,
}

#[derive(Debug, Clone)]
pub struct ClassRelationship {
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    pub marker_at: MarkerAt,
    pub label: Option<String>,
    pub from_cardinality: Option<String>,
    pub to_cardinality: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    pub classes: IndexMap<String, ClassDef>,
    pub relationships: Vec<ClassRelationship>,
    pub namespaces: IndexMap<String, Vec<String>>,
}

// ----------------------------------------------------------------- er ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Pk,
    Fk,
    Uk,
}

#[derive(Debug, Clone)]
pub struct ErAttribute {
    pub type_name: String,
    pub name: String,
    pub keys: Vec<KeyKind>,
}

#[derive(Debug, Clone, Default)]
pub struct ErEntity {
    pub label: String,
    pub attributes: Vec<ErAttribute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    ZeroOne,
    Many,
    ZeroMany,
}

#[derive(Debug, Clone)]
pub struct ErRelationship {
    pub entity1: String,
    pub entity2: String,
    pub cardinality1: Cardinality,
    pub cardinality2: Cardinality,
    pub label: String,
    pub identifying: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ErModel {
    pub entities: IndexMap<String, ErEntity>,
    pub relationships: Vec<ErRelationship>,
}

#[derive(Debug, Clone)]
pub enum Diagram {
    Flow(FlowGraph),
    Sequence(SequenceModel),
    Class(ClassModel),
    Er(ErModel),
}

pub mod class;
pub mod er;
pub mod flow;
pub mod sequence;

/// Splits a shape/label delimiter pair off a node reference like `id[text]`.
/// Returns `(id, label, shape)` for every bracket style the flow grammar
/// recognises; falls back to `(id, id, Rectangle)` when there is no shape at
/// all (a bare reference to a node declared elsewhere).
pub(crate) use flow::parse_node_ref;

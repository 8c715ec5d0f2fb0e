pub type Result<T> = std::result::Result<T, Error>;

/// Fatal parse-stage errors. Recoverable problems (a line the grammar
/// doesn't recognise, a dangling node reference) are handled inline by the
/// parsers via forward-reference materialisation and best-effort line
/// skipping — they never reach here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cyclic subgraph containment in {id}")]
    CyclicSubgraph { id: String },

    #[error("unbalanced block in {diagram_type} diagram: {message}")]
    UnbalancedBlock {
        diagram_type: &'static str,
        message: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("node {id} has negative width or height")]
    NegativeDimensions { id: String },

    #[error("edge references node {id} which was never materialized")]
    DanglingEdge { id: String },
}

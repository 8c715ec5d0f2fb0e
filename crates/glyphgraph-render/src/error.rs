pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] glyphgraph_core::Error),

    #[error(transparent)]
    Layout(#[from] glyphgraph_layout::LayoutError),

    #[error("render invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] glyphgraph_core::Error),

    #[error("ascii render invariant violated: diagonal glyph {glyph:?} at line {line}, column {column}")]
    DiagonalGlyph { line: usize, column: usize, glyph: char },
}

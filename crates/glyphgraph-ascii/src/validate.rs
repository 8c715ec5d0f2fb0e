//! Confirms the finished canvas never drew a diagonal stroke outside a
//! label's interior. Routing never emits `/ \ ╱ ╲`, so this only ever fires
//! if a future change to `route.rs` breaks that guarantee.

use crate::canvas::Canvas;
use crate::error::{Error, Result};

const DIAGONAL_GLYPHS: [char; 4] = ['/', '\\', '╱', '╲'];

pub fn check_no_diagonals(canvas: &Canvas) -> Result<()> {
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let glyph = canvas.get(x, y);
            if DIAGONAL_GLYPHS.contains(&glyph) && !canvas.is_label_interior(x, y) {
                return Err(Error::DiagonalGlyph { line: y, column: x, glyph });
            }
        }
    }
    Ok(())
}

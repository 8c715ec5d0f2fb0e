//! Draws a bordered, centered-label box for a single node into the canvas.

use crate::canvas::Canvas;
use crate::grid::NodeBox;
use crate::options::AsciiOptions;
use unicode_width::UnicodeWidthStr;

pub fn draw(canvas: &mut Canvas, opts: &AsciiOptions, b: &NodeBox, label: &str) {
    let glyphs = opts.glyphs();
    let x0 = b.x;
    let y0 = b.y;
    let x1 = b.x + b.w - 1;
    let y1 = b.y + b.h - 1;

    canvas.set(x0, y0, glyphs.corner_tl);
    canvas.set(x1, y0, glyphs.corner_tr);
    canvas.set(x0, y1, glyphs.corner_bl);
    canvas.set(x1, y1, glyphs.corner_br);
    for x in (x0 + 1)..x1 {
        canvas.set(x, y0, glyphs.horizontal);
        canvas.set(x, y1, glyphs.horizontal);
    }
    for y in (y0 + 1)..y1 {
        canvas.set(x0, y, glyphs.vertical);
        canvas.set(x1, y, glyphs.vertical);
    }
    for y in (y0 + 1)..y1 {
        for x in (x0 + 1)..x1 {
            canvas.set_label(x, y, ' ');
        }
    }

    let label_row = y0 + b.h / 2;
    let label_w = UnicodeWidthStr::width(label);
    let interior_w = x1.saturating_sub(x0 + 1);
    let start = x0 + 1 + interior_w.saturating_sub(label_w) / 2;
    for (i, ch) in label.chars().enumerate() {
        canvas.set_label(start + i, label_row, ch);
    }
}

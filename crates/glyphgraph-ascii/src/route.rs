//! Manhattan-only edge routing between node boxes already stamped into the
//! canvas. No diagonal moves are ever emitted, which is what keeps the
//! diagonal-glyph invariant trivially satisfiable.

use crate::canvas::Canvas;
use crate::grid::NodeBox;
use crate::options::{AsciiOptions, GraphDirection};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

fn anchor(b: &NodeBox, side: Side) -> (usize, usize) {
    match side {
        Side::Left => (b.x, b.y + b.h / 2),
        Side::Right => (b.x + b.w - 1, b.y + b.h / 2),
        Side::Top => (b.x + b.w / 2, b.y),
        Side::Bottom => (b.x + b.w / 2, b.y + b.h - 1),
    }
}

/// Draws one orthogonal path from `source`'s outward face to `target`'s
/// inward face, with a single bend when the two boxes aren't aligned on the
/// travel axis. The last glyph written is an arrowhead.
pub fn route_edge(canvas: &mut Canvas, opts: &AsciiOptions, source: &NodeBox, target: &NodeBox) {
    let glyphs = opts.glyphs();
    let horizontal = opts.graph_direction == GraphDirection::Lr;

    let (from, to, from_side, to_side) = if horizontal {
        if target.x >= source.x {
            (anchor(source, Side::Right), anchor(target, Side::Left), Side::Right, Side::Left)
        } else {
            (anchor(source, Side::Left), anchor(target, Side::Right), Side::Left, Side::Right)
        }
    } else if target.y >= source.y {
        (anchor(source, Side::Bottom), anchor(target, Side::Top), Side::Bottom, Side::Top)
    } else {
        (anchor(source, Side::Top), anchor(target, Side::Bottom), Side::Top, Side::Bottom)
    };

    let (x0, y0) = from;
    let (x1, y1) = to;

    if horizontal {
        let mid_x = if x1 > x0 { x0 + (x1 - x0) / 2 } else { x0 };
        for x in inclusive_range(x0, mid_x) {
            canvas.set_if_blank(x, y0, glyphs.horizontal);
        }
        for y in inclusive_range(y0, y1) {
            canvas.set_if_blank(mid_x, y, glyphs.vertical);
        }
        for x in inclusive_range(mid_x, x1) {
            canvas.set_if_blank(x, y1, glyphs.horizontal);
        }
        canvas.set(mid_x, y0, corner_for(glyphs, from_side, y1 >= y0));
        canvas.set(mid_x, y1, corner_for(glyphs, to_side, y0 >= y1));
        let arrow = if x1 >= x0 { glyphs.arrow_right } else { glyphs.arrow_left };
        canvas.set(x1, y1, arrow);
    } else {
        let mid_y = if y1 > y0 { y0 + (y1 - y0) / 2 } else { y0 };
        for y in inclusive_range(y0, mid_y) {
            canvas.set_if_blank(x0, y, glyphs.vertical);
        }
        for x in inclusive_range(x0, x1) {
            canvas.set_if_blank(x, mid_y, glyphs.horizontal);
        }
        for y in inclusive_range(mid_y, y1) {
            canvas.set_if_blank(x1, y, glyphs.vertical);
        }
        canvas.set(x0, mid_y, corner_for(glyphs, from_side, x1 >= x0));
        canvas.set(x1, mid_y, corner_for(glyphs, to_side, x0 >= x1));
        let arrow = if y1 >= y0 { glyphs.arrow_down } else { glyphs.arrow_up };
        canvas.set(x1, y1, arrow);
    }
}

/// Routes a bundle of edges that share a single source: one segment leaves
/// the source and splits at a junction cell one step away from it, then each
/// target gets its own branch from that junction.
pub fn route_fan_out(canvas: &mut Canvas, opts: &AsciiOptions, source: &NodeBox, targets: &[&NodeBox]) {
    let glyphs = opts.glyphs();
    let horizontal = opts.graph_direction == GraphDirection::Lr;

    if horizontal {
        let (x0, y0) = anchor(source, Side::Right);
        let junction_x = x0 + 1;
        canvas.set_if_blank(x0, y0, glyphs.horizontal);
        for &target in targets {
            let (x1, y1) = anchor(target, Side::Left);
            for y in inclusive_range(y0, y1) {
                canvas.set_if_blank(junction_x, y, glyphs.vertical);
            }
            for x in inclusive_range(junction_x, x1) {
                canvas.set_if_blank(x, y1, glyphs.horizontal);
            }
            if y1 != y0 {
                canvas.set(junction_x, y1, corner_for(glyphs, Side::Left, y0 >= y1));
            }
            canvas.set(x1, y1, glyphs.arrow_right);
        }
        canvas.set(junction_x, y0, glyphs.fan_out);
    } else {
        let (x0, y0) = anchor(source, Side::Bottom);
        let junction_y = y0 + 1;
        canvas.set_if_blank(x0, y0, glyphs.vertical);
        for &target in targets {
            let (x1, y1) = anchor(target, Side::Top);
            for x in inclusive_range(x0, x1) {
                canvas.set_if_blank(x, junction_y, glyphs.horizontal);
            }
            for y in inclusive_range(junction_y, y1) {
                canvas.set_if_blank(x1, y, glyphs.vertical);
            }
            if x1 != x0 {
                canvas.set(x1, junction_y, corner_for(glyphs, Side::Top, x0 >= x1));
            }
            canvas.set(x1, y1, glyphs.arrow_down);
        }
        canvas.set(x0, junction_y, glyphs.fan_out);
    }
}

/// Routes a bundle of edges that share a single target: each source gets its
/// own branch up to a junction cell one step away from the target, then a
/// single shared segment carries the bundle the rest of the way in.
pub fn route_fan_in(canvas: &mut Canvas, opts: &AsciiOptions, sources: &[&NodeBox], target: &NodeBox) {
    let glyphs = opts.glyphs();
    let horizontal = opts.graph_direction == GraphDirection::Lr;

    if horizontal {
        let (x1, y1) = anchor(target, Side::Left);
        let junction_x = x1.saturating_sub(1);
        for &source in sources {
            let (x0, y0) = anchor(source, Side::Right);
            for x in inclusive_range(x0, junction_x) {
                canvas.set_if_blank(x, y0, glyphs.horizontal);
            }
            for y in inclusive_range(y0, y1) {
                canvas.set_if_blank(junction_x, y, glyphs.vertical);
            }
            if y0 != y1 {
                canvas.set(junction_x, y0, corner_for(glyphs, Side::Right, y1 >= y0));
            }
        }
        for x in inclusive_range(junction_x, x1) {
            canvas.set_if_blank(x, y1, glyphs.horizontal);
        }
        canvas.set(junction_x, y1, glyphs.fan_in);
        canvas.set(x1, y1, glyphs.arrow_right);
    } else {
        let (x1, y1) = anchor(target, Side::Top);
        let junction_y = y1.saturating_sub(1);
        for &source in sources {
            let (x0, y0) = anchor(source, Side::Bottom);
            for y in inclusive_range(y0, junction_y) {
                canvas.set_if_blank(x0, y, glyphs.vertical);
            }
            for x in inclusive_range(x0, x1) {
                canvas.set_if_blank(x, junction_y, glyphs.horizontal);
            }
            if x0 != x1 {
                canvas.set(x0, junction_y, corner_for(glyphs, Side::Bottom, x1 >= x0));
            }
        }
        for y in inclusive_range(junction_y, y1) {
            canvas.set_if_blank(x1, y, glyphs.vertical);
        }
        canvas.set(x1, junction_y, glyphs.fan_in);
        canvas.set(x1, y1, glyphs.arrow_down);
    }
}

fn inclusive_range(a: usize, b: usize) -> Box<dyn Iterator<Item = usize>> {
    if a <= b { Box::new(a..=b) } else { Box::new((b..=a).rev()) }
}

fn corner_for(glyphs: &crate::options::Glyphs, side: Side, forward: bool) -> char {
    match (side, forward) {
        (Side::Right, true) | (Side::Left, false) => glyphs.tee_right,
        (Side::Right, false) | (Side::Left, true) => glyphs.tee_left,
        (Side::Bottom, true) | (Side::Top, false) => glyphs.tee_down,
        (Side::Bottom, false) | (Side::Top, true) => glyphs.tee_up,
    }
}

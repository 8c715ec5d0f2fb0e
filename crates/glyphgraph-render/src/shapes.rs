//! Per-[`NodeShape`] path recipes. Each function draws the outline for a
//! node box already positioned by the layout engine; callers add the label
//! on top separately.

use glyphgraph_core::model::NodeShape;
use glyphgraph_layout::NodeBox;

use crate::svg::Svg;

pub fn draw(svg: &mut Svg, shape: NodeShape, b: NodeBox, class: &str) {
    let (x, y, w, h) = (b.x, b.y, b.width, b.height);
    let (cx, cy) = (x + w / 2.0, y + h / 2.0);
    match shape {
        NodeShape::Rectangle => svg.rect(x, y, w, h, 0.0, class),
        NodeShape::Rounded => svg.rect(x, y, w, h, h.min(w) / 6.0, class),
        NodeShape::Stadium => svg.rect(x, y, w, h, h / 2.0, class),
        NodeShape::Subroutine => {
            svg.rect(x, y, w, h, 0.0, class);
            let inset = w.min(h) * 0.08;
            svg.rect(x + inset, y, w - 2.0 * inset, h, 0.0, class);
        }
        NodeShape::Cylinder => {
            let ry = h * 0.12;
            let d = format!(
                "M {x:.2} {top:.2} \
                 A {rx:.2} {ry:.2} 0 0 0 {right:.2} {top:.2} \
                 L {right:.2} {bottom:.2} \
                 A {rx:.2} {ry:.2} 0 0 1 {x:.2} {bottom:.2} \
                 Z",
                x = x,
                top = y + ry,
                rx = w / 2.0,
                ry = ry,
                right = x + w,
                bottom = y + h - ry,
            );
            svg.path(&d, class);
        }
        NodeShape::Circle => svg.circle(cx, cy, w.min(h) / 2.0, class),
        NodeShape::DoubleCircle => {
            let r = w.min(h) / 2.0;
            svg.circle(cx, cy, r, class);
            svg.circle(cx, cy, r * 0.82, class);
        }
        NodeShape::Diamond => svg.polygon(&[(cx, y), (x + w, cy), (cx, y + h), (x, cy)], class),
        NodeShape::Hexagon => {
            let cut = w * 0.2;
            svg.polygon(
                &[
                    (x + cut, y),
                    (x + w - cut, y),
                    (x + w, cy),
                    (x + w - cut, y + h),
                    (x + cut, y + h),
                    (x, cy),
                ],
                class,
            );
        }
        NodeShape::Trapezoid => {
            let cut = w * 0.18;
            svg.polygon(&[(x + cut, y), (x + w - cut, y), (x + w, y + h), (x, y + h)], class);
        }
        NodeShape::TrapezoidAlt => {
            let cut = w * 0.18;
            svg.polygon(&[(x, y), (x + w, y), (x + w - cut, y + h), (x + cut, y + h)], class);
        }
        NodeShape::AsymmetricFlag => {
            let cut = w * 0.15;
            svg.polygon(&[(x, y), (x + w - cut, y), (x + w, cy), (x + w - cut, y + h), (x, y + h)], class);
        }
        NodeShape::StateStart => {
            svg.circle(cx, cy, w.min(h) / 2.0, &format!("{class} state-start"));
        }
        NodeShape::StateEnd => {
            let r = w.min(h) / 2.0;
            svg.circle(cx, cy, r, &format!("{class} state-end-ring"));
            svg.circle(cx, cy, r * 0.55, &format!("{class} state-end-dot"));
        }
    }
}

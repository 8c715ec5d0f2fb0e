use crate::NodeBox;

/// The point on `points` at exactly 50% of the polyline's total length,
/// interpolating inside the straddling segment.
///
/// Deliberately not `points[points.len() / 2]` — for a 2-point line that
/// yields an endpoint, which would violate the "label stays on the path,
/// away from endpoints" contract for every straight edge in the diagram.
pub fn arc_length_midpoint(points: &[(f64, f64)]) -> (f64, f64) {
    match points.len() {
        0 => (0.0, 0.0),
        1 => points[0],
        _ => {
            let lengths: Vec<f64> = points
                .windows(2)
                .map(|w| dist(w[0], w[1]))
                .collect();
            let total: f64 = lengths.iter().sum();
            if total <= f64::EPSILON {
                return points[0];
            }
            let target = total / 2.0;
            let mut walked = 0.0;
            for (i, seg_len) in lengths.iter().enumerate() {
                if walked + seg_len >= target || i == lengths.len() - 1 {
                    let remaining = (target - walked).max(0.0);
                    let t = if *seg_len > f64::EPSILON { remaining / seg_len } else { 0.0 };
                    let (x0, y0) = points[i];
                    let (x1, y1) = points[i + 1];
                    return (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
                }
                walked += seg_len;
            }
            *points.last().unwrap()
        }
    }
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Where the ray from `box`'s center toward `toward` crosses the box
/// boundary. Guarantees spec invariant 1 (edge endpoints land on the
/// referenced node's bounding box).
fn clip_point_from_box(b: NodeBox, toward: (f64, f64)) -> (f64, f64) {
    let cx = b.x + b.width / 2.0;
    let cy = b.y + b.height / 2.0;
    let dx = toward.0 - cx;
    let dy = toward.1 - cy;
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return (cx, cy);
    }
    let half_w = b.width / 2.0;
    let half_h = b.height / 2.0;
    let scale_x = if dx.abs() > f64::EPSILON { half_w / dx.abs() } else { f64::INFINITY };
    let scale_y = if dy.abs() > f64::EPSILON { half_h / dy.abs() } else { f64::INFINITY };
    let scale = scale_x.min(scale_y);
    (cx + dx * scale, cy + dy * scale)
}

/// Replaces the first and last point of a center-to-center path (which may
/// pass through intermediate dummy-node waypoints) with the points where it
/// crosses the `from`/`to` node boundaries.
pub fn clip_polyline_to_boxes(
    centers: &[(f64, f64)],
    from_box: NodeBox,
    to_box: NodeBox,
) -> Vec<(f64, f64)> {
    if centers.len() < 2 {
        let c1 = (from_box.x + from_box.width / 2.0, from_box.y + from_box.height / 2.0);
        let c2 = (to_box.x + to_box.width / 2.0, to_box.y + to_box.height / 2.0);
        return vec![clip_point_from_box(from_box, c2), clip_point_from_box(to_box, c1)];
    }
    let mut out = centers.to_vec();
    let first_interior = out[1];
    let last_interior = out[out.len() - 2];
    *out.first_mut().unwrap() = clip_point_from_box(from_box, first_interior);
    *out.last_mut().unwrap() = clip_point_from_box(to_box, last_interior);
    out
}

/// Fixed three-bend loop used for a self-edge (`A --> A`): right, down,
/// left — never a curve, so it stays orthogonal like every other route.
pub fn self_loop_points(b: NodeBox, loop_extent: f64) -> Vec<(f64, f64)> {
    let top_y = b.y + b.height * 0.3;
    let bottom_y = b.y + b.height * 0.7;
    let out_x = b.x + b.width;
    vec![
        (out_x, top_y),
        (out_x + loop_extent, top_y),
        (out_x + loop_extent, bottom_y),
        (out_x, bottom_y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_of_straight_line_is_not_an_endpoint() {
        let pts = [(0.0, 0.0), (10.0, 0.0)];
        let (x, y) = arc_length_midpoint(&pts);
        assert!((x - 5.0).abs() < 1e-9);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn midpoint_of_l_shaped_path_sits_on_the_bend() {
        // total length 10 (down) + 10 (right) = 20, midpoint at length 10 == the corner.
        let pts = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)];
        let (x, y) = arc_length_midpoint(&pts);
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);
    }
}

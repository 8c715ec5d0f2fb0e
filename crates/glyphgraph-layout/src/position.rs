use crate::dummy::Chains;
use crate::{Direction, LayoutOptions};
use rustc_hash::FxHashMap;

/// Converts an ordered set of layers into absolute `(x, y)` centers: a
/// cumulative cross-axis position within each layer (spaced by
/// `node_spacing`, then centered against the widest layer) and a cumulative
/// main-axis position across layers (spaced by `layer_spacing`, sized by
/// each layer's tallest member).
pub fn assign_coordinates(
    ordered: &[Vec<String>],
    chains: &Chains,
    opts: &LayoutOptions,
) -> (FxHashMap<String, (f64, f64)>, (f64, f64)) {
    let is_horizontal = matches!(opts.direction, Direction::Lr | Direction::Rl);
    let size_of = |id: &str| -> (f64, f64) { chains.sizes.get(id).copied().unwrap_or((1.0, 1.0)) };

    let mut cross_positions: FxHashMap<String, f64> = FxHashMap::default();
    let mut layer_cross_extent: Vec<f64> = Vec::with_capacity(ordered.len());
    for layer in ordered {
        let mut cursor = 0.0;
        for id in layer {
            let (w, h) = size_of(id);
            let cross_size = if is_horizontal { h } else { w };
            cross_positions.insert(id.clone(), cursor + cross_size / 2.0);
            cursor += cross_size + opts.node_spacing;
        }
        layer_cross_extent.push(if layer.is_empty() { 0.0 } else { cursor - opts.node_spacing });
    }
    let max_extent = layer_cross_extent.iter().cloned().fold(0.0_f64, f64::max);

    let mut shifted: FxHashMap<String, f64> = FxHashMap::default();
    for (li, layer) in ordered.iter().enumerate() {
        let shift = (max_extent - layer_cross_extent[li]) / 2.0;
        for id in layer {
            shifted.insert(id.clone(), cross_positions[id] + shift);
        }
    }

    let layer_main_size: Vec<f64> = ordered
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|id| {
                    let (w, h) = size_of(id);
                    if is_horizontal { w } else { h }
                })
                .fold(0.0_f64, f64::max)
        })
        .collect();

    let mut main_offsets: Vec<f64> = Vec::with_capacity(ordered.len());
    let mut cursor = 0.0;
    for (i, size) in layer_main_size.iter().enumerate() {
        main_offsets.push(cursor + size / 2.0);
        cursor += size;
        if i + 1 < ordered.len() {
            cursor += opts.layer_spacing;
        }
    }
    let total_main = cursor;

    let reverse_main = matches!(opts.direction, Direction::Bt | Direction::Rl);

    let mut coords: FxHashMap<String, (f64, f64)> = FxHashMap::default();
    for (li, layer) in ordered.iter().enumerate() {
        let main = if reverse_main { total_main - main_offsets[li] } else { main_offsets[li] };
        for id in layer {
            let cross = shifted[id];
            let point = if is_horizontal { (main, cross) } else { (cross, main) };
            coords.insert(id.clone(), point);
        }
    }

    let extent = if is_horizontal { (total_main, max_extent) } else { (max_extent, total_main) };
    (coords, extent)
}

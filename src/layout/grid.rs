//! # Ratio Tracks
//!
//! Distributes a span among proportional tracks separated by fixed-width
//! dividers. This is the one-dimensional half of the cabinet grid: columns
//! and rows are resolved independently with the same functions.
//!
//! - Each divider reserves one board thickness
//! - The remaining span is shared by ratio weight
//! - Positions accumulate track by track (running offset)

/// Resolve ratio weights to concrete track sizes.
///
/// `n` tracks get `n - 1` gaps of width `gap`; what is left of
/// `available_space` is split proportionally. A zero ratio sum is treated as
/// one so the division stays defined.
pub fn resolve_tracks(ratios: &[f64], available_space: f64, gap: f64) -> Vec<f64> {
    if ratios.is_empty() {
        return vec![];
    }

    let total_gap = gap * (ratios.len() - 1) as f64;
    let space_after_gaps = available_space - total_gap;

    let sum: f64 = ratios.iter().sum();
    let total = if sum == 0.0 { 1.0 } else { sum };

    ratios
        .iter()
        .map(|ratio| ratio / total * space_after_gaps)
        .collect()
}

/// Centers of consecutive tracks, walking from `start` in `direction`
/// (`1.0` or `-1.0`). Each track starts where the previous one ended plus
/// one gap.
pub fn track_centers(sizes: &[f64], start: f64, gap: f64, direction: f64) -> Vec<f64> {
    let mut cursor = start;
    sizes
        .iter()
        .map(|size| {
            let center = cursor + direction * size / 2.0;
            cursor += direction * (size + gap);
            center
        })
        .collect()
}

/// Centers of the dividers between consecutive tracks. There is one fewer
/// divider than tracks.
pub fn divider_centers(sizes: &[f64], start: f64, gap: f64, direction: f64) -> Vec<f64> {
    let mut offset = 0.0;
    sizes
        .iter()
        .take(sizes.len().saturating_sub(1))
        .enumerate()
        .map(|(i, size)| {
            offset += size;
            start + direction * (offset + (i as f64 + 0.5) * gap)
        })
        .collect()
}

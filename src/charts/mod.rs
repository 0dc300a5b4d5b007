//! Charts module - Figure drawing

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};

/// Series colour palette (RGB)
pub const PALETTE: [[u8; 3]; 10] = [
    [52, 152, 219],  // Blue
    [231, 76, 60],   // Red
    [46, 204, 113],  // Green
    [155, 89, 182],  // Purple
    [243, 156, 18],  // Orange
    [26, 188, 156],  // Teal
    [233, 30, 99],   // Pink
    [0, 188, 212],   // Cyan
    [255, 87, 34],   // Deep Orange
    [121, 85, 72],   // Brown
];

/// Colour of the `index`-th series unless the series brings its own.
pub fn series_color(index: usize, own: Option<[u8; 3]>) -> [u8; 3] {
    own.unwrap_or(PALETTE[index % PALETTE.len()])
}

/// Spread points that share a value symmetrically around `center`.
///
/// Used for strip plots so repeated values stay visible.
pub fn beeswarm_positions(values: &[f64], center: f64, width: f64) -> Vec<f64> {
    use std::collections::HashMap;

    let mut positions = vec![center; values.len()];

    // Round values and find duplicates
    let precision = 1e6;
    let mut value_indices: HashMap<i64, Vec<usize>> = HashMap::new();
    for (i, &v) in values.iter().enumerate() {
        let key = (v * precision).round() as i64;
        value_indices.entry(key).or_default().push(i);
    }

    for indices in value_indices.values() {
        if indices.len() > 1 {
            let step = width / (indices.len() - 1) as f64;
            let start = center - width / 2.0;
            for (i, &idx) in indices.iter().enumerate() {
                positions[idx] = start + i as f64 * step;
            }
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beeswarm_spreads_duplicates_only() {
        let pos = beeswarm_positions(&[1.0, 2.0, 1.0, 1.0], 5.0, 0.4);
        assert_eq!(pos[1], 5.0);
        let mut dup = vec![pos[0], pos[2], pos[3]];
        dup.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((dup[0] - 4.8).abs() < 1e-9);
        assert!((dup[1] - 5.0).abs() < 1e-9);
        assert!((dup[2] - 5.2).abs() < 1e-9);
    }

    #[test]
    fn own_colour_wins() {
        assert_eq!(series_color(0, Some([1, 2, 3])), [1, 2, 3]);
        assert_eq!(series_color(11, None), PALETTE[1]);
    }
}

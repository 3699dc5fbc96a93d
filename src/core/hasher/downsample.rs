//! Area-averaging reduction of an intensity plane to a small grid.
//!
//! Every destination cell is the coverage-weighted mean of the source
//! pixels it overlaps. Pixels cut by a cell edge contribute in proportion
//! to the overlapped fraction, so non-integer scale factors are exact.
//! The reduction is separable and always summed in the same order.

use crate::core::pixels::LumaPlane;

/// Source indices and normalized weights contributing to one output cell
type Taps = Vec<(usize, f64)>;

/// Compute the taps for every output cell along one axis.
///
/// The weights of each cell sum to 1.
fn axis_taps(src_len: usize, dst_len: usize) -> Vec<Taps> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|cell| {
            let start = cell as f64 * scale;
            let end = (cell + 1) as f64 * scale;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);

            (first..last)
                .filter_map(|src| {
                    let overlap = end.min(src as f64 + 1.0) - start.max(src as f64);
                    (overlap > 0.0).then_some((src, overlap / scale))
                })
                .collect()
        })
        .collect()
}

/// Reduce `plane` to a `width x height` grid by area averaging.
///
/// Also works when the grid is larger than the plane on either axis, in
/// which case source values are replicated.
pub fn area_resize(plane: &LumaPlane, width: usize, height: usize) -> LumaPlane {
    let column_taps = axis_taps(plane.width(), width);
    let row_taps = axis_taps(plane.height(), height);

    // Horizontal pass: plane.height() rows of `width` cells
    let mut horizontal = Vec::with_capacity(plane.height() * width);
    for y in 0..plane.height() {
        let row = plane.row(y);
        for taps in &column_taps {
            horizontal.push(taps.iter().map(|&(x, w)| row[x] * w).sum::<f64>());
        }
    }

    // Vertical pass
    let mut values = Vec::with_capacity(width * height);
    for taps in &row_taps {
        for x in 0..width {
            values.push(
                taps.iter()
                    .map(|&(y, w)| horizontal[y * width + x] * w)
                    .sum::<f64>(),
            );
        }
    }

    LumaPlane {
        width,
        height,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> LumaPlane {
        let values = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        LumaPlane::from_values(width, height, values).unwrap()
    }

    #[test]
    fn taps_sum_to_one() {
        for (src, dst) in [(16, 8), (10, 8), (100, 9), (8, 32), (13, 7)] {
            for taps in axis_taps(src, dst) {
                let total: f64 = taps.iter().map(|(_, w)| w).sum();
                assert!((total - 1.0).abs() < 1e-12, "{src}->{dst}: {total}");
            }
        }
    }

    #[test]
    fn integer_factor_averages_blocks() {
        let plane = plane_from_fn(4, 4, |x, y| (x + 4 * y) as f64);
        let reduced = area_resize(&plane, 2, 2);

        // Top-left block is {0, 1, 4, 5}
        assert!((reduced.get(0, 0) - 2.5).abs() < 1e-12);
        // Bottom-right block is {10, 11, 14, 15}
        assert!((reduced.get(1, 1) - 12.5).abs() < 1e-12);
    }

    #[test]
    fn fractional_factor_weights_partial_pixels() {
        // Three pixels into two cells: each cell covers 1.5 pixels
        let plane = plane_from_fn(3, 1, |x, _| [0.0, 30.0, 90.0][x]);
        let reduced = area_resize(&plane, 2, 1);

        // Cell 0: (0 * 1 + 30 * 0.5) / 1.5 = 10
        assert!((reduced.get(0, 0) - 10.0).abs() < 1e-9);
        // Cell 1: (30 * 0.5 + 90 * 1) / 1.5 = 70
        assert!((reduced.get(1, 0) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn uniform_plane_stays_uniform() {
        let plane = plane_from_fn(37, 23, |_, _| 128.0);
        let reduced = area_resize(&plane, 8, 8);

        assert!(reduced.values().iter().all(|v| (v - 128.0).abs() < 1e-9));
    }

    #[test]
    fn isolated_noise_is_damped() {
        // A single bright pixel in a 64x64 dark plane only nudges its cell
        let plane = plane_from_fn(64, 64, |x, y| if (x, y) == (3, 3) { 255.0 } else { 0.0 });
        let reduced = area_resize(&plane, 8, 8);

        assert!((reduced.get(0, 0) - 255.0 / 64.0).abs() < 1e-9);
        assert_eq!(reduced.get(1, 0), 0.0);
    }

    #[test]
    fn upscaling_replicates_values() {
        let plane = plane_from_fn(2, 2, |x, y| (x * 10 + y) as f64);
        let enlarged = area_resize(&plane, 4, 4);

        assert!((enlarged.get(0, 0) - 0.0).abs() < 1e-12);
        assert!((enlarged.get(3, 0) - 10.0).abs() < 1e-12);
        assert!((enlarged.get(3, 3) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn output_has_requested_dimensions() {
        let plane = plane_from_fn(100, 50, |x, y| (x ^ y) as f64);
        let reduced = area_resize(&plane, 9, 8);

        assert_eq!(reduced.width(), 9);
        assert_eq!(reduced.height(), 8);
        assert_eq!(reduced.values().len(), 72);
    }
}

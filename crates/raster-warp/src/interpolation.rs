//! Interpolation kernels for sampling a grid at fractional coordinates.
//!
//! All kernels take `(row, col)` in source pixel units. Rows are clamped
//! against the grid height and columns against the grid width.

use warp_common::GridView;

/// Clamp a (possibly negative or NaN) lattice coordinate into `[0, len - 1]`.
#[inline]
fn clamp_index(v: f64, len: usize) -> usize {
    if !(v > 0.0) {
        return 0;
    }
    (v as usize).min(len.saturating_sub(1))
}

/// Nearest neighbor interpolation.
///
/// Rounds to the nearest lattice point and clamps into the grid, so every
/// query has an answer. This is the fallback for the other kernels.
///
/// # Panics
/// If the grid is empty (`width` or `height` is 0).
pub fn nearest_interpolate(grid: &GridView<'_>, row: f64, col: f64) -> f64 {
    let r = clamp_index(row.round(), grid.height());
    let c = clamp_index(col.round(), grid.width());
    grid.get(r, c)
}

/// Weights of the two lattice indices bracketing `v` along one axis.
///
/// A collapsed axis (both indices clamped to the same edge) puts all the
/// weight on the single index.
#[inline]
fn axis_weights(v: f64, lo: usize, hi: usize) -> (f64, f64) {
    if hi == lo {
        (1.0, 0.0)
    } else {
        let span = (hi - lo) as f64;
        ((hi as f64 - v) / span, (v - lo as f64) / span)
    }
}

/// Bilinear interpolation.
///
/// Area-weighted average of the 2x2 neighborhood around the query. Indices
/// are clamped at the edges so the result degrades to a 1-D or constant
/// blend there instead of failing.
///
/// Returns `None` outside `[0, height] x [0, width]`.
///
/// # Panics
/// If the grid is empty (`width` or `height` is 0).
pub fn bilinear_interpolate(grid: &GridView<'_>, row: f64, col: f64) -> Option<f64> {
    let height = grid.height();
    let width = grid.width();

    if !(row >= 0.0 && col >= 0.0 && row <= height as f64 && col <= width as f64) {
        return None;
    }

    let r1 = clamp_index(row.floor(), height);
    let r2 = (r1 + 1).min(height - 1);
    let c1 = clamp_index(col.floor(), width);
    let c2 = (c1 + 1).min(width - 1);

    let (wr1, wr2) = axis_weights(row, r1, r2);
    let (wc1, wc2) = axis_weights(col, c1, c2);

    // Zero-weight corners are skipped so a NaN neighbor cannot leak into an
    // exact lattice hit.
    let mut value = 0.0;
    for (w, r, c) in [
        (wr1 * wc1, r1, c1),
        (wr1 * wc2, r1, c2),
        (wr2 * wc1, r2, c1),
        (wr2 * wc2, r2, c2),
    ] {
        if w != 0.0 {
            value += w * grid.get(r, c);
        }
    }

    Some(value)
}

/// Bicubic interpolation.
///
/// Blends the 4x4 neighborhood around the query with a Catmull-Rom cubic,
/// first along each row and then down the four row results. Queries within
/// two cells of an edge use [`nearest_interpolate`] instead, so an empty
/// grid panics the same way.
pub fn cubic_interpolate(grid: &GridView<'_>, row: f64, col: f64) -> f64 {
    let height = grid.height() as f64;
    let width = grid.width() as f64;

    if !(row > 1.0 && row < height - 2.0 && col > 1.0 && col < width - 2.0) {
        return nearest_interpolate(grid, row, col);
    }

    let r = row.floor() as usize;
    let c = col.floor() as usize;
    let dx = col - c as f64;
    let dy = row - r as f64;

    let mut row_values = [0.0f64; 4];
    for (j, value) in row_values.iter_mut().enumerate() {
        let rr = r + j - 1;
        *value = cubic_1d(
            [
                grid.get(rr, c - 1),
                grid.get(rr, c),
                grid.get(rr, c + 1),
                grid.get(rr, c + 2),
            ],
            dx,
        );
    }

    cubic_1d(row_values, dy)
}

/// 1D cubic interpolation using Catmull-Rom spline, `t` in `[0, 1]` between `p[1]` and `p[2]`.
pub fn cubic_1d(p: [f64; 4], t: f64) -> f64 {
    p[1] + 0.5
        * t
        * (p[2] - p[0]
            + t * (2.0 * p[0] - 5.0 * p[1] + 4.0 * p[2] - p[3]
                + t * (3.0 * (p[1] - p[2]) + p[3] - p[0])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const GRID_3X3: [f64; 9] = [
        1.0, 2.0, 3.0,
        4.0, 5.0, 6.0,
        7.0, 8.0, 9.0,
    ];

    fn ramp(width: usize, height: usize) -> Vec<f64> {
        (0..height)
            .flat_map(|r| (0..width).map(move |c| (r * 10 + c) as f64))
            .collect()
    }

    #[test]
    fn test_nearest_interpolate() {
        let grid = GridView::new(&GRID_3X3, 3, 3);

        assert_eq!(nearest_interpolate(&grid, 0.0, 0.0), 1.0);
        assert_eq!(nearest_interpolate(&grid, 1.0, 1.0), 5.0);
        assert_eq!(nearest_interpolate(&grid, 0.4, 0.4), 1.0);
        assert_eq!(nearest_interpolate(&grid, 0.6, 0.6), 5.0);
        assert_eq!(nearest_interpolate(&grid, 0.0, 2.0), 3.0);
    }

    #[test]
    fn test_nearest_clamps_out_of_range() {
        let grid = GridView::new(&GRID_3X3, 3, 3);

        assert_eq!(nearest_interpolate(&grid, -5.0, -5.0), 1.0);
        assert_eq!(nearest_interpolate(&grid, 10.0, 10.0), 9.0);
        assert_eq!(nearest_interpolate(&grid, -1.0, 7.0), 3.0);
        assert_eq!(nearest_interpolate(&grid, f64::NAN, 1.0), 2.0);
    }

    #[test]
    fn test_nearest_exact_at_every_lattice_point() {
        let data = ramp(5, 4);
        let grid = GridView::new(&data, 5, 4);
        for r in 0..4 {
            for c in 0..5 {
                assert_eq!(nearest_interpolate(&grid, r as f64, c as f64), data[r * 5 + c]);
            }
        }
    }

    #[test]
    fn test_bilinear_corners() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let grid = GridView::new(&data, 2, 2);

        assert_eq!(bilinear_interpolate(&grid, 0.0, 0.0), Some(1.0));
        assert_eq!(bilinear_interpolate(&grid, 0.0, 1.0), Some(2.0));
        assert_eq!(bilinear_interpolate(&grid, 1.0, 0.0), Some(3.0));
        assert_eq!(bilinear_interpolate(&grid, 1.0, 1.0), Some(4.0));
    }

    #[test]
    fn test_bilinear_center() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let grid = GridView::new(&data, 2, 2);

        let center = bilinear_interpolate(&grid, 0.5, 0.5).unwrap();
        assert!((center - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_bilinear_exact_at_every_lattice_point() {
        let data = ramp(6, 5);
        let grid = GridView::new(&data, 6, 5);
        for r in 0..5 {
            for c in 0..6 {
                let v = bilinear_interpolate(&grid, r as f64, c as f64).unwrap();
                assert_eq!(v, data[r * 6 + c], "mismatch at ({}, {})", r, c);
            }
        }
    }

    #[test]
    fn test_bilinear_linear_surface() {
        // A plane is reproduced exactly by bilinear interpolation.
        let data = ramp(4, 4);
        let grid = GridView::new(&data, 4, 4);
        let v = bilinear_interpolate(&grid, 1.25, 2.5).unwrap();
        assert!((v - (12.5 + 2.5)).abs() < 1e-9, "got {}", v);
    }

    #[test]
    fn test_bilinear_edges_degrade() {
        let data = ramp(3, 3);
        let grid = GridView::new(&data, 3, 3);

        // Past the last row but inside [0, height]: collapses onto the last row.
        let v = bilinear_interpolate(&grid, 2.5, 1.0).unwrap();
        assert_eq!(v, 21.0);

        // Exactly on the far boundary.
        let v = bilinear_interpolate(&grid, 3.0, 3.0).unwrap();
        assert_eq!(v, 22.0);
    }

    #[test]
    fn test_bilinear_out_of_range() {
        let grid = GridView::new(&GRID_3X3, 3, 3);

        assert_eq!(bilinear_interpolate(&grid, -0.1, 1.0), None);
        assert_eq!(bilinear_interpolate(&grid, 1.0, 3.1), None);
        assert_eq!(bilinear_interpolate(&grid, f64::NAN, 1.0), None);
    }

    #[test]
    fn test_bilinear_nan_neighbor_not_used_on_lattice() {
        let data = [1.0, f64::NAN, 3.0, 4.0];
        let grid = GridView::new(&data, 2, 2);

        assert_eq!(bilinear_interpolate(&grid, 0.0, 0.0), Some(1.0));
        assert!(bilinear_interpolate(&grid, 0.5, 0.5).unwrap().is_nan());
    }

    #[test]
    fn test_cubic_1d_endpoints() {
        let p = [3.0, 7.0, -2.0, 11.0];
        assert_eq!(cubic_1d(p, 0.0), 7.0);
        assert!((cubic_1d(p, 1.0) - (-2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_cubic_constant_grid() {
        let data = vec![42.0; 8 * 8];
        let grid = GridView::new(&data, 8, 8);
        for &(r, c) in &[(2.5, 2.5), (3.1, 4.9), (1.5, 5.5), (4.0, 3.0)] {
            let v = cubic_interpolate(&grid, r, c);
            assert!((v - 42.0).abs() < 1e-9, "({}, {}) -> {}", r, c, v);
        }
    }

    #[test]
    fn test_cubic_reproduces_linear_ramp() {
        let data = ramp(8, 8);
        let grid = GridView::new(&data, 8, 8);
        let v = cubic_interpolate(&grid, 3.5, 2.25);
        assert!((v - 37.25).abs() < 1e-9, "got {}", v);
    }

    #[test]
    fn test_cubic_falls_back_to_nearest_near_edges() {
        let data = ramp(6, 6);
        let grid = GridView::new(&data, 6, 6);

        assert_eq!(cubic_interpolate(&grid, 0.6, 3.0), nearest_interpolate(&grid, 0.6, 3.0));
        assert_eq!(cubic_interpolate(&grid, 1.0, 3.0), 13.0);
        assert_eq!(cubic_interpolate(&grid, 4.2, 3.0), 43.0);
        assert_eq!(cubic_interpolate(&grid, 3.0, 5.7), 35.0);
        assert_eq!(cubic_interpolate(&grid, -3.0, -3.0), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_bilinear_panics_on_empty_grid() {
        let data: Vec<f64> = Vec::new();
        let grid = GridView::new(&data, 0, 0);
        let _ = bilinear_interpolate(&grid, 0.0, 0.0);
    }
}

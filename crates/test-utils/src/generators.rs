//! Synthetic grids and rasters with predictable values.

use warp_common::{CrsCode, Raster};

/// Creates a planar grid `row * 10 + col`.
///
/// Every interpolation kernel reproduces a plane exactly inside its domain,
/// which makes this the reference surface for accuracy checks.
pub fn create_ramp_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((row * 10 + col) as f64);
        }
    }
    data
}

/// Creates a smooth, non-linear surface in roughly `[-15, 15]`.
pub fn create_wave_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((row as f64 * 0.7).sin() * 10.0 + (col as f64 * 0.4).cos() * 5.0);
        }
    }
    data
}

/// Creates a constant-value grid.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<f64> {
    vec![value; width * height]
}

/// Creates a ramp grid with NaN at the given `(row, col)` positions.
pub fn create_grid_with_nans(width: usize, height: usize, nan_cells: &[(usize, usize)]) -> Vec<f64> {
    let mut data = create_ramp_grid(width, height);
    for &(row, col) in nan_cells {
        if row < height && col < width {
            data[row * width + col] = f64::NAN;
        }
    }
    data
}

/// Single-band raster over `data` with square pixels of size `res`.
///
/// `origin` is the top-left corner; rows go down (`pixel_height = -res`).
///
/// # Panics
/// If `data` does not hold `width * height` samples.
pub fn raster_from_grid(
    crs: CrsCode,
    origin: (f64, f64),
    res: f64,
    width: usize,
    height: usize,
    data: Vec<f64>,
) -> Raster {
    Raster::from_band(crs, origin, (res, -res), width, height, data)
        .expect("generator data must match raster dimensions")
}

/// A [`create_ramp_grid`] raster.
pub fn ramp_raster(crs: CrsCode, origin: (f64, f64), res: f64, width: usize, height: usize) -> Raster {
    raster_from_grid(crs, origin, res, width, height, create_ramp_grid(width, height))
}

/// A [`create_wave_grid`] raster.
pub fn wave_raster(crs: CrsCode, origin: (f64, f64), res: f64, width: usize, height: usize) -> Raster {
    raster_from_grid(crs, origin, res, width, height, create_wave_grid(width, height))
}

/// A [`create_constant_grid`] raster.
pub fn constant_raster(
    crs: CrsCode,
    origin: (f64, f64),
    res: f64,
    width: usize,
    height: usize,
    value: f64,
) -> Raster {
    raster_from_grid(
        crs,
        origin,
        res,
        width,
        height,
        create_constant_grid(width, height, value),
    )
}

//! Lazily built bicubic interpolators, one per source cell.
//!
//! Each source cell `(row0, col0)` gets a [`BicubicPatch`] fitted to the 4x4
//! neighborhood `row0-1..=row0+2` x `col0-1..=col0+2` the first time a query
//! lands in it. Later queries in the same cell reuse the coefficients.

use std::borrow::Cow;
use std::collections::HashMap;

use nalgebra::{Matrix4, Vector4};
use tracing::trace;
use warp_common::{GridView, WarpError};

use crate::error::Result;
use crate::types::CacheStats;

/// Cache key: integer `(row, col)` of the cell's top-left lattice point.
pub type CellKey = (i64, i64);

/// Rows/columns of synthetic samples added on every side when extrapolating.
const PAD: usize = 2;

/// Catmull-Rom basis: row `i` holds the weights of the `t^i` term.
#[rustfmt::skip]
fn catmull_rom_basis() -> Matrix4<f64> {
    Matrix4::new(
         0.0,  1.0,  0.0,  0.0,
        -0.5,  0.0,  0.5,  0.0,
         1.0, -2.5,  2.0, -0.5,
        -0.5,  1.5, -1.5,  0.5,
    )
}

/// Bivariate cubic `f(x, y) = Σ a_ij x^i y^j` over one unit cell.
///
/// `x` runs along rows and `y` along columns, both measured from the cell's
/// top-left lattice point.
#[derive(Debug, Clone, PartialEq)]
pub struct BicubicPatch {
    coefficients: Matrix4<f64>,
    row0: i64,
    col0: i64,
}

impl BicubicPatch {
    /// Fit the patch for cell `(row0, col0)` from its 4x4 neighborhood.
    ///
    /// `samples[k][l]` is the value at `(row0 - 1 + k, col0 - 1 + l)`.
    pub fn fit(samples: &[[f64; 4]; 4], row0: i64, col0: i64) -> Self {
        let basis = catmull_rom_basis();
        let p = Matrix4::from_fn(|k, l| samples[k][l]);
        Self {
            coefficients: basis * p * basis.transpose(),
            row0,
            col0,
        }
    }

    /// The coefficient `a_ij` of `x^i y^j`.
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        self.coefficients[(i, j)]
    }

    /// Evaluate at source-grid coordinates.
    ///
    /// Returns `None` when the point lies outside this patch's unit square.
    pub fn evaluate(&self, row: f64, col: f64) -> Option<f64> {
        let x = row - self.row0 as f64;
        let y = col - self.col0 as f64;
        if !((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)) {
            return None;
        }

        let xs = Vector4::new(1.0, x, x * x, x * x * x);
        let ys = Vector4::new(1.0, y, y * y, y * y * y);
        Some(xs.dot(&(self.coefficients * ys)))
    }
}

/// Per-warp cache of [`BicubicPatch`]es over one source band.
///
/// In clamped mode queries must fall in `[1, height-2] x [1, width-2]`. In
/// extrapolating mode the band is padded by two linearly extrapolated
/// rows/columns on each side and the valid range grows to
/// `[-1, height] x [-1, width]`.
pub struct GridInterpolatorCache<'a> {
    values: Cow<'a, [f64]>,
    /// Width of `values` (padded width when extrapolating).
    stride: usize,
    /// Offset from source coordinates to `values` indices.
    offset: i64,
    width: usize,
    height: usize,
    extrapolate: bool,
    patches: HashMap<CellKey, BicubicPatch>,
    hits: u64,
    misses: u64,
}

impl<'a> GridInterpolatorCache<'a> {
    /// Create a cache that only interpolates inside the band.
    pub fn new(grid: &GridView<'a>) -> Self {
        Self {
            values: Cow::Borrowed(grid.data()),
            stride: grid.width(),
            offset: 0,
            width: grid.width(),
            height: grid.height(),
            extrapolate: false,
            patches: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a cache over the band padded by linear extrapolation.
    pub fn extrapolating(grid: &GridView<'a>) -> Self {
        let (values, stride) = pad_by_extrapolation(grid);
        Self {
            values: Cow::Owned(values),
            stride,
            offset: PAD as i64,
            width: grid.width(),
            height: grid.height(),
            extrapolate: true,
            patches: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn with_extrapolation(grid: &GridView<'a>, extrapolate: bool) -> Self {
        if extrapolate {
            Self::extrapolating(grid)
        } else {
            Self::new(grid)
        }
    }

    /// Valid query rectangle as `(min_row, min_col, max_row, max_col)`.
    pub fn domain(&self) -> (f64, f64, f64, f64) {
        if self.extrapolate {
            (-1.0, -1.0, self.height as f64, self.width as f64)
        } else {
            (
                1.0,
                1.0,
                self.height as f64 - 2.0,
                self.width as f64 - 2.0,
            )
        }
    }

    /// Interpolate at a fractional `(row, col)`.
    ///
    /// Fails with [`WarpError::OutOfDomain`] outside [`Self::domain`].
    pub fn sample(&mut self, row: f64, col: f64) -> Result<f64> {
        let key = self.cell_for(row, col)?;

        if self.patches.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let patch = BicubicPatch::fit(&self.neighborhood(key), key.0, key.1);
            trace!(row0 = key.0, col0 = key.1, "Fitted bicubic patch");
            self.patches.insert(key, patch);
        }

        self.patches[&key]
            .evaluate(row, col)
            .ok_or_else(|| self.out_of_domain(row, col))
    }

    /// Check whether the patch for a cell has been built.
    pub fn contains(&self, key: &CellKey) -> bool {
        self.patches.contains_key(key)
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.patches.len(),
        }
    }

    /// Get the number of fitted patches.
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Check if no patch has been fitted yet.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Map a query to the cell whose patch covers it.
    ///
    /// Queries on the far row/column edge belong to the cell before it.
    fn cell_for(&self, row: f64, col: f64) -> Result<CellKey> {
        let (min_row, min_col, max_row, max_col) = self.domain();

        // Clamped mode needs a full 4x4 neighborhood inside the band.
        let too_small = !self.extrapolate && (self.height < 4 || self.width < 4);
        let inside = row >= min_row && row <= max_row && col >= min_col && col <= max_col;
        if too_small || !inside {
            return Err(self.out_of_domain(row, col));
        }

        let mut row0 = row.floor() as i64;
        let mut col0 = col.floor() as i64;
        if row == max_row {
            row0 -= 1;
        }
        if col == max_col {
            col0 -= 1;
        }
        Ok((row0, col0))
    }

    fn neighborhood(&self, (row0, col0): CellKey) -> [[f64; 4]; 4] {
        let mut samples = [[0.0; 4]; 4];
        for (k, samples_row) in samples.iter_mut().enumerate() {
            let r = (row0 - 1 + k as i64 + self.offset) as usize;
            for (l, sample) in samples_row.iter_mut().enumerate() {
                let c = (col0 - 1 + l as i64 + self.offset) as usize;
                *sample = self.values[r * self.stride + c];
            }
        }
        samples
    }

    fn out_of_domain(&self, row: f64, col: f64) -> WarpError {
        let (min_row, min_col, max_row, max_col) = self.domain();
        WarpError::OutOfDomain {
            row,
            col,
            min_row,
            min_col,
            max_row,
            max_col,
            extrapolate: self.extrapolate,
        }
    }
}

/// Pad a band by [`PAD`] rows/columns per side.
///
/// Each synthetic sample continues the difference between the two nearest
/// real samples. Rows are extended first, then columns across the padded
/// rows, so corners carry both extrapolations. An axis with a single sample
/// extends with a zero difference.
fn pad_by_extrapolation(grid: &GridView<'_>) -> (Vec<f64>, usize) {
    let width = grid.width();
    let height = grid.height();
    let stride = width + 2 * PAD;
    let padded_height = height + 2 * PAD;
    let mut values = vec![0.0; stride * padded_height];

    let idx = |r: usize, c: usize| r * stride + c;

    for r in 0..height {
        for c in 0..width {
            values[idx(r + PAD, c + PAD)] = grid.get(r, c);
        }
    }

    // Rows above and below.
    for c in PAD..PAD + width {
        let first = values[idx(PAD, c)];
        let last = values[idx(PAD + height - 1, c)];
        let (top_delta, bottom_delta) = if height > 1 {
            (
                first - values[idx(PAD + 1, c)],
                last - values[idx(PAD + height - 2, c)],
            )
        } else {
            (0.0, 0.0)
        };
        values[idx(0, c)] = first + 2.0 * top_delta;
        values[idx(1, c)] = first + top_delta;
        values[idx(PAD + height, c)] = last + bottom_delta;
        values[idx(PAD + height + 1, c)] = last + 2.0 * bottom_delta;
    }

    // Columns left and right, across every padded row.
    for r in 0..padded_height {
        let first = values[idx(r, PAD)];
        let last = values[idx(r, PAD + width - 1)];
        let (left_delta, right_delta) = if width > 1 {
            (
                first - values[idx(r, PAD + 1)],
                last - values[idx(r, PAD + width - 2)],
            )
        } else {
            (0.0, 0.0)
        };
        values[idx(r, 0)] = first + 2.0 * left_delta;
        values[idx(r, 1)] = first + left_delta;
        values[idx(r, PAD + width)] = last + right_delta;
        values[idx(r, PAD + width + 1)] = last + 2.0 * right_delta;
    }

    (values, stride)
}

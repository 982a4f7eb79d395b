//! Filling a destination raster from a source raster.

use projection::CrsTransform;
use tracing::warn;
use warp_common::{GridView, Raster};

use super::WarpOptions;
use crate::cache::GridInterpolatorCache;
use crate::interpolation::{bilinear_interpolate, cubic_interpolate, nearest_interpolate};
use crate::types::{BicubicKernel, CacheStats, InterpolationMethod};

/// Counters collected while filling one destination raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReprojectStats {
    /// Destination samples written, over all bands.
    pub cells: u64,
    /// Cells where the selected kernel could not interpolate and nearest
    /// neighbour was used instead.
    pub fallbacks: u64,
    /// Interpolator cache counters, summed over bands.
    pub cache: CacheStats,
}

/// The kernel chosen for one source band.
enum BandSampler<'a> {
    Nearest(GridView<'a>),
    Bilinear(GridView<'a>),
    CubicDirect(GridView<'a>),
    CubicCached(GridView<'a>, GridInterpolatorCache<'a>),
}

impl<'a> BandSampler<'a> {
    fn new(grid: GridView<'a>, method: InterpolationMethod, kernel: BicubicKernel) -> Self {
        match (method, kernel) {
            (InterpolationMethod::NearestNeighbour, _) => Self::Nearest(grid),
            (InterpolationMethod::Bilinear, _) => Self::Bilinear(grid),
            (InterpolationMethod::Bicubic, BicubicKernel::Direct) => Self::CubicDirect(grid),
            (InterpolationMethod::Bicubic, kernel) => {
                let extrapolate = kernel == BicubicKernel::CachedExtrapolating;
                Self::CubicCached(grid, GridInterpolatorCache::with_extrapolation(&grid, extrapolate))
            }
        }
    }

    /// Sample at `(row, col)`. The flag is set when nearest was substituted.
    fn sample(&mut self, row: f64, col: f64) -> (f64, bool) {
        match self {
            Self::Nearest(grid) => (nearest_interpolate(grid, row, col), false),
            Self::Bilinear(grid) => match bilinear_interpolate(grid, row, col) {
                Some(v) => (v, false),
                None => (nearest_interpolate(grid, row, col), true),
            },
            Self::CubicDirect(grid) => (cubic_interpolate(grid, row, col), false),
            Self::CubicCached(grid, cache) => match cache.sample(row, col) {
                Ok(v) => (v, false),
                Err(_) => (nearest_interpolate(grid, row, col), true),
            },
        }
    }

    fn cache_stats(&self) -> CacheStats {
        match self {
            Self::CubicCached(_, cache) => cache.stats(),
            _ => CacheStats::default(),
        }
    }
}

/// Fill `shell` band by band from `source`.
///
/// Each destination cell `(y, x)` is located at its world corner
/// `(x1 + x * x_res, y1 + y * y_res)`, taken back into the source CRS with
/// `transform.inverse`, converted to fractional source pixels and sampled with
/// the kernel chosen by `options`. Cells the kernel cannot interpolate use
/// nearest neighbour; the warp never fails per cell.
pub fn reproject(
    source: &Raster,
    mut shell: Raster,
    transform: &CrsTransform,
    options: &WarpOptions,
) -> (Raster, ReprojectStats) {
    let method = options.interpolation();
    let kernel = options.bicubic_kernel();
    let mut stats = ReprojectStats::default();

    for (index, grid) in (0..source.bands.len()).filter_map(|i| source.band(i)).enumerate() {
        let mut sampler = BandSampler::new(grid, method, kernel);
        let mut band = Vec::with_capacity(shell.len());
        let mut fallbacks = 0u64;

        for y in 0..shell.height {
            for x in 0..shell.width {
                let (world_x, world_y) = shell.pixel_to_world(y as f64, x as f64);
                let (src_x, src_y) = transform.inverse(world_x, world_y);
                let (row, col) = source.world_to_pixel(src_x, src_y);

                let (value, fell_back) = sampler.sample(row, col);
                if fell_back {
                    fallbacks += 1;
                }
                shell.record(value);
                band.push(value);
            }
        }

        if fallbacks > 0 {
            warn!(
                band = index,
                fallbacks,
                method = %method,
                "Kernel could not interpolate some cells, used nearest neighbour"
            );
        }

        stats.cells += band.len() as u64;
        stats.fallbacks += fallbacks;
        stats.cache.merge(&sampler.cache_stats());
        shell.bands.push(band);
    }

    (shell, stats)
}

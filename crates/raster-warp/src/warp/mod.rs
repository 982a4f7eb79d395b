//! Warp entry points: plan the destination grid, then fill it.

mod planner;
mod reproject;

pub use planner::plan_warp;
pub use reproject::{reproject, ReprojectStats};

use std::time::Instant;

use projection::CrsTransform;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use warp_common::{CrsCode, Raster, WarpError};

use crate::codec::RasterCodec;
use crate::config::WarpConfig;
use crate::error::Result;
use crate::source::{load, RasterSource};
use crate::types::{BicubicKernel, InterpolationMethod};

/// Caller overrides for one warp. Every field is optional.
///
/// Field names follow the camelCase option keys (`xRes`, `nx`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarpOptions {
    pub x1: Option<f64>,
    pub y1: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
    pub x_res: Option<f64>,
    pub y_res: Option<f64>,
    pub nx: Option<usize>,
    pub ny: Option<usize>,
    pub interpolation: Option<InterpolationMethod>,
    pub bicubic: Option<BicubicKernel>,
}

impl WarpOptions {
    /// Options carrying the configured kernel defaults.
    pub fn from_config(config: &WarpConfig) -> Self {
        Self {
            interpolation: Some(config.interpolation),
            bicubic: Some(config.bicubic_kernel),
            ..Default::default()
        }
    }

    /// Output bounding box, top-left `(x1, y1)` to bottom-right `(x2, y2)`.
    pub fn with_bbox(mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        self.x1 = Some(x1);
        self.y1 = Some(y1);
        self.x2 = Some(x2);
        self.y2 = Some(y2);
        self
    }

    pub fn with_resolution(mut self, x_res: f64, y_res: f64) -> Self {
        self.x_res = Some(x_res);
        self.y_res = Some(y_res);
        self
    }

    pub fn with_size(mut self, nx: usize, ny: usize) -> Self {
        self.nx = Some(nx);
        self.ny = Some(ny);
        self
    }

    pub fn with_interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = Some(method);
        self
    }

    pub fn with_bicubic_kernel(mut self, kernel: BicubicKernel) -> Self {
        self.bicubic = Some(kernel);
        self
    }

    /// Fill unset kernel choices from `config`.
    pub fn or_config(mut self, config: &WarpConfig) -> Self {
        self.interpolation.get_or_insert(config.interpolation);
        self.bicubic.get_or_insert(config.bicubic_kernel);
        self
    }

    pub fn interpolation(&self) -> InterpolationMethod {
        self.interpolation.unwrap_or_default()
    }

    pub fn bicubic_kernel(&self) -> BicubicKernel {
        self.bicubic.unwrap_or_default()
    }
}

/// A completed warp.
#[derive(Debug, Clone)]
pub struct WarpOutcome {
    pub raster: Raster,
    pub stats: ReprojectStats,
}

/// Warp `source` into the CRS named by `target`.
///
/// The target CRS is checked before anything else.
pub fn warp(source: &Raster, target: &str, options: &WarpOptions) -> Result<WarpOutcome> {
    let target = parse_target(target)?;
    warp_to(source, target, options)
}

/// Warp `source` into an already parsed target CRS.
#[instrument(skip(source, options), fields(source_crs = %source.crs))]
pub fn warp_to(source: &Raster, target: CrsCode, options: &WarpOptions) -> Result<WarpOutcome> {
    source.validate()?;
    if source.bands.is_empty() {
        return Err(WarpError::invalid_source("raster has no bands"));
    }

    let start = Instant::now();
    let transform = CrsTransform::new(source.crs, target);
    let shell = plan_warp(source, &transform, options);
    let (raster, stats) = reproject(source, shell, &transform, options);

    info!(
        width = raster.width,
        height = raster.height,
        bands = raster.bands.len(),
        interpolation = %options.interpolation(),
        fallbacks = stats.fallbacks,
        cache_hit_rate = stats.cache.hit_rate(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Warp complete"
    );

    Ok(WarpOutcome { raster, stats })
}

/// Load a source raster and warp it.
///
/// An unsupported `target` fails before the source is loaded. Kernel
/// choices left unset in `options` come from `config`.
pub async fn warp_source(
    source: RasterSource,
    target: &str,
    options: &WarpOptions,
    config: &WarpConfig,
    codec: &dyn RasterCodec,
) -> Result<WarpOutcome> {
    let target = parse_target(target)?;
    let raster = load(source, codec, config.fetch_timeout()).await?;
    let options = options.clone().or_config(config);
    warp_to(&raster, target, &options)
}

fn parse_target(target: &str) -> Result<CrsCode> {
    CrsCode::parse(target).map_err(|_| WarpError::UnsupportedTargetCrs(target.to_string()))
}

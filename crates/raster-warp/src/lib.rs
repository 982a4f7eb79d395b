//! Raster reprojection and resampling.
//!
//! Converts a georeferenced raster from one CRS into another (or into a new
//! extent/resolution in the same CRS) by inverse-projecting every
//! destination cell into the source grid and sampling there.
//!
//! # Architecture
//!
//! ```text
//! RasterSource (raster | bytes | path | url)
//!      │
//!      ▼
//! source::load ──► RasterCodec::decode
//!      │
//!      ▼
//! warp(source, "EPSG:3857", options)
//!      │
//!      ├─► plan_warp: project corners, derive bbox / resolution / size
//!      │
//!      └─► reproject: for every band, row, column
//!               │
//!               ├─► CrsTransform::inverse (destination → source world)
//!               │
//!               ├─► Raster::world_to_pixel (source world → row, col)
//!               │
//!               └─► kernel: nearest | bilinear | bicubic
//!                        │
//!                        └─► GridInterpolatorCache (cached bicubic)
//!      │
//!      ▼
//! WarpOutcome { raster, stats } ──► RasterCodec::encode
//! ```
//!
//! # Example
//!
//! ```
//! use raster_warp::{warp, InterpolationMethod, WarpOptions};
//! use warp_common::{CrsCode, Raster};
//!
//! let source = Raster::from_band(
//!     CrsCode::Epsg4326,
//!     (-10.0, 10.0),
//!     (5.0, -5.0),
//!     4,
//!     4,
//!     (0..16).map(f64::from).collect(),
//! )
//! .unwrap();
//!
//! let options = WarpOptions::default()
//!     .with_size(8, 8)
//!     .with_interpolation(InterpolationMethod::Bilinear);
//! let outcome = warp(&source, "EPSG:3857", &options).unwrap();
//!
//! assert_eq!(outcome.raster.width, 8);
//! assert_eq!(outcome.raster.bands[0].len(), 64);
//! ```

pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod interpolation;
pub mod source;
pub mod types;
pub mod warp;

// Re-export commonly used types at crate root
pub use cache::{BicubicPatch, CellKey, GridInterpolatorCache};
pub use codec::{JsonRasterCodec, RasterCodec, RasterDocument};
pub use config::WarpConfig;
pub use error::{Result, WarpError};
pub use interpolation::{bilinear_interpolate, cubic_interpolate, nearest_interpolate};
pub use source::{load, RasterSource};
pub use types::{BicubicKernel, CacheStats, InterpolationMethod};
pub use warp::{
    plan_warp, reproject, warp, warp_source, warp_to, ReprojectStats, WarpOptions, WarpOutcome,
};

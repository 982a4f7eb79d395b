//! Cache implementations for raster sampling.

mod interpolator_cache;

pub use interpolator_cache::{BicubicPatch, CellKey, GridInterpolatorCache};

//! Common types shared across the raster warp workspace.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod raster;

pub use bbox::BoundingBox;
pub use crs::{CrsCode, CrsParseError};
pub use error::{WarpError, WarpResult};
pub use raster::{GridView, Raster, SampleFormat};

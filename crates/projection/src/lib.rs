//! Coordinate reference system transformations.
//!
//! Implements map projections from scratch without external dependencies.

pub mod mercator;
pub mod transform;

pub use mercator::WebMercator;
pub use transform::CrsTransform;

//! Transformations between the supported coordinate reference systems.

use warp_common::CrsCode;

use crate::mercator::WebMercator;

/// A forward/inverse transform between two CRS.
///
/// `forward` maps source coordinates to destination coordinates and
/// `inverse` maps destination coordinates back to the source. Geographic
/// coordinates are (lon, lat) in degrees, Web Mercator is (x, y) in meters.
#[derive(Debug, Clone, Copy)]
pub struct CrsTransform {
    src: CrsCode,
    dst: CrsCode,
    mercator: WebMercator,
}

impl CrsTransform {
    pub fn new(src: CrsCode, dst: CrsCode) -> Self {
        Self {
            src,
            dst,
            mercator: WebMercator::new(),
        }
    }

    pub fn source(&self) -> CrsCode {
        self.src
    }

    pub fn target(&self) -> CrsCode {
        self.dst
    }

    /// True when source and destination are the same CRS.
    pub fn is_identity(&self) -> bool {
        self.src == self.dst
    }

    /// Transform a point from the source CRS into the destination CRS.
    pub fn forward(&self, x: f64, y: f64) -> (f64, f64) {
        self.convert(self.src, self.dst, x, y)
    }

    /// Transform a point from the destination CRS back into the source CRS.
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        self.convert(self.dst, self.src, x, y)
    }

    fn convert(&self, from: CrsCode, to: CrsCode, x: f64, y: f64) -> (f64, f64) {
        match (from, to) {
            (CrsCode::Epsg4326, CrsCode::Epsg3857) => self.mercator.forward(x, y),
            (CrsCode::Epsg3857, CrsCode::Epsg4326) => self.mercator.inverse(x, y),
            _ => (x, y),
        }
    }
}

//! Spherical Web Mercator projection (EPSG:3857).
//!
//! The sphere uses the WGS84 semi-major axis as its radius:
//! - forward: x = R·λ, y = R·ln(tan(π/4 + φ/2))
//! - inverse: λ = x/R, φ = 2·atan(exp(y/R)) - π/2
//!
//! Latitudes beyond ±85.0511° are clamped before projecting so the poles
//! land on the edge of the square instead of at infinity.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Earth radius used by Web Mercator (meters).
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude (degrees) at which the projection becomes a square, atan(sinh(π)).
pub const MAX_LATITUDE: f64 = 85.05112877980659;

/// Web Mercator projection on a sphere.
#[derive(Debug, Clone, Copy)]
pub struct WebMercator {
    /// Sphere radius (meters)
    pub radius: f64,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self {
            radius: EARTH_RADIUS,
        }
    }
}

impl WebMercator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project geographic coordinates (degrees) to meters.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let lat = lat_deg.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = self.radius * lon_deg.to_radians();
        let y = self.radius * (FRAC_PI_4 + lat / 2.0).tan().ln();
        (x, y)
    }

    /// Unproject meters back to geographic coordinates (degrees).
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = (x / self.radius).to_degrees();
        let lat = (2.0 * (y / self.radius).exp().atan() - FRAC_PI_2).to_degrees();
        (lon, lat)
    }
}

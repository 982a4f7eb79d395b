//! Core types for raster warping.

use serde::{Deserialize, Serialize};

/// Interpolation method used to sample the source raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationMethod {
    /// Nearest neighbor (preserves exact values).
    #[default]
    NearestNeighbour,
    /// Bilinear interpolation (smooth, slight value changes).
    Bilinear,
    /// Bicubic interpolation (smoothest, more compute).
    Bicubic,
}

impl InterpolationMethod {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "bilinear" => Self::Bilinear,
            "cubic" | "bicubic" => Self::Bicubic,
            _ => Self::NearestNeighbour,
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NearestNeighbour => write!(f, "nearestNeighbour"),
            Self::Bilinear => write!(f, "bilinear"),
            Self::Bicubic => write!(f, "bicubic"),
        }
    }
}

/// Which bicubic strategy backs [`InterpolationMethod::Bicubic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BicubicKernel {
    /// Recompute the 4x4 blend for every query; falls back to nearest near edges.
    Direct,
    /// Memoize one polynomial per source cell, interior cells only.
    #[default]
    Cached,
    /// Memoize per cell over a grid padded by linear extrapolation.
    CachedExtrapolating,
}

impl BicubicKernel {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "direct" => Self::Direct,
            "cachedextrapolating" | "extrapolating" | "extrapolate" => Self::CachedExtrapolating,
            _ => Self::Cached,
        }
    }
}

impl std::fmt::Display for BicubicKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Cached => write!(f, "cached"),
            Self::CachedExtrapolating => write!(f, "cachedExtrapolating"),
        }
    }
}

/// Statistics about the interpolator cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Calculate the cache hit rate (0.0 - 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &CacheStats) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.entries += other.entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_method_from_str() {
        assert_eq!(
            InterpolationMethod::from_str("nearestNeighbour"),
            InterpolationMethod::NearestNeighbour
        );
        assert_eq!(
            InterpolationMethod::from_str("BILINEAR"),
            InterpolationMethod::Bilinear
        );
        assert_eq!(
            InterpolationMethod::from_str("cubic"),
            InterpolationMethod::Bicubic
        );
        assert_eq!(
            InterpolationMethod::from_str("bicubic"),
            InterpolationMethod::Bicubic
        );
        assert_eq!(
            InterpolationMethod::from_str("invalid"),
            InterpolationMethod::NearestNeighbour
        );
    }

    #[test]
    fn test_interpolation_method_serde_names() {
        let json = serde_json::to_string(&InterpolationMethod::NearestNeighbour).unwrap();
        assert_eq!(json, "\"nearestNeighbour\"");

        let parsed: InterpolationMethod = serde_json::from_str("\"bicubic\"").unwrap();
        assert_eq!(parsed, InterpolationMethod::Bicubic);
    }

    #[test]
    fn test_bicubic_kernel_from_str() {
        assert_eq!(BicubicKernel::from_str("direct"), BicubicKernel::Direct);
        assert_eq!(
            BicubicKernel::from_str("cached_extrapolating"),
            BicubicKernel::CachedExtrapolating
        );
        assert_eq!(BicubicKernel::from_str("whatever"), BicubicKernel::Cached);
    }

    #[test]
    fn test_cache_stats_hit_rate() {
        let mut stats = CacheStats::default();
        assert!((stats.hit_rate() - 0.0).abs() < f64::EPSILON);

        stats.hits = 80;
        stats.misses = 20;
        assert!((stats.hit_rate() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cache_stats_merge() {
        let mut total = CacheStats {
            hits: 1,
            misses: 2,
            entries: 2,
        };
        total.merge(&CacheStats {
            hits: 3,
            misses: 1,
            entries: 1,
        });
        assert_eq!(
            total,
            CacheStats {
                hits: 4,
                misses: 3,
                entries: 3
            }
        );
    }
}

//! Configuration for the warp engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{BicubicKernel, InterpolationMethod};

/// Defaults applied when a warp request does not say otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarpConfig {
    /// Interpolation method when the request names none.
    pub interpolation: InterpolationMethod,

    /// Bicubic strategy when the request names none.
    pub bicubic_kernel: BicubicKernel,

    /// Timeout for fetching a source raster by URL, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            interpolation: InterpolationMethod::NearestNeighbour,
            bicubic_kernel: BicubicKernel::Cached,
            fetch_timeout_secs: 30,
        }
    }
}

impl WarpConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("WARP_INTERPOLATION") {
            config.interpolation = InterpolationMethod::from_str(&val);
        }

        if let Ok(val) = std::env::var("WARP_BICUBIC_KERNEL") {
            config.bicubic_kernel = BicubicKernel::from_str(&val);
        }

        if let Ok(val) = std::env::var("WARP_FETCH_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                config.fetch_timeout_secs = secs;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be > 0".to_string());
        }

        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WarpConfig::default();
        assert_eq!(config.interpolation, InterpolationMethod::NearestNeighbour);
        assert_eq!(config.bicubic_kernel, BicubicKernel::Cached);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = WarpConfig {
            fetch_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

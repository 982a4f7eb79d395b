//! Error types for raster warping.

use thiserror::Error;

/// Result type alias using WarpError.
pub type WarpResult<T> = Result<T, WarpError>;

/// Primary error type for warp operations.
#[derive(Debug, Error)]
pub enum WarpError {
    // === CRS Errors ===
    #[error("Source CRS not supported: {0}")]
    UnsupportedSourceCrs(String),

    #[error("Target CRS not supported: {0}")]
    UnsupportedTargetCrs(String),

    // === Sampling Errors ===
    #[error(
        "cannot interpolate outside the rectangle from ({min_row}, {min_col}) to \
         ({max_row}, {max_col}){}: ({row}, {col})",
        extrapolating_note(.extrapolate)
    )]
    OutOfDomain {
        row: f64,
        col: f64,
        min_row: f64,
        min_col: f64,
        max_row: f64,
        max_col: f64,
        extrapolate: bool,
    },

    // === Source Errors ===
    #[error("Invalid source raster: {0}")]
    InvalidSource(String),

    #[error("Failed to encode raster: {0}")]
    EncodeError(String),
}

fn extrapolating_note(extrapolate: &bool) -> &'static str {
    if *extrapolate {
        " even when extrapolating"
    } else {
        ""
    }
}

impl WarpError {
    /// Create an InvalidSource error.
    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Self::InvalidSource(msg.into())
    }

    /// Create an EncodeError.
    pub fn encode_error(msg: impl Into<String>) -> Self {
        Self::EncodeError(msg.into())
    }

    /// Stable reason code reported alongside a failed warp.
    pub fn code(&self) -> &'static str {
        match self {
            WarpError::UnsupportedSourceCrs(_) => "SOURCE_PROJECTION_NOT_SUPPORTED",
            WarpError::UnsupportedTargetCrs(_) => "TARGET_PROJECTION_NOT_SUPPORTED",
            WarpError::OutOfDomain { .. } => "OUT_OF_DOMAIN",
            WarpError::InvalidSource(_) => "INVALID_SOURCE",
            WarpError::EncodeError(_) => "ENCODE_FAILED",
        }
    }
}

impl From<std::io::Error> for WarpError {
    fn from(err: std::io::Error) -> Self {
        WarpError::InvalidSource(err.to_string())
    }
}

impl From<serde_json::Error> for WarpError {
    fn from(err: serde_json::Error) -> Self {
        WarpError::InvalidSource(format!("JSON error: {}", err))
    }
}

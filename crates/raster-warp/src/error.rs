//! Error types for the warp engine.

pub use warp_common::error::WarpError;

/// Result type for warp operations.
pub type Result<T> = std::result::Result<T, WarpError>;

//! Where a source raster comes from.

use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Url};
use tracing::{debug, instrument};
use warp_common::{Raster, WarpError};

use crate::codec::RasterCodec;
use crate::error::Result;

/// A source raster, already decoded or still to be loaded.
#[derive(Debug, Clone)]
pub enum RasterSource {
    /// An in-memory raster, used as is.
    Raster(Raster),
    /// Encoded raster bytes.
    Bytes(Bytes),
    /// A local file holding an encoded raster.
    Path(PathBuf),
    /// An `http`/`https` URL serving an encoded raster.
    Url(String),
}

impl RasterSource {
    /// Classify a command-line style location as a URL or a file path.
    pub fn from_location(location: &str) -> Self {
        if location.contains("://") {
            RasterSource::Url(location.to_string())
        } else {
            RasterSource::Path(PathBuf::from(location))
        }
    }
}

impl From<Raster> for RasterSource {
    fn from(raster: Raster) -> Self {
        RasterSource::Raster(raster)
    }
}

impl From<Vec<u8>> for RasterSource {
    fn from(bytes: Vec<u8>) -> Self {
        RasterSource::Bytes(Bytes::from(bytes))
    }
}

/// Resolve a source into a decoded raster.
///
/// Network and HTTP status failures surface as [`WarpError::InvalidSource`].
#[instrument(skip(source, codec))]
pub async fn load(
    source: RasterSource,
    codec: &dyn RasterCodec,
    fetch_timeout: Duration,
) -> Result<Raster> {
    match source {
        RasterSource::Raster(raster) => Ok(raster),
        RasterSource::Bytes(bytes) => codec.decode(&bytes),
        RasterSource::Path(path) => {
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                WarpError::invalid_source(format!("{}: {}", path.display(), e))
            })?;
            debug!(path = %path.display(), bytes = bytes.len(), "Read source raster");
            codec.decode(&bytes)
        }
        RasterSource::Url(url) => {
            let url = parse_url(&url)?;
            let bytes = fetch(url, fetch_timeout).await?;
            codec.decode(&bytes)
        }
    }
}

/// Accept only absolute `http`/`https` URLs.
pub fn parse_url(s: &str) -> Result<Url> {
    match Url::parse(s) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(WarpError::invalid_source("not a valid url")),
    }
}

async fn fetch(url: Url, timeout: Duration) -> Result<Bytes> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| WarpError::invalid_source(format!("HTTP client: {}", e)))?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| WarpError::invalid_source(format!("{}: {}", url, e)))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| WarpError::invalid_source(format!("{}: {}", url, e)))?;

    debug!(%url, bytes = bytes.len(), "Fetched source raster");
    Ok(bytes)
}

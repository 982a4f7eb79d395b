//! Raster codecs: turning bytes into a [`Raster`] and back.

use serde::{Deserialize, Serialize};
use warp_common::{CrsCode, Raster, SampleFormat, WarpError};

use crate::error::Result;

/// Decoder/encoder pair for one raster byte format.
pub trait RasterCodec: Send + Sync {
    /// Decode a complete raster, validating its CRS and geometry.
    fn decode(&self, bytes: &[u8]) -> Result<Raster>;

    /// Encode a fully populated raster.
    ///
    /// Fails with `EncodeError` when the raster would not decode again, e.g.
    /// zero dimensions or a non-finite pixel size.
    fn encode(&self, raster: &Raster) -> Result<Vec<u8>>;
}

/// JSON document layout shared with the browser tooling.
///
/// `(x1, y1)` is the top-left corner and `(x2, y2)` the bottom-right one.
/// `rasterData` is indexed `[band][row][col]`; `null` marks a missing sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterDocument {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub x_res: f64,
    pub y_res: f64,
    pub nx: usize,
    pub ny: usize,
    /// Numeric EPSG code.
    pub coordinate_system: u32,
    #[serde(default = "default_bits_per_sample")]
    pub bits_per_sample: u16,
    #[serde(default)]
    pub sample_format: SampleFormat,
    /// Informational on decode: extrema are recomputed from `rasterData`.
    #[serde(default)]
    pub min: Option<f64>,
    /// Informational on decode, like `min`.
    #[serde(default)]
    pub max: Option<f64>,
    pub raster_data: Vec<Vec<Vec<Option<f64>>>>,
}

fn default_bits_per_sample() -> u16 {
    64
}

impl TryFrom<RasterDocument> for Raster {
    type Error = WarpError;

    fn try_from(doc: RasterDocument) -> Result<Self> {
        let crs = CrsCode::from_epsg(doc.coordinate_system)
            .map_err(|e| WarpError::UnsupportedSourceCrs(e.to_string()))?;
        let cells = doc.nx.checked_mul(doc.ny).ok_or_else(|| {
            WarpError::invalid_source(format!("{}x{} samples overflow", doc.nx, doc.ny))
        })?;

        let mut raster = Raster::shell(
            crs,
            doc.x1,
            doc.y1,
            doc.x_res,
            doc.y_res,
            doc.nx,
            doc.ny,
            doc.bits_per_sample,
            doc.sample_format,
        );

        for (b, rows) in doc.raster_data.into_iter().enumerate() {
            if rows.len() != doc.ny {
                return Err(WarpError::invalid_source(format!(
                    "band {} has {} rows, expected {}",
                    b,
                    rows.len(),
                    doc.ny
                )));
            }

            if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != doc.nx) {
                return Err(WarpError::invalid_source(format!(
                    "band {} row {} has {} columns, expected {}",
                    b,
                    r,
                    row.len(),
                    doc.nx
                )));
            }

            let mut band = Vec::with_capacity(cells);
            for row in rows {
                band.extend(row.into_iter().map(|v| v.unwrap_or(f64::NAN)));
            }
            raster.push_band(band)?;
        }

        raster.validate()?;
        Ok(raster)
    }
}

impl From<&Raster> for RasterDocument {
    fn from(raster: &Raster) -> Self {
        let (x1, y1, x2, y2) = raster.corners();
        let width = raster.width.max(1);

        let raster_data = raster
            .bands
            .iter()
            .map(|band| {
                band.chunks(width)
                    .map(|row| {
                        row.iter()
                            .map(|&v| if v.is_nan() { None } else { Some(v) })
                            .collect()
                    })
                    .collect()
            })
            .collect();

        Self {
            x1,
            y1,
            x2,
            y2,
            x_res: raster.pixel_width,
            y_res: raster.pixel_height,
            nx: raster.width,
            ny: raster.height,
            coordinate_system: raster.crs.epsg(),
            bits_per_sample: raster.sample_depth,
            sample_format: raster.sample_format,
            min: raster.min,
            max: raster.max,
            raster_data,
        }
    }
}

/// [`RasterCodec`] for the [`RasterDocument`] JSON layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRasterCodec {
    pretty: bool,
}

impl JsonRasterCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent encoded output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl RasterCodec for JsonRasterCodec {
    fn decode(&self, bytes: &[u8]) -> Result<Raster> {
        let doc: RasterDocument = serde_json::from_slice(bytes)?;
        Raster::try_from(doc)
    }

    fn encode(&self, raster: &Raster) -> Result<Vec<u8>> {
        // Refuse anything decode would reject, including empty warps.
        raster.validate().map_err(|e| match e {
            WarpError::InvalidSource(msg) => WarpError::encode_error(msg),
            other => other,
        })?;

        let doc = RasterDocument::from(raster);
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(&doc)
        } else {
            serde_json::to_vec(&doc)
        };
        encoded.map_err(|e| WarpError::encode_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "x1": 10.0, "y1": 50.0, "x2": 12.0, "y2": 49.0,
        "xRes": 1.0, "yRes": -0.5, "nx": 2, "ny": 2,
        "coordinateSystem": 4326,
        "bitsPerSample": 32,
        "sampleFormat": 3,
        "rasterData": [[[1.0, 2.0], [null, 4.0]]]
    }"#;

    #[test]
    fn test_decode_document() {
        let raster = JsonRasterCodec::new().decode(DOC.as_bytes()).unwrap();

        assert_eq!(raster.crs, CrsCode::Epsg4326);
        assert_eq!((raster.width, raster.height), (2, 2));
        assert_eq!(raster.origin_x, 10.0);
        assert_eq!(raster.pixel_height, -0.5);
        assert_eq!(raster.sample_depth, 32);
        assert_eq!(raster.sample_format, SampleFormat::Float);
        assert!(raster.bands[0][2].is_nan());
        assert_eq!(raster.min, Some(1.0));
        assert_eq!(raster.max, Some(4.0));
    }

    #[test]
    fn test_encode_decode_preserves_raster() {
        let codec = JsonRasterCodec::new();
        let raster = codec.decode(DOC.as_bytes()).unwrap();

        let bytes = codec.encode(&raster).unwrap();
        let doc: RasterDocument = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(doc.x2, 12.0);
        assert_eq!(doc.y2, 49.0);
        assert_eq!(doc.raster_data[0][1], vec![None, Some(4.0)]);

        let again = codec.decode(&bytes).unwrap();
        assert_eq!(again.bands[0][0], 1.0);
        assert_eq!(again.bands[0][3], 4.0);
        assert_eq!(again.corners(), raster.corners());
    }

    #[test]
    fn test_unsupported_crs() {
        let doc = DOC.replace("4326", "32633");
        let err = JsonRasterCodec::new().decode(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, WarpError::UnsupportedSourceCrs(_)));
        assert_eq!(err.code(), "SOURCE_PROJECTION_NOT_SUPPORTED");
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let doc = DOC.replace("[null, 4.0]", "[null]");
        let err = JsonRasterCodec::new().decode(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, WarpError::InvalidSource(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = JsonRasterCodec::new().decode(b"{not json").unwrap_err();
        assert_eq!(err.code(), "INVALID_SOURCE");
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let doc = DOC.replace("\"xRes\": 1.0", "\"xRes\": 0.0");
        let err = JsonRasterCodec::new().decode(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, WarpError::InvalidSource(_)));
    }

    #[test]
    fn test_huge_column_count_rejected() {
        let doc = DOC
            .replace("\"nx\": 2", "\"nx\": 2305843009213693952")
            .replace("\"ny\": 2", "\"ny\": 1")
            .replace("[[1.0, 2.0], [null, 4.0]]", "[[1.0]]");
        let err = JsonRasterCodec::new().decode(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, WarpError::InvalidSource(_)));
    }

    #[test]
    fn test_overflowing_sample_count_rejected() {
        let doc = DOC
            .replace("\"nx\": 2", "\"nx\": 4611686018427387904")
            .replace("\"ny\": 2", "\"ny\": 8");
        let err = JsonRasterCodec::new().decode(doc.as_bytes()).unwrap_err();
        assert_eq!(err.code(), "INVALID_SOURCE");
    }

    #[test]
    fn test_document_extrema_are_recomputed() {
        let doc = DOC.replace("\"bitsPerSample\"", "\"min\": -100.0, \"max\": 100.0, \"bitsPerSample\"");
        let raster = JsonRasterCodec::new().decode(doc.as_bytes()).unwrap();
        assert_eq!(raster.min, Some(1.0));
        assert_eq!(raster.max, Some(4.0));
    }

    #[test]
    fn test_encode_rejects_empty_raster() {
        let raster = Raster::shell(
            CrsCode::Epsg3857,
            0.0,
            2.0,
            f64::INFINITY,
            f64::NEG_INFINITY,
            0,
            0,
            64,
            SampleFormat::Float,
        );
        let err = JsonRasterCodec::new().encode(&raster).unwrap_err();
        assert_eq!(err.code(), "ENCODE_FAILED");

        let mut raster = Raster::shell(CrsCode::Epsg3857, 0.0, 2.0, 1.0, -1.0, 0, 2, 64, SampleFormat::Float);
        raster.push_band(Vec::new()).unwrap();
        let err = JsonRasterCodec::new().encode(&raster).unwrap_err();
        assert!(matches!(err, WarpError::EncodeError(_)));
    }
}

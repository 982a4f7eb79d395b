//! The raster value object passed between the codec, planner and executor.

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, CrsCode, WarpError, WarpResult};

/// Numeric encoding of the samples, using the TIFF `SampleFormat` codes.
///
/// Carried through a warp unchanged so the destination can be re-encoded
/// with the same layout as the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum SampleFormat {
    UnsignedInteger,
    SignedInteger,
    #[default]
    Float,
}

impl SampleFormat {
    pub fn code(&self) -> u16 {
        match self {
            SampleFormat::UnsignedInteger => 1,
            SampleFormat::SignedInteger => 2,
            SampleFormat::Float => 3,
        }
    }
}

impl From<SampleFormat> for u16 {
    fn from(format: SampleFormat) -> Self {
        format.code()
    }
}

impl TryFrom<u16> for SampleFormat {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(SampleFormat::UnsignedInteger),
            2 => Ok(SampleFormat::SignedInteger),
            3 => Ok(SampleFormat::Float),
            other => Err(format!("unknown sample format code {}", other)),
        }
    }
}

/// A georeferenced, multi-band grid of samples.
///
/// Each band is stored row-major (top row first), `height * width` values.
/// Row `r`, column `c` covers world coordinates starting at
/// `(origin_x + c * pixel_width, origin_y + r * pixel_height)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub crs: CrsCode,
    /// World X of the top-left corner.
    pub origin_x: f64,
    /// World Y of the top-left corner.
    pub origin_y: f64,
    pub pixel_width: f64,
    /// Usually negative: rows go down while Y goes up.
    pub pixel_height: f64,
    pub width: usize,
    pub height: usize,
    pub bands: Vec<Vec<f64>>,
    pub sample_depth: u16,
    pub sample_format: SampleFormat,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Raster {
    /// Create a raster with fixed geometry and no bands.
    #[allow(clippy::too_many_arguments)]
    pub fn shell(
        crs: CrsCode,
        origin_x: f64,
        origin_y: f64,
        pixel_width: f64,
        pixel_height: f64,
        width: usize,
        height: usize,
        sample_depth: u16,
        sample_format: SampleFormat,
    ) -> Self {
        Self {
            crs,
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            width,
            height,
            bands: Vec::new(),
            sample_depth,
            sample_format,
            min: None,
            max: None,
        }
    }

    /// Create a single-band float raster from row-major data.
    pub fn from_band(
        crs: CrsCode,
        origin: (f64, f64),
        pixel_size: (f64, f64),
        width: usize,
        height: usize,
        data: Vec<f64>,
    ) -> WarpResult<Self> {
        let mut raster = Self::shell(
            crs,
            origin.0,
            origin.1,
            pixel_size.0,
            pixel_size.1,
            width,
            height,
            64,
            SampleFormat::Float,
        );
        raster.push_band(data)?;
        Ok(raster)
    }

    /// Append a fully written band and fold its samples into the extrema.
    ///
    /// NaN samples are kept but never become `min` or `max`.
    pub fn push_band(&mut self, data: Vec<f64>) -> WarpResult<()> {
        if data.len() != self.len() {
            return Err(WarpError::invalid_source(format!(
                "band has {} samples, expected {}x{}",
                data.len(),
                self.width,
                self.height
            )));
        }
        for &v in &data {
            self.record(v);
        }
        self.bands.push(data);
        Ok(())
    }

    /// Update the running extrema with one written sample.
    pub fn record(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        if self.min.map_or(true, |m| v < m) {
            self.min = Some(v);
        }
        if self.max.map_or(true, |m| v > m) {
            self.max = Some(v);
        }
    }

    /// Borrow one band as a 2-D grid.
    pub fn band(&self, index: usize) -> Option<GridView<'_>> {
        self.bands
            .get(index)
            .map(|data| GridView::new(data, self.width, self.height))
    }

    /// Number of samples per band.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Check if the raster has no samples per band.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Top-left and bottom-right corners as `(x1, y1, x2, y2)`.
    pub fn corners(&self) -> (f64, f64, f64, f64) {
        (
            self.origin_x,
            self.origin_y,
            self.origin_x + self.width as f64 * self.pixel_width,
            self.origin_y + self.height as f64 * self.pixel_height,
        )
    }

    /// Normalized bounding box of the raster extent.
    pub fn bounding_box(&self) -> BoundingBox {
        let (x1, y1, x2, y2) = self.corners();
        BoundingBox::from_corners((x1, y1), (x2, y2))
    }

    /// Convert world coordinates into fractional `(row, col)` pixel coordinates.
    pub fn world_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (y - self.origin_y) / self.pixel_height,
            (x - self.origin_x) / self.pixel_width,
        )
    }

    /// Convert fractional `(row, col)` pixel coordinates into world coordinates.
    pub fn pixel_to_world(&self, row: f64, col: f64) -> (f64, f64) {
        (
            self.origin_x + col * self.pixel_width,
            self.origin_y + row * self.pixel_height,
        )
    }

    /// Check the structural invariants of a populated raster.
    pub fn validate(&self) -> WarpResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WarpError::invalid_source(format!(
                "raster dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.pixel_width.is_finite()
            || !self.pixel_height.is_finite()
            || self.pixel_width == 0.0
            || self.pixel_height == 0.0
        {
            return Err(WarpError::invalid_source(format!(
                "pixel size must be finite and non-zero, got ({}, {})",
                self.pixel_width, self.pixel_height
            )));
        }
        if let Some(i) = self.bands.iter().position(|b| b.len() != self.len()) {
            return Err(WarpError::invalid_source(format!(
                "band {} has {} samples, expected {}",
                i,
                self.bands[i].len(),
                self.len()
            )));
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(WarpError::invalid_source(format!(
                    "min {} exceeds max {}",
                    min, max
                )));
            }
        }
        Ok(())
    }
}

/// A borrowed row-major 2-D sample grid.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    data: &'a [f64],
    width: usize,
    height: usize,
}

impl<'a> GridView<'a> {
    /// Wrap row-major data.
    ///
    /// # Panics
    /// If `data` holds fewer than `width * height` samples.
    pub fn new(data: &'a [f64], width: usize, height: usize) -> Self {
        assert!(
            data.len() >= width * height,
            "grid data too short: {} < {}x{}",
            data.len(),
            width,
            height
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at an in-range integer position.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    pub fn data(&self) -> &'a [f64] {
        self.data
    }
}

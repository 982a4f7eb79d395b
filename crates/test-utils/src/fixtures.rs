//! Common test fixtures for raster-warp tests.
//!
//! Pre-defined extents, raster layouts and encoded documents that show up
//! across the test suites.

/// Common extents as `(x1, y1, x2, y2)`, top-left then bottom-right.
pub mod extent {
    /// Global geographic extent.
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, 90.0, 180.0, -90.0);

    /// Continental United States, degrees.
    pub const CONUS: (f64, f64, f64, f64) = (-130.0, 55.0, -60.0, 20.0);

    /// The full Web Mercator square, metres.
    pub const MERCATOR_WORLD: (f64, f64, f64, f64) = (
        -20037508.342789244,
        20037508.342789244,
        20037508.342789244,
        -20037508.342789244,
    );
}

/// Common raster layouts for testing.
pub mod raster {
    /// A 2x2 raster at unit resolution, the smallest warp that plans cleanly.
    pub const TWO_BY_TWO: RasterSpec = RasterSpec {
        width: 2,
        height: 2,
        origin_x: 0.0,
        origin_y: 2.0,
        resolution: 1.0,
    };

    /// 10x10 one-degree raster centred on (0, 0).
    pub const SIMPLE_10X10: RasterSpec = RasterSpec {
        width: 10,
        height: 10,
        origin_x: -5.0,
        origin_y: 5.0,
        resolution: 1.0,
    };

    /// CONUS at a quarter degree.
    pub const CONUS_QUARTER_DEGREE: RasterSpec = RasterSpec {
        width: 280,
        height: 140,
        origin_x: -130.0,
        origin_y: 55.0,
        resolution: 0.25,
    };

    /// Square-pixel, north-up raster layout.
    #[derive(Debug, Clone, Copy)]
    pub struct RasterSpec {
        pub width: usize,
        pub height: usize,
        pub origin_x: f64,
        pub origin_y: f64,
        pub resolution: f64,
    }

    impl RasterSpec {
        /// Returns the number of samples per band.
        pub fn size(&self) -> usize {
            self.width * self.height
        }

        pub fn origin(&self) -> (f64, f64) {
            (self.origin_x, self.origin_y)
        }

        /// Returns the extent as `(x1, y1, x2, y2)`.
        pub fn corners(&self) -> (f64, f64, f64, f64) {
            (
                self.origin_x,
                self.origin_y,
                self.origin_x + self.width as f64 * self.resolution,
                self.origin_y - self.height as f64 * self.resolution,
            )
        }
    }
}

/// Common CRS identifiers.
pub mod crs {
    /// WGS84 geographic
    pub const EPSG_4326: &str = "EPSG:4326";

    /// Web Mercator
    pub const EPSG_3857: &str = "EPSG:3857";

    /// Lon/lat alias of EPSG:4326
    pub const CRS_84: &str = "CRS:84";

    /// A real CRS outside the supported set (UTM 33N)
    pub const UNSUPPORTED: &str = "EPSG:32633";
}

/// Encoded raster documents.
pub mod documents {
    /// A 3x2 geographic raster with one missing sample.
    pub const GEOGRAPHIC_3X2: &str = r#"{
        "x1": -3.0, "y1": 2.0, "x2": 3.0, "y2": -2.0,
        "xRes": 2.0, "yRes": -2.0, "nx": 3, "ny": 2,
        "coordinateSystem": 4326,
        "bitsPerSample": 32,
        "sampleFormat": 3,
        "rasterData": [[[1.0, 2.0, 3.0], [4.0, null, 6.0]]]
    }"#;

    /// A 2x2 raster in an unsupported CRS.
    pub const UTM_2X2: &str = r#"{
        "x1": 500000.0, "y1": 4000200.0, "x2": 500200.0, "y2": 4000000.0,
        "xRes": 100.0, "yRes": -100.0, "nx": 2, "ny": 2,
        "coordinateSystem": 32633,
        "rasterData": [[[1.0, 2.0], [3.0, 4.0]]]
    }"#;
}

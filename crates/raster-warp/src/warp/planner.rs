//! Destination grid geometry.

use projection::CrsTransform;
use tracing::{debug, warn};
use warp_common::{BoundingBox, Raster};

use super::WarpOptions;

/// Derive the destination raster shell for a warp.
///
/// The bounding box is the explicit `{x1, y1, x2, y2}` when all four are
/// given, otherwise the source's top-left and bottom-right corners projected
/// into the target CRS. Geometry then comes from, in order:
///
/// 1. `{x_res, y_res}`: dimensions are `ceil(extent / res)`.
/// 2. `{nx, ny}`: resolution is `extent / n` (`extent` when `n` is 0).
/// 3. Neither: a square pixel sized so the destination diagonal spans
///    `floor(hypot(src_width, src_height))` pixels, with `y_res` negative.
///
/// Only geometry is read from `source`, never its samples. Overrides are
/// not validated; a non-positive or non-finite dimension becomes 0.
pub fn plan_warp(source: &Raster, transform: &CrsTransform, options: &WarpOptions) -> Raster {
    let (sx1, sy1, sx2, sy2) = source.corners();
    let nw = transform.forward(sx1, sy1);
    let se = transform.forward(sx2, sy2);

    let (x1, y1, x2, y2) = match (options.x1, options.y1, options.x2, options.y2) {
        (Some(x1), Some(y1), Some(x2), Some(y2)) => (x1, y1, x2, y2),
        _ => (nw.0, nw.1, se.0, se.1),
    };
    let extent_x = x2 - x1;
    let extent_y = y2 - y1;
    let extent = BoundingBox::from_corners((x1, y1), (x2, y2));

    if !transform.target().valid_bounds().intersects(&extent) {
        warn!(
            target_crs = %transform.target(),
            x1, y1, x2, y2,
            "Destination extent lies outside the target CRS world extent"
        );
    }

    let (x_res, y_res, width, height) = match (options.x_res, options.y_res, options.nx, options.ny) {
        (Some(x_res), Some(y_res), _, _) => (
            x_res,
            y_res,
            pixel_count(extent_x / x_res),
            pixel_count(extent_y / y_res),
        ),
        // A zero count keeps the whole extent as one finite pixel step.
        (_, _, Some(nx), Some(ny)) => (
            extent_x / nx.max(1) as f64,
            extent_y / ny.max(1) as f64,
            nx,
            ny,
        ),
        _ => {
            let diagonal = (source.width as f64).hypot(source.height as f64).floor();
            let res = extent.diagonal() / diagonal;
            (
                res,
                -res,
                pixel_count(extent_x / res),
                pixel_count(extent_y / -res),
            )
        }
    };

    debug!(
        target_crs = %transform.target(),
        x1, y1, x2, y2, x_res, y_res, width, height,
        "Planned warp geometry"
    );

    Raster::shell(
        transform.target(),
        x1,
        y1,
        x_res,
        y_res,
        width,
        height,
        source.sample_depth,
        source.sample_format,
    )
}

/// `ceil` of a pixel count, with anything non-positive or non-finite as 0.
fn pixel_count(n: f64) -> usize {
    let n = n.ceil();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_common::{CrsCode, SampleFormat};

    fn source_2x2() -> Raster {
        Raster::from_band(
            CrsCode::Epsg3857,
            (0.0, 2.0),
            (1.0, -1.0),
            2,
            2,
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap()
    }

    fn identity() -> CrsTransform {
        CrsTransform::new(CrsCode::Epsg3857, CrsCode::Epsg3857)
    }

    #[test]
    fn test_explicit_counts() {
        let options = WarpOptions::default().with_size(4, 4);
        let shell = plan_warp(&source_2x2(), &identity(), &options);

        assert_eq!((shell.width, shell.height), (4, 4));
        assert_eq!(shell.pixel_width, 2.0 / 4.0);
        assert_eq!(shell.pixel_height, -2.0 / 4.0);
        assert_eq!(shell.corners(), (0.0, 2.0, 2.0, 0.0));
        assert!(shell.bands.is_empty());
        assert_eq!(shell.min, None);
    }

    #[test]
    fn test_explicit_resolution_rounds_up() {
        let options = WarpOptions::default().with_resolution(0.3, -0.3);
        let shell = plan_warp(&source_2x2(), &identity(), &options);

        // 2 / 0.3 = 6.67
        assert_eq!((shell.width, shell.height), (7, 7));
        assert_eq!(shell.pixel_width, 0.3);
    }

    #[test]
    fn test_resolution_wins_over_counts() {
        let options = WarpOptions::default()
            .with_resolution(1.0, -1.0)
            .with_size(10, 10);
        let shell = plan_warp(&source_2x2(), &identity(), &options);
        assert_eq!((shell.width, shell.height), (2, 2));
    }

    #[test]
    fn test_default_keeps_diagonal_pixel_count() {
        let source = Raster::shell(
            CrsCode::Epsg3857,
            0.0,
            400.0,
            10.0,
            -10.0,
            30,
            40,
            16,
            SampleFormat::SignedInteger,
        );
        let shell = plan_warp(&source, &identity(), &WarpOptions::default());

        // Diagonal of 30x40 is exactly 50 pixels over 500 m.
        assert!((shell.pixel_width - 10.0).abs() < 1e-9);
        assert!((shell.pixel_height + 10.0).abs() < 1e-9);
        assert_eq!((shell.width, shell.height), (30, 40));
        assert_eq!(shell.sample_depth, 16);
        assert_eq!(shell.sample_format, SampleFormat::SignedInteger);
    }

    #[test]
    fn test_explicit_bbox_needs_all_four() {
        let partial = WarpOptions {
            x1: Some(-5.0),
            y1: Some(5.0),
            x2: Some(5.0),
            ..Default::default()
        }
        .with_size(2, 2);
        let shell = plan_warp(&source_2x2(), &identity(), &partial);
        assert_eq!(shell.corners(), (0.0, 2.0, 2.0, 0.0));

        let full = partial.with_bbox(-5.0, 5.0, 5.0, -5.0);
        let shell = plan_warp(&source_2x2(), &identity(), &full);
        assert_eq!(shell.corners(), (-5.0, 5.0, 5.0, -5.0));
        assert_eq!(shell.pixel_width, 5.0);
    }

    #[test]
    fn test_projects_default_bbox() {
        let source = Raster::shell(
            CrsCode::Epsg4326,
            -10.0,
            10.0,
            1.0,
            -1.0,
            20,
            20,
            32,
            SampleFormat::Float,
        );
        let transform = CrsTransform::new(CrsCode::Epsg4326, CrsCode::Epsg3857);
        let shell = plan_warp(&source, &transform, &WarpOptions::default().with_size(20, 20));

        let (x1, y1, x2, y2) = shell.corners();
        let (ex1, ey1) = transform.forward(-10.0, 10.0);
        assert_eq!(shell.crs, CrsCode::Epsg3857);
        assert!((x1 - ex1).abs() < 1e-6 && (y1 - ey1).abs() < 1e-6);
        assert!((x2 + ex1).abs() < 1e-6 && (y2 + ey1).abs() < 1e-6);
    }

    #[test]
    fn test_non_positive_dimensions_become_zero() {
        let options = WarpOptions::default().with_resolution(-1.0, -1.0);
        let shell = plan_warp(&source_2x2(), &identity(), &options);
        assert_eq!(shell.width, 0);
        assert_eq!(shell.height, 2);

        let options = WarpOptions::default().with_resolution(0.0, 0.0);
        let shell = plan_warp(&source_2x2(), &identity(), &options);
        assert_eq!((shell.width, shell.height), (0, 0));
    }

    #[test]
    fn test_zero_counts_keep_finite_resolution() {
        let options = WarpOptions::default().with_size(0, 0);
        let shell = plan_warp(&source_2x2(), &identity(), &options);

        assert_eq!((shell.width, shell.height), (0, 0));
        assert_eq!(shell.pixel_width, 2.0);
        assert_eq!(shell.pixel_height, -2.0);
        assert!(shell.corners().2.is_finite() && shell.corners().3.is_finite());
    }

    #[test]
    fn test_pixel_count() {
        assert_eq!(pixel_count(3.01), 4);
        assert_eq!(pixel_count(3.0), 3);
        assert_eq!(pixel_count(-0.5), 0);
        assert_eq!(pixel_count(f64::NAN), 0);
        assert_eq!(pixel_count(f64::INFINITY), 0);
    }
}

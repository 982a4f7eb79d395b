//! Raster warper.
//!
//! Loads a JSON-encoded raster from a file or URL, reprojects it into the
//! target CRS and writes the encoded result to a file or stdout.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use raster_warp::{
    warp_source, BicubicKernel, InterpolationMethod, JsonRasterCodec, RasterCodec, RasterSource,
    WarpConfig, WarpOptions,
};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "warper")]
#[command(about = "Reproject and resample a raster into another CRS")]
struct Args {
    /// Source raster: a file path or an http(s) URL
    input: String,

    /// Target CRS (EPSG:4326, CRS:84, EPSG:3857, ...)
    #[arg(short, long)]
    target: String,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output bounding box as x1,y1,x2,y2 (top-left, bottom-right)
    #[arg(long, value_delimiter = ',', num_args = 4, allow_negative_numbers = true)]
    bbox: Option<Vec<f64>>,

    /// Output pixel width
    #[arg(long, allow_negative_numbers = true, requires = "y_res")]
    x_res: Option<f64>,

    /// Output pixel height (usually negative)
    #[arg(long, allow_negative_numbers = true, requires = "x_res")]
    y_res: Option<f64>,

    /// Output column count
    #[arg(long, requires = "ny")]
    nx: Option<usize>,

    /// Output row count
    #[arg(long, requires = "nx")]
    ny: Option<usize>,

    /// Interpolation method: nearestNeighbour, bilinear or bicubic
    #[arg(short, long)]
    interpolation: Option<String>,

    /// Bicubic strategy: direct, cached or cachedExtrapolating
    #[arg(long)]
    bicubic_kernel: Option<String>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn options(&self) -> WarpOptions {
        let mut options = WarpOptions::default();

        let bbox = self.bbox.as_deref().and_then(|b| <[f64; 4]>::try_from(b).ok());
        if let Some([x1, y1, x2, y2]) = bbox {
            options = options.with_bbox(x1, y1, x2, y2);
        }
        options.x_res = self.x_res;
        options.y_res = self.y_res;
        options.nx = self.nx;
        options.ny = self.ny;
        options.interpolation = self.interpolation.as_deref().map(InterpolationMethod::from_str);
        options.bicubic = self.bicubic_kernel.as_deref().map(BicubicKernel::from_str);
        options
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = WarpConfig::from_env();
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid warp configuration")?;

    let options = args.options();
    info!(
        input = %args.input,
        target = %args.target,
        interpolation = %options.interpolation.unwrap_or(config.interpolation),
        "Starting warp"
    );

    let codec = if args.pretty {
        JsonRasterCodec::pretty()
    } else {
        JsonRasterCodec::new()
    };

    let source = RasterSource::from_location(&args.input);
    let outcome = match warp_source(source, &args.target, &options, &config, &codec).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(code = e.code(), error = %e, "Warp failed");
            return Err(e).context(format!("Failed to warp {}", args.input));
        }
    };

    let encoded = codec.encode(&outcome.raster)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &encoded)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = encoded.len(), "Wrote warped raster");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&encoded)?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

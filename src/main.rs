use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use j2k_native_rs::image_pipeline::{ConversionConfig, J2kToNativePipeline, TiffCompression};
use j2k_native_rs::logger;

use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "j2k_native_rs", version, about = "Decode a JPEG 2000 codestream into native pixel data")]
struct Args {
    /// Input codestream (.j2c / .j2k / .jp2)
    input: PathBuf,

    /// Also write the decoded raster as a 16-bit TIFF
    #[arg(long)]
    tiff: Option<PathBuf>,

    /// Deflate-compress the TIFF output
    #[arg(long)]
    deflate: bool,

    /// Log per-step timings
    #[arg(long)]
    timings: bool,

    /// Debug-level logging with span timings (ignored when RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_with_default(if args.verbose { "debug" } else { "info" });

    let config = ConversionConfig::builder()
        .compression(if args.deflate {
            TiffCompression::DeflateBalanced
        } else {
            TiffCompression::None
        })
        .build();
    let pipeline = J2kToNativePipeline::new(config);

    let data = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let (image, raster, timings) = match &args.tiff {
        Some(_) => {
            let (image, raster, timings) = pipeline.decode_native_and_raster(&data)?;
            (image, Some(raster), timings)
        }
        None => {
            let (image, timings) = pipeline.decode_with_timings(&data)?;
            (image, None, timings)
        }
    };

    info!(
        "{}: {}x{}, {} component(s), {}-bit {}, {} pixels",
        args.input.display(),
        image.width,
        image.height,
        image.matrix.component_count().get(),
        image.precision,
        if image.signed { "signed" } else { "unsigned" },
        image.matrix.len()
    );

    if let (Some(output), Some(raster)) = (&args.tiff, &raster) {
        let mut file = std::fs::File::create(output)
            .with_context(|| format!("creating {}", output.display()))?;
        pipeline.write_raster(raster, &mut file)?;
        info!("Raster written to {}", output.display());
    }

    if args.timings {
        timings.log_summary();
    }

    Ok(())
}

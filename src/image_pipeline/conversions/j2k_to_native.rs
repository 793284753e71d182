use std::io::Write;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    codestream::{CodestreamDecoder, DecodedImage, OpenJpegDecoder},
    common::error::{ConversionError, Result},
    conversions::timing::{PipelineTimings, Timer},
    native::{NativeMatrix, SampleAggregator},
    raster::{Raster, build_raster},
    tiff::{ConversionConfig, RasterWriter, StandardTiffWriter},
};

/// Result of a native decode: canonical size, sample format and the pixel matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeImage {
    pub width: usize,
    pub height: usize,
    /// Bit depth of component 0
    pub precision: u32,
    /// Whether component 0 carries signed samples
    pub signed: bool,
    pub matrix: NativeMatrix,
}

impl From<NativeImage> for (usize, usize, NativeMatrix) {
    fn from(image: NativeImage) -> Self {
        (image.width, image.height, image.matrix)
    }
}

/// Decodes a codestream with OpenJPEG and the default configuration.
///
/// Returns `(width, height, matrix)` where the size comes from component 0.
pub fn decode(data: &[u8]) -> Result<(usize, usize, NativeMatrix)> {
    J2kToNativePipeline::new(ConversionConfig::default()).decode(data)
}

/// Codestream in, native pixel matrix or 16-bit raster out.
///
/// The decode engine is only ever touched from here; every stage after it
/// works on the owned [`DecodedImage`], which is dropped when the call returns.
pub struct J2kToNativePipeline<D: CodestreamDecoder, W: RasterWriter> {
    decoder: D,
    writer: W,
    config: ConversionConfig,
}

impl J2kToNativePipeline<OpenJpegDecoder, StandardTiffWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            decoder: OpenJpegDecoder,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl Default for J2kToNativePipeline<OpenJpegDecoder, StandardTiffWriter> {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl<D: CodestreamDecoder, W: RasterWriter> J2kToNativePipeline<D, W> {
    pub fn with_custom(decoder: D, writer: W, config: ConversionConfig) -> Self {
        Self {
            decoder,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    fn decode_codestream(&self, input_data: &[u8]) -> Result<DecodedImage> {
        if input_data.is_empty() {
            return Err(ConversionError::EmptyInput);
        }
        self.decoder.decode_codestream(input_data)
    }

    /// Validated lockstep walk over the decoded planes.
    fn aggregate<'a>(&self, image: &'a DecodedImage) -> Result<SampleAggregator<'a>> {
        let aggregator = SampleAggregator::new(image)?;
        self.validate_dimensions(aggregator.width(), aggregator.height())?;
        debug!(
            "Aggregating {}x{} pixels over {:?}",
            aggregator.width(),
            aggregator.height(),
            aggregator.component_count()
        );
        Ok(aggregator)
    }

    fn timed_decode(&self, input_data: &[u8], timings: &mut PipelineTimings) -> Result<DecodedImage> {
        let timer = Timer::start("decode_codestream");
        let decoded = self.decode_codestream(input_data)?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);
        Ok(decoded)
    }

    fn native_image(&self, decoded: &DecodedImage, timings: &mut PipelineTimings) -> Result<NativeImage> {
        let timer = Timer::start("build_native_matrix");
        let aggregator = self.aggregate(decoded)?;
        let (width, height) = (aggregator.width(), aggregator.height());
        let components = aggregator.component_count().get();
        let matrix = NativeMatrix::from_tuples(aggregator, components)?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        Ok(NativeImage {
            width,
            height,
            precision: decoded.precision(),
            signed: decoded.is_signed(),
            matrix,
        })
    }

    fn raster(&self, decoded: &DecodedImage) -> Result<Raster> {
        let _span = tracing::info_span!("build_raster").entered();
        let aggregator = self.aggregate(decoded)?;
        let (width, height) = (aggregator.width(), aggregator.height());
        let components = aggregator.component_count();
        build_raster(aggregator, components, width, height)
    }

    /// Decodes `input_data` into `(width, height, matrix)`.
    ///
    /// Empty input fails with `EmptyInput` before the decoder is called.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn decode(&self, input_data: &[u8]) -> Result<(usize, usize, NativeMatrix)> {
        let (image, timings) = self.decode_with_timings(input_data)?;
        debug!(
            "Native decode took {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(image.into())
    }

    pub fn decode_with_timings(&self, input_data: &[u8]) -> Result<(NativeImage, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        info!("Starting codestream to native matrix conversion");

        let decoded = self.timed_decode(input_data, &mut timings)?;
        let image = self.native_image(&decoded, &mut timings)?;

        info!(
            width = image.width,
            height = image.height,
            components = image.matrix.component_count().get(),
            precision = image.precision,
            signed = image.signed,
            "Native conversion complete"
        );
        Ok((image, timings))
    }

    /// Decodes `input_data` once and builds both the native matrix and the raster from it.
    pub fn decode_native_and_raster(
        &self,
        input_data: &[u8],
    ) -> Result<(NativeImage, Raster, PipelineTimings)> {
        let mut timings = PipelineTimings::new();

        let decoded = self.timed_decode(input_data, &mut timings)?;
        let image = self.native_image(&decoded, &mut timings)?;

        let timer = Timer::start("build_raster");
        let raster = self.raster(&decoded)?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        Ok((image, raster, timings))
    }

    /// Decodes `input_data` into a 16-bit raster.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn decode_raster(&self, input_data: &[u8]) -> Result<Raster> {
        let decoded = {
            let _span = tracing::info_span!("decode_codestream").entered();
            self.decode_codestream(input_data)?
        };

        self.raster(&decoded)
    }

    /// Encodes an already built raster through the configured writer.
    pub fn write_raster(&self, raster: &Raster, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_tiff").entered();
        self.writer.write_raster(raster, output, &self.config)
    }

    /// Decodes `input_data` and writes the raster through the configured writer.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        info!("Starting codestream to TIFF conversion");

        let raster = self.decode_raster(input_data)?;
        self.write_raster(&raster, output)?;

        let (width, height) = raster.dimensions();
        info!(width, height, "Conversion complete");
        Ok(())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // Decode before touching the output so a bad codestream leaves no empty file behind
        let raster = self.decode_raster(&input_data)?;

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.write_raster(&raster, &mut output_file)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

//! Raster types

use image::{DynamicImage, ImageBuffer, Luma, Pixel, Rgba};

use crate::image_pipeline::codestream::types::DecodedImage;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::native::{NativeMatrix, SampleAggregator};

pub type Gray16Raster = ImageBuffer<Luma<u16>, Vec<u16>>;
pub type Rgba16Raster = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Channel layout of a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One 16-bit gray channel
    Gray16,
    /// Four 16-bit channels, red green blue alpha
    Rgba16,
}

/// Interleaved 16-bit raster produced by the raster builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raster {
    Gray16(Gray16Raster),
    Rgba16(Rgba16Raster),
}

impl Raster {
    /// Builds a raster straight from a decoded image.
    pub fn from_decoded(image: &DecodedImage) -> Result<Self> {
        let aggregator = SampleAggregator::new(image)?;
        let (width, height) = (aggregator.width(), aggregator.height());
        let components = aggregator.component_count();
        super::build_raster(aggregator, components, width, height)
    }

    /// Builds a raster from a native matrix laid out as `width` x `height`.
    ///
    /// Fails with `InvalidImage` unless the matrix holds exactly
    /// `width * height` pixels.
    pub fn from_native(matrix: &NativeMatrix, width: usize, height: usize) -> Result<Self> {
        if width.checked_mul(height) != Some(matrix.len()) {
            return Err(ConversionError::InvalidImage(format!(
                "{} pixels cannot fill a {}x{} raster",
                matrix.len(),
                width,
                height
            )));
        }
        super::build_raster(matrix.tuples(), matrix.component_count(), width, height)
    }

    pub fn pixel_format(&self) -> PixelFormat {
        match self {
            Raster::Gray16(_) => PixelFormat::Gray16,
            Raster::Rgba16(_) => PixelFormat::Rgba16,
        }
    }

    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Raster::Gray16(buffer) => buffer.dimensions(),
            Raster::Rgba16(buffer) => buffer.dimensions(),
        }
    }

    /// Channels of the pixel at (`row`, `col`), or `None` outside the raster.
    pub fn channels(&self, row: u32, col: u32) -> Option<&[u16]> {
        match self {
            Raster::Gray16(buffer) => buffer.get_pixel_checked(col, row).map(|p| p.channels()),
            Raster::Rgba16(buffer) => buffer.get_pixel_checked(col, row).map(|p| p.channels()),
        }
    }

    /// Interleaved channel data, row-major.
    pub fn as_raw(&self) -> &[u16] {
        match self {
            Raster::Gray16(buffer) => buffer.as_raw(),
            Raster::Rgba16(buffer) => buffer.as_raw(),
        }
    }
}

impl From<Raster> for DynamicImage {
    fn from(raster: Raster) -> Self {
        match raster {
            Raster::Gray16(buffer) => DynamicImage::ImageLuma16(buffer),
            Raster::Rgba16(buffer) => DynamicImage::ImageRgba16(buffer),
        }
    }
}

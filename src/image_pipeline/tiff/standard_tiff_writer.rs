use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::raster::Raster;
use crate::image_pipeline::tiff::types::{ConversionConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::RasterWriter;

/// Writes Gray16 rasters as 16-bit grayscale TIFF and Rgba16 rasters as 16-bit RGBA TIFF.
pub struct StandardTiffWriter;

impl RasterWriter for StandardTiffWriter {
    fn write_raster(&self, raster: &Raster, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        let (width, height) = raster.dimensions();
        debug!("Encoding {:?} TIFF image: {}x{}", raster.pixel_format(), width, height);

        // TiffEncoder needs Seek, so encode into memory first
        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        match raster {
            Raster::Gray16(gray) => encoder.write_image::<tiff::encoder::colortype::Gray16>(
                width,
                height,
                gray.as_raw(),
            ),
            Raster::Rgba16(rgba) => encoder.write_image::<tiff::encoder::colortype::RGBA16>(
                width,
                height,
                rgba.as_raw(),
            ),
        }
        .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgba};
    use std::io::Cursor;
    use tiff::decoder::{Decoder, DecodingResult};
    use tiff::ColorType;

    fn read_back(bytes: Vec<u8>) -> (ColorType, (u32, u32), Vec<u16>) {
        let mut decoder = Decoder::new(Cursor::new(bytes)).unwrap();
        let color = decoder.colortype().unwrap();
        let dims = decoder.dimensions().unwrap();
        match decoder.read_image().unwrap() {
            DecodingResult::U16(data) => (color, dims, data),
            _ => panic!("expected 16-bit samples"),
        }
    }

    #[test]
    fn test_gray16_raster_round_trips_through_tiff() {
        let raster = Raster::Gray16(ImageBuffer::from_fn(3, 2, |x, y| Luma([(y * 1000 + x) as u16])));
        let mut output = Vec::new();
        StandardTiffWriter
            .write_raster(&raster, &mut output, &ConversionConfig::default())
            .unwrap();

        let (color, dims, data) = read_back(output);
        assert_eq!(color, ColorType::Gray(16));
        assert_eq!(dims, (3, 2));
        assert_eq!(data, raster.as_raw().to_vec());
    }

    #[test]
    fn test_rgba16_raster_with_deflate() {
        let raster = Raster::Rgba16(ImageBuffer::from_pixel(4, 4, Rgba([1u16, 2, 3, 0])));
        let config = ConversionConfig::builder()
            .compression(TiffCompression::DeflateBalanced)
            .build();
        let mut output = Vec::new();
        StandardTiffWriter.write_raster(&raster, &mut output, &config).unwrap();

        let (color, dims, data) = read_back(output);
        assert_eq!(color, ColorType::RGBA(16));
        assert_eq!(dims, (4, 4));
        assert_eq!(data, raster.as_raw().to_vec());
    }
}

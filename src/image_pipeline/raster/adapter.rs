use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::native::{ComponentCount, NativeMatrix, NativeVector};

/// Reads `rows` x `cols` pixels of `source` into a native matrix.
///
/// The source colour model is re-sampled to the requested layout:
/// - 3 components: red, green and blue as 16-bit magnitudes, alpha dropped.
/// - 4 components: red, green, blue and alpha as 16-bit magnitudes.
/// - 1 component: BT.601 gray luminance, 16-bit when `precision > 8`, otherwise
///   the high byte of the 16-bit luminance.
///
/// Pixels are read at x = column, y = row and appended row-major.
pub fn raster_to_native(
    source: &DynamicImage,
    precision: u32,
    components: usize,
    rows: usize,
    cols: usize,
) -> Result<NativeMatrix> {
    let count = ComponentCount::try_from(components)?;

    let (width, height) = source.dimensions();
    let (width, height) = (width as usize, height as usize);
    if rows > height || cols > width {
        return Err(ConversionError::InvalidDimensions(cols, rows));
    }
    debug!(
        "Reading {}x{} native pixels from a {}x{} raster ({:?}, precision {})",
        cols, rows, width, height, count, precision
    );

    let mut pixels: Vec<NativeVector> = Vec::with_capacity(rows * cols);
    // Bounds were checked above, so the u32 casts below cannot truncate
    match count {
        ComponentCount::Rgb => {
            let rgb = source.to_rgb16();
            for row in 0..rows as u32 {
                for col in 0..cols as u32 {
                    let [r, g, b] = rgb.get_pixel(col, row).0;
                    pixels.push(vec![r as i32, g as i32, b as i32]);
                }
            }
        }
        ComponentCount::Rgba => {
            let rgba = source.to_rgba16();
            for row in 0..rows as u32 {
                for col in 0..cols as u32 {
                    let [r, g, b, a] = rgba.get_pixel(col, row).0;
                    pixels.push(vec![r as i32, g as i32, b as i32, a as i32]);
                }
            }
        }
        ComponentCount::Gray => {
            let rgba = source.to_rgba16();
            for row in 0..rows as u32 {
                for col in 0..cols as u32 {
                    let [r, g, b, _] = rgba.get_pixel(col, row).0;
                    let y = if precision > 8 {
                        gray16(r, g, b) as i32
                    } else {
                        gray8(r, g, b) as i32
                    };
                    pixels.push(vec![y]);
                }
            }
        }
    }

    NativeMatrix::from_pixels(count.get(), pixels)
}

/// BT.601 luma weights in 16.16 fixed point. They sum to exactly `1 << 16`,
/// so equal channels reduce to themselves.
const LUMA_R: u32 = 19595;
const LUMA_G: u32 = 38470;
const LUMA_B: u32 = 7471;

/// Weighted channel sum with rounding bias; at most `0xFFFF_8000`, so `u32` holds it.
fn luma_sum(r: u16, g: u16, b: u16) -> u32 {
    LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32 + (1 << 15)
}

fn gray16(r: u16, g: u16, b: u16) -> u16 {
    (luma_sum(r, g, b) >> 16) as u16
}

/// 8-bit gray: the high byte of the 16-bit luma, truncated rather than rounded.
fn gray8(r: u16, g: u16, b: u16) -> u8 {
    (luma_sum(r, g, b) >> 24) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb};

    use crate::image_pipeline::raster::Raster;

    #[test]
    fn test_rgb_round_trip_is_exact() {
        let pixels: Vec<NativeVector> = (0..6)
            .map(|i| vec![i * 1000, 65535 - i * 7, i * 3 + 1])
            .collect();
        let matrix = NativeMatrix::from_pixels(3, pixels).unwrap();

        let raster = Raster::from_native(&matrix, 3, 2).unwrap();
        let back = raster_to_native(&raster.into(), 8, 3, 2, 3).unwrap();

        assert_eq!(back, matrix);
    }

    #[test]
    fn test_high_precision_gray_round_trip_is_exact() {
        let pixels: Vec<NativeVector> = vec![vec![0], vec![4095], vec![1234], vec![65535]];
        let matrix = NativeMatrix::from_pixels(1, pixels).unwrap();

        let raster = Raster::from_native(&matrix, 2, 2).unwrap();
        let back = raster_to_native(&raster.into(), 12, 1, 2, 2).unwrap();

        assert_eq!(back, matrix);
    }

    #[test]
    fn test_low_precision_gray_uses_8_bit_reduction() {
        let matrix = NativeMatrix::from_pixels(1, vec![vec![0], vec![257 * 100], vec![65535]]).unwrap();

        let raster = Raster::from_native(&matrix, 3, 1).unwrap();
        let back = raster_to_native(&raster.into(), 8, 1, 1, 3).unwrap();

        assert_eq!(back.pixels(), &[vec![0], vec![100], vec![255]]);
    }

    #[test]
    fn test_low_precision_gray_truncates_instead_of_rounding() {
        let source = DynamicImage::ImageLuma16(ImageBuffer::from_fn(4, 1, |x, _| {
            Luma([[200u16, 383, 0x80FF, 65000][x as usize]])
        }));
        let native = raster_to_native(&source, 8, 1, 1, 4).unwrap();
        assert_eq!(native.pixels(), &[vec![0], vec![1], vec![128], vec![253]]);
    }

    #[test]
    fn test_color_source_uses_bt601_weights() {
        let source = DynamicImage::ImageRgb16(ImageBuffer::from_fn(3, 1, |x, _| {
            let mut channels = [0u16; 3];
            channels[x as usize] = u16::MAX;
            Rgb(channels)
        }));

        let wide = raster_to_native(&source, 16, 1, 1, 3).unwrap();
        assert_eq!(wide.pixels(), &[vec![19595], vec![38469], vec![7471]]);

        let narrow = raster_to_native(&source, 8, 1, 1, 3).unwrap();
        assert_eq!(narrow.pixels(), &[vec![76], vec![150], vec![29]]);
    }

    #[test]
    fn test_eight_bit_source_is_read_as_16_bit_rgb() {
        let source = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(1, 1, Rgb([1u8, 128, 255])));
        let native = raster_to_native(&source, 8, 3, 1, 1).unwrap();
        assert_eq!(native[0], vec![257, 128 * 257, 65535]);
    }

    #[test]
    fn test_reads_follow_row_then_column() {
        // 2 columns, 3 rows; value encodes row * 10 + col
        let source = DynamicImage::ImageLuma16(ImageBuffer::from_fn(2, 3, |x, y| {
            Luma([(y * 10 + x) as u16])
        }));
        let native = raster_to_native(&source, 16, 1, 3, 2).unwrap();
        assert_eq!(
            native.pixels(),
            &[vec![0], vec![1], vec![10], vec![11], vec![20], vec![21]]
        );
    }

    #[test]
    fn test_sub_region_read() {
        let source = DynamicImage::ImageLuma16(ImageBuffer::from_fn(4, 4, |x, y| {
            Luma([(y * 4 + x) as u16])
        }));
        let native = raster_to_native(&source, 16, 1, 2, 2).unwrap();
        assert_eq!(native.pixels(), &[vec![0], vec![1], vec![4], vec![5]]);
    }

    #[test]
    fn test_rgba_read_keeps_alpha() {
        let matrix = NativeMatrix::from_pixels(4, vec![vec![1, 2, 3, 4]]).unwrap();
        let raster = Raster::from_native(&matrix, 1, 1).unwrap();
        let back = raster_to_native(&raster.into(), 16, 4, 1, 1).unwrap();
        assert_eq!(back, matrix);
    }

    #[test]
    fn test_region_larger_than_source_is_rejected() {
        let source = DynamicImage::ImageLuma16(ImageBuffer::new(2, 2));
        let result = raster_to_native(&source, 16, 1, 3, 2);
        assert!(matches!(result, Err(ConversionError::InvalidDimensions(2, 3))));
    }

    #[test]
    fn test_unsupported_component_count() {
        let source = DynamicImage::ImageLuma16(ImageBuffer::new(1, 1));
        let result = raster_to_native(&source, 16, 2, 1, 1);
        assert!(matches!(result, Err(ConversionError::UnsupportedComponentCount(2))));
    }
}

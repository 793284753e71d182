use image::{ImageBuffer, Luma, Rgba};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::native::{ComponentCount, SampleTuple};
use crate::image_pipeline::raster::types::{Gray16Raster, Raster, Rgba16Raster};

/// Writes aggregated tuples into a fresh 16-bit raster.
///
/// Tuples are consumed row by row, columns inner, and each one lands at
/// x = column, y = row. Gray images become a [`Raster::Gray16`]; RGB and RGBA
/// become a [`Raster::Rgba16`], with alpha left at the tuple's zero slot for RGB.
/// Samples are reinterpreted as `u16` without scaling. The stream must hold
/// exactly `width * height` tuples.
pub fn build_raster<I>(
    tuples: I,
    components: ComponentCount,
    width: usize,
    height: usize,
) -> Result<Raster>
where
    I: IntoIterator<Item = SampleTuple>,
{
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(ConversionError::InvalidDimensions(width, height)),
    };
    debug!("Building {:?} raster {}x{}", components, w, h);

    let mut tuples = tuples.into_iter();
    let mut next_tuple = |row: u32, col: u32| {
        tuples.next().ok_or_else(|| {
            ConversionError::InvalidImage(format!(
                "ran out of samples at row {}, column {} of a {}x{} raster",
                row, col, w, h
            ))
        })
    };

    let raster = match components {
        ComponentCount::Gray => {
            let mut buffer: Gray16Raster = ImageBuffer::new(w, h);
            for row in 0..h {
                for col in 0..w {
                    let tuple = next_tuple(row, col)?;
                    buffer.put_pixel(col, row, Luma([tuple.r() as u16]));
                }
            }
            Raster::Gray16(buffer)
        }
        ComponentCount::Rgb | ComponentCount::Rgba => {
            let mut buffer: Rgba16Raster = ImageBuffer::new(w, h);
            for row in 0..h {
                for col in 0..w {
                    let tuple = next_tuple(row, col)?;
                    buffer.put_pixel(
                        col,
                        row,
                        Rgba([
                            tuple.r() as u16,
                            tuple.g() as u16,
                            tuple.b() as u16,
                            tuple.a() as u16,
                        ]),
                    );
                }
            }
            Raster::Rgba16(buffer)
        }
    };

    if tuples.next().is_some() {
        return Err(ConversionError::InvalidImage(format!(
            "more samples than fit a {}x{} raster",
            w, h
        )));
    }

    Ok(raster)
}

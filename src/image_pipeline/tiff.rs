//! TIFF writing module
//!
//! Encodes a 16-bit [`Raster`](crate::image_pipeline::Raster) as TIFF, and holds the
//! pipeline configuration shared by the decode and encode steps.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::RasterWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, ConversionConfig, ConversionConfigBuilder};

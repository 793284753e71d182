//! Raster module
//!
//! 16-bit-per-channel interleaved rasters built from decoded component planes,
//! and the reverse read from any raster back into a native pixel matrix.
//! Rasters are addressed with x = column and y = row throughout.

pub mod types;
mod builder;
mod adapter;

pub use types::{Gray16Raster, PixelFormat, Raster, Rgba16Raster};
pub use builder::build_raster;
pub use adapter::raster_to_native;

//! JPEG 2000 pixel conversion pipeline
//!
//! Bridges a JPEG 2000 decode engine and its two kinds of consumers: native
//! pixel matrices (one integer vector per pixel, raw sample magnitudes) and
//! 16-bit interleaved rasters. Modules are split the same way the data flows:
//! codestream decoding, native regrouping, raster building, TIFF encoding and
//! the orchestrating conversions.

pub mod codestream;
pub mod native;
pub mod raster;
pub mod tiff;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use codestream::{
    CodestreamDecoder,
    ComponentData,
    DecodedImage,
    OpenJpegDecoder,
};

pub use native::{
    ComponentCount,
    ComponentPlane,
    NativeMatrix,
    NativeVector,
    SampleAggregator,
    SampleTuple,
    component_plane,
};

pub use raster::{
    PixelFormat,
    Raster,
    build_raster,
    raster_to_native,
};

pub use self::tiff::{
    TiffCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    RasterWriter,
    StandardTiffWriter,
};

pub use conversions::{
    J2kToNativePipeline,
    NativeImage,
    PipelineTimings,
    decode,
};

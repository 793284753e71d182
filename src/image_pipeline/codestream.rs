//! Codestream decoding module
//!
//! Boundary to the external JPEG 2000 decode engine. Everything past this module
//! works on the in-memory [`DecodedImage`] only.

mod reader;
mod openjpeg_reader;
pub mod types;

pub use reader::CodestreamDecoder;
pub use openjpeg_reader::OpenJpegDecoder;
pub use types::{ComponentData, DecodedImage};

use crate::image_pipeline::codestream::types::DecodedImage;
use crate::image_pipeline::common::error::Result;

/// A decode engine turning a complete codestream into component planes.
///
/// Implementations report an unusable codestream as `ConversionError::DecodeFailure`.
pub trait CodestreamDecoder {
    fn decode_codestream(&self, data: &[u8]) -> Result<DecodedImage>;
}

//! Codestream decoder backed by OpenJPEG through the `jpeg2k` crate.
//!
//! Both raw J2K codestreams and JP2 containers are accepted; the container
//! format is detected from the leading bytes. Each call owns its own decoder
//! state, which is released when the call returns.

use tracing::debug;
use crate::image_pipeline::codestream::reader::CodestreamDecoder;
use crate::image_pipeline::codestream::types::{ComponentData, DecodedImage};
use crate::image_pipeline::common::error::{ConversionError, Result};

/// Decode engine using the OpenJPEG reference implementation.
///
/// Samples are copied out of the decoder's component buffers unchanged: no
/// colour transform, no precision clipping or scaling.
///
/// # Examples
///
/// ```no_run
/// use j2k_native_rs::image_pipeline::{CodestreamDecoder, OpenJpegDecoder};
///
/// let bytes = std::fs::read("image.j2c").unwrap();
/// let image = OpenJpegDecoder.decode_codestream(&bytes).unwrap();
/// println!("{} components", image.num_components());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenJpegDecoder;

impl CodestreamDecoder for OpenJpegDecoder {
    fn decode_codestream(&self, data: &[u8]) -> Result<DecodedImage> {
        debug!("Decoding JPEG 2000 codestream, {} bytes", data.len());

        // The jpeg2k image frees its OpenJPEG buffers on drop, at the end of this scope
        let image = jpeg2k::Image::from_bytes(data)
            .map_err(|e| ConversionError::DecodeFailure(e.to_string()))?;

        let components: Vec<ComponentData> = image
            .components()
            .iter()
            .map(|component| ComponentData {
                width: component.width() as usize,
                height: component.height() as usize,
                precision: component.precision(),
                signed: component.is_signed(),
                samples: component.data().to_vec(),
            })
            .collect();

        if components.is_empty() {
            return Err(ConversionError::DecodeFailure(
                "decoder returned an image without components".to_string(),
            ));
        }

        let decoded = DecodedImage::new(components);
        debug!(
            "Decoded {} component(s), component 0 is {}x{} @ {} bits{}",
            decoded.num_components(),
            decoded.components[0].width,
            decoded.components[0].height,
            decoded.precision(),
            if decoded.is_signed() { " signed" } else { "" }
        );

        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x2 gray, 8-bit unsigned, lossless, single tile with one empty packet.
    const FLAT_GRAY_3X2: &[u8] = &[
        0xFF, 0x4F,
        0xFF, 0x51, 0x00, 0x29, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x02,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x02,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x01, 0x07, 0x01, 0x01,
        0xFF, 0x52, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x04, 0x04, 0x00, 0x01,
        0xFF, 0x5C, 0x00, 0x04, 0x40, 0x40,
        0xFF, 0x90, 0x00, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0F, 0x00, 0x01,
        0xFF, 0x93,
        0x00,
        0xFF, 0xD9,
    ];

    #[test]
    fn test_components_are_copied_out_unchanged() {
        let image = OpenJpegDecoder.decode_codestream(FLAT_GRAY_3X2).unwrap();

        assert_eq!(image.num_components(), 1);
        assert_eq!(image.dimensions(), Some((3, 2)));
        assert_eq!(image.precision(), 8);
        assert!(!image.is_signed());
        // No coded coefficients: every sample sits at the DC level
        assert_eq!(image.components[0].samples, vec![128; 6]);
    }

    #[test]
    fn test_garbage_bytes_are_a_decode_failure() {
        let result = OpenJpegDecoder.decode_codestream(b"definitely not a codestream");
        assert!(matches!(result, Err(ConversionError::DecodeFailure(_))));
    }

    #[test]
    fn test_truncated_codestream_header_is_a_decode_failure() {
        // SOC followed by the start of a SIZ marker and nothing else
        let result = OpenJpegDecoder.decode_codestream(&[0xFF, 0x4F, 0xFF, 0x51, 0x00]);
        assert!(matches!(result, Err(ConversionError::DecodeFailure(_))));
    }
}

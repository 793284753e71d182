//! Decodes the 303x179 8-bit mono reference codestream and compares it with
//! the tail of the matching raw raster file.
//!
//! Fixtures live in `tests/data/`; the test is skipped when they are missing.

use std::path::Path;

use j2k_native_rs::image_pipeline::{CodestreamDecoder, OpenJpegDecoder, decode};

const CODESTREAM: &str = "tests/data/a1_mono.j2c";
const REFERENCE: &str = "tests/data/a1_mono.ppm";

fn fixtures() -> Option<(Vec<u8>, Vec<u8>)> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let input = std::fs::read(root.join(CODESTREAM)).ok()?;
    let reference = std::fs::read(root.join(REFERENCE)).ok()?;
    Some((input, reference))
}

#[test]
fn test_mono_codestream_matches_reference_raster() {
    let Some((input, reference)) = fixtures() else {
        eprintln!("skipping: {} / {} not present", CODESTREAM, REFERENCE);
        return;
    };

    let decoded = OpenJpegDecoder.decode_codestream(&input).unwrap();
    assert_eq!(decoded.num_components(), 1);
    assert_eq!(decoded.precision(), 8);

    let (width, height, matrix) = decode(&input).unwrap();
    assert_eq!((width, height), (303, 179));
    assert_eq!(matrix.len(), 303 * 179);
    assert!(matrix.iter().all(|pixel| pixel.len() == 1));

    let mut bytes = matrix.truncated_bytes();
    bytes.push(b'\n');

    assert!(bytes.len() < reference.len());
    assert_eq!(&reference[reference.len() - bytes.len()..], &bytes[..]);
}

#[test]
fn test_empty_input_is_rejected() {
    assert!(matches!(
        decode(&[]),
        Err(j2k_native_rs::image_pipeline::ConversionError::EmptyInput)
    ));
}

//! Decoded codestream types

/// One decoded component plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentData {
    /// Width of the plane in samples
    pub width: usize,
    /// Height of the plane in samples
    pub height: usize,
    /// Declared bit depth of the samples (e.g. 8, 12 or 16)
    pub precision: u32,
    /// Whether samples are signed
    pub signed: bool,
    /// Row-major samples, `width * height` entries
    pub samples: Vec<i32>,
}

/// Decoded image as produced by a [`CodestreamDecoder`](super::CodestreamDecoder).
///
/// Read-only input to the conversion stages; component 0 defines the
/// canonical raster size.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedImage {
    pub components: Vec<ComponentData>,
}

impl DecodedImage {
    pub fn new(components: Vec<ComponentData>) -> Self {
        Self { components }
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Canonical `(width, height)`, taken from component 0.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.components.first().map(|c| (c.width, c.height))
    }

    /// Bit depth of component 0, or 0 for an empty image.
    pub fn precision(&self) -> u32 {
        self.components.first().map(|c| c.precision).unwrap_or(0)
    }

    /// Whether component 0 carries signed samples; `false` for an empty image.
    pub fn is_signed(&self) -> bool {
        self.components.first().is_some_and(|c| c.signed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(precision: u32, signed: bool) -> ComponentData {
        ComponentData { width: 2, height: 1, precision, signed, samples: vec![0, 0] }
    }

    #[test]
    fn test_sample_format_follows_component_zero() {
        let image = DecodedImage::new(vec![component(12, true), component(8, false)]);
        assert_eq!(image.precision(), 12);
        assert!(image.is_signed());

        let image = DecodedImage::new(vec![component(8, false), component(8, true)]);
        assert!(!image.is_signed());
    }

    #[test]
    fn test_empty_image_has_no_sample_format() {
        let image = DecodedImage::default();
        assert_eq!(image.dimensions(), None);
        assert_eq!(image.precision(), 0);
        assert!(!image.is_signed());
    }
}

//! Native pixel matrix types
//!
//! A [`NativeMatrix`] keeps the decoder's raw sample magnitudes, one
//! [`NativeVector`] per pixel in row-major order. Consumers that need a display
//! range (windowing, bit-depth scaling) apply it themselves.

use std::ops::Index;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::native::aggregate::SampleTuple;

/// Sample values of one pixel, one entry per component.
pub type NativeVector = Vec<i32>;

/// Supported component layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentCount {
    /// Single gray component
    Gray = 1,
    /// Red, green, blue
    Rgb = 3,
    /// Red, green, blue, alpha
    Rgba = 4,
}

impl ComponentCount {
    pub fn get(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for ComponentCount {
    type Error = ConversionError;

    fn try_from(count: usize) -> Result<Self> {
        match count {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(ConversionError::UnsupportedComponentCount(other)),
        }
    }
}

/// Row-major sequence of per-pixel sample vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeMatrix {
    components: ComponentCount,
    pixels: Vec<NativeVector>,
}

impl NativeMatrix {
    /// Builds a matrix from aggregated tuples, keeping the first `components` slots.
    pub fn from_tuples<I>(tuples: I, components: usize) -> Result<Self>
    where
        I: IntoIterator<Item = SampleTuple>,
    {
        let components = ComponentCount::try_from(components)?;
        let pixels = tuples
            .into_iter()
            .map(|tuple| tuple.values(components).to_vec())
            .collect();

        Ok(Self { components, pixels })
    }

    /// Wraps already grouped pixels, checking every vector's length.
    pub fn from_pixels(components: usize, pixels: Vec<NativeVector>) -> Result<Self> {
        let components = ComponentCount::try_from(components)?;
        if let Some((index, pixel)) = pixels
            .iter()
            .enumerate()
            .find(|(_, pixel)| pixel.len() != components.get())
        {
            return Err(ConversionError::InvalidImage(format!(
                "pixel {} has {} samples, expected {}",
                index,
                pixel.len(),
                components.get()
            )));
        }

        Ok(Self { components, pixels })
    }

    pub fn component_count(&self) -> ComponentCount {
        self.components
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[NativeVector] {
        &self.pixels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NativeVector> {
        self.pixels.iter()
    }

    pub fn into_pixels(self) -> Vec<NativeVector> {
        self.pixels
    }

    /// Re-expands each pixel into a zero-filled `(r, g, b, a)` tuple.
    pub fn tuples(&self) -> impl ExactSizeIterator<Item = SampleTuple> + '_ {
        self.pixels.iter().map(|pixel| {
            let mut values = [0i32; 4];
            for (slot, value) in values.iter_mut().zip(pixel) {
                *slot = *value;
            }
            SampleTuple(values)
        })
    }

    /// Splits the matrix back into one row-major plane per component.
    pub fn to_planes(&self) -> Vec<Vec<i32>> {
        let mut planes = vec![Vec::with_capacity(self.pixels.len()); self.components.get()];
        for pixel in &self.pixels {
            for (plane, value) in planes.iter_mut().zip(pixel) {
                plane.push(*value);
            }
        }
        planes
    }

    /// Low byte of every sample, pixel by pixel in row-major order.
    pub fn truncated_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|pixel| pixel.iter().map(|&value| value as u8))
            .collect()
    }
}

impl Index<usize> for NativeMatrix {
    type Output = NativeVector;

    fn index(&self, index: usize) -> &NativeVector {
        &self.pixels[index]
    }
}

impl<'a> IntoIterator for &'a NativeMatrix {
    type Item = &'a NativeVector;
    type IntoIter = std::slice::Iter<'a, NativeVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

impl IntoIterator for NativeMatrix {
    type Item = NativeVector;
    type IntoIter = std::vec::IntoIter<NativeVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.into_iter()
    }
}

//! Lockstep walk over all component planes of a decoded image.

use crate::image_pipeline::codestream::types::DecodedImage;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::native::matrix::ComponentCount;
use crate::image_pipeline::native::planes::component_plane;

/// Samples of one pixel across components as `(r, g, b, a)`.
///
/// Slots past the image's component count are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleTuple(pub [i32; 4]);

impl SampleTuple {
    pub fn r(&self) -> i32 {
        self.0[0]
    }

    pub fn g(&self) -> i32 {
        self.0[1]
    }

    pub fn b(&self) -> i32 {
        self.0[2]
    }

    pub fn a(&self) -> i32 {
        self.0[3]
    }

    /// The populated leading slots for `count` components.
    pub fn values(&self, count: ComponentCount) -> &[i32] {
        &self.0[..count.get()]
    }
}

/// Iterator yielding one [`SampleTuple`] per pixel in row-major order.
///
/// A single scan offset is shared by every plane, so all planes must hold the
/// same number of samples; construction fails with `InvalidImage` otherwise.
#[derive(Debug, Clone)]
pub struct SampleAggregator<'a> {
    planes: Vec<&'a [i32]>,
    components: ComponentCount,
    width: usize,
    height: usize,
    offset: usize,
}

impl<'a> SampleAggregator<'a> {
    pub fn new(image: &'a DecodedImage) -> Result<Self> {
        let (width, height) = image
            .dimensions()
            .ok_or_else(|| ConversionError::InvalidImage("image has no components".to_string()))?;
        let components = ComponentCount::try_from(image.num_components())?;

        let planes = (0..components.get())
            .map(|index| component_plane(image, index).map(|plane| plane.samples))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            planes,
            components,
            width,
            height,
            offset: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn component_count(&self) -> ComponentCount {
        self.components
    }

    fn total(&self) -> usize {
        self.width * self.height
    }
}

impl Iterator for SampleAggregator<'_> {
    type Item = SampleTuple;

    fn next(&mut self) -> Option<SampleTuple> {
        if self.offset >= self.total() {
            return None;
        }

        let mut values = [0i32; 4];
        for (slot, plane) in values.iter_mut().zip(&self.planes) {
            *slot = plane[self.offset];
        }
        self.offset += 1;

        Some(SampleTuple(values))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total() - self.offset;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SampleAggregator<'_> {}

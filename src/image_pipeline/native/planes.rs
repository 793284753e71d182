//! Typed access to the component planes of a decoded image.

use crate::image_pipeline::codestream::types::DecodedImage;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::native::matrix::ComponentCount;

/// Borrowed view of one component's samples on the canonical grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentPlane<'a> {
    pub width: usize,
    pub height: usize,
    pub samples: &'a [i32],
}

impl<'a> ComponentPlane<'a> {
    /// Sample at column `x`, row `y`.
    pub fn sample(&self, x: usize, y: usize) -> Option<i32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples.get(y * self.width + x).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Returns component `index` of `image` sized by component 0's geometry.
///
/// Other components are assumed co-registered with component 0; a plane whose
/// sample count differs from `width * height` is rejected rather than resampled.
pub fn component_plane(image: &DecodedImage, index: usize) -> Result<ComponentPlane<'_>> {
    let (width, height) = image
        .dimensions()
        .ok_or_else(|| ConversionError::InvalidImage("image has no components".to_string()))?;
    ComponentCount::try_from(image.num_components())?;

    let component = image.components.get(index).ok_or_else(|| {
        ConversionError::InvalidImage(format!(
            "component index {} out of range for {} component(s)",
            index,
            image.num_components()
        ))
    })?;

    let expected = width.checked_mul(height).ok_or(ConversionError::InvalidDimensions(width, height))?;
    if component.samples.len() != expected {
        return Err(ConversionError::InvalidImage(format!(
            "component {} holds {} samples, expected {} ({}x{})",
            index,
            component.samples.len(),
            expected,
            width,
            height
        )));
    }

    Ok(ComponentPlane {
        width,
        height,
        samples: &component.samples,
    })
}

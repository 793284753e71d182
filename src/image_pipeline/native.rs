//! Native pixel matrix module
//!
//! Reads the planar component buffers of a [`DecodedImage`](crate::image_pipeline::DecodedImage)
//! in lockstep and regroups them into one integer vector per pixel.

pub mod planes;
pub mod aggregate;
pub mod matrix;

pub use planes::{ComponentPlane, component_plane};
pub use aggregate::{SampleAggregator, SampleTuple};
pub use matrix::{ComponentCount, NativeMatrix, NativeVector};

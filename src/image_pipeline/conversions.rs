//! Pipeline conversions module
//!
//! Orchestrates codestream decoding and the conversion stages behind a single
//! entry point.

mod j2k_to_native;
mod timing;


pub use j2k_to_native::{J2kToNativePipeline, NativeImage, decode};
pub use timing::{PipelineTimings, StepTiming, Timer};

//! Shared pipeline types
//!
//! Error kinds surfaced by every decode and conversion stage.

pub mod error;

pub use error::{ConversionError, Result};

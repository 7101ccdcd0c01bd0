//! Utils Module - Helper Functions & Shared Utilities
//!
//! Constants, selector decoding, lenient field coercion and telemetry shared
//! by the core and the outer surfaces.

pub mod constants;
pub mod decoder;
pub mod lenient;
pub mod telemetry;

pub use constants::*;
pub use decoder::*;
pub use telemetry::*;

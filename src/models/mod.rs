//! Models Module - Data Structures & Configuration
//!
//! Input records (signals, explorer and legacy transactions), output types
//! (verdicts, descriptors), errors and service configuration.

pub mod config;
pub mod errors;
pub mod explorer;
pub mod record;
pub mod signal;
pub mod types;

pub use config::*;
pub use errors::*;
pub use explorer::*;
pub use record::*;
pub use signal::*;
pub use types::*;

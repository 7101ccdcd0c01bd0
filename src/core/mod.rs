//! Core Module - Scoring & Categorization Engine
//!
//! Pure functions only: no I/O, no shared state. Outer surfaces (CLI, API)
//! feed records in and consume verdicts, descriptors and personas.

pub mod assessment;
pub mod categorizer;
pub mod legacy;
pub mod persona;
pub mod scorer;
pub mod system;

pub use assessment::{assess, Assessment, AssessmentInput};
pub use categorizer::{categorize, classify, CategoryRule, RULES};
pub use legacy::{categorize_from_verdict, categorize_legacy, categorize_record};
pub use persona::{Persona, Species};
pub use scorer::{allowlist_easing, label_for, score, VerdictBuilder};
pub use system::{detect_system, is_system_transaction, SystemSignature};

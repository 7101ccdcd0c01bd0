//! txrisk Library
//!
//! Deterministic, rule-based risk engine for EVM transactions:
//! - Heuristic scorer: additive rule groups over a normalized signal,
//!   discounted by allowlists and thresholded into GOOD/BAD
//! - Categorizer: ordered first-match rules over explorer records
//! - System detector: protocol infrastructure traffic on OP-stack chains
//! - Personas: display tier and ledger decision per transaction

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::{
    assess, categorize, categorize_legacy, categorize_record, detect_system,
    is_system_transaction, score, Assessment, AssessmentInput, Persona, Species,
    SystemSignature,
};
pub use models::{
    AppError, AppResult, Category, CategoryDescriptor, ErrorCode, ExplorerTransaction, Label,
    LegacyTransaction, RiskLevel, RiskVerdict, RuleGroup, ServiceConfig, TransactionRecord,
    TransactionSignal,
};
pub use utils::telemetry::{TelemetryCollector, TelemetryStats};

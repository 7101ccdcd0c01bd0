//! Categorization of legacy synthetic records
//!
//! Such records carry a free-form `category` tag, a scorer signal, or both.
//! The tag wins; otherwise the descriptor is derived from the scorer verdict.

use tracing::debug;

use crate::core::categorizer::categorize;
use crate::core::scorer::{score, REASON_BLOCKLISTED};
use crate::models::record::{LegacyTransaction, TransactionRecord};
use crate::models::types::{Category, CategoryDescriptor, RiskLevel, RiskVerdict, RuleGroup};

/// Descriptor implied by a scorer verdict
pub fn categorize_from_verdict(verdict: &RiskVerdict) -> CategoryDescriptor {
    let category = if verdict.has_reason(REASON_BLOCKLISTED) {
        Category::MaliciousActivity
    } else if verdict.has_reason("Infinite approval") {
        Category::InfiniteApproval
    } else if verdict.fired(RuleGroup::MevSandwich) {
        Category::MevActivity
    } else if verdict.fired(RuleGroup::ExtremeSlippage) {
        Category::DefiTrading
    } else if verdict.fired(RuleGroup::SuspiciousApproval) {
        Category::TokenApproval
    } else if verdict.fired(RuleGroup::ScamTransfer) {
        Category::TokenTransfer
    } else {
        Category::Standard
    };

    let descriptor = CategoryDescriptor::from(category);
    if verdict.is_bad() {
        descriptor.escalate_to(RiskLevel::High)
    } else {
        descriptor
    }
}

/// Descriptor of a legacy record
pub fn categorize_legacy(tx: &LegacyTransaction) -> CategoryDescriptor {
    if let Some(tag) = tx.category.as_deref() {
        let category = Category::from_tag(tag).unwrap_or_else(|| {
            debug!(tag, "unknown legacy category tag");
            Category::Standard
        });
        return CategoryDescriptor::from(category);
    }

    match tx.signal.as_ref() {
        Some(signal) => categorize_from_verdict(&score(signal)),
        None => CategoryDescriptor::from(Category::Standard),
    }
}

/// Descriptor of either record format
pub fn categorize_record(record: &TransactionRecord) -> CategoryDescriptor {
    match record {
        TransactionRecord::Explorer(tx) => categorize(tx),
        TransactionRecord::Legacy(tx) => categorize_legacy(tx),
    }
}

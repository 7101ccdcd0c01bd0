//! Full assessment of one transaction: verdict, descriptor, persona

use serde::{Deserialize, Serialize};

use crate::core::categorizer::categorize;
use crate::core::legacy::{categorize_from_verdict, categorize_legacy};
use crate::core::persona::Persona;
use crate::core::scorer::score;
use crate::models::record::TransactionRecord;
use crate::models::signal::TransactionSignal;
use crate::models::types::{Category, CategoryDescriptor, RiskVerdict};
use crate::utils::lenient;

/// What an acquisition collaborator hands over
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentInput {
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub signal: Option<TransactionSignal>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionRecord>,
}

impl AssessmentInput {
    /// Explicit signal first, then one attached to a legacy record
    pub fn effective_signal(&self) -> Option<&TransactionSignal> {
        self.signal.as_ref().or_else(|| match &self.transaction {
            Some(TransactionRecord::Legacy(tx)) => tx.signal.as_ref(),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<RiskVerdict>,
    pub descriptor: CategoryDescriptor,
    pub persona: Persona,
    #[serde(rename = "shouldRecord")]
    pub should_record: bool,
}

/// Score, categorize and pick a persona
pub fn assess(input: &AssessmentInput) -> Assessment {
    let verdict = input.effective_signal().map(score);

    let descriptor = match (&input.transaction, &verdict) {
        (Some(TransactionRecord::Explorer(tx)), _) => categorize(tx),
        (Some(TransactionRecord::Legacy(tx)), Some(v)) if tx.category.is_none() => {
            categorize_from_verdict(v)
        }
        (Some(TransactionRecord::Legacy(tx)), _) => categorize_legacy(tx),
        (None, Some(v)) => categorize_from_verdict(v),
        (None, None) => CategoryDescriptor::from(Category::Standard),
    };

    let persona = Persona::select(verdict.as_ref(), &descriptor);
    Assessment {
        hash: input
            .transaction
            .as_ref()
            .and_then(|t| t.hash())
            .map(str::to_string),
        should_record: persona.should_record,
        verdict,
        descriptor,
        persona,
    }
}

//! Transaction records accepted by the categorizer
//!
//! Synthetic fixtures predate the explorer format and carry only a
//! `category` tag and/or a scorer signal. Both shapes share one wire entry
//! point, [`TransactionRecord`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::explorer::ExplorerTransaction;
use super::signal::TransactionSignal;
use crate::utils::lenient;

/// Keys that only explorer-format records carry
const EXPLORER_KEYS: [&str; 10] = [
    "from",
    "to",
    "success",
    "status",
    "type",
    "gas_price",
    "decoded_input",
    "raw_input",
    "token_transfers",
    "created_contract",
];

/// Legacy synthetic record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyTransaction {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub signal: Option<TransactionSignal>,
}

/// Either record format
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransactionRecord {
    Explorer(ExplorerTransaction),
    Legacy(LegacyTransaction),
}

impl TransactionRecord {
    pub fn hash(&self) -> Option<&str> {
        match self {
            TransactionRecord::Explorer(tx) => tx.hash.as_deref(),
            TransactionRecord::Legacy(tx) => tx.hash.as_deref(),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, TransactionRecord::Legacy(_))
    }

    /// Classify a raw JSON object by its keys
    pub fn from_value(value: Value) -> Self {
        let looks_legacy = match &value {
            Value::Object(map) => {
                (map.contains_key("category") || map.contains_key("signal"))
                    && !EXPLORER_KEYS.iter().any(|k| map.contains_key(*k))
            }
            _ => false,
        };

        if looks_legacy {
            TransactionRecord::Legacy(serde_json::from_value(value).unwrap_or_default())
        } else {
            TransactionRecord::Explorer(serde_json::from_value(value).unwrap_or_default())
        }
    }
}

impl From<ExplorerTransaction> for TransactionRecord {
    fn from(tx: ExplorerTransaction) -> Self {
        TransactionRecord::Explorer(tx)
    }
}

impl From<LegacyTransaction> for TransactionRecord {
    fn from(tx: LegacyTransaction) -> Self {
        TransactionRecord::Legacy(tx)
    }
}

impl<'de> Deserialize<'de> for TransactionRecord {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(Value::deserialize(d)?))
    }
}

//! Explorer-format transaction record (Blockscout-style JSON)

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::decoder::SelectorDecoder;
use crate::utils::lenient;

/// One side of a transaction as reported by the explorer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressInfo {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_contract: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_verified: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_scam: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodedParameter {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "type",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub param_type: Option<String>,
    pub value: Value,
}

impl DecodedParameter {
    /// Scalar parameter value as text; arrays and objects yield `None`
    pub fn value_text(&self) -> Option<String> {
        lenient::coerce_string(&self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodedInput {
    /// e.g. `approve(address spender, uint256 amount)`
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub method_call: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub method_id: Option<String>,
    #[serde(deserialize_with = "lenient::records")]
    pub parameters: Vec<DecodedParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenRef {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// "ERC-20", "ERC-721", "ERC-1155"
    #[serde(
        rename = "type",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenTransfer {
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenRef>,
    #[serde(
        rename = "type",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub transfer_type: Option<String>,
}

/// Input record of the categorizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerTransaction {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub from: Option<AddressInfo>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub to: Option<AddressInfo>,
    #[serde(deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Explorer status string ("ok" / "error"), consulted when `success` is absent
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Numeric type codes are normalized to their decimal string
    #[serde(
        rename = "type",
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tx_type: Option<String>,
    #[serde(deserialize_with = "lenient::opt_u256", skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<U256>,
    #[serde(deserialize_with = "lenient::opt_u256", skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(deserialize_with = "lenient::opt_u256", skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub decoded_input: Option<DecodedInput>,
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<String>,
    #[serde(deserialize_with = "lenient::records", skip_serializing_if = "Vec::is_empty")]
    pub token_transfers: Vec<TokenTransfer>,
    #[serde(deserialize_with = "lenient::presence", skip_serializing_if = "Option::is_none")]
    pub created_contract: Option<Value>,
}

impl ExplorerTransaction {
    pub fn is_scam(&self) -> bool {
        self.from.as_ref().is_some_and(|a| a.is_scam) || self.to.as_ref().is_some_and(|a| a.is_scam)
    }

    /// Missing outcome reads as success unless the status string says otherwise
    pub fn succeeded(&self) -> bool {
        match self.success {
            Some(success) => success,
            None => !self
                .status
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case("error") || s.eq_ignore_ascii_case("failed")),
        }
    }

    pub fn tx_type_is(&self, code: &str) -> bool {
        self.tx_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(code))
    }

    pub fn from_hash(&self) -> Option<&str> {
        self.from.as_ref().and_then(|a| a.hash.as_deref())
    }

    pub fn to_hash(&self) -> Option<&str> {
        self.to.as_ref().and_then(|a| a.hash.as_deref())
    }

    pub fn to_is_contract(&self) -> bool {
        self.to.as_ref().is_some_and(|a| a.is_contract)
    }

    /// Lowercased counterparty names (both sides)
    pub fn party_names(&self) -> Vec<String> {
        [self.from.as_ref(), self.to.as_ref()]
            .into_iter()
            .flatten()
            .filter_map(|a| a.name.as_deref())
            .map(str::to_lowercase)
            .collect()
    }

    /// Lowercased counterparty names plus token names and symbols of transfers
    pub fn asset_labels(&self) -> Vec<String> {
        let mut labels = self.party_names();
        for token in self.token_transfers.iter().filter_map(|t| t.token.as_ref()) {
            labels.extend(token.name.as_deref().map(str::to_lowercase));
            labels.extend(token.symbol.as_deref().map(str::to_lowercase));
        }
        labels
    }

    /// Decoded method name, e.g. `approve` from `approve(address,uint256)`
    pub fn method_name(&self) -> Option<&str> {
        self.decoded_input
            .as_ref()
            .and_then(|d| d.method_call.as_deref())
            .and_then(|call| call.split('(').next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn method_name_lower(&self) -> Option<String> {
        self.method_name().map(str::to_lowercase)
    }

    /// Selector from the decoded method id, falling back to raw calldata
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.decoded_input
            .as_ref()
            .and_then(|d| d.method_id.as_deref())
            .and_then(SelectorDecoder::parse_selector)
            .or_else(|| self.raw_input.as_deref().and_then(SelectorDecoder::selector_of))
    }

    pub fn decoded_parameters(&self) -> &[DecodedParameter] {
        self.decoded_input
            .as_ref()
            .map(|d| d.parameters.as_slice())
            .unwrap_or(&[])
    }

    /// Calldata present in either decoded or raw form
    pub fn has_input(&self) -> bool {
        if self.decoded_input.is_some() {
            return true;
        }
        self.raw_input
            .as_deref()
            .map(str::trim)
            .is_some_and(|raw| !raw.is_empty() && raw != "0x" && raw != "0X")
    }

    pub fn creates_contract(&self) -> bool {
        self.created_contract.is_some()
    }

    /// Missing value reads as zero
    pub fn value_wei(&self) -> U256 {
        self.value.unwrap_or_default()
    }
}

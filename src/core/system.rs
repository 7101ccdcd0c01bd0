//! System-transaction detector
//!
//! Recognizes protocol infrastructure traffic on OP-stack chains: calls into
//! reserved predeploys, L1 attributes deposits, oracle transmissions.

use std::collections::HashSet;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use lazy_static::lazy_static;

use crate::models::explorer::ExplorerTransaction;
use crate::models::types::Category;
use crate::utils::constants::{
    ORACLE_METHODS, SYSTEM_CONFIG_METHODS, SYSTEM_PREDEPLOY_ADDRESSES, SYSTEM_SENDER_ADDRESS,
    SYSTEM_TX_TYPE,
};

lazy_static! {
    static ref PREDEPLOYS: HashSet<Address> = SYSTEM_PREDEPLOY_ADDRESSES
        .iter()
        .filter_map(|a| Address::from_str(a).ok())
        .collect();
    static ref SYSTEM_SENDER: Option<Address> = Address::from_str(SYSTEM_SENDER_ADDRESS).ok();
}

/// Which system signature matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemSignature {
    /// Recipient is a reserved protocol predeploy
    ProtocolPredeploy,
    /// Sender is the protocol depositor account
    SystemSender,
    /// Method is a system configuration call
    ConfigMethod,
    /// Method is an oracle report transmission
    OracleTransmission,
    /// Zero-gas-price deposit transaction
    DepositTransaction,
}

impl SystemSignature {
    pub fn category(&self) -> Category {
        match self {
            SystemSignature::ProtocolPredeploy => Category::NetworkInfrastructure,
            SystemSignature::OracleTransmission => Category::OracleNetwork,
            SystemSignature::SystemSender
            | SystemSignature::ConfigMethod
            | SystemSignature::DepositTransaction => Category::SystemMaintenance,
        }
    }
}

/// Case-insensitive exact match; unparseable hashes never match
fn parse_address(raw: Option<&str>) -> Option<Address> {
    raw.and_then(|h| Address::from_str(h.trim()).ok())
}

/// First matching system signature, if any
pub fn detect_system(tx: &ExplorerTransaction) -> Option<SystemSignature> {
    if parse_address(tx.to_hash()).is_some_and(|to| PREDEPLOYS.contains(&to)) {
        return Some(SystemSignature::ProtocolPredeploy);
    }

    if let (Some(from), Some(sender)) = (parse_address(tx.from_hash()), *SYSTEM_SENDER) {
        if from == sender {
            return Some(SystemSignature::SystemSender);
        }
    }

    if let Some(method) = tx.method_name_lower() {
        if SYSTEM_CONFIG_METHODS.iter().any(|m| method.starts_with(m)) {
            return Some(SystemSignature::ConfigMethod);
        }
        if ORACLE_METHODS.iter().any(|m| method.contains(m)) {
            return Some(SystemSignature::OracleTransmission);
        }
    }

    if tx.tx_type_is(SYSTEM_TX_TYPE) && tx.gas_price == Some(U256::ZERO) {
        return Some(SystemSignature::DepositTransaction);
    }

    None
}

pub fn is_system_transaction(tx: &ExplorerTransaction) -> bool {
    detect_system(tx).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tx(value: serde_json::Value) -> ExplorerTransaction {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_predeploy_any_case() {
        let t = tx(json!({"to": {"hash": "0x420000000000000000000000000000000000000f"}}));
        assert_eq!(detect_system(&t), Some(SystemSignature::ProtocolPredeploy));
        assert_eq!(
            SystemSignature::ProtocolPredeploy.category(),
            Category::NetworkInfrastructure
        );
    }

    #[test]
    fn test_system_sender() {
        let t = tx(json!({"from": {"hash": "0xdeaddeaddeaddeaddeaddeaddeaddeaddead0001"}}));
        assert_eq!(detect_system(&t), Some(SystemSignature::SystemSender));
    }

    #[test]
    fn test_method_signatures() {
        let config = tx(json!({"decoded_input": {"method_call": "setL1BlockValuesEcotone()"}}));
        assert_eq!(detect_system(&config), Some(SystemSignature::ConfigMethod));

        let oracle = tx(json!({"decoded_input": {"method_call": "transmit(bytes,bytes32[],bytes32[],bytes32)"}}));
        assert_eq!(detect_system(&oracle), Some(SystemSignature::OracleTransmission));
        assert_eq!(
            SystemSignature::OracleTransmission.category(),
            Category::OracleNetwork
        );
    }

    #[test]
    fn test_deposit_needs_zero_gas_price() {
        let deposit = tx(json!({"type": 126, "gas_price": "0"}));
        assert_eq!(detect_system(&deposit), Some(SystemSignature::DepositTransaction));

        let priced = tx(json!({"type": 126, "gas_price": "1"}));
        assert!(!is_system_transaction(&priced));

        let unknown_price = tx(json!({"type": "126"}));
        assert!(!is_system_transaction(&unknown_price));
    }

    #[test]
    fn test_ordinary_transfer_is_not_system() {
        let t = tx(json!({
            "from": {"hash": "0x1111111111111111111111111111111111111111"},
            "to": {"hash": "not-an-address"},
            "type": 2
        }));
        assert_eq!(detect_system(&t), None);
    }
}

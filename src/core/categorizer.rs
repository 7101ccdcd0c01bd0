//! Transaction categorizer
//!
//! Maps an explorer record onto exactly one [`CategoryDescriptor`] by walking
//! an ordered rule table. The first rule whose predicate holds decides the
//! category; a record that matches nothing is a standard transaction.

use tracing::debug;

use crate::core::system;
use crate::models::explorer::ExplorerTransaction;
use crate::models::types::{Category, CategoryDescriptor};
use crate::utils::constants::{
    gwei_to_wei, whole_eth_to_wei, BRIDGE_NAMES, DEX_NAMES, HIGH_VALUE_ETH, INFINITE_HEX_RUN,
    INTERNAL_CALL_TYPES, LENDING_METHODS, LENDING_NAMES, LOW_GAS_PRICE_GWEI, MAX_UINT256_DECIMAL,
    MEV_GAS_PRICE_GWEI, MULTISIG_METHODS, MULTISIG_NAMES, NFT_NAMES, NFT_TOKEN_TYPES,
    PROXY_KEYWORDS, STABLECOIN_NAMES, WRAPPED_NATIVE_NAMES, YIELD_KEYWORDS,
};
use crate::utils::decoder::SelectorDecoder;

/// One entry of the ordered rule table
pub struct CategoryRule {
    pub name: &'static str,
    pub matches: fn(&ExplorerTransaction) -> bool,
    pub build: fn(&ExplorerTransaction) -> Category,
}

/// Evaluated top to bottom; order is significant
pub static RULES: [CategoryRule; 20] = [
    CategoryRule { name: "scam", matches: is_scam, build: |_| Category::MaliciousActivity },
    CategoryRule { name: "failed", matches: is_failed, build: |_| Category::FailedTransaction },
    CategoryRule { name: "proxy", matches: is_proxy, build: |_| Category::ProxyOperation },
    CategoryRule { name: "system", matches: system::is_system_transaction, build: system_category },
    CategoryRule { name: "dex", matches: is_dex, build: |_| Category::DefiTrading },
    CategoryRule { name: "approval", matches: is_approval, build: approval_category },
    CategoryRule { name: "bridge", matches: is_bridge, build: |_| Category::CrossChainBridge },
    CategoryRule { name: "deployment", matches: is_deployment, build: |_| Category::ContractDeployment },
    CategoryRule { name: "lending", matches: is_lending, build: |_| Category::DefiLending },
    CategoryRule { name: "yield", matches: is_yield, build: |_| Category::YieldFarming },
    CategoryRule { name: "stablecoin", matches: is_stablecoin, build: |_| Category::Stablecoin },
    CategoryRule { name: "wrapping", matches: is_wrapping, build: |_| Category::TokenWrapping },
    CategoryRule { name: "mev", matches: is_mev, build: |_| Category::MevActivity },
    CategoryRule { name: "nft", matches: is_nft, build: |_| Category::NftTrading },
    CategoryRule { name: "multisig", matches: is_multisig, build: |_| Category::MultiSignature },
    CategoryRule { name: "high_value", matches: is_high_value, build: |_| Category::HighValue },
    CategoryRule { name: "low_gas", matches: is_low_gas, build: |_| Category::GasOptimization },
    CategoryRule { name: "internal", matches: is_internal, build: |_| Category::InternalTransaction },
    CategoryRule { name: "token_transfer", matches: is_token_transfer, build: transfer_category },
    CategoryRule { name: "contract", matches: is_contract_call, build: |_| Category::ContractInteraction },
];

/// Category of an explorer record
pub fn classify(tx: &ExplorerTransaction) -> Category {
    for rule in RULES.iter() {
        if (rule.matches)(tx) {
            let category = (rule.build)(tx);
            debug!(rule = rule.name, category = category.tag(), "rule matched");
            return category;
        }
    }
    Category::Standard
}

/// Descriptor of an explorer record; never fails
pub fn categorize(tx: &ExplorerTransaction) -> CategoryDescriptor {
    CategoryDescriptor::from(classify(tx))
}

// ============================================
// Helpers
// ============================================

/// Any label contains any keyword (labels are already lowercase)
fn mentions(labels: &[String], keywords: &[&str]) -> bool {
    labels.iter().any(|l| keywords.iter().any(|k| l.contains(k)))
}

fn method_mentions(tx: &ExplorerTransaction, keywords: &[&str]) -> bool {
    tx.method_name_lower()
        .is_some_and(|m| keywords.iter().any(|k| m.contains(k)))
}

fn selector_is(tx: &ExplorerTransaction, check: fn([u8; 4]) -> bool) -> bool {
    tx.selector().is_some_and(check)
}

/// Longest run of consecutive `f`/`F` characters
fn longest_f_run(text: &str) -> usize {
    let mut best = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == 'f' || c == 'F' {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

/// Unlimited allowance visible in decoded parameters or raw calldata
pub fn has_unlimited_amount(tx: &ExplorerTransaction) -> bool {
    let params = tx.decoded_parameters();
    if !params.is_empty() {
        return params.iter().any(|p| {
            p.value_text().is_some_and(|v| {
                let v = v.trim();
                v == MAX_UINT256_DECIMAL || longest_f_run(v) >= INFINITE_HEX_RUN
            })
        });
    }
    tx.raw_input
        .as_deref()
        .and_then(SelectorDecoder::decode_approval_hex)
        .is_some_and(|params| params.is_unlimited())
}

// ============================================
// Predicates
// ============================================

fn is_scam(tx: &ExplorerTransaction) -> bool {
    tx.is_scam()
}

fn is_failed(tx: &ExplorerTransaction) -> bool {
    !tx.succeeded()
}

fn is_proxy(tx: &ExplorerTransaction) -> bool {
    tx.tx_type_is("delegatecall") || mentions(&tx.party_names(), &PROXY_KEYWORDS)
}

fn is_dex(tx: &ExplorerTransaction) -> bool {
    mentions(&tx.party_names(), &DEX_NAMES)
}

fn is_approval(tx: &ExplorerTransaction) -> bool {
    selector_is(tx, SelectorDecoder::is_approve) || method_mentions(tx, &["approve"])
}

fn is_bridge(tx: &ExplorerTransaction) -> bool {
    mentions(&tx.party_names(), &BRIDGE_NAMES)
}

fn is_deployment(tx: &ExplorerTransaction) -> bool {
    tx.creates_contract()
}

fn is_lending(tx: &ExplorerTransaction) -> bool {
    mentions(&tx.party_names(), &LENDING_NAMES) || method_mentions(tx, &LENDING_METHODS)
}

fn is_yield(tx: &ExplorerTransaction) -> bool {
    mentions(&tx.party_names(), &YIELD_KEYWORDS) || method_mentions(tx, &YIELD_KEYWORDS)
}

fn is_stablecoin(tx: &ExplorerTransaction) -> bool {
    mentions(&tx.asset_labels(), &STABLECOIN_NAMES)
}

fn is_wrapping(tx: &ExplorerTransaction) -> bool {
    mentions(&tx.asset_labels(), &WRAPPED_NATIVE_NAMES)
}

fn is_mev(tx: &ExplorerTransaction) -> bool {
    tx.value_wei().is_zero()
        && tx
            .gas_price
            .is_some_and(|price| price > gwei_to_wei(MEV_GAS_PRICE_GWEI))
}

fn is_nft(tx: &ExplorerTransaction) -> bool {
    mentions(&tx.party_names(), &NFT_NAMES)
        || selector_is(tx, SelectorDecoder::is_nft_transfer)
        || tx.token_transfers.iter().any(|t| {
            t.token
                .as_ref()
                .and_then(|token| token.token_type.as_deref())
                .is_some_and(|kind| NFT_TOKEN_TYPES.contains(&kind.to_lowercase().as_str()))
        })
}

fn is_multisig(tx: &ExplorerTransaction) -> bool {
    mentions(&tx.party_names(), &MULTISIG_NAMES)
        || selector_is(tx, SelectorDecoder::is_multisig_exec)
        || method_mentions(tx, &MULTISIG_METHODS)
}

fn is_high_value(tx: &ExplorerTransaction) -> bool {
    tx.value_wei() > whole_eth_to_wei(HIGH_VALUE_ETH)
}

fn is_low_gas(tx: &ExplorerTransaction) -> bool {
    tx.gas_price
        .is_some_and(|price| price < gwei_to_wei(LOW_GAS_PRICE_GWEI))
}

fn is_internal(tx: &ExplorerTransaction) -> bool {
    INTERNAL_CALL_TYPES.iter().any(|t| tx.tx_type_is(t)) && !tx.has_input()
}

fn is_token_transfer(tx: &ExplorerTransaction) -> bool {
    selector_is(tx, SelectorDecoder::is_erc20_transfer) || !tx.token_transfers.is_empty()
}

fn is_contract_call(tx: &ExplorerTransaction) -> bool {
    tx.to_is_contract() && tx.decoded_input.is_none()
}

// ============================================
// Builders
// ============================================

fn system_category(tx: &ExplorerTransaction) -> Category {
    system::detect_system(tx)
        .map(|signature| signature.category())
        .unwrap_or(Category::SystemMaintenance)
}

fn approval_category(tx: &ExplorerTransaction) -> Category {
    if has_unlimited_amount(tx) {
        Category::InfiniteApproval
    } else {
        Category::TokenApproval
    }
}

fn transfer_category(tx: &ExplorerTransaction) -> Category {
    if tx.token_transfers.len() > 1 {
        Category::BatchTransfer
    } else {
        Category::TokenTransfer
    }
}

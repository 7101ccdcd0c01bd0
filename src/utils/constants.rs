//! Constants Module - Single Source of Truth
//!
//! Every fixed address, keyword table, unit conversion and service default
//! used by the scorer, the categorizer and the outer surfaces lives here.

use alloy_primitives::U256;

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "txrisk";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// SERVICE DEFAULTS
// ============================================

/// Default bind host for the API server
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Maximum items accepted by one batch request
pub const DEFAULT_MAX_BATCH: usize = 100;

/// Requests per client per rate-limit window
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 100;

/// Directory for telemetry exports
pub const DEFAULT_TELEMETRY_DIR: &str = "./telemetry";

// ============================================
// ABI / UINT256
// ============================================

/// 2^256 - 1 in decimal, the canonical "infinite" ERC-20 allowance
pub const MAX_UINT256_DECIMAL: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

/// Minimum run of consecutive hex `f` digits treated as an unlimited amount
pub const INFINITE_HEX_RUN: usize = 60;

// ============================================
// SYSTEM / INFRASTRUCTURE SIGNATURES (OP-stack)
// ============================================

/// Reserved protocol predeploys that only receive infrastructure traffic
pub const SYSTEM_PREDEPLOY_ADDRESSES: [&str; 4] = [
    "0x4200000000000000000000000000000000000015", // L1Block
    "0x420000000000000000000000000000000000000F", // GasPriceOracle
    "0x4200000000000000000000000000000000000016", // L2ToL1MessagePasser
    "0x4200000000000000000000000000000000000007", // L2CrossDomainMessenger
];

/// Depositor account that signs L1 attributes deposits
pub const SYSTEM_SENDER_ADDRESS: &str = "0xDeaDDEaDDeAdDeAdDEAdDEaddeAddEAdDEAd0001";

/// Method name prefixes used by system configuration calls
pub const SYSTEM_CONFIG_METHODS: [&str; 1] = ["setl1blockvalues"];

/// Method name fragments used by oracle report transmissions
pub const ORACLE_METHODS: [&str; 1] = ["transmit"];

/// Transaction type code reserved for deposit (system) transactions, 0x7e
pub const SYSTEM_TX_TYPE: &str = "126";

// ============================================
// CATEGORIZER KEYWORD TABLES (lowercase)
// ============================================

pub const PROXY_KEYWORDS: [&str; 1] = ["proxy"];

pub const DEX_NAMES: [&str; 10] = [
    "uniswap",
    "sushiswap",
    "pancakeswap",
    "1inch",
    "curve",
    "balancer",
    "0x exchange",
    "velodrome",
    "aerodrome",
    "router",
];

pub const BRIDGE_NAMES: [&str; 6] = [
    "bridge",
    "stargate",
    "wormhole",
    "layerzero",
    "across",
    "hop protocol",
];

pub const LENDING_NAMES: [&str; 2] = ["aave", "compound"];

pub const LENDING_METHODS: [&str; 4] = ["borrow", "lend", "repay", "supply"];

/// "unstake" is covered by "stake"
pub const YIELD_KEYWORDS: [&str; 4] = ["stake", "liquidity", "pool", "farm"];

pub const STABLECOIN_NAMES: [&str; 4] = ["usdc", "usdt", "tether", "usd coin"];

pub const WRAPPED_NATIVE_NAMES: [&str; 2] = ["weth", "wrapped ether"];

pub const NFT_NAMES: [&str; 6] = ["opensea", "seaport", "blur", "nft", "erc721", "erc-721"];

/// Token standards reported by explorers for non-fungible transfers
pub const NFT_TOKEN_TYPES: [&str; 2] = ["erc-721", "erc-1155"];

pub const MULTISIG_NAMES: [&str; 3] = ["multisig", "multi-sig", "gnosis"];

pub const MULTISIG_METHODS: [&str; 3] = [
    "exectransaction",
    "confirmtransaction",
    "submittransaction",
];

/// Explorer `type` values of internal (trace-level) calls
pub const INTERNAL_CALL_TYPES: [&str; 3] = ["call", "staticcall", "internal"];

// ============================================
// GAS / VALUE THRESHOLDS
// ============================================

/// Zero-value transactions above this gas price look like MEV bidding
pub const MEV_GAS_PRICE_GWEI: u64 = 100;

/// Transactions below this gas price are gas-optimized
pub const LOW_GAS_PRICE_GWEI: u64 = 10;

/// Transactions above this value are whale-sized
pub const HIGH_VALUE_ETH: u64 = 10;

// ============================================
// CONVERSION UTILITIES - Single Source of Truth
// ============================================

const WEI_PER_GWEI: u64 = 1_000_000_000;
const WEI_PER_ETH: u64 = 1_000_000_000_000_000_000;

/// Convert whole gwei to wei
#[inline]
pub fn gwei_to_wei(gwei: u64) -> U256 {
    U256::from(gwei) * U256::from(WEI_PER_GWEI)
}

/// Convert whole ETH to wei
#[inline]
pub fn whole_eth_to_wei(eth: u64) -> U256 {
    U256::from(eth) * U256::from(WEI_PER_ETH)
}

/// Convert wei to ETH (or native token)
#[inline]
pub fn wei_to_eth(wei: U256) -> f64 {
    let wei_u128: u128 = wei.try_into().unwrap_or(u128::MAX);
    wei_u128 as f64 / 1e18
}

/// Convert wei to gwei
#[inline]
pub fn wei_to_gwei(wei: U256) -> f64 {
    let wei_u128: u128 = wei.try_into().unwrap_or(u128::MAX);
    wei_u128 as f64 / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wei_to_eth() {
        let one_eth = U256::from(1_000_000_000_000_000_000u128);
        assert!((wei_to_eth(one_eth) - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_unit_helpers() {
        assert_eq!(gwei_to_wei(100), U256::from(100_000_000_000u64));
        assert_eq!(whole_eth_to_wei(10), U256::from(10_000_000_000_000_000_000u128));
        assert!((wei_to_gwei(gwei_to_wei(42)) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_uint256_decimal_matches_u256_max() {
        assert_eq!(U256::from_str(MAX_UINT256_DECIMAL).unwrap(), U256::MAX);
    }

    #[test]
    fn test_keyword_tables_are_lowercase() {
        let tables: [&[&str]; 6] = [
            &DEX_NAMES,
            &BRIDGE_NAMES,
            &YIELD_KEYWORDS,
            &STABLECOIN_NAMES,
            &NFT_NAMES,
            &MULTISIG_METHODS,
        ];
        for table in tables {
            for word in table {
                assert_eq!(*word, word.to_lowercase());
            }
        }
    }
}

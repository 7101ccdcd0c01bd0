//! Normalized transaction signal consumed by the heuristic scorer
//!
//! Every group and field is optional. The accessors on [`TransactionSignal`]
//! carry the defaults the scorer relies on, so rule code never touches the
//! raw `Option`s.

use serde::{Deserialize, Serialize};

use crate::utils::lenient;

pub const HINT_TRANSFER: &str = "Transfer";
pub const HINT_SWAP: &str = "Swap";
pub const HINT_MEV: &str = "MEV";

/// Token age assumed when the contract age is unknown (treat as established)
pub const DEFAULT_TOKEN_AGE_DAYS: f64 = 999.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFlags {
    #[serde(rename = "addressOnBlocklist", deserialize_with = "lenient::flag")]
    pub address_on_blocklist: bool,
    #[serde(rename = "protocolAllowlisted", deserialize_with = "lenient::flag")]
    pub protocol_allowlisted: bool,
    #[serde(rename = "tokenAllowlisted", deserialize_with = "lenient::flag")]
    pub token_allowlisted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenInfo {
    #[serde(
        rename = "contractAgeDays",
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub contract_age_days: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(
        rename = "liquidityUSD",
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub liquidity_usd: Option<f64>,
    #[serde(
        rename = "topHoldersPct",
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub top_holders_pct: Option<f64>,
    #[serde(
        rename = "notAllowlisted",
        deserialize_with = "lenient::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub not_allowlisted: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalInfo {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Decimal allowance, possibly 2^256 - 1
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(
        rename = "spenderAllowlisted",
        deserialize_with = "lenient::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub spender_allowlisted: Option<bool>,
    #[serde(
        rename = "spenderVerified",
        deserialize_with = "lenient::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub spender_verified: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DexInfo {
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "slippagePct",
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub slippage_pct: Option<f64>,
    #[serde(
        rename = "poolLiquidityUSD",
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub pool_liquidity_usd: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MevInfo {
    #[serde(rename = "isSandwichLeg", deserialize_with = "lenient::flag")]
    pub is_sandwich_leg: bool,
    #[serde(
        rename = "samePool",
        deserialize_with = "lenient::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub same_pool: Option<bool>,
    /// "FRONT-RUN", "BACK-RUN" or anything else
    #[serde(deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(
        rename = "profitUSD",
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub profit_usd: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasInfo {
    #[serde(
        rename = "overP99_1h",
        deserialize_with = "lenient::opt_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub over_p99_1h: Option<bool>,
}

/// Input record of the heuristic scorer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionSignal {
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub lists: Option<ListFlags>,
    #[serde(
        rename = "typeHints",
        deserialize_with = "lenient::string_set",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub type_hints: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenInfo>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub approval: Option<ApprovalInfo>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub dex: Option<DexInfo>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub mev: Option<MevInfo>,
    #[serde(deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub gas: Option<GasInfo>,
}

impl TransactionSignal {
    /// Exact, case-sensitive hint match
    pub fn has_hint(&self, hint: &str) -> bool {
        self.type_hints.iter().any(|h| h == hint)
    }

    // ---- lists ----

    pub fn is_blocklisted(&self) -> bool {
        self.lists.as_ref().is_some_and(|l| l.address_on_blocklist)
    }

    pub fn protocol_allowlisted(&self) -> bool {
        self.lists.as_ref().is_some_and(|l| l.protocol_allowlisted)
    }

    pub fn token_allowlisted(&self) -> bool {
        self.lists.as_ref().is_some_and(|l| l.token_allowlisted)
    }

    // ---- token ----

    /// Contract age in days, 999 when unknown
    pub fn token_age_days(&self) -> f64 {
        self.token
            .as_ref()
            .and_then(|t| t.contract_age_days)
            .unwrap_or(DEFAULT_TOKEN_AGE_DAYS)
    }

    /// Raw contract age; the allowlist easing only trusts a known age
    pub fn token_age_known(&self) -> Option<f64> {
        self.token.as_ref().and_then(|t| t.contract_age_days)
    }

    /// Unknown verification status counts as unverified
    pub fn token_verified(&self) -> bool {
        self.token.as_ref().and_then(|t| t.verified).unwrap_or(false)
    }

    /// Unknown liquidity is never "low"
    pub fn token_liquidity_usd(&self) -> Option<f64> {
        self.token.as_ref().and_then(|t| t.liquidity_usd)
    }

    pub fn top_holders_pct(&self) -> f64 {
        self.token.as_ref().and_then(|t| t.top_holders_pct).unwrap_or(0.0)
    }

    pub fn token_not_allowlisted(&self) -> bool {
        self.token.as_ref().and_then(|t| t.not_allowlisted).unwrap_or(false)
    }

    // ---- approval ----

    pub fn approval_method(&self) -> Option<&str> {
        self.approval.as_ref().and_then(|a| a.method.as_deref())
    }

    pub fn approval_amount(&self) -> Option<&str> {
        self.approval.as_ref().and_then(|a| a.amount.as_deref())
    }

    /// Only an explicit `false` marks the spender as unknown
    pub fn spender_explicitly_unlisted(&self) -> bool {
        self.approval.as_ref().and_then(|a| a.spender_allowlisted) == Some(false)
    }

    /// Only an explicit `false` marks the spender as unverified
    pub fn spender_explicitly_unverified(&self) -> bool {
        self.approval.as_ref().and_then(|a| a.spender_verified) == Some(false)
    }

    // ---- dex ----

    /// The dex group is present at all
    pub fn has_dex(&self) -> bool {
        self.dex.is_some()
    }

    /// The dex group names a venue (non-empty)
    pub fn dex_named(&self) -> bool {
        self.dex
            .as_ref()
            .and_then(|d| d.name.as_deref())
            .is_some_and(|n| !n.trim().is_empty())
    }

    pub fn slippage_pct(&self) -> f64 {
        self.dex.as_ref().and_then(|d| d.slippage_pct).unwrap_or(0.0)
    }

    /// Unknown pool depth reads as infinitely deep
    pub fn pool_liquidity_usd(&self) -> f64 {
        self.dex
            .as_ref()
            .and_then(|d| d.pool_liquidity_usd)
            .unwrap_or(f64::INFINITY)
    }

    // ---- gas ----

    pub fn gas_over_p99(&self) -> bool {
        self.gas.as_ref().and_then(|g| g.over_p99_1h).unwrap_or(false)
    }

    // ---- mev ----

    pub fn is_sandwich_leg(&self) -> bool {
        self.mev.as_ref().is_some_and(|m| m.is_sandwich_leg)
    }

    pub fn mev_same_pool(&self) -> bool {
        self.mev.as_ref().and_then(|m| m.same_pool).unwrap_or(false)
    }

    pub fn mev_role(&self) -> Option<&str> {
        self.mev.as_ref().and_then(|m| m.role.as_deref())
    }

    pub fn mev_profit_usd(&self) -> f64 {
        self.mev.as_ref().and_then(|m| m.profit_usd).unwrap_or(0.0)
    }
}

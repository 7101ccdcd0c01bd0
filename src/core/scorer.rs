//! Heuristic Risk Scorer
//!
//! Additive point rules over a [`TransactionSignal`], discounted by allowlist
//! easing and thresholded into a GOOD/BAD label.
//!
//! Rule groups (evaluated in this order, each only when its gate holds):
//! - Scam transfer: young, unverified, illiquid or concentrated token moved
//!   by a plain transfer
//! - Suspicious approval: unlimited or unknown-spender `approve`
//! - Extreme slippage: swaps through thin pools or exotic tokens
//! - MEV sandwich: one leg of a front/back-run pattern
//!
//! A blocklisted address short-circuits everything else.

use tracing::debug;

use crate::models::signal::{TransactionSignal, HINT_SWAP, HINT_TRANSFER};
use crate::models::types::{Label, RiskVerdict, RuleGroup, ScoreFactor};
use crate::utils::constants::MAX_UINT256_DECIMAL;

/// Fixed score of a blocklisted address
pub const BLOCKLIST_RISK: u32 = 99;
pub const REASON_BLOCKLISTED: &str = "Blocklisted address";

/// Generic BAD threshold
pub const BAD_THRESHOLD: u32 = 40;
/// Lower threshold when the transaction is a swap or touches a DEX
pub const SWAP_BAD_THRESHOLD: u32 = 35;
/// Lower threshold when the transaction is a transfer
pub const TRANSFER_BAD_THRESHOLD: u32 = 30;

// Easing
const EASE_PROTOCOL_ALLOWLISTED: u32 = 20;
const EASE_MATURE_VERIFIED_TOKEN: u32 = 10;
const EASE_TOKEN_ALLOWLISTED: u32 = 10;
const MATURE_TOKEN_AGE_DAYS: f64 = 90.0;

// Scam transfer
const NEW_TOKEN_AGE_DAYS: f64 = 7.0;
const LOW_LIQUIDITY_USD: f64 = 10_000.0;
const HOLDER_CONCENTRATION_PCT: f64 = 90.0;

// Extreme slippage
const HIGH_SLIPPAGE_PCT: f64 = 15.0;
const THIN_POOL_USD: f64 = 50_000.0;

/// Accumulates fired conditions group by group
#[derive(Debug, Default)]
pub struct VerdictBuilder {
    factors: Vec<ScoreFactor>,
}

impl VerdictBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, group: RuleGroup, points: u32, reason: impl Into<String>) {
        self.factors.push(ScoreFactor {
            group,
            points,
            reason: reason.into(),
        });
    }

    /// Token moved by a transfer that looks like a scam airdrop or rug
    pub fn with_scam_transfer(mut self, signal: &TransactionSignal) -> Self {
        let age = signal.token_age_days();
        let verified = signal.token_verified();
        let low_liquidity = signal
            .token_liquidity_usd()
            .is_some_and(|liq| liq < LOW_LIQUIDITY_USD);
        let concentrated = signal.top_holders_pct() > HOLDER_CONCENTRATION_PCT;
        let not_allowlisted = signal.token_not_allowlisted();

        let gated = signal.has_hint(HINT_TRANSFER)
            && not_allowlisted
            && (age < NEW_TOKEN_AGE_DAYS || !verified || low_liquidity || concentrated);
        if !gated {
            return self;
        }

        if age < NEW_TOKEN_AGE_DAYS {
            self.add(RuleGroup::ScamTransfer, 20, "New token (<7d)");
        }
        if !verified {
            self.add(RuleGroup::ScamTransfer, 15, "Unverified token");
        }
        // Always true once gated; keeps the reason attached to every hit
        if not_allowlisted {
            self.add(RuleGroup::ScamTransfer, 20, "Token not allowlisted");
        }
        if low_liquidity {
            self.add(RuleGroup::ScamTransfer, 15, "Low liquidity");
        }
        if concentrated {
            self.add(RuleGroup::ScamTransfer, 15, "Holder concentration");
        }
        self
    }

    /// ERC-20 `approve` granting too much to the wrong spender
    pub fn with_suspicious_approval(mut self, signal: &TransactionSignal) -> Self {
        if signal.approval_method() != Some("approve") {
            return self;
        }

        if signal.approval_amount() == Some(MAX_UINT256_DECIMAL) {
            self.add(RuleGroup::SuspiciousApproval, 25, "Infinite approval");
        }
        if signal.spender_explicitly_unlisted() {
            self.add(RuleGroup::SuspiciousApproval, 20, "Unknown spender");
        }
        if signal.spender_explicitly_unverified() {
            self.add(RuleGroup::SuspiciousApproval, 15, "Unverified spender");
        }
        self
    }

    /// Swap with extreme slippage or through a thin pool
    pub fn with_extreme_slippage(mut self, signal: &TransactionSignal) -> Self {
        if !(signal.has_hint(HINT_SWAP) || signal.dex_named()) {
            return self;
        }

        if signal.slippage_pct() > HIGH_SLIPPAGE_PCT {
            self.add(RuleGroup::ExtremeSlippage, 25, "High slippage");
        }
        if signal.pool_liquidity_usd() < THIN_POOL_USD {
            self.add(RuleGroup::ExtremeSlippage, 15, "Thin liquidity pool");
        }
        if signal.token_not_allowlisted() {
            self.add(RuleGroup::ExtremeSlippage, 15, "Exotic token");
        }
        if signal.gas_over_p99() {
            self.add(RuleGroup::ExtremeSlippage, 10, "Anomalous gas");
        }
        self
    }

    /// One leg of a sandwich attack
    pub fn with_mev_sandwich(mut self, signal: &TransactionSignal) -> Self {
        if !signal.is_sandwich_leg() {
            return self;
        }

        if signal.mev_same_pool() {
            self.add(RuleGroup::MevSandwich, 25, "Same pool/block pattern");
        }
        if let Some(role) = signal.mev_role() {
            if role == "FRONT-RUN" || role == "BACK-RUN" {
                self.add(RuleGroup::MevSandwich, 20, format!("MEV {}", role));
            }
        }
        if signal.mev_profit_usd() > 0.0 {
            self.add(RuleGroup::MevSandwich, 10, "Positive MEV profit");
        }
        self
    }

    /// Sum of fired points before easing
    pub fn raw_score(&self) -> u32 {
        self.factors.iter().map(|f| f.points).sum()
    }

    /// Apply easing and thresholds
    pub fn build(self, signal: &TransactionSignal, easing: u32) -> RiskVerdict {
        let risk = self.raw_score().saturating_sub(easing);
        let label = label_for(risk, signal);
        let reasons = self.factors.iter().map(|f| f.reason.clone()).collect();

        RiskVerdict {
            risk,
            label,
            reasons,
            breakdown: self.factors,
            easing,
        }
    }
}

/// Discount earned by allowlisted protocols and established tokens
pub fn allowlist_easing(signal: &TransactionSignal) -> u32 {
    let mut easing = 0;
    if signal.protocol_allowlisted() {
        easing += EASE_PROTOCOL_ALLOWLISTED;
    }
    // An unknown age does not count as mature
    let mature = signal
        .token_age_known()
        .is_some_and(|age| age > MATURE_TOKEN_AGE_DAYS);
    if signal.token_verified() && mature {
        easing += EASE_MATURE_VERIFIED_TOKEN;
    }
    if signal.token_allowlisted() {
        easing += EASE_TOKEN_ALLOWLISTED;
    }
    easing
}

/// Threshold the net risk; swaps and transfers trip earlier
pub fn label_for(risk: u32, signal: &TransactionSignal) -> Label {
    let bad = risk >= BAD_THRESHOLD
        || (risk >= SWAP_BAD_THRESHOLD && (signal.has_hint(HINT_SWAP) || signal.has_dex()))
        || (risk >= TRANSFER_BAD_THRESHOLD && signal.has_hint(HINT_TRANSFER));
    if bad {
        Label::Bad
    } else {
        Label::Good
    }
}

fn blocklisted_verdict() -> RiskVerdict {
    RiskVerdict {
        risk: BLOCKLIST_RISK,
        label: Label::Bad,
        reasons: vec![REASON_BLOCKLISTED.to_string()],
        breakdown: vec![ScoreFactor {
            group: RuleGroup::Blocklist,
            points: BLOCKLIST_RISK,
            reason: REASON_BLOCKLISTED.to_string(),
        }],
        easing: 0,
    }
}

/// Score a transaction signal
pub fn score(signal: &TransactionSignal) -> RiskVerdict {
    if signal.is_blocklisted() {
        debug!("blocklisted address, skipping rule groups");
        return blocklisted_verdict();
    }

    let easing = allowlist_easing(signal);
    let verdict = VerdictBuilder::new()
        .with_scam_transfer(signal)
        .with_suspicious_approval(signal)
        .with_extreme_slippage(signal)
        .with_mev_sandwich(signal)
        .build(signal, easing);

    debug!(
        risk = verdict.risk,
        easing,
        label = verdict.label.as_str(),
        fired = verdict.reasons.len(),
        "signal scored"
    );
    verdict
}

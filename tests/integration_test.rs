//! Integration tests for txrisk

use alloy_primitives::U256;
use serde_json::json;
use txrisk::{
    assess, categorize, categorize_record, core::scorer::VerdictBuilder, score, AssessmentInput,
    Category, ExplorerTransaction, Label, RiskLevel, RuleGroup, Species, TransactionRecord,
    TransactionSignal,
};

const MAX_UINT256: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

fn signal(value: serde_json::Value) -> TransactionSignal {
    serde_json::from_value(value).unwrap()
}

fn explorer(value: serde_json::Value) -> ExplorerTransaction {
    serde_json::from_value(value).unwrap()
}

// ============================================
// Scorer
// ============================================

#[test]
fn test_blocklist_dominates_any_signal() {
    let noisy = [
        json!({"lists": {"addressOnBlocklist": true}}),
        json!({"lists": {"addressOnBlocklist": true, "protocolAllowlisted": true, "tokenAllowlisted": true},
               "token": {"verified": true, "contractAgeDays": 1000}}),
        json!({"lists": {"addressOnBlocklist": true},
               "typeHints": ["Transfer", "Swap", "MEV"],
               "token": {"contractAgeDays": 1, "verified": false, "notAllowlisted": true},
               "approval": {"method": "approve", "amount": MAX_UINT256, "spenderAllowlisted": false},
               "dex": {"name": "Uniswap", "slippagePct": 80, "poolLiquidityUSD": 10},
               "mev": {"isSandwichLeg": true, "samePool": true, "role": "BACK-RUN", "profitUSD": 900},
               "gas": {"overP99_1h": true}}),
    ];

    for value in noisy {
        let verdict = score(&signal(value));
        assert_eq!(verdict.risk, 99);
        assert_eq!(verdict.label, Label::Bad);
        assert_eq!(verdict.reasons, vec!["Blocklisted address".to_string()]);
    }
}

#[test]
fn test_easing_never_increases_risk() {
    let base = json!({
        "typeHints": ["Swap"],
        "dex": {"slippagePct": 28.4, "poolLiquidityUSD": 31000},
        "token": {"notAllowlisted": true, "verified": true, "contractAgeDays": 365}
    });
    let lists = [
        json!({}),
        json!({"tokenAllowlisted": true}),
        json!({"protocolAllowlisted": true}),
        json!({"protocolAllowlisted": true, "tokenAllowlisted": true}),
    ];

    let mut previous = u32::MAX;
    for flags in lists {
        let mut value = base.clone();
        value["lists"] = flags;
        let verdict = score(&signal(value));
        assert!(verdict.risk <= previous, "risk rose to {}", verdict.risk);
        assert_eq!(verdict.raw_score(), 55);
        previous = verdict.risk;
    }
    assert_eq!(previous, 15);
}

#[test]
fn test_scoring_is_idempotent() {
    let s = signal(json!({
        "typeHints": ["Transfer"],
        "token": {"contractAgeDays": 2, "verified": false, "liquidityUSD": 4800, "topHoldersPct": 94, "notAllowlisted": true}
    }));
    assert_eq!(score(&s), score(&s));

    let tx = explorer(json!({"to": {"name": "Stargate Bridge"}, "value": "1"}));
    assert_eq!(categorize(&tx), categorize(&tx));
}

#[test]
fn test_independent_groups_add_up() {
    let slippage = json!({"typeHints": ["Swap"], "dex": {"slippagePct": 20, "poolLiquidityUSD": 1000}});
    let mev = json!({"mev": {"isSandwichLeg": true, "samePool": true, "role": "FRONT-RUN", "profitUSD": 5}});

    let mut both = slippage.clone();
    both["mev"] = mev["mev"].clone();

    let alone_a = score(&signal(slippage)).raw_score();
    let alone_b = score(&signal(mev)).raw_score();
    let combined = score(&signal(both));

    assert_eq!(combined.raw_score(), alone_a + alone_b);
    assert_eq!(combined.points_for(RuleGroup::ExtremeSlippage), alone_a);
    assert_eq!(combined.points_for(RuleGroup::MevSandwich), alone_b);
}

#[test]
fn test_builder_matches_score() {
    let s = signal(json!({
        "approval": {"method": "approve", "amount": MAX_UINT256, "spenderAllowlisted": false, "spenderVerified": false}
    }));
    let builder = VerdictBuilder::new()
        .with_scam_transfer(&s)
        .with_suspicious_approval(&s)
        .with_extreme_slippage(&s)
        .with_mev_sandwich(&s);
    assert_eq!(builder.raw_score(), 60);
    assert_eq!(builder.build(&s, 0), score(&s));
}

#[test]
fn test_label_threshold_scenarios() {
    let cases = [
        (
            json!({"typeHints": ["Transfer"], "token": {"contractAgeDays": 2, "verified": false,
                   "liquidityUSD": 4800, "topHoldersPct": 94, "notAllowlisted": true}}),
            85,
        ),
        (
            json!({"approval": {"method": "approve", "amount": MAX_UINT256,
                   "spenderAllowlisted": false, "spenderVerified": false}}),
            60,
        ),
        (
            json!({"typeHints": ["Swap"], "dex": {"slippagePct": 28.4, "poolLiquidityUSD": 31000},
                   "token": {"notAllowlisted": true}}),
            55,
        ),
        (
            json!({"mev": {"isSandwichLeg": true, "samePool": true, "role": "FRONT-RUN", "profitUSD": 42.15}}),
            55,
        ),
    ];

    for (value, expected) in cases {
        let verdict = score(&signal(value));
        assert_eq!(verdict.risk, expected);
        assert_eq!(verdict.label, Label::Bad);
    }

    let empty = score(&signal(json!({})));
    assert_eq!(empty.risk, 0);
    assert_eq!(empty.label, Label::Good);
    assert!(empty.reasons.is_empty());
}

#[test]
fn test_verdict_wire_shape() {
    let verdict = score(&signal(json!({"mev": {"isSandwichLeg": true, "samePool": true}})));
    let wire = serde_json::to_value(&verdict).unwrap();
    assert_eq!(wire["risk"], 25);
    assert_eq!(wire["label"], "GOOD");
    assert_eq!(wire["reasons"], json!(["Same pool/block pattern"]));
    assert_eq!(wire["breakdown"][0]["group"], "mev_sandwich");
}

// ============================================
// Categorizer
// ============================================

#[test]
fn test_scam_flag_is_always_critical() {
    let tx = explorer(json!({
        "from": {"is_scam": true},
        "to": {"name": "OpenSea: Seaport", "is_contract": true},
        "success": false,
        "type": "delegatecall",
        "created_contract": {"hash": "0x01"},
        "token_transfers": [{"token": {"symbol": "USDC"}}]
    }));
    let descriptor = categorize(&tx);
    assert_eq!(descriptor.category, Category::MaliciousActivity);
    assert_eq!(descriptor.name, "Malicious Activity");
    assert_eq!(descriptor.risk_level, RiskLevel::Critical);
}

#[test]
fn test_every_record_gets_a_descriptor() {
    let records = [
        json!({}),
        json!({"hash": null, "from": null, "to": null}),
        json!({"value": "not-a-number", "gas_price": [], "type": {}}),
        json!({"token_transfers": "oops", "decoded_input": 42}),
    ];
    for value in records {
        let descriptor = categorize(&explorer(value));
        assert!(!descriptor.name.is_empty());
        assert_eq!(descriptor.category, Category::Standard);
    }
}

#[test]
fn test_priority_order_over_overlapping_signals() {
    // System beats DEX
    let tx = explorer(json!({
        "to": {"hash": "0x4200000000000000000000000000000000000016", "name": "Uniswap Router"}
    }));
    assert_eq!(categorize(&tx).category, Category::NetworkInfrastructure);

    // DEX beats approval
    let tx = explorer(json!({
        "to": {"name": "Uniswap V2: Router 2"},
        "decoded_input": {"method_call": "approve(address,uint256)", "method_id": "0x095ea7b3"}
    }));
    assert_eq!(categorize(&tx).category, Category::DefiTrading);

    // Approval beats deployment and high value
    let tx = explorer(json!({
        "decoded_input": {"method_call": "approve(address,uint256)"},
        "created_contract": {"hash": "0x02"},
        "value": "99000000000000000000"
    }));
    assert_eq!(categorize(&tx).category, Category::TokenApproval);

    // MEV bid beats low-gas and token transfer
    let tx = explorer(json!({
        "value": "0",
        "gas_price": "300000000000",
        "token_transfers": [{"token": {"symbol": "XYZ"}}]
    }));
    assert_eq!(categorize(&tx).category, Category::MevActivity);
}

#[test]
fn test_whale_trader_descriptor() {
    let tx = explorer(json!({"value": "25000000000000000000", "gas_price": "30000000000"}));
    let descriptor = categorize(&tx);
    assert_eq!(descriptor.category, Category::HighValue);
    assert_eq!(descriptor.name, "Whale Trader");
    assert_eq!(descriptor.risk_level, RiskLevel::Moderate);

    let wire = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(wire["riskLevel"], "MODERATE");
}

#[test]
fn test_raw_calldata_infinite_approval() {
    let raw = format!(
        "0x095ea7b3{:0>64}{}",
        "7a250d5630b4cf539739df2c5dacb4c659f2488d",
        "f".repeat(64)
    );
    let tx = explorer(json!({"raw_input": raw, "to": {"is_contract": true}}));
    let descriptor = categorize(&tx);
    assert_eq!(descriptor.category, Category::InfiniteApproval);
    assert_eq!(descriptor.risk_level, RiskLevel::High);
}

// ============================================
// Records, legacy and assessment
// ============================================

#[test]
fn test_legacy_and_explorer_records() {
    let legacy: TransactionRecord =
        serde_json::from_value(json!({"hash": "0x9", "category": "Yield Farming"})).unwrap();
    assert!(legacy.is_legacy());
    assert_eq!(categorize_record(&legacy).category, Category::YieldFarming);

    let explorer_record: TransactionRecord =
        serde_json::from_value(json!({"hash": "0x9", "to": {"name": "Compound: cUSDC"}})).unwrap();
    assert!(!explorer_record.is_legacy());
    assert_eq!(categorize_record(&explorer_record).category, Category::DefiLending);
}

#[test]
fn test_assessment_pipeline() {
    let input: AssessmentInput = serde_json::from_value(json!({
        "signal": {"typeHints": ["Transfer"], "token": {"verified": false, "notAllowlisted": true, "liquidityUSD": 500}},
        "transaction": {
            "hash": "0xfeed",
            "value": "0",
            "gas_price": "20000000000",
            "token_transfers": [{"token": {"name": "Moon Inu", "symbol": "MOON"}}]
        }
    }))
    .unwrap();

    let assessment = assess(&input);
    let verdict = assessment.verdict.as_ref().unwrap();
    assert_eq!(verdict.risk, 50);
    assert!(verdict.is_bad());
    assert_eq!(assessment.descriptor.category, Category::TokenTransfer);
    assert_eq!(assessment.persona.species, Species::Jellyfish);
    assert!(assessment.should_record);

    let wire = serde_json::to_value(&assessment).unwrap();
    assert_eq!(wire["hash"], "0xfeed");
    assert_eq!(wire["shouldRecord"], true);
    assert_eq!(wire["persona"]["species"], "jellyfish");
}

#[test]
fn test_system_deposit_is_quiet() {
    let input: AssessmentInput = serde_json::from_value(json!({
        "transaction": {
            "from": {"hash": "0xdeaddeaddeaddeaddeaddeaddeaddeaddead0001"},
            "to": {"hash": "0x4200000000000000000000000000000000000015"},
            "type": 126,
            "gas_price": "0",
            "value": U256::ZERO.to_string()
        }
    }))
    .unwrap();

    let assessment = assess(&input);
    assert_eq!(assessment.descriptor.category, Category::NetworkInfrastructure);
    assert_eq!(assessment.persona.species, Species::Clownfish);
    assert!(!assessment.should_record);
}

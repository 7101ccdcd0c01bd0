//! Output types: risk verdicts and category descriptors

use serde::{Deserialize, Serialize};

/// Severity tier of a category descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Moderate => "🟡",
            RiskLevel::High => "🔴",
            RiskLevel::Critical => "💀",
        }
    }
}

/// Binary scorer label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Good,
    Bad,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Good => "GOOD",
            Label::Bad => "BAD",
        }
    }
}

/// Rule group a score contribution came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    Blocklist,
    ScamTransfer,
    SuspiciousApproval,
    ExtremeSlippage,
    MevSandwich,
}

impl RuleGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleGroup::Blocklist => "blocklist",
            RuleGroup::ScamTransfer => "scam_transfer",
            RuleGroup::SuspiciousApproval => "suspicious_approval",
            RuleGroup::ExtremeSlippage => "extreme_slippage",
            RuleGroup::MevSandwich => "mev_sandwich",
        }
    }
}

/// Individual condition that fired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub group: RuleGroup,
    pub points: u32,
    pub reason: String,
}

/// Scorer output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskVerdict {
    /// Net score after easing, never below zero
    pub risk: u32,
    pub label: Label,
    /// Fired conditions in evaluation order
    pub reasons: Vec<String>,
    /// Per-condition contributions, parallel to `reasons`
    #[serde(default)]
    pub breakdown: Vec<ScoreFactor>,
    /// Allowlist discount subtracted from the raw sum
    #[serde(default)]
    pub easing: u32,
}

impl RiskVerdict {
    pub fn is_bad(&self) -> bool {
        self.label == Label::Bad
    }

    /// Sum of all contributions before easing
    pub fn raw_score(&self) -> u32 {
        self.breakdown.iter().map(|f| f.points).sum()
    }

    /// Sum of contributions from one rule group
    pub fn points_for(&self, group: RuleGroup) -> u32 {
        self.breakdown
            .iter()
            .filter(|f| f.group == group)
            .map(|f| f.points)
            .sum()
    }

    pub fn fired(&self, group: RuleGroup) -> bool {
        self.breakdown.iter().any(|f| f.group == group)
    }

    pub fn has_reason(&self, reason: &str) -> bool {
        self.reasons.iter().any(|r| r == reason)
    }
}

/// Machine-readable category of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MaliciousActivity,
    FailedTransaction,
    ProxyOperation,
    NetworkInfrastructure,
    OracleNetwork,
    SystemMaintenance,
    DefiTrading,
    TokenApproval,
    InfiniteApproval,
    CrossChainBridge,
    ContractDeployment,
    DefiLending,
    YieldFarming,
    Stablecoin,
    TokenWrapping,
    MevActivity,
    NftTrading,
    MultiSignature,
    HighValue,
    GasOptimization,
    InternalTransaction,
    TokenTransfer,
    BatchTransfer,
    ContractInteraction,
    Standard,
}

impl Category {
    pub const ALL: [Category; 25] = [
        Category::MaliciousActivity,
        Category::FailedTransaction,
        Category::ProxyOperation,
        Category::NetworkInfrastructure,
        Category::OracleNetwork,
        Category::SystemMaintenance,
        Category::DefiTrading,
        Category::TokenApproval,
        Category::InfiniteApproval,
        Category::CrossChainBridge,
        Category::ContractDeployment,
        Category::DefiLending,
        Category::YieldFarming,
        Category::Stablecoin,
        Category::TokenWrapping,
        Category::MevActivity,
        Category::NftTrading,
        Category::MultiSignature,
        Category::HighValue,
        Category::GasOptimization,
        Category::InternalTransaction,
        Category::TokenTransfer,
        Category::BatchTransfer,
        Category::ContractInteraction,
        Category::Standard,
    ];

    /// Tag used on the wire
    pub fn tag(&self) -> &'static str {
        match self {
            Category::MaliciousActivity => "malicious_activity",
            Category::FailedTransaction => "failed_transaction",
            Category::ProxyOperation => "proxy_operation",
            Category::NetworkInfrastructure => "network_infrastructure",
            Category::OracleNetwork => "oracle_network",
            Category::SystemMaintenance => "system_maintenance",
            Category::DefiTrading => "defi_trading",
            Category::TokenApproval => "token_approval",
            Category::InfiniteApproval => "infinite_approval",
            Category::CrossChainBridge => "cross_chain_bridge",
            Category::ContractDeployment => "contract_deployment",
            Category::DefiLending => "defi_lending",
            Category::YieldFarming => "yield_farming",
            Category::Stablecoin => "stablecoin",
            Category::TokenWrapping => "token_wrapping",
            Category::MevActivity => "mev_activity",
            Category::NftTrading => "nft_trading",
            Category::MultiSignature => "multi_signature",
            Category::HighValue => "high_value",
            Category::GasOptimization => "gas_optimization",
            Category::InternalTransaction => "internal_transaction",
            Category::TokenTransfer => "token_transfer",
            Category::BatchTransfer => "batch_transfer",
            Category::ContractInteraction => "contract_interaction",
            Category::Standard => "standard",
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::MaliciousActivity => "Malicious Activity",
            Category::FailedTransaction => "Failed Transaction",
            Category::ProxyOperation => "Proxy Operation",
            Category::NetworkInfrastructure => "Network Infrastructure",
            Category::OracleNetwork => "Oracle Network",
            Category::SystemMaintenance => "System Maintenance",
            Category::DefiTrading => "DeFi Trading",
            Category::TokenApproval => "Token Approval",
            Category::InfiniteApproval => "Infinite Approver",
            Category::CrossChainBridge => "Cross-chain Bridge",
            Category::ContractDeployment => "Contract Deployment",
            Category::DefiLending => "DeFi Lending",
            Category::YieldFarming => "Yield Farming",
            Category::Stablecoin => "Stablecoin",
            Category::TokenWrapping => "Token Wrapping",
            Category::MevActivity => "MEV Activity",
            Category::NftTrading => "NFT Trading",
            Category::MultiSignature => "Multi-Signature",
            Category::HighValue => "Whale Trader",
            Category::GasOptimization => "Gas Optimization",
            Category::InternalTransaction => "Internal Transaction",
            Category::TokenTransfer => "Token Transfer",
            Category::BatchTransfer => "Batch Transfer",
            Category::ContractInteraction => "Contract Interaction",
            Category::Standard => "Standard Current",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::MaliciousActivity => "Interaction with an address flagged as a scam",
            Category::FailedTransaction => "Transaction reverted or failed on-chain",
            Category::ProxyOperation => "Delegatecall or call routed through a proxy contract",
            Category::NetworkInfrastructure => "Call into a reserved protocol system contract",
            Category::OracleNetwork => "Oracle report transmission",
            Category::SystemMaintenance => "Protocol-level system or deposit transaction",
            Category::DefiTrading => "Swap routed through a decentralized exchange",
            Category::TokenApproval => "Token allowance granted to a spender",
            Category::InfiniteApproval => "Unlimited token allowance granted to a spender",
            Category::CrossChainBridge => "Asset movement through a cross-chain bridge",
            Category::ContractDeployment => "New contract deployed",
            Category::DefiLending => "Borrow, lend, repay or supply on a lending market",
            Category::YieldFarming => "Staking or liquidity provision for yield",
            Category::Stablecoin => "Stablecoin movement",
            Category::TokenWrapping => "Wrapping or unwrapping the native asset",
            Category::MevActivity => "Zero-value transaction bidding an extreme gas price",
            Category::NftTrading => "Non-fungible token trade or transfer",
            Category::MultiSignature => "Multi-signature wallet execution",
            Category::HighValue => "Large native-value transfer",
            Category::GasOptimization => "Transaction submitted at a very low gas price",
            Category::InternalTransaction => "Internal call without input data",
            Category::TokenTransfer => "Fungible token transfer",
            Category::BatchTransfer => "Several token transfers in one transaction",
            Category::ContractInteraction => "Call into a contract with no decoded method",
            Category::Standard => "Ordinary transaction",
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Category::MaliciousActivity => RiskLevel::Critical,
            Category::FailedTransaction | Category::ProxyOperation | Category::InfiniteApproval => {
                RiskLevel::High
            }
            Category::DefiTrading
            | Category::CrossChainBridge
            | Category::ContractDeployment
            | Category::DefiLending
            | Category::YieldFarming
            | Category::MevActivity
            | Category::HighValue => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        }
    }

    /// Resolve a free-form tag (wire tag, display name or common alias)
    pub fn from_tag(tag: &str) -> Option<Category> {
        let normalized: String = tag
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        if let Some(category) = Self::ALL.iter().find(|c| {
            c.tag() == normalized || c.display_name().to_lowercase().replace(['-', ' '], "_") == normalized
        }) {
            return Some(*category);
        }

        let category = match normalized.as_str() {
            "scam" | "malicious" | "phishing" => Category::MaliciousActivity,
            "failed" | "reverted" => Category::FailedTransaction,
            "proxy" | "delegatecall" => Category::ProxyOperation,
            "system" | "infrastructure" => Category::NetworkInfrastructure,
            "oracle" => Category::OracleNetwork,
            "swap" | "dex" | "defi" | "trade" => Category::DefiTrading,
            "approval" | "approve" => Category::TokenApproval,
            "infinite" | "unlimited_approval" => Category::InfiniteApproval,
            "bridge" => Category::CrossChainBridge,
            "deploy" | "deployment" => Category::ContractDeployment,
            "lending" | "borrow" => Category::DefiLending,
            "yield" | "staking" | "stake" | "farm" => Category::YieldFarming,
            "stable" => Category::Stablecoin,
            "wrap" | "weth" => Category::TokenWrapping,
            "mev" | "sandwich" => Category::MevActivity,
            "nft" => Category::NftTrading,
            "multisig" => Category::MultiSignature,
            "whale" | "large" => Category::HighValue,
            "gas" | "cheap_gas" => Category::GasOptimization,
            "internal" => Category::InternalTransaction,
            "transfer" | "erc20" => Category::TokenTransfer,
            "batch" => Category::BatchTransfer,
            "contract" => Category::ContractInteraction,
            "normal" | "ordinary" => Category::Standard,
            _ => return None,
        };
        Some(category)
    }
}

/// Categorizer output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskLevel,
    pub category: Category,
}

impl CategoryDescriptor {
    /// Raise the risk level to at least `floor`
    pub fn escalate_to(mut self, floor: RiskLevel) -> Self {
        self.risk_level = self.risk_level.max(floor);
        self
    }
}

impl From<Category> for CategoryDescriptor {
    fn from(category: Category) -> Self {
        Self {
            name: category.display_name().to_string(),
            description: category.description().to_string(),
            risk_level: category.risk_level(),
            category,
        }
    }
}

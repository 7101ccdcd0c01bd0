//! Display personas
//!
//! The visualization layer renders every assessed transaction as a sea
//! creature whose species tracks the effective risk tier.

use serde::Serialize;

use crate::models::types::{CategoryDescriptor, RiskLevel, RiskVerdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Shark,
    Jellyfish,
    Pufferfish,
    Clownfish,
}

impl Species {
    pub fn for_tier(tier: RiskLevel) -> Self {
        match tier {
            RiskLevel::Critical => Species::Shark,
            RiskLevel::High => Species::Jellyfish,
            RiskLevel::Moderate => Species::Pufferfish,
            RiskLevel::Low => Species::Clownfish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Species::Shark => "Shark",
            Species::Jellyfish => "Jellyfish",
            Species::Pufferfish => "Pufferfish",
            Species::Clownfish => "Clownfish",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Species::Shark => "🦈",
            Species::Jellyfish => "🪼",
            Species::Pufferfish => "🐡",
            Species::Clownfish => "🐠",
        }
    }

    /// Get color code for UI
    pub fn color_code(&self) -> &'static str {
        match self {
            Species::Shark => "#7c2d12",      // Dark red
            Species::Jellyfish => "#ef4444",  // Red
            Species::Pufferfish => "#eab308", // Yellow
            Species::Clownfish => "#22c55e",  // Green
        }
    }
}

/// Persona chosen for one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub species: Species,
    pub name: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub tier: RiskLevel,
    /// HIGH and CRITICAL events go to the external ledger
    pub should_record: bool,
}

impl Persona {
    /// Effective tier is the descriptor's level, raised to HIGH on a BAD verdict
    pub fn select(verdict: Option<&RiskVerdict>, descriptor: &CategoryDescriptor) -> Self {
        let mut tier = descriptor.risk_level;
        if verdict.is_some_and(|v| v.is_bad()) {
            tier = tier.max(RiskLevel::High);
        }

        let species = Species::for_tier(tier);
        Self {
            species,
            name: species.name(),
            emoji: species.emoji(),
            color: species.color_code(),
            tier,
            should_record: tier >= RiskLevel::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scorer::score;
    use crate::models::signal::TransactionSignal;
    use crate::models::types::Category;

    #[test]
    fn test_species_per_tier() {
        let shark = Persona::select(None, &CategoryDescriptor::from(Category::MaliciousActivity));
        assert_eq!(shark.species, Species::Shark);
        assert!(shark.should_record);

        let clown = Persona::select(None, &CategoryDescriptor::from(Category::Standard));
        assert_eq!(clown.species, Species::Clownfish);
        assert!(!clown.should_record);

        let puffer = Persona::select(None, &CategoryDescriptor::from(Category::DefiTrading));
        assert_eq!(puffer.species, Species::Pufferfish);
    }

    #[test]
    fn test_bad_verdict_escalates() {
        let mut signal = TransactionSignal::default();
        signal.lists = Some(crate::models::signal::ListFlags {
            address_on_blocklist: true,
            ..Default::default()
        });
        let verdict = score(&signal);
        let persona = Persona::select(Some(&verdict), &CategoryDescriptor::from(Category::Standard));
        assert_eq!(persona.tier, RiskLevel::High);
        assert_eq!(persona.species, Species::Jellyfish);
        assert!(persona.should_record);
    }

    #[test]
    fn test_good_verdict_keeps_tier() {
        let verdict = score(&TransactionSignal::default());
        let persona = Persona::select(Some(&verdict), &CategoryDescriptor::from(Category::Stablecoin));
        assert_eq!(persona.tier, RiskLevel::Low);
    }
}

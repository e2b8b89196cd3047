//! Negotiation strategies and situational modifiers
//!
//! A strategy fixes how quickly an agent moves its price toward the
//! counterpart: the seller's per-round decay rate and the buyer's per-round
//! growth rate. `random` samples its rate from the aggressive–conservative
//! span through the injected RNG; `analytic` starts from the balanced rate
//! and lets the agent add a trend adjustment from its concession ledger.
//!
//! Market position (seller) and urgency (buyer) feed both the negotiation
//! power scalar and a small multiplier on the generated price.

use serde::{Deserialize, Serialize};

use crate::rng::RngManager;

/// Closed set of concession-pacing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Concede fast to close fast
    Aggressive,
    /// Concede slowly, hold out for terms
    Conservative,
    /// The middle road
    Balanced,
    /// Per-round rate sampled from the aggressive–conservative span
    Random,
    /// Balanced pace plus a reaction to the recent concession trend
    Analytic,
}

impl Strategy {
    /// Canonical token, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Aggressive => "aggressive",
            Strategy::Conservative => "conservative",
            Strategy::Balanced => "balanced",
            Strategy::Random => "random",
            Strategy::Analytic => "analytic",
        }
    }

    /// Parse a canonical token; returns None for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "aggressive" => Some(Strategy::Aggressive),
            "conservative" => Some(Strategy::Conservative),
            "balanced" => Some(Strategy::Balanced),
            "random" => Some(Strategy::Random),
            "analytic" => Some(Strategy::Analytic),
            _ => None,
        }
    }

    /// Seller per-round price decay rate.
    ///
    /// Only `random` draws from the RNG, so all other strategies stay
    /// seed-independent.
    pub fn seller_rate(&self, rng: &mut RngManager) -> f64 {
        match self {
            Strategy::Aggressive => 0.02,
            Strategy::Balanced | Strategy::Analytic => 0.01,
            Strategy::Conservative => 0.005,
            Strategy::Random => rng.range_f64(0.005, 0.02),
        }
    }

    /// Buyer per-round price growth rate.
    pub fn buyer_rate(&self, rng: &mut RngManager) -> f64 {
        match self {
            Strategy::Aggressive => 0.03,
            Strategy::Balanced | Strategy::Analytic => 0.02,
            Strategy::Conservative => 0.01,
            Strategy::Random => rng.range_f64(0.01, 0.03),
        }
    }
}

/// Seller's structural standing in the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    Strong,
    Weak,
    Neutral,
}

impl MarketPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketPosition::Strong => "strong",
            MarketPosition::Weak => "weak",
            MarketPosition::Neutral => "neutral",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "strong" => Some(MarketPosition::Strong),
            "weak" => Some(MarketPosition::Weak),
            "neutral" => Some(MarketPosition::Neutral),
            _ => None,
        }
    }

    /// Contribution to the seller's negotiation power
    pub fn power_score(&self) -> f64 {
        match self {
            MarketPosition::Strong => 0.8,
            MarketPosition::Neutral => 0.5,
            MarketPosition::Weak => 0.3,
        }
    }

    /// Multiplier applied to the seller's computed price
    pub fn price_multiplier(&self) -> f64 {
        match self {
            MarketPosition::Strong => 1.02,
            MarketPosition::Weak => 0.98,
            MarketPosition::Neutral => 1.0,
        }
    }
}

/// How badly the buyer needs the deal closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::High => "high",
            Urgency::Medium => "medium",
            Urgency::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Urgency::High),
            "medium" => Some(Urgency::Medium),
            "low" => Some(Urgency::Low),
            _ => None,
        }
    }

    /// Contribution to the buyer's negotiation power.
    /// Lower urgency means more room to walk away.
    pub fn power_score(&self) -> f64 {
        match self {
            Urgency::High => 0.2,
            Urgency::Medium => 0.5,
            Urgency::Low => 0.8,
        }
    }

    /// Multiplier applied to the buyer's computed price
    pub fn price_multiplier(&self) -> f64 {
        match self {
            Urgency::High => 1.05,
            Urgency::Medium => 1.0,
            Urgency::Low => 0.98,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_tokens() {
        for strategy in [
            Strategy::Aggressive,
            Strategy::Conservative,
            Strategy::Balanced,
            Strategy::Random,
            Strategy::Analytic,
        ] {
            assert_eq!(Strategy::parse(strategy.as_str()), Some(strategy));
        }
        assert_eq!(Strategy::parse("bold"), None);
    }

    #[test]
    fn test_fixed_strategies_ignore_rng() {
        let mut rng = RngManager::new(1);
        let state_before = rng.state();
        assert_eq!(Strategy::Aggressive.seller_rate(&mut rng), 0.02);
        assert_eq!(Strategy::Balanced.seller_rate(&mut rng), 0.01);
        assert_eq!(Strategy::Conservative.seller_rate(&mut rng), 0.005);
        assert_eq!(Strategy::Analytic.buyer_rate(&mut rng), 0.02);
        assert_eq!(rng.state(), state_before, "fixed strategies must not draw");
    }

    #[test]
    fn test_random_rate_spans_fixed_rates() {
        let mut rng = RngManager::new(4242);
        for _ in 0..100 {
            let s = Strategy::Random.seller_rate(&mut rng);
            assert!(s >= 0.005 && s < 0.02);
            let b = Strategy::Random.buyer_rate(&mut rng);
            assert!(b >= 0.01 && b < 0.03);
        }
    }

    #[test]
    fn test_power_scores() {
        assert_eq!(MarketPosition::Strong.power_score(), 0.8);
        assert_eq!(MarketPosition::Neutral.power_score(), 0.5);
        assert_eq!(MarketPosition::Weak.power_score(), 0.3);

        assert_eq!(Urgency::High.power_score(), 0.2);
        assert_eq!(Urgency::Medium.power_score(), 0.5);
        assert_eq!(Urgency::Low.power_score(), 0.8);
    }
}

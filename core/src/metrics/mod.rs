//! Post-hoc performance metrics
//!
//! Given the terminal offer (if any) and both agents' final state, the
//! analyzer scores the outcome: each side's satisfaction, the harmonic-mean
//! win-win score, a composite risk score, delivery reliability, price
//! competitiveness and negotiation efficiency. Every score is clamped to
//! [0, 100]; `total_value` is unclamped. On impasse all scores default to
//! zero and only `rounds_completed` carries information.

use serde::{Deserialize, Serialize};

use crate::agents::buyer::BuyerAgent;
use crate::agents::seller::SellerAgent;
use crate::models::offer::Offer;

/// Scores computed after a negotiation terminates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Nominal price × quantity of the agreed offer (unclamped)
    pub total_value: f64,
    /// How close the agreed price came to the seller's target, in percent
    pub seller_satisfaction: f64,
    /// How much of the budget the buyer kept, in percent
    pub buyer_satisfaction: f64,
    /// Composite delivery/quality/penalty risk
    pub risk_score: f64,
    /// Confidence that the delivery lead time will hold
    pub delivery_reliability: f64,
    /// Agreed price measured against twice the seller's cost
    pub price_competitiveness: f64,
    /// Harmonic mean of both satisfactions; zero unless both are positive
    pub win_win_score: f64,
    /// Rounds used (the cap, on impasse)
    pub rounds_completed: usize,
    /// Share of the round budget left unused
    pub negotiation_efficiency: f64,
}

/// Computes a `MetricsSnapshot` from terminal negotiation state.
pub struct MetricsAnalyzer;

impl MetricsAnalyzer {
    /// Score a finished negotiation.
    ///
    /// `final_offer` is `None` on impasse, which yields the all-zero snapshot
    /// with `rounds_completed` set.
    pub fn evaluate(
        seller: &SellerAgent,
        buyer: &BuyerAgent,
        final_offer: Option<&Offer>,
        rounds_used: usize,
        max_rounds: usize,
    ) -> MetricsSnapshot {
        let offer = match final_offer {
            Some(offer) => offer,
            None => {
                return MetricsSnapshot {
                    rounds_completed: rounds_used,
                    ..MetricsSnapshot::default()
                }
            }
        };

        let total_value = offer.price * offer.quantity as f64;

        let seller_satisfaction = clamp_score(offer.price / seller.target_price() * 100.0);
        let buyer_satisfaction =
            clamp_score((buyer.budget_limit() - offer.price) / buyer.budget_limit() * 100.0);

        let win_win_score = if seller_satisfaction > 0.0 && buyer_satisfaction > 0.0 {
            2.0 * seller_satisfaction * buyer_satisfaction
                / (seller_satisfaction + buyer_satisfaction)
        } else {
            0.0
        };

        let delivery_risk = ((offer.delivery_days as f64 - 3.0) * 10.0).max(0.0);
        let quality_risk = offer.quality_grade.risk_score();
        let penalty_risk = offer.penalty_rate * 10.0;
        let risk_score = clamp_score(delivery_risk + quality_risk + penalty_risk);

        let delivery_reliability = clamp_score((21.0 - offer.delivery_days as f64) * 5.0);

        let price_competitiveness =
            clamp_score((seller.cost() * 2.0 - offer.price) / seller.cost() * 100.0);

        let negotiation_efficiency = if max_rounds > 0 {
            clamp_score((max_rounds - rounds_used.min(max_rounds)) as f64 / max_rounds as f64 * 100.0)
        } else {
            0.0
        };

        MetricsSnapshot {
            total_value,
            seller_satisfaction,
            buyer_satisfaction,
            risk_score,
            delivery_reliability,
            price_competitiveness,
            win_win_score,
            rounds_completed: rounds_used,
            negotiation_efficiency,
        }
    }
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::buyer::BuyerConfig;
    use crate::agents::seller::SellerConfig;
    use crate::agents::strategy::{MarketPosition, Strategy, Urgency};
    use crate::config::EngineConfig;
    use crate::models::offer::{PaymentMethod, QualityGrade};

    fn agents() -> (SellerAgent, BuyerAgent) {
        let engine = EngineConfig::default();
        let seller = SellerAgent::new(
            SellerConfig {
                cost: 800.0,
                target_price: 1200.0,
                min_quantity: 800,
                delivery_window: (3, 7),
                strategy: Strategy::Balanced,
                profit_margin: 20.0,
                market_position: MarketPosition::Neutral,
            },
            &engine,
        )
        .unwrap();
        let buyer = BuyerAgent::new(
            BuyerConfig {
                target_price: 1000.0,
                target_quantity: 1000,
                desired_delivery: 5,
                strategy: Strategy::Balanced,
                budget_limit: 1500.0,
                urgency: Urgency::Medium,
            },
            &engine,
        )
        .unwrap();
        (seller, buyer)
    }

    fn agreed_offer() -> Offer {
        Offer {
            price: 1020.0,
            quantity: 1000,
            delivery_days: 5,
            payment_method: PaymentMethod::Cash,
            quality_grade: QualityGrade::Standard,
            warranty_months: 12,
            penalty_rate: 1.0,
            discount_rate: 0.0,
        }
    }

    #[test]
    fn test_agreed_deal_scores() {
        let (seller, buyer) = agents();
        let offer = agreed_offer();
        let metrics = MetricsAnalyzer::evaluate(&seller, &buyer, Some(&offer), 3, 15);

        assert_eq!(metrics.total_value, 1020.0 * 1000.0);
        assert!((metrics.seller_satisfaction - 85.0).abs() < 1e-9);
        assert!((metrics.buyer_satisfaction - 32.0).abs() < 1e-9);
        assert_eq!(metrics.rounds_completed, 3);
        assert!((metrics.negotiation_efficiency - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_win_win_is_harmonic_mean() {
        let (seller, buyer) = agents();
        let offer = agreed_offer();
        let metrics = MetricsAnalyzer::evaluate(&seller, &buyer, Some(&offer), 3, 15);

        let s = metrics.seller_satisfaction;
        let b = metrics.buyer_satisfaction;
        let expected = 2.0 * s * b / (s + b);
        assert!((metrics.win_win_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_risk_components() {
        let (seller, buyer) = agents();
        let offer = agreed_offer();
        let metrics = MetricsAnalyzer::evaluate(&seller, &buyer, Some(&offer), 3, 15);

        // delivery (5−3)×10 = 20, standard quality 20, penalty 1×10 = 10
        assert!((metrics.risk_score - 50.0).abs() < 1e-9);
        // (21 − 5) × 5 = 80
        assert!((metrics.delivery_reliability - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_competitiveness() {
        let (seller, buyer) = agents();
        let offer = agreed_offer();
        let metrics = MetricsAnalyzer::evaluate(&seller, &buyer, Some(&offer), 3, 15);

        // (800×2 − 1020) / 800 × 100 = 72.5
        assert!((metrics.price_competitiveness - 72.5).abs() < 1e-9);
    }

    #[test]
    fn test_all_scores_in_range() {
        let (seller, buyer) = agents();
        let mut offer = agreed_offer();
        offer.delivery_days = 300;
        offer.penalty_rate = 10.0;
        offer.price = 100_000.0;
        let metrics = MetricsAnalyzer::evaluate(&seller, &buyer, Some(&offer), 15, 15);

        for score in [
            metrics.seller_satisfaction,
            metrics.buyer_satisfaction,
            metrics.win_win_score,
            metrics.risk_score,
            metrics.delivery_reliability,
            metrics.price_competitiveness,
            metrics.negotiation_efficiency,
        ] {
            assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
        }
        assert!(metrics.total_value >= 0.0);
    }

    #[test]
    fn test_impasse_zeroes_everything_but_rounds() {
        let (seller, buyer) = agents();
        let metrics = MetricsAnalyzer::evaluate(&seller, &buyer, None, 15, 15);

        assert_eq!(metrics.rounds_completed, 15);
        assert_eq!(metrics.total_value, 0.0);
        assert_eq!(metrics.seller_satisfaction, 0.0);
        assert_eq!(metrics.buyer_satisfaction, 0.0);
        assert_eq!(metrics.win_win_score, 0.0);
        assert_eq!(metrics.risk_score, 0.0);
        assert_eq!(metrics.negotiation_efficiency, 0.0);
    }

    #[test]
    fn test_buyer_satisfaction_zero_when_price_exceeds_budget() {
        let (seller, buyer) = agents();
        let mut offer = agreed_offer();
        offer.price = 1600.0; // above the 1500 budget
        let metrics = MetricsAnalyzer::evaluate(&seller, &buyer, Some(&offer), 14, 15);

        assert_eq!(metrics.buyer_satisfaction, 0.0);
        assert_eq!(metrics.win_win_score, 0.0);
    }
}

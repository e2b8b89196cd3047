//! Seller agent
//!
//! The seller opens every round. Its price path decays from the target price
//! at a strategy-specific per-round rate, adjusted for market position,
//! floored at 0.8 of the undiscounted target and never below `cost × 1.05`.
//! Acceptance is margin-based: an incoming offer must clear the configured
//! profit margin over cost and satisfy the quantity and delivery-window
//! constraints. In the closing rounds the margin requirement relaxes to a
//! bare 2% over cost.

use crate::agents::strategy::{MarketPosition, Strategy};
use crate::agents::{validate_range, ProducedOffer, Response, ValidationError};
use crate::config::{EngineConfig, OfferLimits};
use crate::models::offer::{Offer, PaymentMethod, QualityGrade};
use crate::rng::RngManager;

/// Validated construction parameters for a seller.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerConfig {
    /// Unit cost of goods (currency units)
    pub cost: f64,
    /// Price the seller aims for; must not be below cost
    pub target_price: f64,
    /// Smallest order quantity the seller will take
    pub min_quantity: u32,
    /// Feasible delivery lead times as (earliest, latest) days
    pub delivery_window: (u32, u32),
    /// Concession-pacing strategy
    pub strategy: Strategy,
    /// Minimum acceptable margin over cost (percent)
    pub profit_margin: f64,
    /// Structural standing in the market
    pub market_position: MarketPosition,
}

/// Seller-side negotiation state.
///
/// Constructed once per simulation; every rejected round appends a concession
/// record and relaxes the delivery draft toward the window start.
#[derive(Debug, Clone)]
pub struct SellerAgent {
    cost: f64,
    target_price: f64,
    min_quantity: u32,
    delivery_window: (u32, u32),
    strategy: Strategy,
    profit_margin: f64,
    market_position: MarketPosition,

    /// Derived once at construction from market position and margin target
    negotiation_power: f64,

    /// Delivery currently on offer; starts at the window end (the widest)
    draft_delivery: u32,
    /// Price of the most recent offer put on the table
    last_offer_price: Option<f64>,
    rounds_participated: usize,
    /// Magnitudes of per-round price movement toward the buyer
    concession_history: Vec<f64>,

    limits: OfferLimits,
    closing_round: usize,
}

impl SellerAgent {
    /// Validate parameters and build the agent.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the offending field when any
    /// parameter is out of range, the target undercuts cost, or the delivery
    /// window is inverted. A failed construction never reaches the round
    /// loop.
    ///
    /// # Example
    /// ```
    /// use negotiation_simulator_core_rs::{
    ///     EngineConfig, MarketPosition, SellerAgent, SellerConfig, Strategy,
    /// };
    ///
    /// let seller = SellerAgent::new(
    ///     SellerConfig {
    ///         cost: 800.0,
    ///         target_price: 1200.0,
    ///         min_quantity: 800,
    ///         delivery_window: (3, 7),
    ///         strategy: Strategy::Balanced,
    ///         profit_margin: 20.0,
    ///         market_position: MarketPosition::Neutral,
    ///     },
    ///     &EngineConfig::default(),
    /// )
    /// .unwrap();
    ///
    /// // avg of neutral position (0.5) and margin score (20/30)
    /// assert!((seller.negotiation_power() - 0.5833).abs() < 1e-3);
    /// ```
    pub fn new(config: SellerConfig, engine: &EngineConfig) -> Result<Self, ValidationError> {
        let limits = engine.limits;

        let cost = validate_range(config.cost, limits.min_price, limits.max_price, "cost")?;
        let target_price = validate_range(
            config.target_price,
            limits.min_price,
            limits.max_price,
            "target_price",
        )?;
        if target_price < cost {
            return Err(ValidationError::TargetBelowCost { target_price, cost });
        }

        validate_range(
            config.min_quantity as f64,
            limits.min_quantity as f64,
            limits.max_quantity as f64,
            "min_quantity",
        )?;

        let (start, end) = config.delivery_window;
        if start > end {
            return Err(ValidationError::DeliveryWindow { start, end });
        }
        validate_range(
            start as f64,
            limits.min_delivery_days as f64,
            limits.max_delivery_days as f64,
            "delivery_window.start",
        )?;
        validate_range(
            end as f64,
            limits.min_delivery_days as f64,
            limits.max_delivery_days as f64,
            "delivery_window.end",
        )?;

        let profit_margin = validate_range(config.profit_margin, 0.0, 100.0, "profit_margin")?;

        let margin_score = (profit_margin / 30.0).min(1.0);
        let negotiation_power = (config.market_position.power_score() + margin_score) / 2.0;

        Ok(Self {
            cost,
            target_price,
            min_quantity: config.min_quantity,
            delivery_window: config.delivery_window,
            strategy: config.strategy,
            profit_margin,
            market_position: config.market_position,
            negotiation_power,
            draft_delivery: end,
            last_offer_price: None,
            rounds_participated: 0,
            concession_history: Vec::new(),
            limits,
            closing_round: engine.closing_round(),
        })
    }

    /// Produce this round's offer.
    ///
    /// If the computed offer fails its own bound check, the deterministic
    /// safe fallback is substituted (`fallback: true`). Returns `None` only
    /// when even the fallback violates the bounds, which aborts the round.
    pub fn make_offer(&mut self, rng: &mut RngManager) -> Option<ProducedOffer> {
        let price = self.projected_price(rng);

        let offer = Offer {
            price,
            quantity: self.min_quantity,
            delivery_days: self.draft_delivery,
            payment_method: PaymentMethod::Net30,
            quality_grade: QualityGrade::Standard,
            warranty_months: 24,
            penalty_rate: self.offer_penalty_rate(),
            discount_rate: self.round_discount(),
        };

        let (offer, fallback) = if offer.is_valid(&self.limits) {
            (offer, false)
        } else {
            let safe = self.safe_fallback_offer();
            if !safe.is_valid(&self.limits) {
                return None;
            }
            (safe, true)
        };

        if let Some(prev) = self.last_offer_price {
            self.concession_history.push((prev - offer.price).abs());
        }
        self.last_offer_price = Some(offer.price);

        Some(ProducedOffer { offer, fallback })
    }

    /// Evaluate the buyer's offer.
    ///
    /// Accepts when the effective price clears `cost × (1 + margin/100)` and
    /// quantity/delivery fit the seller's constraints; in the closing rounds
    /// a bare 2% margin suffices regardless of quantity and delivery. An
    /// invalid incoming offer is countered, never accepted.
    pub fn respond(&mut self, buyer_offer: &Offer) -> Response {
        self.rounds_participated += 1;

        if !buyer_offer.is_valid(&self.limits) {
            self.relax_draft();
            return Response::Counter;
        }

        let effective = buyer_offer.effective_price();
        let min_acceptable = self.cost * (1.0 + self.profit_margin / 100.0);

        if effective >= min_acceptable
            && buyer_offer.quantity >= self.min_quantity
            && buyer_offer.delivery_days >= self.delivery_window.0
            && buyer_offer.delivery_days <= self.delivery_window.1
        {
            return Response::Accept;
        }

        // Closing rounds: settle for a thin margin rather than walk away
        if self.rounds_participated >= self.closing_round && effective >= self.cost * 1.02 {
            return Response::Accept;
        }

        self.relax_draft();
        Response::Counter
    }

    /// Price for the current round: strategy decay on the target, market
    /// adjustment, factor floored at 0.8, never below `cost × 1.05`.
    fn projected_price(&self, rng: &mut RngManager) -> f64 {
        let round = self.rounds_participated as f64;
        let rate = self.strategy.seller_rate(rng);
        let factor =
            ((1.0 - rate * round) * self.market_position.price_multiplier()).max(0.8);

        let mut price = (self.target_price * factor).max(self.cost * 1.05);

        if self.strategy == Strategy::Analytic {
            price = (price + self.concession_trend()).max(self.cost * 1.05);
        }

        price
    }

    /// Analytic strategy: when recent concessions are rising, hold the next
    /// price back a fraction of the trend.
    fn concession_trend(&self) -> f64 {
        match self.concession_history.as_slice() {
            [.., prev, last] => -(last - prev) * 0.3,
            _ => 0.0,
        }
    }

    /// Volume discount offered once the negotiation drags past round five.
    fn round_discount(&self) -> f64 {
        if self.rounds_participated > 5 {
            (self.rounds_participated as f64 * 0.5).min(5.0)
        } else {
            0.0
        }
    }

    /// Late-penalty rate written into offers; a stronger seller commits to a
    /// higher penalty.
    fn offer_penalty_rate(&self) -> f64 {
        (3.0 - 2.0 * self.negotiation_power).max(1.0)
    }

    /// Deterministic fallback used when the computed offer is out of bounds.
    fn safe_fallback_offer(&self) -> Offer {
        Offer {
            price: (self.cost * 1.1).max(self.target_price * 0.9),
            quantity: self.min_quantity,
            delivery_days: self.delivery_window.1,
            payment_method: PaymentMethod::Net30,
            quality_grade: QualityGrade::Standard,
            warranty_months: 12,
            penalty_rate: 0.0,
            discount_rate: 0.0,
        }
    }

    /// Rejected round: move the delivery draft one day toward the window
    /// start (the buyer prefers earlier delivery).
    fn relax_draft(&mut self) {
        if self.draft_delivery > self.delivery_window.0 {
            self.draft_delivery -= 1;
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Unit cost of goods
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Target price
    pub fn target_price(&self) -> f64 {
        self.target_price
    }

    /// Minimum acceptable order quantity
    pub fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    /// Feasible delivery window (earliest, latest)
    pub fn delivery_window(&self) -> (u32, u32) {
        self.delivery_window
    }

    /// Concession-pacing strategy
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Minimum margin over cost (percent)
    pub fn profit_margin(&self) -> f64 {
        self.profit_margin
    }

    /// Market position
    pub fn market_position(&self) -> MarketPosition {
        self.market_position
    }

    /// Negotiation power in [0, 1]
    pub fn negotiation_power(&self) -> f64 {
        self.negotiation_power
    }

    /// Rounds this agent has responded in
    pub fn rounds_participated(&self) -> usize {
        self.rounds_participated
    }

    /// Ordered per-round concession magnitudes
    pub fn concession_history(&self) -> &[f64] {
        &self.concession_history
    }

    /// Price of the most recent offer, or the target before the first offer
    pub fn last_offered_price(&self) -> f64 {
        self.last_offer_price.unwrap_or(self.target_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn seller(strategy: Strategy) -> SellerAgent {
        SellerAgent::new(
            SellerConfig {
                cost: 800.0,
                target_price: 1200.0,
                min_quantity: 800,
                delivery_window: (3, 7),
                strategy,
                profit_margin: 20.0,
                market_position: MarketPosition::Neutral,
            },
            &EngineConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_first_offer_is_target_price() {
        let mut s = seller(Strategy::Balanced);
        let mut rng = RngManager::new(1);
        let produced = s.make_offer(&mut rng).unwrap();
        assert_eq!(produced.offer.price, 1200.0);
        assert!(!produced.fallback);
    }

    #[test]
    fn test_discount_kicks_in_after_round_five() {
        let mut s = seller(Strategy::Conservative);
        let mut rng = RngManager::new(1);
        let cheap = Offer {
            price: 500.0,
            quantity: 1,
            delivery_days: 100,
            payment_method: PaymentMethod::Cash,
            quality_grade: QualityGrade::Standard,
            warranty_months: 12,
            penalty_rate: 0.0,
            discount_rate: 0.0,
        };

        for _ in 0..5 {
            assert_eq!(s.respond(&cheap), Response::Counter);
        }
        assert_eq!(s.make_offer(&mut rng).unwrap().offer.discount_rate, 0.0);

        assert_eq!(s.respond(&cheap), Response::Counter);
        // round 6: min(5, 6 × 0.5) = 3
        assert_eq!(s.make_offer(&mut rng).unwrap().offer.discount_rate, 3.0);
    }

    #[test]
    fn test_price_never_below_cost_floor() {
        let mut s = SellerAgent::new(
            SellerConfig {
                cost: 1000.0,
                target_price: 1010.0,
                min_quantity: 10,
                delivery_window: (1, 5),
                strategy: Strategy::Aggressive,
                profit_margin: 5.0,
                market_position: MarketPosition::Weak,
            },
            &EngineConfig::default(),
        )
        .unwrap();
        let mut rng = RngManager::new(1);
        let reject = Offer {
            price: 1.0,
            quantity: 1,
            delivery_days: 300,
            payment_method: PaymentMethod::Cash,
            quality_grade: QualityGrade::Standard,
            warranty_months: 12,
            penalty_rate: 0.0,
            discount_rate: 0.0,
        };

        for _ in 0..10 {
            let produced = s.make_offer(&mut rng).unwrap();
            assert!(produced.offer.price >= 1000.0 * 1.05);
            s.respond(&reject);
        }
    }

    #[test]
    fn test_concession_history_tracks_price_movement() {
        let mut s = seller(Strategy::Balanced);
        let mut rng = RngManager::new(1);
        let reject = Offer {
            price: 500.0,
            quantity: 1,
            delivery_days: 100,
            payment_method: PaymentMethod::Cash,
            quality_grade: QualityGrade::Standard,
            warranty_months: 12,
            penalty_rate: 0.0,
            discount_rate: 0.0,
        };

        s.make_offer(&mut rng).unwrap(); // 1200.00
        s.respond(&reject);
        s.make_offer(&mut rng).unwrap(); // 1188.00 (1% decay)
        assert_eq!(s.concession_history().len(), 1);
        assert!((s.concession_history()[0] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_closing_round_relaxed_acceptance() {
        let mut s = seller(Strategy::Balanced);
        // Thin-margin offer: below the 20% margin but above cost × 1.02
        let thin = Offer {
            price: 880.0, // effective 836 with cash payment
            quantity: 1,
            delivery_days: 200,
            payment_method: PaymentMethod::Cash,
            quality_grade: QualityGrade::Standard,
            warranty_months: 12,
            penalty_rate: 0.0,
            discount_rate: 0.0,
        };

        for _ in 0..12 {
            assert_eq!(s.respond(&thin), Response::Counter);
        }
        // Round 13 = closing window of a 15-round cap
        assert_eq!(s.respond(&thin), Response::Accept);
    }

    #[test]
    fn test_construction_rejects_bad_parameters() {
        let engine = EngineConfig::default();
        let base = SellerConfig {
            cost: 800.0,
            target_price: 1200.0,
            min_quantity: 800,
            delivery_window: (3, 7),
            strategy: Strategy::Balanced,
            profit_margin: 20.0,
            market_position: MarketPosition::Neutral,
        };

        let mut bad = base.clone();
        bad.target_price = 700.0;
        assert!(matches!(
            SellerAgent::new(bad, &engine),
            Err(ValidationError::TargetBelowCost { .. })
        ));

        let mut bad = base.clone();
        bad.delivery_window = (7, 3);
        assert!(matches!(
            SellerAgent::new(bad, &engine),
            Err(ValidationError::DeliveryWindow { start: 7, end: 3 })
        ));

        let mut bad = base;
        bad.profit_margin = 150.0;
        assert!(matches!(
            SellerAgent::new(bad, &engine),
            Err(ValidationError::OutOfRange {
                field: "profit_margin",
                ..
            })
        ));
    }
}

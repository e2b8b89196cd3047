//! Buyer agent
//!
//! Mirror image of the seller: the buyer's price path grows from its target
//! at a strategy-specific per-round rate, adjusted for urgency, capped at
//! 1.5× the base and never above the budget limit. Acceptance is budget
//! based: the total effective cost must fit the budget, quantity must reach
//! 80% of the target and delivery must not overshoot the desired lead time by
//! more than 20%. High urgency (from round five) and the closing rounds relax
//! the test to total cost within 110% of budget.

use crate::agents::strategy::{Strategy, Urgency};
use crate::agents::{validate_range, ProducedOffer, Response, ValidationError};
use crate::config::{EngineConfig, OfferLimits};
use crate::models::offer::{Offer, PaymentMethod, QualityGrade};
use crate::rng::RngManager;

/// Validated construction parameters for a buyer.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyerConfig {
    /// Price the buyer aims for (currency units)
    pub target_price: f64,
    /// Quantity the buyer wants
    pub target_quantity: u32,
    /// Desired delivery lead time (days)
    pub desired_delivery: u32,
    /// Concession-pacing strategy
    pub strategy: Strategy,
    /// Hard ceiling on total spend per unit-price scale; must not be below
    /// the target price
    pub budget_limit: f64,
    /// How badly the deal is needed
    pub urgency: Urgency,
}

/// Buyer-side negotiation state.
#[derive(Debug, Clone)]
pub struct BuyerAgent {
    target_price: f64,
    target_quantity: u32,
    desired_delivery: u32,
    strategy: Strategy,
    budget_limit: f64,
    urgency: Urgency,

    /// Derived once at construction from budget slack and urgency
    negotiation_power: f64,

    /// Delivery currently on offer; starts at the desired lead time
    draft_delivery: u32,
    /// Price of the most recent offer put on the table
    last_offer_price: Option<f64>,
    rounds_participated: usize,
    /// Magnitudes of per-round price movement toward the seller
    concession_history: Vec<f64>,

    limits: OfferLimits,
    closing_round: usize,
}

impl BuyerAgent {
    /// Validate parameters and build the agent.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the offending field when any
    /// parameter is out of range or the budget undercuts the target price.
    ///
    /// # Example
    /// ```
    /// use negotiation_simulator_core_rs::{
    ///     BuyerAgent, BuyerConfig, EngineConfig, Strategy, Urgency,
    /// };
    ///
    /// let buyer = BuyerAgent::new(
    ///     BuyerConfig {
    ///         target_price: 1000.0,
    ///         target_quantity: 1000,
    ///         desired_delivery: 5,
    ///         strategy: Strategy::Balanced,
    ///         budget_limit: 1500.0,
    ///         urgency: Urgency::Medium,
    ///     },
    ///     &EngineConfig::default(),
    /// )
    /// .unwrap();
    ///
    /// // avg of budget slack (1 − 1000/1500) and medium urgency (0.5)
    /// assert!((buyer.negotiation_power() - 0.4166).abs() < 1e-3);
    /// ```
    pub fn new(config: BuyerConfig, engine: &EngineConfig) -> Result<Self, ValidationError> {
        let limits = engine.limits;

        let target_price = validate_range(
            config.target_price,
            limits.min_price,
            limits.max_price,
            "target_price",
        )?;

        validate_range(
            config.target_quantity as f64,
            limits.min_quantity as f64,
            limits.max_quantity as f64,
            "target_quantity",
        )?;

        validate_range(
            config.desired_delivery as f64,
            limits.min_delivery_days as f64,
            limits.max_delivery_days as f64,
            "desired_delivery",
        )?;

        let budget_limit = validate_range(
            config.budget_limit,
            limits.min_price,
            limits.max_price,
            "budget_limit",
        )?;
        if budget_limit < target_price {
            return Err(ValidationError::BudgetBelowTarget {
                budget_limit,
                target_price,
            });
        }

        let budget_slack = 1.0 - target_price / budget_limit;
        let negotiation_power = (budget_slack + config.urgency.power_score()) / 2.0;

        Ok(Self {
            target_price,
            target_quantity: config.target_quantity,
            desired_delivery: config.desired_delivery,
            strategy: config.strategy,
            budget_limit,
            urgency: config.urgency,
            negotiation_power,
            draft_delivery: config.desired_delivery,
            last_offer_price: None,
            rounds_participated: 0,
            concession_history: Vec::new(),
            limits,
            closing_round: engine.closing_round(),
        })
    }

    /// Produce this round's counter-offer.
    ///
    /// Same fallback contract as the seller: an out-of-bounds computed offer
    /// is replaced by the deterministic safe fallback, and `None` aborts the
    /// round when even that fails.
    pub fn make_offer(&mut self, rng: &mut RngManager) -> Option<ProducedOffer> {
        let price = self.projected_price(rng);

        let offer = Offer {
            price,
            quantity: self.target_quantity,
            delivery_days: self.draft_delivery,
            payment_method: PaymentMethod::Cash,
            quality_grade: QualityGrade::Standard,
            warranty_months: 12,
            penalty_rate: self.offer_penalty_rate(),
            discount_rate: 0.0,
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

    /// Evaluate the seller's offer.
    ///
    /// Accepts when the total effective cost fits the budget, the quantity
    /// reaches 80% of the target and delivery stays within 120% of the
    /// desired lead time. High urgency (from round five) and the closing
    /// rounds relax the test to total cost ≤ budget × 1.1. An invalid
    /// incoming offer is countered, never accepted.
    pub fn respond(&mut self, seller_offer: &Offer) -> Response {
        self.rounds_participated += 1;

        if !seller_offer.is_valid(&self.limits) {
            self.relax_draft();
            return Response::Counter;
        }

        let total_cost = seller_offer.effective_price() * seller_offer.quantity as f64;

        if total_cost <= self.budget_limit
            && seller_offer.quantity as f64 >= self.target_quantity as f64 * 0.8
            && seller_offer.delivery_days as f64 <= self.desired_delivery as f64 * 1.2
        {
            return Response::Accept;
        }

        let pressured = self.urgency == Urgency::High && self.rounds_participated >= 5;
        if (pressured || self.rounds_participated >= self.closing_round)
            && total_cost <= self.budget_limit * 1.1
        {
            return Response::Accept;
        }

        self.relax_draft();
        Response::Counter
    }

    /// Price for the current round: strategy growth on the target, urgency
    /// adjustment, factor capped at 1.5, never above the budget limit.
    fn projected_price(&self, rng: &mut RngManager) -> f64 {
        let round = self.rounds_participated as f64;
        let rate = self.strategy.buyer_rate(rng);
        let factor = ((1.0 + rate * round) * self.urgency.price_multiplier()).min(1.5);

        let mut price = (self.target_price * factor).min(self.budget_limit);

        if self.strategy == Strategy::Analytic {
            price = (price + self.concession_trend()).min(self.budget_limit);
        }

        price
    }

    /// Analytic strategy: when recent concessions are rising, lean into the
    /// trend to close the gap.
    fn concession_trend(&self) -> f64 {
        match self.concession_history.as_slice() {
            [.., prev, last] => (last - prev) * 0.4,
            _ => 0.0,
        }
    }

    /// Late-penalty rate written into offers; a stronger buyer demands less.
    fn offer_penalty_rate(&self) -> f64 {
        (2.0 - self.negotiation_power).max(0.5)
    }

    /// Deterministic fallback used when the computed offer is out of bounds.
    fn safe_fallback_offer(&self) -> Offer {
        Offer {
            price: (self.budget_limit * 0.8).min(self.target_price * 1.1),
            quantity: self.target_quantity,
            delivery_days: self.desired_delivery,
            payment_method: PaymentMethod::Cash,
            quality_grade: QualityGrade::Standard,
            warranty_months: 12,
            penalty_rate: 0.0,
            discount_rate: 0.0,
        }
    }

    /// Rejected round: allow one more day of delivery, up to the bound.
    fn relax_draft(&mut self) {
        if self.draft_delivery < self.limits.max_delivery_days {
            self.draft_delivery += 1;
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Target price
    pub fn target_price(&self) -> f64 {
        self.target_price
    }

    /// Target quantity
    pub fn target_quantity(&self) -> u32 {
        self.target_quantity
    }

    /// Desired delivery lead time (days)
    pub fn desired_delivery(&self) -> u32 {
        self.desired_delivery
    }

    /// Concession-pacing strategy
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Budget ceiling
    pub fn budget_limit(&self) -> f64 {
        self.budget_limit
    }

    /// Urgency level
    pub fn urgency(&self) -> Urgency {
        self.urgency
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

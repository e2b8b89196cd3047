//! Property tests: bound invariants, termination and metric ranges across
//! randomly generated (but valid) parameter records.

use proptest::prelude::*;

use negotiation_simulator_core_rs::{
    simulate, Event, MarketPosition, Offer, OfferLimits, PaymentMethod, QualityGrade,
    SimulationConfig, Strategy as Pacing, Urgency,
};

fn pacing(index: usize) -> Pacing {
    [
        Pacing::Aggressive,
        Pacing::Conservative,
        Pacing::Balanced,
        Pacing::Random,
        Pacing::Analytic,
    ][index]
}

fn position(index: usize) -> MarketPosition {
    [
        MarketPosition::Strong,
        MarketPosition::Weak,
        MarketPosition::Neutral,
    ][index]
}

fn urgency(index: usize) -> Urgency {
    [Urgency::High, Urgency::Medium, Urgency::Low][index]
}

proptest! {
    /// Every offer either agent puts on the table is within bounds, the
    /// protocol terminates within the cap, and every score lands in [0, 100].
    #[test]
    fn prop_run_invariants(
        cost in 1.0f64..50_000.0,
        target_markup in 0.0f64..2.0,
        min_qty in 1u32..100_000,
        window_start in 1u32..=364,
        window_len in 0u32..=100,
        buyer_target in 1.0f64..90_000.0,
        budget_slack in 0.0f64..1.0,
        buyer_qty in 1u32..100_000,
        buyer_deliv in 1u32..=365,
        margin in 0.0f64..=100.0,
        seller_pace in 0usize..5,
        buyer_pace in 0usize..5,
        market in 0usize..3,
        pressure in 0usize..3,
        seed in any::<u64>(),
    ) {
        let config = SimulationConfig {
            cost,
            seller_target_price: (cost * (1.0 + target_markup)).min(100_000.0),
            min_quantity: min_qty,
            delivery_window: (window_start, (window_start + window_len).min(365)),
            buyer_target_price: buyer_target,
            buyer_quantity: buyer_qty,
            buyer_desired_delivery: buyer_deliv,
            seller_strategy: pacing(seller_pace),
            buyer_strategy: pacing(buyer_pace),
            profit_margin: margin,
            budget_limit: (buyer_target * (1.0 + budget_slack)).min(100_000.0),
            market_position: position(market),
            urgency: urgency(pressure),
            rng_seed: seed,
            ..SimulationConfig::default()
        };

        let result = simulate(config).unwrap();
        let limits = OfferLimits::default();

        for event in result.trace.events() {
            if let Event::OfferMade { offer, .. } = event {
                prop_assert!(offer.is_valid(&limits), "out-of-bounds offer: {:?}", offer);
            }
        }

        prop_assert!(result.metrics.rounds_completed <= 15);
        prop_assert!(result.rounds.len() <= 15);

        let m = &result.metrics;
        for score in [
            m.seller_satisfaction,
            m.buyer_satisfaction,
            m.win_win_score,
            m.risk_score,
            m.delivery_reliability,
            m.price_competitiveness,
            m.negotiation_efficiency,
        ] {
            prop_assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
        }
        prop_assert!(m.total_value >= 0.0);
    }

    /// The valuation never goes negative, whatever the terms.
    #[test]
    fn prop_effective_price_non_negative(
        price in 1.0f64..100_000.0,
        quantity in 1u32..100_000,
        delivery in 1u32..=365,
        warranty in 0u32..=60,
        penalty in 0.0f64..=10.0,
        discount in 0.0f64..=20.0,
        payment in 0usize..5,
        quality in 0usize..4,
    ) {
        let offer = Offer {
            price,
            quantity,
            delivery_days: delivery,
            payment_method: [
                PaymentMethod::Cash,
                PaymentMethod::Net30,
                PaymentMethod::Net60,
                PaymentMethod::Net90,
                PaymentMethod::Installment,
            ][payment],
            quality_grade: [
                QualityGrade::GradeA,
                QualityGrade::GradeB,
                QualityGrade::GradeC,
                QualityGrade::Standard,
            ][quality],
            warranty_months: warranty,
            penalty_rate: penalty,
            discount_rate: discount,
        };

        prop_assert!(offer.effective_price() >= 0.0);
        prop_assert!(offer.total_value() >= 0.0);
    }
}

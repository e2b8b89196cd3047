//! Negotiation protocol engine
//!
//! Drives the alternating-offer loop between the two agents:
//!
//! ```text
//! For each round n (1..=max_rounds):
//! 1. Seller puts an offer on the table
//! 2. Buyer responds: accept → agreement on the seller's offer
//! 3. Buyer counters with its own offer
//! 4. Seller responds: accept → agreement on the buyer's offer
//! 5. Neither accepted → next round
//! ```
//!
//! The seller's offer is always evaluated before the buyer's counter within a
//! round, so a round that could close on either side resolves in favor of the
//! seller's offer. Exhausting the cap without acceptance is an impasse.
//!
//! # Determinism
//!
//! The protocol owns a seeded `RngManager` and threads it into the agents.
//! Only the `random` strategy draws from it, so any run without a random
//! party is a pure function of its configuration; with one, the seed makes
//! the run reproducible.
//!
//! # Example
//!
//! ```
//! use negotiation_simulator_core_rs::{
//!     simulate, MarketPosition, Outcome, SimulationConfig, Strategy, Urgency,
//! };
//!
//! let config = SimulationConfig {
//!     cost: 800.0,
//!     seller_target_price: 1200.0,
//!     min_quantity: 800,
//!     delivery_window: (3, 7),
//!     buyer_target_price: 1000.0,
//!     buyer_quantity: 1000,
//!     buyer_desired_delivery: 5,
//!     seller_strategy: Strategy::Balanced,
//!     buyer_strategy: Strategy::Balanced,
//!     profit_margin: 20.0,
//!     budget_limit: 1500.0,
//!     market_position: MarketPosition::Neutral,
//!     urgency: Urgency::Medium,
//!     ..SimulationConfig::default()
//! };
//!
//! let result = simulate(config).unwrap();
//! assert!(matches!(result.outcome, Outcome::Accepted { .. }));
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agents::buyer::{BuyerAgent, BuyerConfig};
use crate::agents::seller::{SellerAgent, SellerConfig};
use crate::agents::strategy::{MarketPosition, Strategy, Urgency};
use crate::agents::{ProducedOffer, Response, Role, ValidationError};
use crate::config::EngineConfig;
use crate::metrics::{MetricsAnalyzer, MetricsSnapshot};
use crate::models::event::{Event, TraceLog};
use crate::models::offer::Offer;
use crate::rng::RngManager;

// ============================================================================
// Configuration
// ============================================================================

/// Complete parameter record for one simulation run.
///
/// The record is validated by `NegotiationProtocol::new`; a validation
/// failure is returned before any round executes. `rng_seed` only matters
/// when a party uses the `random` strategy; `engine` carries the round cap
/// and offer bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seller's unit cost
    pub cost: f64,
    /// Seller's target price (≥ cost)
    pub seller_target_price: f64,
    /// Seller's minimum order quantity
    pub min_quantity: u32,
    /// Seller's feasible delivery window (earliest, latest) days
    pub delivery_window: (u32, u32),
    /// Buyer's target price
    pub buyer_target_price: f64,
    /// Buyer's desired quantity
    pub buyer_quantity: u32,
    /// Buyer's desired delivery lead time (days)
    pub buyer_desired_delivery: u32,
    /// Seller's concession-pacing strategy
    pub seller_strategy: Strategy,
    /// Buyer's concession-pacing strategy
    pub buyer_strategy: Strategy,
    /// Seller's minimum margin over cost (percent)
    pub profit_margin: f64,
    /// Buyer's budget ceiling (≥ buyer target price)
    pub budget_limit: f64,
    /// Seller's market position
    pub market_position: MarketPosition,
    /// Buyer's urgency
    pub urgency: Urgency,
    /// Seed for the deterministic RNG (only the `random` strategy draws)
    #[serde(default)]
    pub rng_seed: u64,
    /// Round cap and offer bounds
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for SimulationConfig {
    /// A baseline balanced/neutral/medium matchup; tests and examples
    /// override the fields they care about.
    fn default() -> Self {
        Self {
            cost: 800.0,
            seller_target_price: 1200.0,
            min_quantity: 800,
            delivery_window: (3, 7),
            buyer_target_price: 1000.0,
            buyer_quantity: 1000,
            buyer_desired_delivery: 5,
            seller_strategy: Strategy::Balanced,
            buyer_strategy: Strategy::Balanced,
            profit_margin: 20.0,
            budget_limit: 1500.0,
            market_position: MarketPosition::Neutral,
            urgency: Urgency::Medium,
            rng_seed: 0,
            engine: EngineConfig::default(),
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Terminal state of a negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum Outcome {
    /// Agreement reached on the offer made by `offer_by`, in `round`
    Accepted { offer_by: Role, round: usize },
    /// Round cap exhausted (or a round failed) without agreement
    Impasse,
}

/// The accepted offer together with its valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgreedOffer {
    pub offer: Offer,
    pub effective_price: f64,
    pub total_value: f64,
}

/// Everything a simulation run produces.
///
/// Created exactly once, at protocol termination. `prices` and
/// `effective_prices` hold one (seller, buyer) pair per round; on the round
/// the buyer accepts without countering, the buyer's slot carries the last
/// price it had put on the table.
#[derive(Debug, Clone)]
pub struct NegotiationResult {
    /// Unique id stamped on this run for correlation by external layers
    pub simulation_id: Uuid,
    /// Terminal state
    pub outcome: Outcome,
    /// The agreed offer; absent on impasse
    pub final_offer: Option<AgreedOffer>,
    /// Round indices reached, in order
    pub rounds: Vec<usize>,
    /// Per-round (seller, buyer) nominal prices
    pub prices: Vec<(f64, f64)>,
    /// Per-round (seller, buyer) effective prices
    pub effective_prices: Vec<(f64, f64)>,
    /// Post-hoc performance scores
    pub metrics: MetricsSnapshot,
    /// Ordered event trace
    pub trace: TraceLog,
}

impl NegotiationResult {
    /// The ordered textual transcript, one line per event.
    pub fn transcript(&self) -> Vec<String> {
        self.trace.transcript()
    }
}

// ============================================================================
// Protocol
// ============================================================================

/// The alternating-offer protocol between one seller and one buyer.
///
/// Owns both agents, the seeded RNG and the engine configuration. `run`
/// consumes the protocol: one instance drives exactly one negotiation.
pub struct NegotiationProtocol {
    simulation_id: Uuid,
    engine: EngineConfig,
    seller: SellerAgent,
    buyer: BuyerAgent,
    rng: RngManager,
}

impl NegotiationProtocol {
    /// Validate the parameter record and build both agents.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered; the simulation never
    /// begins on a rejected construction.
    pub fn new(config: SimulationConfig) -> Result<Self, ValidationError> {
        let engine = config.engine;

        let seller = SellerAgent::new(
            SellerConfig {
                cost: config.cost,
                target_price: config.seller_target_price,
                min_quantity: config.min_quantity,
                delivery_window: config.delivery_window,
                strategy: config.seller_strategy,
                profit_margin: config.profit_margin,
                market_position: config.market_position,
            },
            &engine,
        )?;

        let buyer = BuyerAgent::new(
            BuyerConfig {
                target_price: config.buyer_target_price,
                target_quantity: config.buyer_quantity,
                desired_delivery: config.buyer_desired_delivery,
                strategy: config.buyer_strategy,
                budget_limit: config.budget_limit,
                urgency: config.urgency,
            },
            &engine,
        )?;

        Ok(Self {
            simulation_id: Uuid::new_v4(),
            engine,
            seller,
            buyer,
            rng: RngManager::new(config.rng_seed),
        })
    }

    /// Unique id of this run
    pub fn simulation_id(&self) -> Uuid {
        self.simulation_id
    }

    /// Drive the negotiation to a terminal state.
    ///
    /// Always returns a result: acceptance, impasse at the cap, or the
    /// (rare) failed-round early termination with a partial trace. No error
    /// propagates past this point.
    pub fn run(mut self) -> NegotiationResult {
        let mut trace = TraceLog::new();
        let mut rounds = Vec::new();
        let mut prices = Vec::new();
        let mut effective_prices = Vec::new();

        for round in 1..=self.engine.max_rounds {
            trace.log(Event::RoundStarted { round });
            rounds.push(round);

            // Seller opens the round
            let seller_offer = match Self::produce_offer(
                self.seller.make_offer(&mut self.rng),
                Role::Seller,
                round,
                &mut trace,
            ) {
                Some(offer) => offer,
                None => {
                    return self.finish(
                        Outcome::Impasse,
                        None,
                        round,
                        trace,
                        rounds,
                        prices,
                        effective_prices,
                    )
                }
            };
            let seller_effective = seller_offer.effective_price();
            trace.log(Event::OfferMade {
                round,
                role: Role::Seller,
                offer: seller_offer,
                effective_price: seller_effective,
            });

            // Buyer evaluates the seller's offer first
            let buyer_response = self.buyer.respond(&seller_offer);
            trace.log(Event::ResponseGiven {
                round,
                role: Role::Buyer,
                response: buyer_response,
            });

            if buyer_response == Response::Accept {
                let buyer_draft = self.buyer.last_offered_price();
                prices.push((seller_offer.price, buyer_draft));
                effective_prices.push((seller_effective, buyer_draft));
                trace.log(Event::OfferAccepted {
                    round,
                    by: Role::Buyer,
                    offer: seller_offer,
                    effective_price: seller_effective,
                    total_value: seller_offer.total_value(),
                });
                return self.finish(
                    Outcome::Accepted {
                        offer_by: Role::Seller,
                        round,
                    },
                    Some(seller_offer),
                    round,
                    trace,
                    rounds,
                    prices,
                    effective_prices,
                );
            }

            // Buyer counters
            let buyer_offer = match Self::produce_offer(
                self.buyer.make_offer(&mut self.rng),
                Role::Buyer,
                round,
                &mut trace,
            ) {
                Some(offer) => offer,
                None => {
                    return self.finish(
                        Outcome::Impasse,
                        None,
                        round,
                        trace,
                        rounds,
                        prices,
                        effective_prices,
                    )
                }
            };
            let buyer_effective = buyer_offer.effective_price();
            trace.log(Event::OfferMade {
                round,
                role: Role::Buyer,
                offer: buyer_offer,
                effective_price: buyer_effective,
            });

            prices.push((seller_offer.price, buyer_offer.price));
            effective_prices.push((seller_effective, buyer_effective));

            // Seller evaluates the counter
            let seller_response = self.seller.respond(&buyer_offer);
            trace.log(Event::ResponseGiven {
                round,
                role: Role::Seller,
                response: seller_response,
            });

            if seller_response == Response::Accept {
                trace.log(Event::OfferAccepted {
                    round,
                    by: Role::Seller,
                    offer: buyer_offer,
                    effective_price: buyer_effective,
                    total_value: buyer_offer.total_value(),
                });
                return self.finish(
                    Outcome::Accepted {
                        offer_by: Role::Buyer,
                        round,
                    },
                    Some(buyer_offer),
                    round,
                    trace,
                    rounds,
                    prices,
                    effective_prices,
                );
            }
        }

        let cap = self.engine.max_rounds;
        trace.log(Event::Impasse { round: cap });
        self.finish(
            Outcome::Impasse,
            None,
            cap,
            trace,
            rounds,
            prices,
            effective_prices,
        )
    }

    /// Unwrap an agent's produced offer, logging fallback substitution or
    /// round failure.
    fn produce_offer(
        produced: Option<ProducedOffer>,
        role: Role,
        round: usize,
        trace: &mut TraceLog,
    ) -> Option<Offer> {
        match produced {
            Some(produced) => {
                if produced.fallback {
                    trace.log(Event::FallbackSubstituted { round, role });
                }
                Some(produced.offer)
            }
            None => {
                trace.log(Event::RoundFailed { round, role });
                None
            }
        }
    }

    /// Assemble the terminal result.
    #[allow(clippy::too_many_arguments)]
    fn finish(
        self,
        outcome: Outcome,
        final_offer: Option<Offer>,
        rounds_used: usize,
        trace: TraceLog,
        rounds: Vec<usize>,
        prices: Vec<(f64, f64)>,
        effective_prices: Vec<(f64, f64)>,
    ) -> NegotiationResult {
        let metrics = MetricsAnalyzer::evaluate(
            &self.seller,
            &self.buyer,
            final_offer.as_ref(),
            rounds_used,
            self.engine.max_rounds,
        );

        NegotiationResult {
            simulation_id: self.simulation_id,
            outcome,
            final_offer: final_offer.map(|offer| AgreedOffer {
                offer,
                effective_price: offer.effective_price(),
                total_value: offer.total_value(),
            }),
            rounds,
            prices,
            effective_prices,
            metrics,
            trace,
        }
    }
}

/// Single engine entry point: validate, run, return the result.
///
/// All failure paths resolve to either a rejected construction
/// (`ValidationError`) or a completed/impassed `NegotiationResult`.
pub fn simulate(config: SimulationConfig) -> Result<NegotiationResult, ValidationError> {
    Ok(NegotiationProtocol::new(config)?.run())
}

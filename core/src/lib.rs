//! Negotiation Simulator Core - Rust Engine
//!
//! Deterministic round-based bilateral negotiation between a seller and a
//! buyer exchanging multi-attribute offers.
//!
//! # Architecture
//!
//! - **config**: immutable per-run bounds and round cap
//! - **models**: domain types (Offer + valuation, event trace)
//! - **agents**: seller/buyer decision policies and concession calculus
//! - **protocol**: the alternating-offer round loop
//! - **metrics**: post-hoc performance analyzer
//! - **rng**: deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Every emitted offer is within the configured bounds
//! 2. All randomness is deterministic (seeded RNG; only the `random`
//!    strategy draws)
//! 3. The protocol terminates within the round cap, always with a result

// Module declarations
pub mod agents;
pub mod config;
pub mod metrics;
pub mod models;
pub mod protocol;
pub mod rng;

// Re-exports for convenience
pub use agents::{
    buyer::{BuyerAgent, BuyerConfig},
    seller::{SellerAgent, SellerConfig},
    strategy::{MarketPosition, Strategy, Urgency},
    ProducedOffer, Response, Role, ValidationError,
};
pub use config::{EngineConfig, OfferLimits};
pub use metrics::{MetricsAnalyzer, MetricsSnapshot};
pub use models::{
    event::{Event, TraceLog},
    offer::{Offer, PaymentMethod, QualityGrade},
};
pub use protocol::{
    simulate, AgreedOffer, NegotiationProtocol, NegotiationResult, Outcome, SimulationConfig,
};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn negotiation_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::simulation::simulate_negotiation, m)?)?;
    Ok(())
}

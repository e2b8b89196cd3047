//! Negotiation protocol - the alternating-offer round loop
//!
//! See `engine.rs` for the full implementation.

pub mod engine;

pub use engine::{
    simulate, AgreedOffer, NegotiationProtocol, NegotiationResult, Outcome, SimulationConfig,
};

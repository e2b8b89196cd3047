//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, deterministic random numbers.
//! CRITICAL: all randomness in the engine MUST go through this module; the
//! `random` negotiation strategy is the only consumer.

mod xorshift;

pub use xorshift::RngManager;

//! xorshift64* random number generator
//!
//! # Determinism
//!
//! Same seed → same sequence. This is CRITICAL for:
//! - Reproducing a negotiation trace exactly (debugging)
//! - Testing the `random` strategy variant
//! - Comparing strategy matchups across parameter sweeps
//!
//! Strategies other than `random` never draw from the generator, so a
//! simulation without a random party is seed-independent.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use negotiation_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let rate = rng.range_f64(0.005, 0.02); // per-round concession rate
/// assert!(rate >= 0.005 && rate < 0.02);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is remapped to 1 (xorshift requirement).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use negotiation_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let p = rng.next_f64();
    /// assert!(p >= 0.0 && p < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Take the top 53 bits so the mantissa is fully random
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Generate random f64 in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use negotiation_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(42);
    /// let concession = rng.range_f64(20.0, 40.0);
    /// assert!(concession >= 20.0 && concession < 40.0);
    /// ```
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        assert!(min < max, "min must be less than max");
        min + self.next_f64() * (max - min)
    }

    /// Get current RNG state (for replaying a run from a known point)
    pub fn state(&self) -> u64 {
        self.state
    }
}

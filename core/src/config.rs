//! Engine configuration
//!
//! All bounds and the round cap live in one immutable value passed into the
//! protocol at construction. Nothing here is process-wide state, so multiple
//! configurations can run side by side (e.g. in tests or batch sweeps).

use serde::{Deserialize, Serialize};

/// Bounds every offer attribute is validated against.
///
/// The defaults are the canonical limits of the negotiation domain; custom
/// limits are mainly useful for tests that want to force the fallback path.
///
/// # Example
/// ```
/// use negotiation_simulator_core_rs::OfferLimits;
///
/// let limits = OfferLimits::default();
/// assert_eq!(limits.max_price, 100_000.0);
/// assert_eq!(limits.max_delivery_days, 365);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OfferLimits {
    /// Minimum unit price (currency units)
    pub min_price: f64,
    /// Maximum unit price (currency units)
    pub max_price: f64,
    /// Minimum order quantity (units)
    pub min_quantity: u32,
    /// Maximum order quantity (units)
    pub max_quantity: u32,
    /// Minimum delivery lead time (days)
    pub min_delivery_days: u32,
    /// Maximum delivery lead time (days)
    pub max_delivery_days: u32,
    /// Maximum warranty period (months); minimum is 0
    pub max_warranty_months: u32,
    /// Maximum late-penalty rate (percent); minimum is 0
    pub max_penalty_rate: f64,
    /// Maximum volume-discount rate (percent); minimum is 0
    pub max_discount_rate: f64,
}

impl Default for OfferLimits {
    fn default() -> Self {
        Self {
            min_price: 1.0,
            max_price: 100_000.0,
            min_quantity: 1,
            max_quantity: 100_000,
            min_delivery_days: 1,
            max_delivery_days: 365,
            max_warranty_months: 60,
            max_penalty_rate: 10.0,
            max_discount_rate: 20.0,
        }
    }
}

/// Complete engine configuration: offer bounds plus the round cap.
///
/// # Example
/// ```
/// use negotiation_simulator_core_rs::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.max_rounds, 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of alternating-offer rounds before impasse
    pub max_rounds: usize,

    /// Offer attribute bounds
    pub limits: OfferLimits,
}

impl EngineConfig {
    /// First round in which acceptance thresholds relax.
    ///
    /// Both agents loosen their acceptance policy once the negotiation enters
    /// the final stretch before the cap.
    pub fn closing_round(&self) -> usize {
        self.max_rounds.saturating_sub(2)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rounds: 15,
            limits: OfferLimits::default(),
        }
    }
}

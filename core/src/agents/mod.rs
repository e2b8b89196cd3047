//! Negotiating agents
//!
//! Two role-specific agents drive the negotiation: the seller opens each
//! round, the buyer answers, then the roles swap for the counter-offer. Each
//! agent owns its constraints (validated once at construction), a mutable
//! per-round draft, and a ledger of past concessions.
//!
//! Construction failures are `ValidationError`s carrying the offending field
//! and the violated bound; a rejected construction never reaches the round
//! loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod buyer;
pub mod seller;
pub mod strategy;

/// Side of the table an agent sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Seller,
    Buyer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "seller",
            Role::Buyer => "buyer",
        }
    }
}

/// An agent's answer to an incoming offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// Take the offer as-is; the negotiation terminates
    Accept,
    /// Reject and prepare a counter-offer
    Counter,
}

impl Response {
    pub fn as_str(&self) -> &'static str {
        match self {
            Response::Accept => "accept",
            Response::Counter => "counter",
        }
    }
}

/// Offer produced by an agent for the current round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProducedOffer {
    pub offer: crate::models::offer::Offer,
    /// True when the computed offer failed its own bound check and the
    /// deterministic safe fallback was substituted
    pub fallback: bool,
}

/// Construction-time validation failure.
///
/// Raised before any round executes; carries the field name and the violated
/// bound so callers can surface a precise client error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("delivery window start ({start}) must not exceed end ({end})")]
    DeliveryWindow { start: u32, end: u32 },

    #[error("target_price ({target_price}) must not be below cost ({cost})")]
    TargetBelowCost { target_price: f64, cost: f64 },

    #[error("budget_limit ({budget_limit}) must not be below target_price ({target_price})")]
    BudgetBelowTarget {
        budget_limit: f64,
        target_price: f64,
    },

    #[error("unknown {field}: {value}")]
    UnknownVariant { field: &'static str, value: String },
}

/// Validate a numeric field against an inclusive range.
pub(crate) fn validate_range(
    value: f64,
    min: f64,
    max: f64,
    field: &'static str,
) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range_accepts_inclusive_bounds() {
        assert_eq!(validate_range(1.0, 1.0, 10.0, "f"), Ok(1.0));
        assert_eq!(validate_range(10.0, 1.0, 10.0, "f"), Ok(10.0));
    }

    #[test]
    fn test_validate_range_rejects_out_of_bounds() {
        let err = validate_range(0.5, 1.0, 10.0, "price").unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "price",
                min: 1.0,
                max: 10.0,
                value: 0.5
            }
        );
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range(f64::NAN, 1.0, 10.0, "price").is_err());
    }

    #[test]
    fn test_error_messages_name_field_and_bound() {
        let err = validate_range(120.0, 0.0, 100.0, "profit_margin").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("profit_margin"));
        assert!(msg.contains("100"));
    }
}

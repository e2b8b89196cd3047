//! Offer model
//!
//! An offer is an immutable snapshot of one party's proposed terms: unit
//! price, quantity, delivery lead time, payment terms, quality grade,
//! warranty, late-penalty rate and volume-discount rate. Offers are produced
//! fresh each round, compared exactly once, and logged verbatim.
//!
//! The valuation function converts the nominal unit price into an *effective*
//! price reflecting the economic weight of the non-price terms:
//!
//! ```text
//! effective = price
//!           × payment_multiplier
//!           × quality_multiplier
//!           × (1 + (warranty_months − 12) × 0.015)
//!           × (1 − discount_rate / 100)
//! ```
//!
//! The function is pure: the same offer always yields the same value.

use serde::{Deserialize, Serialize};

use crate::config::OfferLimits;

/// Payment terms attached to an offer.
///
/// Earlier payment is worth a discount to the seller; deferred payment
/// carries a financing premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Payment on delivery
    Cash,
    /// Net 30 days (the neutral baseline)
    Net30,
    /// Net 60 days
    Net60,
    /// Net 90 days
    Net90,
    /// Payment in installments
    Installment,
}

impl PaymentMethod {
    /// Effective-price multiplier for these terms
    pub fn multiplier(&self) -> f64 {
        match self {
            PaymentMethod::Cash => 0.95,
            PaymentMethod::Net30 => 1.0,
            PaymentMethod::Net60 => 1.02,
            PaymentMethod::Net90 => 1.05,
            PaymentMethod::Installment => 1.03,
        }
    }

    /// Canonical token, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Net30 => "net30",
            PaymentMethod::Net60 => "net60",
            PaymentMethod::Net90 => "net90",
            PaymentMethod::Installment => "installment",
        }
    }

    /// Parse a canonical token; returns None for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cash" => Some(PaymentMethod::Cash),
            "net30" => Some(PaymentMethod::Net30),
            "net60" => Some(PaymentMethod::Net60),
            "net90" => Some(PaymentMethod::Net90),
            "installment" => Some(PaymentMethod::Installment),
            _ => None,
        }
    }
}

/// Quality grade of the goods on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    /// Premium grade
    GradeA,
    /// Above-standard grade
    GradeB,
    /// Below-standard grade
    GradeC,
    /// Standard grade (the neutral baseline)
    Standard,
}

impl QualityGrade {
    /// Effective-price multiplier for this grade
    pub fn multiplier(&self) -> f64 {
        match self {
            QualityGrade::GradeA => 1.15,
            QualityGrade::GradeB => 1.08,
            QualityGrade::GradeC => 0.95,
            QualityGrade::Standard => 1.0,
        }
    }

    /// Quality contribution to the risk score (see metrics)
    pub fn risk_score(&self) -> f64 {
        match self {
            QualityGrade::GradeA => 5.0,
            QualityGrade::GradeB => 15.0,
            QualityGrade::GradeC => 30.0,
            QualityGrade::Standard => 20.0,
        }
    }

    /// Canonical token, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::GradeA => "grade_a",
            QualityGrade::GradeB => "grade_b",
            QualityGrade::GradeC => "grade_c",
            QualityGrade::Standard => "standard",
        }
    }

    /// Parse a canonical token; returns None for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "grade_a" => Some(QualityGrade::GradeA),
            "grade_b" => Some(QualityGrade::GradeB),
            "grade_c" => Some(QualityGrade::GradeC),
            "standard" => Some(QualityGrade::Standard),
            _ => None,
        }
    }
}

/// A multi-attribute offer.
///
/// Either every attribute is within the configured bounds (`is_valid`) or the
/// offer is rejected by its consumer before use; the agents substitute a safe
/// fallback rather than emitting an out-of-bounds offer.
///
/// # Example
/// ```
/// use negotiation_simulator_core_rs::{Offer, OfferLimits, PaymentMethod, QualityGrade};
///
/// let offer = Offer {
///     price: 1200.0,
///     quantity: 800,
///     delivery_days: 7,
///     payment_method: PaymentMethod::Net30,
///     quality_grade: QualityGrade::Standard,
///     warranty_months: 12,
///     penalty_rate: 1.0,
///     discount_rate: 0.0,
/// };
///
/// assert!(offer.is_valid(&OfferLimits::default()));
/// assert_eq!(offer.effective_price(), 1200.0); // all multipliers neutral
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Nominal unit price (currency units)
    pub price: f64,
    /// Order quantity (units)
    pub quantity: u32,
    /// Delivery lead time (days)
    pub delivery_days: u32,
    /// Payment terms
    pub payment_method: PaymentMethod,
    /// Quality grade
    pub quality_grade: QualityGrade,
    /// Warranty period (months); 12 is the neutral baseline
    pub warranty_months: u32,
    /// Late-penalty rate (percent)
    pub penalty_rate: f64,
    /// Volume-discount rate (percent)
    pub discount_rate: f64,
}

impl Offer {
    /// Check every attribute against the configured bounds.
    pub fn is_valid(&self, limits: &OfferLimits) -> bool {
        self.price >= limits.min_price
            && self.price <= limits.max_price
            && self.quantity >= limits.min_quantity
            && self.quantity <= limits.max_quantity
            && self.delivery_days >= limits.min_delivery_days
            && self.delivery_days <= limits.max_delivery_days
            && self.warranty_months <= limits.max_warranty_months
            && self.penalty_rate >= 0.0
            && self.penalty_rate <= limits.max_penalty_rate
            && self.discount_rate >= 0.0
            && self.discount_rate <= limits.max_discount_rate
    }

    /// Effective unit price after payment, quality, warranty and discount
    /// adjustments. Clamped to ≥ 0.
    ///
    /// # Example
    /// ```
    /// use negotiation_simulator_core_rs::{Offer, PaymentMethod, QualityGrade};
    ///
    /// let offer = Offer {
    ///     price: 1000.0,
    ///     quantity: 100,
    ///     delivery_days: 5,
    ///     payment_method: PaymentMethod::Cash,   // ×0.95
    ///     quality_grade: QualityGrade::Standard, // ×1.00
    ///     warranty_months: 12,                   // neutral
    ///     penalty_rate: 0.0,
    ///     discount_rate: 0.0,
    /// };
    ///
    /// assert!((offer.effective_price() - 950.0).abs() < 1e-9);
    /// ```
    pub fn effective_price(&self) -> f64 {
        let warranty_multiplier = 1.0 + (self.warranty_months as f64 - 12.0) * 0.015;
        let volume_discount = 1.0 - self.discount_rate / 100.0;

        let effective = self.price
            * self.payment_method.multiplier()
            * self.quality_grade.multiplier()
            * warranty_multiplier
            * volume_discount;

        effective.max(0.0)
    }

    /// Total economic value of the offer: effective price × quantity.
    pub fn total_value(&self) -> f64 {
        self.effective_price() * self.quantity as f64
    }
}

//! Type conversion utilities for the FFI boundary
//!
//! Converts between Python dicts and the engine's configuration/result types.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::agents::strategy::{MarketPosition, Strategy, Urgency};
use crate::config::EngineConfig;
use crate::protocol::{NegotiationResult, SimulationConfig};

/// Extract a required field from a Python dict with a clear error message.
fn extract_required<'py, T: FromPyObject<'py>>(
    dict: &Bound<'py, PyDict>,
    key: &str,
) -> PyResult<T> {
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{}'", key)))?
        .extract()
}

/// Extract a field with a default value if missing.
fn extract_with_default<'py, T: FromPyObject<'py>>(
    dict: &Bound<'py, PyDict>,
    key: &str,
    default: T,
) -> PyResult<T> {
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Parse a strategy token, mirroring the engine's closed set.
fn parse_strategy(value: &str, field: &str) -> PyResult<Strategy> {
    Strategy::parse(value)
        .ok_or_else(|| PyValueError::new_err(format!("unknown {}: {}", field, value)))
}

/// Convert a Python dict to a `SimulationConfig`.
///
/// Field names match the original request schema of the negotiation API:
/// `cost`, `seller_target`, `min_qty`, `deliv_range`, `buyer_target`,
/// `buyer_qty`, `buyer_deliv`, `s_strategy`, `b_strategy`, `profit_margin`,
/// `budget_limit`, `market_position`, `urgency`, plus the optional
/// `rng_seed` and `max_rounds`.
pub fn parse_simulation_config(dict: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let s_strategy: String = extract_required(dict, "s_strategy")?;
    let b_strategy: String = extract_required(dict, "b_strategy")?;
    let market_position: String = extract_required(dict, "market_position")?;
    let urgency: String = extract_required(dict, "urgency")?;

    let mut engine = EngineConfig::default();
    engine.max_rounds = extract_with_default(dict, "max_rounds", engine.max_rounds)?;

    Ok(SimulationConfig {
        cost: extract_required(dict, "cost")?,
        seller_target_price: extract_required(dict, "seller_target")?,
        min_quantity: extract_required(dict, "min_qty")?,
        delivery_window: extract_required(dict, "deliv_range")?,
        buyer_target_price: extract_required(dict, "buyer_target")?,
        buyer_quantity: extract_required(dict, "buyer_qty")?,
        buyer_desired_delivery: extract_required(dict, "buyer_deliv")?,
        seller_strategy: parse_strategy(&s_strategy, "s_strategy")?,
        buyer_strategy: parse_strategy(&b_strategy, "b_strategy")?,
        profit_margin: extract_required(dict, "profit_margin")?,
        budget_limit: extract_required(dict, "budget_limit")?,
        market_position: MarketPosition::parse(&market_position).ok_or_else(|| {
            PyValueError::new_err(format!("unknown market_position: {}", market_position))
        })?,
        urgency: Urgency::parse(&urgency)
            .ok_or_else(|| PyValueError::new_err(format!("unknown urgency: {}", urgency)))?,
        rng_seed: extract_with_default(dict, "rng_seed", 0)?,
        engine,
    })
}

/// Convert a `NegotiationResult` to the Python response dict.
pub fn result_to_py(py: Python, result: &NegotiationResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    dict.set_item("success", true)?;
    dict.set_item("simulation_id", result.simulation_id.to_string())?;
    dict.set_item("log", result.transcript())?;

    let final_offer = PyDict::new_bound(py);
    if let Some(agreed) = &result.final_offer {
        final_offer.set_item("price", agreed.offer.price)?;
        final_offer.set_item("qty", agreed.offer.quantity)?;
        final_offer.set_item("delivery", agreed.offer.delivery_days)?;
        final_offer.set_item("payment_method", agreed.offer.payment_method.as_str())?;
        final_offer.set_item("quality_grade", agreed.offer.quality_grade.as_str())?;
        final_offer.set_item("warranty_months", agreed.offer.warranty_months)?;
        final_offer.set_item("penalty_rate", agreed.offer.penalty_rate)?;
        final_offer.set_item("discount_rate", agreed.offer.discount_rate)?;
        final_offer.set_item("effective_price", agreed.effective_price)?;
        final_offer.set_item("total_value", agreed.total_value)?;
    }
    dict.set_item("result", final_offer)?;

    dict.set_item("rounds", result.rounds.clone())?;
    dict.set_item("prices", result.prices.clone())?;
    dict.set_item("effective_prices", result.effective_prices.clone())?;

    let metrics = PyDict::new_bound(py);
    metrics.set_item("total_value", result.metrics.total_value)?;
    metrics.set_item("seller_satisfaction", result.metrics.seller_satisfaction)?;
    metrics.set_item("buyer_satisfaction", result.metrics.buyer_satisfaction)?;
    metrics.set_item("risk_score", result.metrics.risk_score)?;
    metrics.set_item("delivery_reliability", result.metrics.delivery_reliability)?;
    metrics.set_item(
        "price_competitiveness",
        result.metrics.price_competitiveness,
    )?;
    metrics.set_item("win_win_score", result.metrics.win_win_score)?;
    metrics.set_item("rounds_completed", result.metrics.rounds_completed)?;
    metrics.set_item(
        "negotiation_efficiency",
        result.metrics.negotiation_efficiency,
    )?;
    dict.set_item("metrics", metrics)?;

    Ok(dict.into())
}

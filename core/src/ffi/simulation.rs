//! PyO3 entry point for running one simulation
//!
//! This is the function the Python request layer calls.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_simulation_config, result_to_py};
use crate::protocol::simulate;

/// Run one negotiation simulation from a configuration dict.
///
/// # Example (from Python)
///
/// ```python
/// from negotiation_simulator_core_rs import simulate_negotiation
///
/// result = simulate_negotiation({
///     "cost": 800,
///     "seller_target": 1200,
///     "min_qty": 800,
///     "deliv_range": (3, 7),
///     "buyer_target": 1000,
///     "buyer_qty": 1000,
///     "buyer_deliv": 5,
///     "s_strategy": "balanced",
///     "b_strategy": "balanced",
///     "profit_margin": 20,
///     "budget_limit": 1500,
///     "market_position": "neutral",
///     "urgency": "medium",
/// })
/// print(result["metrics"]["win_win_score"])
/// ```
///
/// # Errors
///
/// Raises `ValueError` when a field is missing, out of range, or names an
/// unknown enum value. A started simulation always returns a result dict.
#[pyfunction]
pub fn simulate_negotiation(py: Python, config: &Bound<'_, PyDict>) -> PyResult<Py<PyDict>> {
    let config = parse_simulation_config(config)?;

    let result = simulate(config).map_err(|e| PyValueError::new_err(e.to_string()))?;

    result_to_py(py, &result)
}

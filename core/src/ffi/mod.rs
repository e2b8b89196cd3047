//! FFI boundary (PyO3)
//!
//! Python-facing adapter around the engine: parse a config dict, run one
//! simulation, hand back a result dict. The boundary is minimal and safe;
//! validation failures surface as `ValueError` so the request layer can map
//! them to client errors.

pub mod simulation;
pub mod types;

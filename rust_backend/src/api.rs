//! Public Python API surface for the calculators.
//!
//! This file is the sole entry point for the Streamlit integration. It exposes:
//! - the route functions, classes and name constants from [`crate::routes`]
//! - [`init_config`] to point the process at a specific `tools.toml`
//!
//! PyO3 dependencies stay in this file and in `routes`; the core and the service
//! layer are plain Rust.

use pyo3::prelude::*;
use std::path::Path;

pub use crate::routes::cosine::CONVERT_COSINE_ANGLE;
pub use crate::routes::pulse_time::{FormDefaults, COMPUTE_TQ};

/// Register all API functions with the Python module.
pub fn register_api_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Route-specific functions, classes and constants are registered centrally by `routes`
    crate::routes::register_route_functions(m)?;

    m.add_function(wrap_pyfunction!(init_config, m)?)?;

    Ok(())
}

/// Load the calculator configuration.
///
/// Must be called before the first calculation to take effect; afterwards the
/// settings are fixed for the lifetime of the process.
///
/// Args:
///     path: Optional path to a `tools.toml` file. Without it the standard
///         locations are searched.
#[pyfunction]
#[pyo3(signature = (path=None))]
fn init_config(path: Option<String>) -> PyResult<()> {
    crate::config::init_config(path.as_deref().map(Path::new))
        .map(|_| ())
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
}

pub mod algorithms;
pub mod config;
pub mod core;
pub mod services;

#[cfg(feature = "python")]
pub mod api;
#[cfg(feature = "python")]
pub mod routes;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Meter Tools - startup pulse time and cosine/angle calculators for the Streamlit app
#[cfg(feature = "python")]
#[pymodule]
fn meter_tools(m: &Bound<'_, PyModule>) -> PyResult<()> {
    api::register_api_functions(m)
}

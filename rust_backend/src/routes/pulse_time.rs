use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{PhaseWiring, PulseTimeInput};

/// Initial values of the pulse-time form.
#[pyclass(module = "meter_tools", get_all)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefaults {
	pub k: f64,
	pub c: f64,
	/// Selector label as shown by the UI
	pub m_label: String,
	pub un: f64,
	pub ib: f64,
	pub iq_percent: f64,
}

impl From<&PulseTimeInput> for FormDefaults {
	fn from(input: &PulseTimeInput) -> Self {
		FormDefaults {
			k: input.k,
			c: input.c,
			m_label: input.wiring.display_label().to_string(),
			un: input.un,
			ib: input.ib,
			iq_percent: input.iq_percent,
		}
	}
}

/// Pulse-time route function name constant
pub const COMPUTE_TQ: &str = "compute_tq";

/// Compute the startup pulse time `Tq` and return the report text.
///
/// Never raises: invalid input comes back as a message starting with "❌".
#[pyfunction]
pub fn compute_tq(k: f64, c: f64, m_label: &str, un: f64, ib: f64, iq_percent: f64) -> String {
	crate::services::compute_tq(k, c, m_label, un, ib, iq_percent)
}

/// Get the configured initial values of the pulse-time form.
#[pyfunction]
pub fn get_form_defaults() -> FormDefaults {
	(&crate::config::settings().defaults).into()
}

/// Register pulse-time route types, functions and constants with the Python module.
pub fn register_routes(m: &Bound<'_, PyModule>) -> PyResult<()> {
	m.add_function(wrap_pyfunction!(compute_tq, m)?)?;
	m.add_function(wrap_pyfunction!(get_form_defaults, m)?)?;
	m.add_class::<FormDefaults>()?;
	m.add("COMPUTE_TQ", COMPUTE_TQ)?;
	m.add(
		"WIRING_LABELS",
		PhaseWiring::ALL.iter().map(|w| w.display_label()).collect::<Vec<_>>(),
	)?;
	Ok(())
}

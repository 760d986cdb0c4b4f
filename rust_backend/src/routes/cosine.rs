use pyo3::prelude::*;

use crate::core::ConversionMode;

/// Cosine route function name constant
pub const CONVERT_COSINE_ANGLE: &str = "convert_cosine_angle";

/// Convert between a cosine value and an angle in degrees.
///
/// `mode` is one of `CONVERSION_MODES`; `raw_value` is the text typed by the user.
/// Never raises: invalid input comes back as a message starting with "❌".
#[pyfunction]
pub fn convert_cosine_angle(mode: &str, raw_value: &str) -> String {
	crate::services::convert_cosine_angle(mode, raw_value)
}

/// Register cosine route function and constants with the Python module.
pub fn register_routes(m: &Bound<'_, PyModule>) -> PyResult<()> {
	m.add_function(wrap_pyfunction!(convert_cosine_angle, m)?)?;
	m.add("CONVERT_COSINE_ANGLE", CONVERT_COSINE_ANGLE)?;
	m.add(
		"CONVERSION_MODES",
		ConversionMode::ALL.iter().map(|mode| mode.label()).collect::<Vec<_>>(),
	)?;
	Ok(())
}

//! Display-string entry points of the two calculators.
//!
//! These are the functions the UI calls. They never fail: every outcome, including
//! invalid input, comes back as the text to show, with failures starting with
//! [`ERROR_MARKER`](crate::core::ERROR_MARKER).

use crate::algorithms::{convert_labeled, PulseTimeCalculator};
use crate::config;
use crate::core::{render, CalcResult, PhaseWiring, PulseTimeInput};

/// Compute the startup pulse time and render the report.
///
/// `m_label` is resolved leniently: unknown labels count as single-phase and are
/// echoed as given in the report. The advisory threshold comes from the
/// process-wide [`config::settings`].
///
/// # Example
///
/// ```
/// use meter_tools::services::compute_tq;
///
/// let report = compute_tq(1.1, 1000.0, "single-phase", 230.0, 0.0, 0.4);
/// assert!(report.starts_with("❌"));
/// ```
pub fn compute_tq(k: f64, c: f64, m_label: &str, un: f64, ib: f64, iq_percent: f64) -> String {
    let input = PulseTimeInput::new(k, c, PhaseWiring::from_label(m_label), un, ib, iq_percent);
    let result = config::settings()
        .calculator()
        .compute(&input)
        .map(|tq| match PhaseWiring::lookup(m_label) {
            Some(_) => tq,
            None => tq.with_wiring_label(m_label.trim()),
        });
    log_failure("pulse time", &result);
    render(&result)
}

/// Compute and render with an explicit calculator.
pub fn compute_tq_with(calculator: &PulseTimeCalculator, input: &PulseTimeInput) -> String {
    let result = calculator.compute(input);
    log_failure("pulse time", &result);
    render(&result)
}

/// Convert between cosine and angle and render the result.
///
/// # Example
///
/// ```
/// use meter_tools::services::convert_cosine_angle;
///
/// assert_eq!(convert_cosine_angle("cosine→angle", "0.5"), "Possible angles: 60.0° and 300.0°");
/// assert_eq!(convert_cosine_angle("angle→cosine", "60"), "Cosine value: 0.5");
/// ```
pub fn convert_cosine_angle(mode: &str, raw_value: &str) -> String {
    let result = convert_labeled(mode, raw_value);
    log_failure("cosine conversion", &result);
    render(&result)
}

fn log_failure<T>(operation: &str, result: &CalcResult<T>) {
    if let Err(e) = result {
        log::debug!("Service layer: {} rejected: {:?}", operation, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Minutes;

    #[test]
    fn test_compute_tq_with_reference_meter() {
        let report = compute_tq_with(&PulseTimeCalculator::default(), &PulseTimeInput::default());
        assert!(report.starts_with("Tq ≈ 14 min 20 sec (~860 sec)\n"));
        assert!(!report.contains("⚠️"));
    }

    #[test]
    fn test_compute_tq_with_threshold() {
        let calculator = PulseTimeCalculator::new(Minutes::new(5.0));
        let report = compute_tq_with(&calculator, &PulseTimeInput::default());
        assert!(report.starts_with("⚠️ Tq exceeds 5 minutes"));
    }

    #[test]
    fn test_compute_tq_division_by_zero() {
        let report = compute_tq(1.1, 1000.0, "single-phase", 230.0, 0.0, 0.4);
        assert_eq!(report, "❌ denominator is zero, cannot compute Tq");
    }

    #[test]
    fn test_compute_tq_unknown_label_defaults() {
        let report = compute_tq(1.1, 1000.0, "unknown", 230.0, 5.0, 0.4);
        assert!(report.contains("Coefficient m = unknown (1)"));
    }

    #[test]
    fn test_compute_tq_display_label() {
        let report = compute_tq(1.1, 1000.0, "three-phase three-wire = √3", 230.0, 5.0, 0.4);
        assert!(report.contains("Coefficient m = three-phase-three-wire (1.7321)"));
    }

    #[test]
    fn test_convert_errors() {
        assert_eq!(
            convert_cosine_angle("cosine→angle", "abc"),
            "❌ please enter a valid number (e.g. 0.5 or 60)"
        );
        assert_eq!(
            convert_cosine_angle("cosine→angle", "2"),
            "❌ cosine value must be within [-1, 1]"
        );
        assert_eq!(
            convert_cosine_angle("secant", "0.5"),
            "❌ invalid mode selection"
        );
    }
}

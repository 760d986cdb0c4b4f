//! Startup-current pulse time (`Tq`) of an electricity meter.
//!
//! At the startup current `Iq` a meter with constant `C` (imp/kWh) needs
//!
//! ```text
//! Tq [min] = k * 60 * 1000 / (C * m * Un * Iq)
//! ```
//!
//! to emit its first pulse, where `m` depends on the phase wiring and `k` is the
//! startup time coefficient of the accuracy class.

use std::fmt;

use qtty::{Minutes, Second, Seconds};
use serde::Serialize;

use crate::core::{CalcError, CalcResult, PulseTimeInput, WARNING_MARKER};

/// Durations above this many minutes get an advisory line in the report.
pub const DEFAULT_ADVISORY_THRESHOLD: Minutes = Minutes::new(60.0);

/// First `f64` past the `i64` range (2^63).
const WHOLE_SECONDS_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Outcome of a pulse-time calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulseTime {
    pub input: PulseTimeInput,
    /// Wiring label echoed in the report
    pub wiring_label: String,
    /// Startup current in A
    pub iq: f64,
    pub tq: Minutes,
    pub total_seconds: Seconds,
    /// Whole minutes of `total_seconds`
    pub minutes: i64,
    /// Remaining whole seconds after `minutes`
    pub seconds: i64,
    /// Threshold that `tq` exceeded, if any
    pub advisory_threshold: Option<Minutes>,
}

impl PulseTime {
    pub fn needs_review(&self) -> bool {
        self.advisory_threshold.is_some()
    }

    /// Whole seconds of the duration, truncated toward zero.
    pub fn whole_seconds(&self) -> i64 {
        self.total_seconds.value().trunc() as i64
    }

    /// Echo `label` instead of the canonical wiring label in the report.
    pub fn with_wiring_label(mut self, label: impl Into<String>) -> Self {
        self.wiring_label = label.into();
        self
    }
}

impl fmt::Display for PulseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = &self.input;
        if let Some(threshold) = self.advisory_threshold {
            writeln!(
                f,
                "{} Tq exceeds {} minutes, please review the parameters.",
                WARNING_MARKER,
                threshold.value()
            )?;
        }
        writeln!(
            f,
            "Tq ≈ {} min {} sec (~{} sec)",
            self.minutes,
            self.seconds,
            self.whole_seconds()
        )?;
        writeln!(f)?;
        writeln!(f, "Parameters:")?;
        writeln!(f, "Startup time coefficient k = {}", input.k)?;
        writeln!(f, "Meter constant C = {} imp/kWh", input.c)?;
        writeln!(
            f,
            "Coefficient m = {} ({})",
            self.wiring_label,
            input.wiring.coefficient()
        )?;
        writeln!(f, "Rated voltage Un = {} V", input.un)?;
        writeln!(f, "Rated current Ib = {} A", input.ib)?;
        write!(
            f,
            "Startup current Iq = {:.3} A ({:.2}%)",
            self.iq, input.iq_percent
        )
    }
}

/// Pulse-time calculator with a configurable advisory threshold.
#[derive(Debug, Clone, Copy)]
pub struct PulseTimeCalculator {
    advisory_threshold: Minutes,
}

impl Default for PulseTimeCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_ADVISORY_THRESHOLD)
    }
}

impl PulseTimeCalculator {
    pub fn new(advisory_threshold: Minutes) -> Self {
        Self { advisory_threshold }
    }

    pub fn advisory_threshold(&self) -> Minutes {
        self.advisory_threshold
    }

    /// Compute `Tq` for the given parameters.
    ///
    /// # Errors
    ///
    /// * [`CalcError::InvalidParameter`] for negative or non-finite inputs
    /// * [`CalcError::DivisionByZero`] when `c * m * un * iq == 0`
    /// * [`CalcError::Arithmetic`] when the result is not a finite duration or
    ///   its whole seconds do not fit in an `i64`
    ///
    /// # Example
    ///
    /// ```
    /// use meter_tools::algorithms::PulseTimeCalculator;
    /// use meter_tools::core::PulseTimeInput;
    ///
    /// let tq = PulseTimeCalculator::default()
    ///     .compute(&PulseTimeInput::default())
    ///     .unwrap();
    /// assert_eq!((tq.minutes, tq.seconds, tq.whole_seconds()), (14, 20, 860));
    /// assert!(!tq.needs_review());
    /// ```
    pub fn compute(&self, input: &PulseTimeInput) -> CalcResult<PulseTime> {
        input.validate()?;

        let iq = input.iq();
        let denominator = input.denominator();
        if denominator == 0.0 {
            log::debug!("Pulse time: zero denominator for {:?}", input);
            return Err(CalcError::DivisionByZero);
        }

        let tq = Minutes::new(input.k * 60.0 * 1000.0 / denominator);
        if !tq.value().is_finite() {
            return Err(CalcError::Arithmetic(format!(
                "Tq is not a finite duration (denominator {:e})",
                denominator
            )));
        }

        let total_seconds: Seconds = tq.to::<Second>();
        let secs = total_seconds.value();
        if secs >= WHOLE_SECONDS_LIMIT {
            return Err(CalcError::Arithmetic(format!(
                "Tq of {:e} s is too large to report in whole seconds",
                secs
            )));
        }
        let advisory_threshold =
            (tq.value() > self.advisory_threshold.value()).then_some(self.advisory_threshold);
        if advisory_threshold.is_some() {
            log::info!(
                "Pulse time {:.2} min exceeds advisory threshold of {} min",
                tq.value(),
                self.advisory_threshold.value()
            );
        }

        Ok(PulseTime {
            input: *input,
            wiring_label: input.wiring.label().to_string(),
            iq,
            tq,
            total_seconds,
            minutes: (secs / 60.0).trunc() as i64,
            seconds: (secs % 60.0).trunc() as i64,
            advisory_threshold,
        })
    }
}

/// Compute `Tq` with the default advisory threshold.
pub fn compute_pulse_time(input: &PulseTimeInput) -> CalcResult<PulseTime> {
    PulseTimeCalculator::default().compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PhaseWiring;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_meter() {
        let tq = compute_pulse_time(&PulseTimeInput::default()).unwrap();
        assert_relative_eq!(tq.iq, 0.02, epsilon = 1e-12);
        assert_relative_eq!(tq.tq.value(), 1.1 * 60_000.0 / 4600.0, epsilon = 1e-9);
        assert_eq!(tq.minutes, 14);
        assert_eq!(tq.seconds, 20);
        assert_eq!(tq.whole_seconds(), 860);
        assert!(!tq.needs_review());
    }

    #[test]
    fn test_report_text() {
        let tq = compute_pulse_time(&PulseTimeInput::default()).unwrap();
        let expected = "Tq ≈ 14 min 20 sec (~860 sec)\n\
                        \n\
                        Parameters:\n\
                        Startup time coefficient k = 1.1\n\
                        Meter constant C = 1000 imp/kWh\n\
                        Coefficient m = single-phase (1)\n\
                        Rated voltage Un = 230 V\n\
                        Rated current Ib = 5 A\n\
                        Startup current Iq = 0.020 A (0.40%)";
        assert_eq!(tq.to_string(), expected);
    }

    #[test]
    fn test_three_phase_wiring() {
        let input = PulseTimeInput {
            wiring: PhaseWiring::ThreePhaseFourWire,
            ..Default::default()
        };
        let tq = compute_pulse_time(&input).unwrap();
        // Three times the denominator, a third of the duration
        assert_relative_eq!(tq.tq.value(), 1.1 * 60_000.0 / 13_800.0, epsilon = 1e-9);
        assert_eq!(tq.minutes, 4);
        assert_eq!(tq.seconds, 46);
        assert!(tq.to_string().contains("Coefficient m = three-phase-four-wire (3)"));
    }

    #[test]
    fn test_advisory_over_an_hour() {
        // 0.05 % of 5 A gives 1.1 * 60000 / 575 ≈ 114.78 min
        let input = PulseTimeInput {
            iq_percent: 0.05,
            ..Default::default()
        };
        let tq = compute_pulse_time(&input).unwrap();
        assert!(tq.needs_review());
        assert_eq!(tq.minutes, 114);
        let report = tq.to_string();
        assert!(report.starts_with("⚠️ Tq exceeds 60 minutes, please review the parameters.\n"));
        assert!(report.contains("A (0.05%)"));
    }

    #[test]
    fn test_custom_threshold() {
        let calculator = PulseTimeCalculator::new(Minutes::new(10.0));
        let tq = calculator.compute(&PulseTimeInput::default()).unwrap();
        assert!(tq.needs_review());
        assert!(tq.to_string().starts_with("⚠️ Tq exceeds 10 minutes"));
    }

    #[test]
    fn test_exactly_at_threshold_has_no_advisory() {
        let input = PulseTimeInput::default();
        let tq = compute_pulse_time(&input).unwrap().tq.value();

        let at_threshold = PulseTimeCalculator::new(Minutes::new(tq));
        assert!(!at_threshold.compute(&input).unwrap().needs_review());

        let just_below = PulseTimeCalculator::new(Minutes::new(f64::from_bits(tq.to_bits() - 1)));
        assert!(just_below.compute(&input).unwrap().needs_review());
    }

    #[test]
    fn test_zero_denominator() {
        for input in [
            PulseTimeInput { ib: 0.0, ..Default::default() },
            PulseTimeInput { un: 0.0, ..Default::default() },
            PulseTimeInput { c: 0.0, ..Default::default() },
            PulseTimeInput { iq_percent: 0.0, ..Default::default() },
        ] {
            assert_eq!(compute_pulse_time(&input), Err(CalcError::DivisionByZero));
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let input = PulseTimeInput { k: -1.0, ..Default::default() };
        assert!(matches!(
            compute_pulse_time(&input),
            Err(CalcError::InvalidParameter { name: "k", .. })
        ));

        let input = PulseTimeInput { ib: f64::INFINITY, ..Default::default() };
        assert!(matches!(
            compute_pulse_time(&input),
            Err(CalcError::InvalidParameter { name: "ib", .. })
        ));
    }

    #[test]
    fn test_too_many_seconds() {
        let input = PulseTimeInput::new(1e20, 1000.0, PhaseWiring::SinglePhase, 230.0, 5.0, 0.4);
        assert!(matches!(compute_pulse_time(&input), Err(CalcError::Arithmetic(_))));
    }

    #[test]
    fn test_custom_wiring_label() {
        let tq = compute_pulse_time(&PulseTimeInput::default())
            .unwrap()
            .with_wiring_label("two-phase");
        assert!(tq.to_string().contains("Coefficient m = two-phase (1)\n"));
    }

    #[test]
    fn test_non_finite_result() {
        let input = PulseTimeInput::new(1e300, 1e-300, PhaseWiring::SinglePhase, 1e-5, 1.0, 100.0);
        assert!(matches!(compute_pulse_time(&input), Err(CalcError::Arithmetic(_))));
    }
}

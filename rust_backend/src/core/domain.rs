//! Domain models for the meter calculators.
//!
//! This module provides the input record of the pulse-time calculation and the two
//! categorical selectors exposed by the UI: the phase wiring of the meter (which
//! fixes the `m` coefficient) and the direction of the cosine/angle conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{CalcError, CalcResult};

/// Phase configuration of the metered installation.
///
/// Each variant maps to the `m` coefficient of the power formula through a fixed
/// lookup table, so an unknown configuration can only show up as a label coming
/// from the UI.
///
/// # Examples
///
/// ```
/// use meter_tools::core::PhaseWiring;
///
/// assert_eq!(PhaseWiring::ThreePhaseThreeWire.coefficient(), 1.7321);
/// assert_eq!(PhaseWiring::from_label("three-phase-four-wire"), PhaseWiring::ThreePhaseFourWire);
/// // Unknown labels fall back to single-phase
/// assert_eq!(PhaseWiring::from_label("two-phase"), PhaseWiring::SinglePhase);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseWiring {
    #[default]
    SinglePhase,
    ThreePhaseThreeWire,
    ThreePhaseFourWire,
}

struct WiringEntry {
    wiring: PhaseWiring,
    label: &'static str,
    display_label: &'static str,
    coefficient: f64,
}

// √3 is kept at four decimals, the precision the meter tables are printed with.
static WIRING_TABLE: [WiringEntry; 3] = [
    WiringEntry {
        wiring: PhaseWiring::SinglePhase,
        label: "single-phase",
        display_label: "single-phase = 1",
        coefficient: 1.0,
    },
    WiringEntry {
        wiring: PhaseWiring::ThreePhaseThreeWire,
        label: "three-phase-three-wire",
        display_label: "three-phase three-wire = √3",
        coefficient: 1.7321,
    },
    WiringEntry {
        wiring: PhaseWiring::ThreePhaseFourWire,
        label: "three-phase-four-wire",
        display_label: "three-phase four-wire = 3",
        coefficient: 3.0,
    },
];

impl PhaseWiring {
    /// All wiring variants in UI order.
    pub const ALL: [PhaseWiring; 3] = [
        PhaseWiring::SinglePhase,
        PhaseWiring::ThreePhaseThreeWire,
        PhaseWiring::ThreePhaseFourWire,
    ];

    fn entry(self) -> &'static WiringEntry {
        // The table is indexed in declaration order
        &WIRING_TABLE[self as usize]
    }

    /// The `m` coefficient used in the pulse-time denominator.
    pub fn coefficient(self) -> f64 {
        self.entry().coefficient
    }

    /// Machine label, e.g. `three-phase-three-wire`.
    pub fn label(self) -> &'static str {
        self.entry().label
    }

    /// Label shown by the UI selector, e.g. `three-phase three-wire = √3`.
    pub fn display_label(self) -> &'static str {
        self.entry().display_label
    }

    /// Match a canonical or display label, ignoring surrounding whitespace.
    pub fn lookup(label: &str) -> Option<PhaseWiring> {
        let label = label.trim();
        WIRING_TABLE
            .iter()
            .find(|e| e.label.eq_ignore_ascii_case(label) || e.display_label == label)
            .map(|e| e.wiring)
    }

    /// Resolve a UI label, defaulting to single-phase for unknown labels.
    pub fn from_label(label: &str) -> PhaseWiring {
        Self::lookup(label).unwrap_or_else(|| {
            log::warn!(
                "Unknown wiring label '{}', falling back to {}",
                label,
                PhaseWiring::SinglePhase
            );
            PhaseWiring::SinglePhase
        })
    }
}

impl fmt::Display for PhaseWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhaseWiring {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| {
            CalcError::invalid_parameter("m_label", format!("unknown wiring '{}'", s))
        })
    }
}

/// Direction of the cosine/angle conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionMode {
    /// Cosine value → the two angles in `[0, 360]` sharing it
    CosineToAngle,
    /// Angle in degrees → cosine value
    AngleToCosine,
}

impl ConversionMode {
    pub const ALL: [ConversionMode; 2] = [ConversionMode::CosineToAngle, ConversionMode::AngleToCosine];

    /// Label shown by the UI selector.
    pub fn label(self) -> &'static str {
        match self {
            ConversionMode::CosineToAngle => "cosine→angle",
            ConversionMode::AngleToCosine => "angle→cosine",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ConversionMode::CosineToAngle => &["cosine→angle", "cosine->angle", "cos-to-angle"],
            ConversionMode::AngleToCosine => &["angle→cosine", "angle->cosine", "angle-to-cos"],
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConversionMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.aliases().iter().any(|a| a.eq_ignore_ascii_case(needle)))
            .ok_or_else(|| CalcError::InvalidMode(s.to_string()))
    }
}

/// Parameters of a startup pulse-time calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseTimeInput {
    /// Startup time coefficient
    pub k: f64,
    /// Meter constant in imp/kWh
    pub c: f64,
    pub wiring: PhaseWiring,
    /// Rated voltage in V
    pub un: f64,
    /// Rated current in A
    pub ib: f64,
    /// Startup current as a percentage of `ib` (0.4 means 0.4 %)
    pub iq_percent: f64,
}

impl Default for PulseTimeInput {
    fn default() -> Self {
        Self {
            k: 1.1,
            c: 1000.0,
            wiring: PhaseWiring::SinglePhase,
            un: 230.0,
            ib: 5.0,
            iq_percent: 0.4,
        }
    }
}

impl PulseTimeInput {
    pub fn new(k: f64, c: f64, wiring: PhaseWiring, un: f64, ib: f64, iq_percent: f64) -> Self {
        Self {
            k,
            c,
            wiring,
            un,
            ib,
            iq_percent,
        }
    }

    /// Startup current in amperes.
    pub fn iq(&self) -> f64 {
        self.ib * (self.iq_percent / 100.0)
    }

    /// `c * m * un * iq`, the divisor of the Tq formula.
    pub fn denominator(&self) -> f64 {
        self.c * self.wiring.coefficient() * self.un * self.iq()
    }

    /// Reject non-finite and negative values.
    ///
    /// Zero is accepted everywhere except for `k`; a zero factor in the denominator is
    /// reported later as [`CalcError::DivisionByZero`].
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("k", self.k),
            ("c", self.c),
            ("un", self.un),
            ("ib", self.ib),
            ("iq_percent", self.iq_percent),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CalcError::invalid_parameter(name, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(CalcError::invalid_parameter(name, "must not be negative"));
            }
        }
        if self.k == 0.0 {
            return Err(CalcError::invalid_parameter("k", "must be positive"));
        }
        Ok(())
    }
}

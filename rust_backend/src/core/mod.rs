//! Core domain models for the meter calculators.
//!
//! This module defines the input records, categorical selectors and the error type
//! shared by the pulse-time calculator and the cosine/angle converter, together with
//! the helpers that turn results into the text shown by the UI.

pub mod domain;
pub mod error;
pub mod format;

pub use domain::{ConversionMode, PhaseWiring, PulseTimeInput};
pub use error::{CalcError, CalcResult};
pub use format::{display_float, render, round_to, ERROR_MARKER, WARNING_MARKER};

//! Calculator algorithms.
//!
//! # Components
//!
//! - [`pulse_time`]: startup-current pulse time `Tq` of an electricity meter
//! - [`cosine`]: cosine value ↔ angle conversion
//!
//! Both are pure functions returning [`CalcResult`](crate::core::CalcResult); turning a
//! result into display text is left to [`crate::services`].

pub mod cosine;
pub mod pulse_time;

pub use cosine::{angle_to_cosine, convert, convert_labeled, cosine_to_angles, Conversion};
pub use pulse_time::{compute_pulse_time, PulseTime, PulseTimeCalculator, DEFAULT_ADVISORY_THRESHOLD};

//! Service layer between the calculators and the UI bindings.
//!
//! Services resolve UI labels, pick up the process-wide configuration and turn
//! calculator results into display text. Both the Python routes and the
//! command-line front end go through this layer.

pub mod calculator;

pub use calculator::{compute_tq, compute_tq_with, convert_cosine_angle};

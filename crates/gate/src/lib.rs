//! One-time legal-disclaimer gate for the Altimeter panel.

pub mod disclaimer;

pub use disclaimer::{DISCLAIMER_KEY, DisclaimerGate, GateState};

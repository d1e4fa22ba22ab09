//! Risk-metric derivation for the Altimeter panel.
//!
//! Pure, synchronous computation over already-fetched snapshots: the
//! composing layer calls [`risk::RiskEvaluator::evaluate`] whenever an input
//! changes and hands the resulting [`risk::RiskDisplay`] to the presentation
//! layer.

pub mod format;
pub mod risk;

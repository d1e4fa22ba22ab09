//! Composing layer for the Altimeter panel: wires the risk evaluator and the
//! disclaimer gate to externally supplied snapshots.

pub mod session;

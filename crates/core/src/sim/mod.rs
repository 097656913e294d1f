//! Simulation: the `Simulator`, the memory-image loader, and the trace sink.

/// Memory image loading and workload staging.
pub mod loader;
/// The top-level simulator.
pub mod simulator;
/// Cycle-tagged trace output.
pub mod trace;

//! CPU core: architectural state, pipeline machinery, and execution units.

/// Architectural state (general-purpose register file).
pub mod arch;
/// Pipeline latches, control signals, hazard logic, and the five stages.
pub mod pipeline;
/// Execution units: ALU, word memories, multiplier, divider, branch prediction.
pub mod units;

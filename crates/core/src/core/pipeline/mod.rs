//! Pipeline machinery: latches, control signals, hazards, and the stages.

/// Data hazard detection and forwarding-source selection.
pub mod hazards;
/// Inter-stage pipeline latches.
pub mod latches;
/// Control signals and operation types.
pub mod signals;
/// The five stage functions (IF, ID, EX, MEM, WB).
pub mod stages;

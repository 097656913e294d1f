//! Execution units.

/// Integer ALU.
pub mod alu;
/// Branch prediction (BTB + tournament predictor).
pub mod bru;
/// Multi-cycle radix-4 divider.
pub mod div;
/// Word-addressed instruction/data memories.
pub mod mem;
/// 3-cycle pipelined multiplier.
pub mod mul;

//! The five pipeline stage functions.
//!
//! Each stage is a function over the *current* latch values that returns the
//! next value of the latch it feeds; the simulator commits all of them at
//! the cycle edge. Evaluation runs WB → MEM → EX → ID → IF so every stage
//! observes pre-edge state.

/// Instruction decode (ID).
pub mod decode;
/// Execute (EX): forwarding, ALU, branches, multiply/divide dispatch.
pub mod execute;
/// Instruction fetch (IF).
pub mod fetch;
/// Memory access (MEM).
pub mod memory;
/// Write-back (WB).
pub mod writeback;

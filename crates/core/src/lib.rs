//! RV32IM pipeline simulator library.
//!
//! This crate implements a cycle-accurate five-stage in-order RV32IM core:
//! 1. **Pipeline:** IF, ID, EX, MEM, WB stages with forwarding, stalls, and flushes.
//! 2. **Units:** ALU, word-addressed memories, 3-cycle multiplier, radix-4 divider,
//!    BTB + tournament branch predictor.
//! 3. **ISA:** Truth-table decoding for RV32I and the complete M extension.
//! 4. **Simulation:** `Simulator` (owns all state), hex-image loader, cycle-tagged
//!    trace, configuration, and statistics.

/// Common types and constants (instruction fields, simulation errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core: architectural state, pipeline, and execution units.
pub mod core;
/// Instruction set: decode truth table, opcode constants, ABI names.
pub mod isa;
/// Simulation: `Simulator`, image loader, and trace sink.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Simulation error type; everything fatal funnels through this.
pub use crate::common::error::SimError;
/// Top-level simulator; owns the register file, memories, units, and latches.
pub use crate::sim::simulator::Simulator;

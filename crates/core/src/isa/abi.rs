//! RISC-V ABI register names.
//!
//! Indices of the registers the simulator itself needs to name: the zero
//! register and the stack pointer (initialized at reset). The full ABI set is
//! listed for tests and diagnostics.

/// Hard-wired zero register (x0).
pub const REG_ZERO: usize = 0;
/// Return address (x1).
pub const REG_RA: usize = 1;
/// Stack pointer (x2).
pub const REG_SP: usize = 2;
/// First argument / return value (x10).
pub const REG_A0: usize = 10;
/// Second argument (x11).
pub const REG_A1: usize = 11;

//! Instruction set definitions for RV32IM.
//!
//! - `rv32i`: base integer opcode and function-code constants.
//! - `rv32m`: multiply/divide extension function codes.
//! - `abi`: ABI register names.
//! - `decode`: the declarative truth-table decoder.

/// ABI register name constants.
pub mod abi;
/// Truth-table instruction decoder.
pub mod decode;
/// Base integer instruction set constants.
pub mod rv32i;
/// Multiply/divide extension constants.
pub mod rv32m;

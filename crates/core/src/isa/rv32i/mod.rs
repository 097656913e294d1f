//! RISC-V Base Integer Instruction Set (RV32I).
//!
//! Constants for the base ISA, split the conventional way:
//! - `opcodes`: major 7-bit opcodes.
//! - `funct3`: 3-bit minor function codes, grouped per opcode.
//! - `funct7`: 7-bit function codes distinguishing ADD/SUB and SRL/SRA.

/// Function code 3 definitions for RV32I.
pub mod funct3;
/// Function code 7 definitions for RV32I.
pub mod funct7;
/// RV32I major opcodes.
pub mod opcodes;

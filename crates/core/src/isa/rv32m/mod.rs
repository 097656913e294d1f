//! RISC-V Multiply/Divide Extension (M).
//!
//! The 'M' extension shares the `OP_REG` opcode with base integer arithmetic
//! and is distinguished by funct7 == 1 (`M_EXTENSION`). funct3 selects the
//! operation.

/// Function code 3 definitions for multiply/divide operations.
pub mod funct3;

/// funct7 value marking an M-extension instruction under `OP_REG`.
pub const M_EXTENSION: u32 = 0x01;

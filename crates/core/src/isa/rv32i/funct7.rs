//! RV32I funct7 constants (instruction bits 31:25).

/// Base variant (ADD, SRL, SLL, ...).
pub const BASE: u32 = 0x00;
/// Alternate variant (SUB, SRA).
pub const SUB_SRA: u32 = 0x20;

// funct12 values for SYSTEM instructions (bits 31:20).

/// ECALL funct12 encoding.
pub const F12_ECALL: u32 = 0x000;
/// EBREAK funct12 encoding.
pub const F12_EBREAK: u32 = 0x001;

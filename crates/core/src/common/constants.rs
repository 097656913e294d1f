//! Instruction field layout and well-known encodings.
//!
//! RV32 instructions pack their fields at fixed bit positions regardless of
//! format; these shifts and masks are shared by the decoder, the hazard unit
//! (which extracts source indices from raw words), and the test builders.

/// Bit mask for the 7-bit opcode field (bits 6:0).
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit shift for the destination register field.
pub const RD_SHIFT: u32 = 7;
/// Bit mask for the 5-bit destination register field.
pub const RD_MASK: u32 = 0x1F;

/// Bit shift for the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;
/// Bit mask for the 3-bit funct3 field.
pub const FUNCT3_MASK: u32 = 0x7;

/// Bit shift for the first source register field.
pub const RS1_SHIFT: u32 = 15;
/// Bit mask for the 5-bit first source register field.
pub const RS1_MASK: u32 = 0x1F;

/// Bit shift for the second source register field.
pub const RS2_SHIFT: u32 = 20;
/// Bit mask for the 5-bit second source register field.
pub const RS2_MASK: u32 = 0x1F;

/// Bit shift for the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;
/// Bit mask for the 7-bit funct7 field.
pub const FUNCT7_MASK: u32 = 0x7F;

/// Bit shift for the funct12 field (SYSTEM instructions).
pub const FUNCT12_SHIFT: u32 = 20;
/// Bit mask for the 12-bit funct12 field.
pub const FUNCT12_MASK: u32 = 0xFFF;

/// Canonical NOP encoding (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;

/// Size of one instruction in bytes. The core fetches aligned 32-bit words.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

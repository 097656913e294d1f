//! RV32I major opcode constants (instruction bits 6:0).

/// Load upper immediate (U-type).
pub const OP_LUI: u32 = 0x37;
/// Add upper immediate to PC (U-type).
pub const OP_AUIPC: u32 = 0x17;
/// Jump and link (J-type).
pub const OP_JAL: u32 = 0x6F;
/// Jump and link register (I-type).
pub const OP_JALR: u32 = 0x67;
/// Conditional branches (B-type).
pub const OP_BRANCH: u32 = 0x63;
/// Loads (I-type).
pub const OP_LOAD: u32 = 0x03;
/// Stores (S-type).
pub const OP_STORE: u32 = 0x23;
/// Integer register-immediate operations (I-type).
pub const OP_IMM: u32 = 0x13;
/// Integer register-register operations (R-type).
pub const OP_REG: u32 = 0x33;
/// Memory ordering (FENCE); a NOP for this single-core simulator.
pub const OP_MISC_MEM: u32 = 0x0F;
/// System instructions (ECALL/EBREAK).
pub const OP_SYSTEM: u32 = 0x73;

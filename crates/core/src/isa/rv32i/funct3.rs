//! RV32I funct3 constants (instruction bits 14:12), grouped per opcode.

// Branches (OP_BRANCH).

/// Branch if equal.
pub const BEQ: u32 = 0x0;
/// Branch if not equal.
pub const BNE: u32 = 0x1;
/// Branch if less than (signed).
pub const BLT: u32 = 0x4;
/// Branch if greater or equal (signed).
pub const BGE: u32 = 0x5;
/// Branch if less than (unsigned).
pub const BLTU: u32 = 0x6;
/// Branch if greater or equal (unsigned).
pub const BGEU: u32 = 0x7;

// Loads (OP_LOAD).

/// Load byte (sign-extended).
pub const LB: u32 = 0x0;
/// Load half-word (sign-extended).
pub const LH: u32 = 0x1;
/// Load word.
pub const LW: u32 = 0x2;
/// Load byte (zero-extended).
pub const LBU: u32 = 0x4;
/// Load half-word (zero-extended).
pub const LHU: u32 = 0x5;

// Stores (OP_STORE).

/// Store byte.
pub const SB: u32 = 0x0;
/// Store half-word.
pub const SH: u32 = 0x1;
/// Store word.
pub const SW: u32 = 0x2;

// Register-immediate and register-register ALU ops (OP_IMM / OP_REG).

/// ADDI / ADD / SUB.
pub const ADD_SUB: u32 = 0x0;
/// SLLI / SLL.
pub const SLL: u32 = 0x1;
/// SLTI / SLT.
pub const SLT: u32 = 0x2;
/// SLTIU / SLTU.
pub const SLTU: u32 = 0x3;
/// XORI / XOR.
pub const XOR: u32 = 0x4;
/// SRLI / SRAI / SRL / SRA.
pub const SRL_SRA: u32 = 0x5;
/// ORI / OR.
pub const OR: u32 = 0x6;
/// ANDI / AND.
pub const AND: u32 = 0x7;

// System (OP_SYSTEM).

/// ECALL / EBREAK (distinguished by funct12).
pub const PRIV: u32 = 0x0;

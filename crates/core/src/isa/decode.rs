//! RV32IM truth-table instruction decoder.
//!
//! One declarative [`Row`] per instruction, keyed on (opcode, funct3, funct7);
//! SYSTEM rows additionally match funct12 to split ECALL from EBREAK. Exactly
//! one row matches any legal encoding (a tested invariant), so a first-match
//! scan is equivalent to the AND-OR combine a hardware decoder would do.
//! Unknown encodings decode to `None`; the decode stage substitutes a NOP.

use crate::common::constants::{
    FUNCT3_MASK, FUNCT3_SHIFT, FUNCT7_MASK, FUNCT7_SHIFT, FUNCT12_MASK, FUNCT12_SHIFT,
    OPCODE_MASK, RD_MASK, RD_SHIFT, RS1_MASK, RS1_SHIFT, RS2_MASK, RS2_SHIFT,
};
use crate::core::pipeline::signals::{
    AluOp, BranchKind, ControlSignals, MduOp, MemOp, MemWidth, OpASrc, OpBSrc,
};
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::isa::rv32m;

/// Immediate encoding format of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImmFormat {
    /// No immediate (R-type, SYSTEM).
    None,
    /// I-type: bits 31:20, sign-extended.
    I,
    /// S-type: bits 31:25 ++ 11:7, sign-extended.
    S,
    /// B-type: 13-bit even offset, sign-extended.
    B,
    /// U-type: bits 31:12 shifted into the high 20 bits.
    U,
    /// J-type: 21-bit even offset, sign-extended.
    J,
}

/// Match predicate of one truth-table row.
#[derive(Clone, Copy, Debug)]
struct Pattern {
    opcode: u32,
    funct3: Option<u32>,
    funct7: Option<u32>,
    funct12: Option<u32>,
}

impl Pattern {
    const fn matches(&self, inst: u32) -> bool {
        if inst & OPCODE_MASK != self.opcode {
            return false;
        }
        if let Some(f3) = self.funct3 {
            if (inst >> FUNCT3_SHIFT) & FUNCT3_MASK != f3 {
                return false;
            }
        }
        if let Some(f7) = self.funct7 {
            if (inst >> FUNCT7_SHIFT) & FUNCT7_MASK != f7 {
                return false;
            }
        }
        if let Some(f12) = self.funct12 {
            if (inst >> FUNCT12_SHIFT) & FUNCT12_MASK != f12 {
                return false;
            }
        }
        true
    }
}

/// One row of the decoder truth table.
#[derive(Clone, Copy, Debug)]
pub struct Row {
    /// Mnemonic, for traces and diagnostics.
    pub name: &'static str,
    pattern: Pattern,
    /// Immediate format.
    pub imm: ImmFormat,
    /// Control signals this row drives.
    pub ctrl: ControlSignals,
}

impl Row {
    /// Whether this row matches the given instruction word.
    pub const fn matches(&self, inst: u32) -> bool {
        self.pattern.matches(inst)
    }
}

/// A decoded instruction: control signals plus extracted fields.
#[derive(Clone, Copy, Debug)]
pub struct Decoded {
    /// Mnemonic of the matched row.
    pub name: &'static str,
    /// Control signals.
    pub ctrl: ControlSignals,
    /// Destination register (0 when the instruction does not write one).
    pub rd: usize,
    /// First source register field.
    pub rs1: usize,
    /// Second source register field.
    pub rs2: usize,
    /// Sign-extended immediate, 0 for `ImmFormat::None`.
    pub imm: i32,
}

const NOP_CTRL: ControlSignals = ControlSignals::NOP;

const fn pat(opcode: u32, funct3: Option<u32>, funct7: Option<u32>) -> Pattern {
    Pattern {
        opcode,
        funct3,
        funct7,
        funct12: None,
    }
}

const fn alu_imm(name: &'static str, f3: u32, alu: AluOp) -> Row {
    Row {
        name,
        pattern: pat(opcodes::OP_IMM, Some(f3), None),
        imm: ImmFormat::I,
        ctrl: ControlSignals {
            reg_write: true,
            alu,
            a_src: OpASrc::Reg1,
            b_src: OpBSrc::Imm,
            uses_rs1: true,
            ..NOP_CTRL
        },
    }
}

const fn shift_imm(name: &'static str, f3: u32, f7: u32, alu: AluOp) -> Row {
    Row {
        name,
        pattern: pat(opcodes::OP_IMM, Some(f3), Some(f7)),
        imm: ImmFormat::I,
        ctrl: ControlSignals {
            reg_write: true,
            alu,
            a_src: OpASrc::Reg1,
            b_src: OpBSrc::Imm,
            uses_rs1: true,
            ..NOP_CTRL
        },
    }
}

const fn alu_reg(name: &'static str, f3: u32, f7: u32, alu: AluOp) -> Row {
    Row {
        name,
        pattern: pat(opcodes::OP_REG, Some(f3), Some(f7)),
        imm: ImmFormat::None,
        ctrl: ControlSignals {
            reg_write: true,
            alu,
            a_src: OpASrc::Reg1,
            b_src: OpBSrc::Reg2,
            uses_rs1: true,
            uses_rs2: true,
            ..NOP_CTRL
        },
    }
}

const fn branch(name: &'static str, f3: u32, kind: BranchKind) -> Row {
    Row {
        name,
        pattern: pat(opcodes::OP_BRANCH, Some(f3), None),
        imm: ImmFormat::B,
        ctrl: ControlSignals {
            branch: kind,
            uses_rs1: true,
            uses_rs2: true,
            ..NOP_CTRL
        },
    }
}

const fn load(name: &'static str, f3: u32, width: MemWidth, signed_load: bool) -> Row {
    Row {
        name,
        pattern: pat(opcodes::OP_LOAD, Some(f3), None),
        imm: ImmFormat::I,
        ctrl: ControlSignals {
            reg_write: true,
            mem_op: MemOp::Load,
            width,
            signed_load,
            alu: AluOp::Add,
            a_src: OpASrc::Reg1,
            b_src: OpBSrc::Imm,
            uses_rs1: true,
            ..NOP_CTRL
        },
    }
}

const fn store(name: &'static str, f3: u32, width: MemWidth) -> Row {
    Row {
        name,
        pattern: pat(opcodes::OP_STORE, Some(f3), None),
        imm: ImmFormat::S,
        ctrl: ControlSignals {
            mem_op: MemOp::Store,
            width,
            alu: AluOp::Add,
            a_src: OpASrc::Reg1,
            b_src: OpBSrc::Imm,
            uses_rs1: true,
            uses_rs2: true,
            ..NOP_CTRL
        },
    }
}

const fn mdu(name: &'static str, f3: u32, op: MduOp) -> Row {
    Row {
        name,
        pattern: pat(opcodes::OP_REG, Some(f3), Some(rv32m::M_EXTENSION)),
        imm: ImmFormat::None,
        ctrl: ControlSignals {
            reg_write: true,
            alu: AluOp::Pass,
            a_src: OpASrc::Reg1,
            b_src: OpBSrc::Reg2,
            uses_rs1: true,
            uses_rs2: true,
            mdu: op,
            ..NOP_CTRL
        },
    }
}

/// The RV32IM truth table. Public so tests can prove match uniqueness.
pub static TABLE: [Row; 48] = [
    Row {
        name: "lui",
        pattern: pat(opcodes::OP_LUI, None, None),
        imm: ImmFormat::U,
        ctrl: ControlSignals {
            reg_write: true,
            alu: AluOp::Add,
            a_src: OpASrc::Zero,
            b_src: OpBSrc::Imm,
            ..NOP_CTRL
        },
    },
    Row {
        name: "auipc",
        pattern: pat(opcodes::OP_AUIPC, None, None),
        imm: ImmFormat::U,
        ctrl: ControlSignals {
            reg_write: true,
            alu: AluOp::Add,
            a_src: OpASrc::Pc,
            b_src: OpBSrc::Imm,
            ..NOP_CTRL
        },
    },
    Row {
        name: "jal",
        pattern: pat(opcodes::OP_JAL, None, None),
        imm: ImmFormat::J,
        ctrl: ControlSignals {
            reg_write: true,
            alu: AluOp::Add,
            a_src: OpASrc::Pc,
            b_src: OpBSrc::Four,
            branch: BranchKind::Jal,
            ..NOP_CTRL
        },
    },
    Row {
        name: "jalr",
        pattern: pat(opcodes::OP_JALR, Some(0x0), None),
        imm: ImmFormat::I,
        ctrl: ControlSignals {
            reg_write: true,
            alu: AluOp::Add,
            a_src: OpASrc::Pc,
            b_src: OpBSrc::Four,
            branch: BranchKind::Jalr,
            uses_rs1: true,
            ..NOP_CTRL
        },
    },
    branch("beq", funct3::BEQ, BranchKind::Beq),
    branch("bne", funct3::BNE, BranchKind::Bne),
    branch("blt", funct3::BLT, BranchKind::Blt),
    branch("bge", funct3::BGE, BranchKind::Bge),
    branch("bltu", funct3::BLTU, BranchKind::Bltu),
    branch("bgeu", funct3::BGEU, BranchKind::Bgeu),
    load("lb", funct3::LB, MemWidth::Byte, true),
    load("lh", funct3::LH, MemWidth::Half, true),
    load("lw", funct3::LW, MemWidth::Word, false),
    load("lbu", funct3::LBU, MemWidth::Byte, false),
    load("lhu", funct3::LHU, MemWidth::Half, false),
    store("sb", funct3::SB, MemWidth::Byte),
    store("sh", funct3::SH, MemWidth::Half),
    store("sw", funct3::SW, MemWidth::Word),
    alu_imm("addi", funct3::ADD_SUB, AluOp::Add),
    alu_imm("slti", funct3::SLT, AluOp::Slt),
    alu_imm("sltiu", funct3::SLTU, AluOp::Sltu),
    alu_imm("xori", funct3::XOR, AluOp::Xor),
    alu_imm("ori", funct3::OR, AluOp::Or),
    alu_imm("andi", funct3::AND, AluOp::And),
    shift_imm("slli", funct3::SLL, funct7::BASE, AluOp::Sll),
    shift_imm("srli", funct3::SRL_SRA, funct7::BASE, AluOp::Srl),
    shift_imm("srai", funct3::SRL_SRA, funct7::SUB_SRA, AluOp::Sra),
    alu_reg("add", funct3::ADD_SUB, funct7::BASE, AluOp::Add),
    alu_reg("sub", funct3::ADD_SUB, funct7::SUB_SRA, AluOp::Sub),
    alu_reg("sll", funct3::SLL, funct7::BASE, AluOp::Sll),
    alu_reg("slt", funct3::SLT, funct7::BASE, AluOp::Slt),
    alu_reg("sltu", funct3::SLTU, funct7::BASE, AluOp::Sltu),
    alu_reg("xor", funct3::XOR, funct7::BASE, AluOp::Xor),
    alu_reg("srl", funct3::SRL_SRA, funct7::BASE, AluOp::Srl),
    alu_reg("sra", funct3::SRL_SRA, funct7::SUB_SRA, AluOp::Sra),
    alu_reg("or", funct3::OR, funct7::BASE, AluOp::Or),
    alu_reg("and", funct3::AND, funct7::BASE, AluOp::And),
    mdu("mul", rv32m::funct3::MUL, MduOp::Mul),
    mdu("mulh", rv32m::funct3::MULH, MduOp::Mulh),
    mdu("mulhsu", rv32m::funct3::MULHSU, MduOp::Mulhsu),
    mdu("mulhu", rv32m::funct3::MULHU, MduOp::Mulhu),
    mdu("div", rv32m::funct3::DIV, MduOp::Div),
    mdu("divu", rv32m::funct3::DIVU, MduOp::Divu),
    mdu("rem", rv32m::funct3::REM, MduOp::Rem),
    mdu("remu", rv32m::funct3::REMU, MduOp::Remu),
    // FENCE orders nothing on a single in-order core.
    Row {
        name: "fence",
        pattern: pat(opcodes::OP_MISC_MEM, Some(0x0), None),
        imm: ImmFormat::None,
        ctrl: NOP_CTRL,
    },
    Row {
        name: "ecall",
        pattern: Pattern {
            opcode: opcodes::OP_SYSTEM,
            funct3: Some(funct3::PRIV),
            funct7: None,
            funct12: Some(funct7::F12_ECALL),
        },
        imm: ImmFormat::None,
        ctrl: NOP_CTRL,
    },
    Row {
        name: "ebreak",
        pattern: Pattern {
            opcode: opcodes::OP_SYSTEM,
            funct3: Some(funct3::PRIV),
            funct7: None,
            funct12: Some(funct7::F12_EBREAK),
        },
        imm: ImmFormat::None,
        ctrl: ControlSignals {
            halt: true,
            ..NOP_CTRL
        },
    },
];

/// Extracts the destination register field.
pub const fn rd_field(inst: u32) -> usize {
    ((inst >> RD_SHIFT) & RD_MASK) as usize
}

/// Extracts the first source register field.
pub const fn rs1_field(inst: u32) -> usize {
    ((inst >> RS1_SHIFT) & RS1_MASK) as usize
}

/// Extracts the second source register field.
pub const fn rs2_field(inst: u32) -> usize {
    ((inst >> RS2_SHIFT) & RS2_MASK) as usize
}

/// I-type immediate: bits 31:20, sign-extended.
pub const fn imm_i(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// S-type immediate: bits 31:25 ++ 11:7, sign-extended.
pub const fn imm_s(inst: u32) -> i32 {
    let high = (inst as i32) >> 25;
    let low = ((inst >> 7) & 0x1F) as i32;
    (high << 5) | low
}

/// B-type immediate: 13-bit even branch offset, sign-extended.
pub const fn imm_b(inst: u32) -> i32 {
    let bit12 = (inst as i32) >> 31;
    let bit11 = ((inst >> 7) & 0x1) as i32;
    let bits10_5 = ((inst >> 25) & 0x3F) as i32;
    let bits4_1 = ((inst >> 8) & 0xF) as i32;
    (bit12 << 12) | (bit11 << 11) | (bits10_5 << 5) | (bits4_1 << 1)
}

/// U-type immediate: bits 31:12 in the high 20 bits, low 12 bits zero.
pub const fn imm_u(inst: u32) -> i32 {
    (inst & 0xFFFF_F000) as i32
}

/// J-type immediate: 21-bit even jump offset, sign-extended.
pub const fn imm_j(inst: u32) -> i32 {
    let bit20 = (inst as i32) >> 31;
    let bits19_12 = ((inst >> 12) & 0xFF) as i32;
    let bit11 = ((inst >> 20) & 0x1) as i32;
    let bits10_1 = ((inst >> 21) & 0x3FF) as i32;
    (bit20 << 20) | (bits19_12 << 12) | (bit11 << 11) | (bits10_1 << 1)
}

/// Decodes an instruction word against the truth table.
///
/// Returns `None` for encodings no row matches; the decode stage treats that
/// as a NOP and logs a warning. The destination field is forced to 0 for
/// instructions that do not write a register, so downstream stages can rely
/// on `rd == 0` meaning "no writeback".
pub fn decode(inst: u32) -> Option<Decoded> {
    let row = TABLE.iter().find(|row| row.matches(inst))?;
    let imm = match row.imm {
        ImmFormat::None => 0,
        ImmFormat::I => imm_i(inst),
        ImmFormat::S => imm_s(inst),
        ImmFormat::B => imm_b(inst),
        ImmFormat::U => imm_u(inst),
        ImmFormat::J => imm_j(inst),
    };
    Some(Decoded {
        name: row.name,
        ctrl: row.ctrl,
        rd: if row.ctrl.reg_write { rd_field(inst) } else { 0 },
        rs1: rs1_field(inst),
        rs2: rs2_field(inst),
        imm,
    })
}

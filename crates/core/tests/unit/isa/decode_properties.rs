//! Decoder truth-table properties: field extraction, immediate sign
//! extension, control-signal assignment, match uniqueness, and the
//! unknown-encoding fallback.

use crate::common::asm::*;
use rv32pipe_core::core::pipeline::signals::{
    AluOp, BranchKind, MduOp, MemOp, MemWidth, OpASrc, OpBSrc,
};
use rv32pipe_core::isa::decode::{self, TABLE};

fn decoded(inst: u32) -> decode::Decoded {
    match decode::decode(inst) {
        Some(d) => d,
        None => panic!("expected {inst:#010x} to decode"),
    }
}

// ──────────────────────────────────────────────────────────
// Field extraction and immediates
// ──────────────────────────────────────────────────────────

#[test]
fn r_type_fields() {
    let d = decoded(add(3, 4, 5));
    assert_eq!(d.name, "add");
    assert_eq!((d.rd, d.rs1, d.rs2), (3, 4, 5));
    assert_eq!(d.imm, 0);
    assert!(d.ctrl.uses_rs1 && d.ctrl.uses_rs2 && d.ctrl.reg_write);
}

#[test]
fn i_type_immediate_sign_extends() {
    assert_eq!(decoded(addi(1, 2, -1)).imm, -1);
    assert_eq!(decoded(addi(1, 2, 2047)).imm, 2047);
    assert_eq!(decoded(addi(1, 2, -2048)).imm, -2048);
}

#[test]
fn s_type_immediate_reassembles() {
    assert_eq!(decoded(sw(5, -4, 2)).imm, -4);
    assert_eq!(decoded(sw(5, 2047, 2)).imm, 2047);
    let d = decoded(sw(5, -32, 2));
    assert_eq!(d.imm, -32);
    assert_eq!((d.rs1, d.rs2), (2, 5));
}

#[test]
fn b_type_immediate_is_even_and_signed() {
    assert_eq!(decoded(beq(1, 2, -4)).imm, -4);
    assert_eq!(decoded(beq(1, 2, 4094)).imm, 4094);
    assert_eq!(decoded(beq(1, 2, -4096)).imm, -4096);
}

#[test]
fn u_type_immediate_occupies_high_bits() {
    assert_eq!(decoded(lui(1, 0x12345)).imm, 0x1234_5000);
    assert_eq!(decoded(lui(1, 0xFFFFF)).imm as u32, 0xFFFF_F000);
}

#[test]
fn j_type_immediate_is_even_and_signed() {
    assert_eq!(decoded(jal(1, 12)).imm, 12);
    assert_eq!(decoded(jal(1, -8)).imm, -8);
    assert_eq!(decoded(jal(1, 0xFFFFE)).imm, 0xFFFFE);
}

// ──────────────────────────────────────────────────────────
// Control signals
// ──────────────────────────────────────────────────────────

#[test]
fn loads_set_width_and_extension() {
    let d = decoded(lb(1, 2, 0));
    assert_eq!(d.ctrl.mem_op, MemOp::Load);
    assert_eq!(d.ctrl.width, MemWidth::Byte);
    assert!(d.ctrl.signed_load);

    let d = decoded(lhu(1, 2, 0));
    assert_eq!(d.ctrl.width, MemWidth::Half);
    assert!(!d.ctrl.signed_load);

    let d = decoded(lw(1, 2, 0));
    assert_eq!(d.ctrl.width, MemWidth::Word);
}

#[test]
fn stores_consume_rs2_and_write_nothing() {
    let d = decoded(sh(5, 0, 2));
    assert_eq!(d.ctrl.mem_op, MemOp::Store);
    assert_eq!(d.ctrl.width, MemWidth::Half);
    assert!(d.ctrl.uses_rs1 && d.ctrl.uses_rs2);
    assert!(!d.ctrl.reg_write);
    assert_eq!(d.rd, 0, "rd field bits of an S-type are immediate bits");
}

#[test]
fn branches_have_kind_and_no_writeback() {
    for (inst, kind) in [
        (beq(1, 2, 8), BranchKind::Beq),
        (bne(1, 2, 8), BranchKind::Bne),
        (blt(1, 2, 8), BranchKind::Blt),
        (bge(1, 2, 8), BranchKind::Bge),
        (bltu(1, 2, 8), BranchKind::Bltu),
        (bgeu(1, 2, 8), BranchKind::Bgeu),
    ] {
        let d = decoded(inst);
        assert_eq!(d.ctrl.branch, kind);
        assert!(!d.ctrl.reg_write);
        assert_eq!(d.rd, 0);
    }
}

#[test]
fn jumps_link_through_the_alu() {
    let d = decoded(jal(1, 16));
    assert_eq!(d.ctrl.branch, BranchKind::Jal);
    assert_eq!(d.ctrl.a_src, OpASrc::Pc);
    assert_eq!(d.ctrl.b_src, OpBSrc::Four);
    assert!(d.ctrl.reg_write);

    let d = decoded(jalr(1, 5, 0));
    assert_eq!(d.ctrl.branch, BranchKind::Jalr);
    assert!(d.ctrl.uses_rs1);
}

#[test]
fn lui_adds_zero_auipc_adds_pc() {
    assert_eq!(decoded(lui(1, 1)).ctrl.a_src, OpASrc::Zero);
    assert_eq!(decoded(auipc(1, 1)).ctrl.a_src, OpASrc::Pc);
}

#[test]
fn shift_immediates_split_on_funct7() {
    assert_eq!(decoded(slli(1, 2, 5)).ctrl.alu, AluOp::Sll);
    assert_eq!(decoded(srli(1, 2, 5)).ctrl.alu, AluOp::Srl);
    assert_eq!(decoded(srai(1, 2, 5)).ctrl.alu, AluOp::Sra);
}

#[test]
fn m_extension_flavors() {
    for (inst, op) in [
        (mul(1, 2, 3), MduOp::Mul),
        (mulh(1, 2, 3), MduOp::Mulh),
        (mulhsu(1, 2, 3), MduOp::Mulhsu),
        (mulhu(1, 2, 3), MduOp::Mulhu),
        (div(1, 2, 3), MduOp::Div),
        (divu(1, 2, 3), MduOp::Divu),
        (rem(1, 2, 3), MduOp::Rem),
        (remu(1, 2, 3), MduOp::Remu),
    ] {
        let d = decoded(inst);
        assert_eq!(d.ctrl.mdu, op);
        assert!(d.ctrl.reg_write);
    }
    assert!(MduOp::Mulhsu.op1_signed() && !MduOp::Mulhsu.op2_signed());
    assert!(MduOp::Rem.is_remainder() && !MduOp::Div.is_remainder());
}

#[test]
fn system_rows_split_on_funct12() {
    let d = decoded(ecall());
    assert_eq!(d.name, "ecall");
    assert!(!d.ctrl.halt, "ECALL is a NOP in this scope");

    let d = decoded(ebreak());
    assert_eq!(d.name, "ebreak");
    assert!(d.ctrl.halt);
    assert!(!d.ctrl.reg_write);
}

#[test]
fn fence_is_a_nop() {
    let d = decoded(0x0000_000F);
    assert_eq!(d.name, "fence");
    assert!(!d.ctrl.reg_write);
    assert_eq!(d.ctrl.mem_op, MemOp::None);
}

// ──────────────────────────────────────────────────────────
// Table invariants
// ──────────────────────────────────────────────────────────

/// One canonical encoding per table row.
fn canonical_encodings() -> Vec<(&'static str, u32)> {
    vec![
        ("lui", lui(1, 0x12345)),
        ("auipc", auipc(1, 0x12345)),
        ("jal", jal(1, 2048)),
        ("jalr", jalr(1, 2, 4)),
        ("beq", beq(1, 2, 8)),
        ("bne", bne(1, 2, 8)),
        ("blt", blt(1, 2, 8)),
        ("bge", bge(1, 2, 8)),
        ("bltu", bltu(1, 2, 8)),
        ("bgeu", bgeu(1, 2, 8)),
        ("lb", lb(1, 2, 4)),
        ("lh", lh(1, 2, 4)),
        ("lw", lw(1, 2, 4)),
        ("lbu", lbu(1, 2, 4)),
        ("lhu", lhu(1, 2, 4)),
        ("sb", sb(1, 4, 2)),
        ("sh", sh(1, 4, 2)),
        ("sw", sw(1, 4, 2)),
        ("addi", addi(1, 2, 3)),
        ("slti", slti(1, 2, 3)),
        ("sltiu", i_type(0x13, 1, 0x3, 2, 3)),
        ("xori", xori(1, 2, 3)),
        ("ori", ori(1, 2, 3)),
        ("andi", andi(1, 2, 3)),
        ("slli", slli(1, 2, 3)),
        ("srli", srli(1, 2, 3)),
        ("srai", srai(1, 2, 3)),
        ("add", add(1, 2, 3)),
        ("sub", sub(1, 2, 3)),
        ("sll", sll(1, 2, 3)),
        ("slt", slt(1, 2, 3)),
        ("sltu", sltu(1, 2, 3)),
        ("xor", xor(1, 2, 3)),
        ("srl", srl(1, 2, 3)),
        ("sra", sra(1, 2, 3)),
        ("or", or(1, 2, 3)),
        ("and", and(1, 2, 3)),
        ("mul", mul(1, 2, 3)),
        ("mulh", mulh(1, 2, 3)),
        ("mulhsu", mulhsu(1, 2, 3)),
        ("mulhu", mulhu(1, 2, 3)),
        ("div", div(1, 2, 3)),
        ("divu", divu(1, 2, 3)),
        ("rem", rem(1, 2, 3)),
        ("remu", remu(1, 2, 3)),
        ("fence", 0x0000_000F),
        ("ecall", ecall()),
        ("ebreak", ebreak()),
    ]
}

#[test]
fn every_instruction_decodes_to_its_row() {
    for (name, inst) in canonical_encodings() {
        assert_eq!(decoded(inst).name, name, "{inst:#010x}");
    }
}

#[test]
fn exactly_one_row_matches_each_encoding() {
    // First-match lookup is only equivalent to the OR-combine of an AND-OR
    // decode array if no two rows can match the same word.
    for (name, inst) in canonical_encodings() {
        let matches = TABLE.iter().filter(|row| row.matches(inst)).count();
        assert_eq!(matches, 1, "{name} ({inst:#010x}) matched {matches} rows");
    }
}

#[test]
fn unknown_encodings_decode_to_none() {
    assert!(decode::decode(0x0000_0000).is_none());
    assert!(decode::decode(0xFFFF_FFFF).is_none());
    // A-extension AMOADD.W: valid RISC-V, outside RV32IM.
    assert!(decode::decode(0x0062_A02F).is_none());
}

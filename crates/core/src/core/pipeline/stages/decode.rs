//! Instruction Decode (ID) stage.
//!
//! Decodes the fetched word against the truth table, reads rs1/rs2 raw from
//! the register file (forwarding is resolved later, in EX), and attaches the
//! forwarding selectors the hazard unit chose this cycle. The selectors are
//! recomputed every cycle the instruction sits in ID, so they are never
//! stale when a stall finally clears.
//!
//! On stall or flush, ID injects a NOP bubble into EX. Encodings no table
//! row matches decode to a NOP with a warning.

use crate::core::arch::Gpr;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExMemLatch, IdExLatch, IfIdLatch, MemWbLatch};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode;
use crate::sim::trace::{Stage, Trace};

/// Runs the decode stage, returning the next ID/EX latch value.
pub fn decode_stage(
    if_id: &IfIdLatch,
    regs: &Gpr,
    id_ex: &IdExLatch,
    ex_mem: &ExMemLatch,
    mem_wb: &MemWbLatch,
    completing_rd: Option<usize>,
    stall: bool,
    redirect: u32,
    trace: &mut Trace,
) -> IdExLatch {
    if redirect != 0 || stall || !if_id.valid {
        return IdExLatch::default();
    }

    let decoded = decode::decode(if_id.inst).unwrap_or_else(|| {
        tracing::warn!(
            pc = if_id.pc,
            inst = if_id.inst,
            "unknown encoding decoded as NOP"
        );
        decode::Decoded {
            name: "nop",
            ctrl: ControlSignals::NOP,
            rd: 0,
            rs1: 0,
            rs2: 0,
            imm: 0,
        }
    });

    let fwd1 = hazards::select_forward(
        decoded.rs1,
        decoded.ctrl.uses_rs1,
        id_ex,
        ex_mem,
        mem_wb,
        completing_rd,
    );
    let fwd2 = hazards::select_forward(
        decoded.rs2,
        decoded.ctrl.uses_rs2,
        id_ex,
        ex_mem,
        mem_wb,
        completing_rd,
    );

    if trace.enabled() {
        trace.emit(
            Stage::Id,
            &format!(
                "{} rd=x{} rs1=x{} rs2=x{} imm={}",
                decoded.name, decoded.rd, decoded.rs1, decoded.rs2, decoded.imm
            ),
        );
    }

    IdExLatch {
        valid: true,
        pc: if_id.pc,
        ctrl: decoded.ctrl,
        rd: decoded.rd,
        rs1: decoded.rs1,
        rs2: decoded.rs2,
        rv1: regs.read(decoded.rs1),
        rv2: regs.read(decoded.rs2),
        imm: decoded.imm,
        fwd1,
        fwd2,
        pred_next_pc: if_id.pred_next_pc,
    }
}

//! Execute (EX) stage.
//!
//! Resolves forwarded operands, drives the ALU and the branch comparator,
//! dispatches multiply/divide operations to their units, and injects
//! completed unit results back into the pipeline. Branch resolution writes
//! the redirect target (0 = no flush) and queues the predictor/BTB update
//! for the cycle edge.

use crate::core::pipeline::latches::{ExMemLatch, IdExLatch, MemWbLatch, WbBypass};
use crate::core::pipeline::signals::{
    BranchKind, ControlSignals, Forward, MemOp, OpASrc, OpBSrc,
};
use crate::core::units::alu;
use crate::core::units::bru::TournamentPredictor;
use crate::core::units::div::Divider;
use crate::core::units::mul::Multiplier;
use crate::sim::trace::{Stage, Trace};
use crate::stats::SimStats;

/// Next EX/MEM bundle plus the branch redirect signal.
#[derive(Debug)]
pub struct ExecuteOutput {
    /// Next EX/MEM latch value.
    pub ex_mem: ExMemLatch,
    /// Correct next PC when the fetch-stage prediction was wrong; 0 means
    /// no flush.
    pub redirect: u32,
}

impl ExecuteOutput {
    fn bubble() -> Self {
        Self {
            ex_mem: ExMemLatch::default(),
            redirect: 0,
        }
    }
}

/// Resolves one operand against its forwarding selector.
fn resolve(
    fwd: Forward,
    rf_value: u32,
    ex_mem: &ExMemLatch,
    mem_wb: &MemWbLatch,
    wb_bypass: &WbBypass,
) -> u32 {
    match fwd {
        Forward::RegFile => rf_value,
        Forward::ExMem => ex_mem.alu,
        Forward::MemWb => mem_wb.value,
        Forward::Wb => wb_bypass.value,
    }
}

/// Runs the execute stage.
///
/// The latches passed in are the *current* (pre-edge) values: by the time
/// this instruction reads them, the producers the hazard unit saw in ID have
/// each advanced exactly one stage, which is what the selectors encode.
pub fn execute_stage(
    id_ex: &IdExLatch,
    ex_mem: &ExMemLatch,
    mem_wb: &MemWbLatch,
    wb_bypass: &WbBypass,
    mul: &mut Multiplier,
    div: &mut Divider,
    predictor: &mut TournamentPredictor,
    stats: &mut SimStats,
    trace: &mut Trace,
) -> ExecuteOutput {
    // A completed multiply/divide takes the EX slot this cycle; upstream
    // stalls guarantee the ID/EX latch holds a bubble.
    if let Some(res) = mul.result() {
        debug_assert!(!id_ex.valid, "instruction entered EX alongside a mul result");
        mul.consume();
        if trace.enabled() {
            trace.emit(
                Stage::Ex,
                &format!("Multiplier done, x{} <= {:#010x}", res.rd, res.value),
            );
        }
        return ExecuteOutput {
            ex_mem: ExMemLatch {
                valid: true,
                pc: 0,
                rd: res.rd,
                alu: res.value,
                store_data: 0,
                ctrl: ControlSignals {
                    reg_write: true,
                    ..ControlSignals::NOP
                },
            },
            redirect: 0,
        };
    }
    if let Some(res) = div.result() {
        debug_assert!(!id_ex.valid, "instruction entered EX alongside a div result");
        div.consume();
        if trace.enabled() {
            trace.emit(
                Stage::Ex,
                &format!("Divider done, x{} <= {:#010x}", res.rd, res.value),
            );
        }
        return ExecuteOutput {
            ex_mem: ExMemLatch {
                valid: true,
                pc: 0,
                rd: res.rd,
                alu: res.value,
                store_data: 0,
                ctrl: ControlSignals {
                    reg_write: true,
                    ..ControlSignals::NOP
                },
            },
            redirect: 0,
        };
    }

    if !id_ex.valid {
        return ExecuteOutput::bubble();
    }

    let rv1 = resolve(id_ex.fwd1, id_ex.rv1, ex_mem, mem_wb, wb_bypass);
    let rv2 = resolve(id_ex.fwd2, id_ex.rv2, ex_mem, mem_wb, wb_bypass);

    // Multiply/divide: hand the operands to the unit and vacate the slot.
    // The unit holds rd until the result is injected above.
    let mdu = id_ex.ctrl.mdu;
    if mdu.is_mul() {
        mul.start(
            rv1,
            rv2,
            mdu.op1_signed(),
            mdu.op2_signed(),
            mdu.wants_high(),
            id_ex.rd,
        );
        stats.mul_ops += 1;
        if trace.enabled() {
            trace.emit(
                Stage::Ex,
                &format!("Multiplier start, {rv1:#010x} * {rv2:#010x} -> x{}", id_ex.rd),
            );
        }
        return ExecuteOutput::bubble();
    }
    if mdu.is_div() {
        div.start(rv1, rv2, mdu.op1_signed(), mdu.is_remainder(), id_ex.rd);
        stats.div_ops += 1;
        if trace.enabled() {
            trace.emit(
                Stage::Ex,
                &format!("Divider start, {rv1:#010x} / {rv2:#010x} -> x{}", id_ex.rd),
            );
        }
        return ExecuteOutput::bubble();
    }

    let mut redirect = 0;
    if id_ex.ctrl.branch != BranchKind::None {
        let target = match id_ex.ctrl.branch {
            BranchKind::Jalr => rv1.wrapping_add(id_ex.imm as u32) & !1,
            _ => id_ex.pc.wrapping_add(id_ex.imm as u32),
        };
        let taken = match id_ex.ctrl.branch {
            BranchKind::Jal | BranchKind::Jalr => true,
            BranchKind::Beq => rv1 == rv2,
            BranchKind::Bne => rv1 != rv2,
            BranchKind::Blt => (rv1 as i32) < (rv2 as i32),
            BranchKind::Bge => (rv1 as i32) >= (rv2 as i32),
            BranchKind::Bltu => rv1 < rv2,
            BranchKind::Bgeu => rv1 >= rv2,
            BranchKind::None => false,
        };
        let actual_next = if taken {
            target
        } else {
            id_ex.pc.wrapping_add(4)
        };
        if actual_next != id_ex.pred_next_pc {
            redirect = actual_next;
            stats.mispredictions += 1;
        }
        stats.branches += 1;
        predictor.resolve(id_ex.pc, taken, target);
        if trace.enabled() {
            trace.emit(
                Stage::Ex,
                &format!(
                    "Branch @{:#010x}: {} -> {:#010x}{}",
                    id_ex.pc,
                    if taken { "taken" } else { "not taken" },
                    actual_next,
                    if redirect != 0 { " (mispredict)" } else { "" }
                ),
            );
        }
    }

    let a = match id_ex.ctrl.a_src {
        OpASrc::Reg1 => rv1,
        OpASrc::Pc => id_ex.pc,
        OpASrc::Zero => 0,
    };
    let b = match id_ex.ctrl.b_src {
        OpBSrc::Reg2 => rv2,
        OpBSrc::Imm => id_ex.imm as u32,
        OpBSrc::Four => 4,
    };
    let result = alu::execute(id_ex.ctrl.alu, a, b);

    if trace.enabled() && id_ex.ctrl.branch == BranchKind::None {
        if id_ex.ctrl.mem_op == MemOp::None {
            trace.emit(Stage::Ex, &format!("ALU result {result:#010x}"));
        } else {
            trace.emit(Stage::Ex, &format!("Address {result:#010x}"));
        }
    }

    ExecuteOutput {
        ex_mem: ExMemLatch {
            valid: true,
            pc: id_ex.pc,
            rd: id_ex.rd,
            alu: result,
            store_data: rv2,
            ctrl: id_ex.ctrl,
        },
        redirect,
    }
}

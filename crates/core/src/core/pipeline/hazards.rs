//! Data hazard detection and forwarding.
//!
//! This module keeps the pipeline consistent when instructions depend on
//! results that have not reached the register file yet:
//! 1. **Forwarding selection:** picks, for each ID-stage source register, the
//!    youngest in-flight producer. The selector rides in the ID/EX bundle and
//!    is resolved against the latches one cycle later, in EX.
//! 2. **Load-use stalls:** a load's value exists only from the MEM/WB latch
//!    onward, so a dependent instruction one slot behind waits a cycle.
//! 3. **Structural stalls:** the multiplier and divider hold instructions
//!    upstream while busy.

use crate::core::pipeline::latches::{ExMemLatch, IdExLatch, IfIdLatch, MemWbLatch};
use crate::core::pipeline::signals::{Forward, MduOp, MemOp};
use crate::core::units::div::Divider;
use crate::core::units::mul::Multiplier;
use crate::isa::decode;

/// Selects the forwarding source for one source register of the instruction
/// being decoded.
///
/// Priority, youngest producer first:
/// 1. `ExMem` — the instruction now in EX (or a multiplier/divider result
///    being injected this cycle, passed as `completing_rd`); loads are
///    excluded because their value is not in the EX/MEM latch.
/// 2. `MemWb` — the instruction now in MEM, loads included.
/// 3. `Wb` — the instruction now in WB, via the one-cycle bypass register.
/// 4. `RegFile` — the value read in ID.
///
/// Source index 0 always reads the register file: x0 never forwards.
pub fn select_forward(
    src: usize,
    uses: bool,
    id_ex: &IdExLatch,
    ex_mem: &ExMemLatch,
    mem_wb: &MemWbLatch,
    completing_rd: Option<usize>,
) -> Forward {
    if !uses || src == 0 {
        return Forward::RegFile;
    }
    if completing_rd == Some(src) {
        return Forward::ExMem;
    }
    if id_ex.valid
        && id_ex.ctrl.reg_write
        && id_ex.rd == src
        && id_ex.ctrl.mem_op != MemOp::Load
        && id_ex.ctrl.mdu == MduOp::None
    {
        return Forward::ExMem;
    }
    if ex_mem.valid && ex_mem.ctrl.reg_write && ex_mem.rd == src {
        return Forward::MemWb;
    }
    if mem_wb.valid && mem_wb.ctrl.reg_write && mem_wb.rd == src {
        return Forward::Wb;
    }
    Forward::RegFile
}

/// Checks for a load-use hazard between EX and ID.
///
/// True when the instruction in EX is a load whose destination (≠ x0) is a
/// source the ID-stage instruction actually consumes. The ID instruction
/// then waits one cycle and picks the load up from the MEM/WB latch.
pub fn need_stall_load_use(id_ex: &IdExLatch, if_id: &IfIdLatch) -> bool {
    if !id_ex.valid || id_ex.ctrl.mem_op != MemOp::Load || id_ex.rd == 0 {
        return false;
    }
    if !if_id.valid {
        return false;
    }
    let Some(next) = decode::decode(if_id.inst) else {
        return false;
    };
    (next.ctrl.uses_rs1 && next.rs1 == id_ex.rd) || (next.ctrl.uses_rs2 && next.rs2 == id_ex.rd)
}

/// Checks for a structural stall on the multiplier or divider.
///
/// A unit is blocking while it is busy and its result is not yet readable;
/// the cycle the result becomes readable, the stall drops so the next
/// instruction decodes right behind the injected result. `busy()` is already
/// true in the start cycle, which keeps the following instruction out of EX.
pub fn need_stall_unit(mul: &Multiplier, div: &Divider) -> bool {
    (mul.busy() && mul.result().is_none()) || (div.busy() && div.result().is_none())
}

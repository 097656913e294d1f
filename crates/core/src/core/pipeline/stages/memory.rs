//! Memory access (MEM) stage.
//!
//! Loads read the data memory word addressed by the ALU result and apply the
//! lane mux plus sign/zero extension; stores read-modify-write the addressed
//! lane. Everything else passes the ALU result through. Out-of-range
//! addresses terminate the simulation.

use crate::common::error::SimError;
use crate::core::pipeline::latches::{ExMemLatch, MemWbLatch};
use crate::core::pipeline::signals::MemOp;
use crate::core::units::mem::WordMemory;
use crate::sim::trace::{Stage, Trace};
use crate::stats::SimStats;

/// Runs the memory stage, returning the next MEM/WB latch value.
///
/// # Errors
///
/// A load or store outside the data memory is fatal.
pub fn memory_stage(
    ex_mem: &ExMemLatch,
    dmem: &mut WordMemory,
    stats: &mut SimStats,
    trace: &mut Trace,
) -> Result<MemWbLatch, SimError> {
    if !ex_mem.valid {
        return Ok(MemWbLatch::default());
    }

    let value = match ex_mem.ctrl.mem_op {
        MemOp::Load => {
            let loaded = dmem.load(ex_mem.alu, ex_mem.ctrl.width, ex_mem.ctrl.signed_load)?;
            stats.loads += 1;
            if trace.enabled() {
                trace.emit(
                    Stage::Mem,
                    &format!("Load {:#010x} => {loaded:#010x}", ex_mem.alu),
                );
            }
            loaded
        }
        MemOp::Store => {
            dmem.store(ex_mem.alu, ex_mem.ctrl.width, ex_mem.store_data)?;
            stats.stores += 1;
            if trace.enabled() {
                trace.emit(
                    Stage::Mem,
                    &format!("Store {:#010x} <= {:#010x}", ex_mem.alu, ex_mem.store_data),
                );
            }
            ex_mem.alu
        }
        MemOp::None => ex_mem.alu,
    };

    Ok(MemWbLatch {
        valid: true,
        pc: ex_mem.pc,
        rd: ex_mem.rd,
        value,
        ctrl: ex_mem.ctrl,
    })
}

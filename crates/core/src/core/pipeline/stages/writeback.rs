//! Write-back (WB) stage.
//!
//! Commits {rd, value} to the register file (suppressed for x0), refreshes
//! the one-cycle bypass register, and raises the halt signal when an EBREAK
//! retires. The `WB: Write` trace lines emitted here are the program's
//! observable behavior.

use crate::core::arch::Gpr;
use crate::core::pipeline::latches::{MemWbLatch, WbBypass};
use crate::sim::trace::{Stage, Trace};
use crate::stats::SimStats;

/// Results of the write-back stage.
#[derive(Debug, Default)]
pub struct WbOutput {
    /// Next value of the write-back bypass register.
    pub bypass: WbBypass,
    /// An EBREAK retired; the simulator halts after this cycle.
    pub halt: bool,
}

/// Runs the write-back stage.
pub fn writeback_stage(
    mem_wb: &MemWbLatch,
    regs: &mut Gpr,
    stats: &mut SimStats,
    trace: &mut Trace,
) -> WbOutput {
    if !mem_wb.valid {
        return WbOutput::default();
    }

    stats.retired += 1;

    let mut bypass = WbBypass::default();
    if mem_wb.ctrl.reg_write && mem_wb.rd != 0 {
        regs.write(mem_wb.rd, mem_wb.value);
        bypass = WbBypass {
            rd: mem_wb.rd,
            value: mem_wb.value,
        };
        if trace.enabled() {
            trace.emit(
                Stage::Wb,
                &format!("WB: Write x{} <= {:#x}", mem_wb.rd, mem_wb.value),
            );
        }
    }

    if mem_wb.ctrl.halt && trace.enabled() {
        trace.emit(Stage::Wb, "EBREAK, halting");
    }

    WbOutput {
        bypass,
        halt: mem_wb.ctrl.halt,
    }
}

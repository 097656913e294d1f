//! Instruction Fetch (IF) stage.
//!
//! Holds the architectural PC. Each cycle it either flushes to the branch
//! redirect target (squashing the in-flight fetch), stalls (re-presenting
//! the IF/ID bundle and holding the PC), or fetches from the instruction
//! memory and advances to the predicted next PC.

use crate::common::error::SimError;
use crate::core::pipeline::latches::IfIdLatch;
use crate::core::units::bru::TournamentPredictor;
use crate::core::units::mem::WordMemory;
use crate::sim::trace::{Stage, Trace};

/// Next IF/ID bundle and next PC produced by the fetch stage.
#[derive(Debug)]
pub struct FetchOutput {
    /// Next IF/ID latch value.
    pub if_id: IfIdLatch,
    /// Next architectural PC.
    pub next_pc: u32,
}

/// Runs the fetch stage.
///
/// Flush wins over stall: a redirected fetch is never also held. Prediction
/// reads the predictor's cycle-edge state; the resolution that caused a
/// same-cycle redirect has not been committed yet.
///
/// # Errors
///
/// A PC outside the instruction memory is fatal.
pub fn fetch_stage(
    pc: u32,
    imem: &WordMemory,
    predictor: &TournamentPredictor,
    if_id: &IfIdLatch,
    stall: bool,
    redirect: u32,
    trace: &mut Trace,
) -> Result<FetchOutput, SimError> {
    if redirect != 0 {
        if trace.enabled() {
            trace.emit(Stage::If, &format!("Flush, redirect to {redirect:#010x}"));
        }
        return Ok(FetchOutput {
            if_id: IfIdLatch::default(),
            next_pc: redirect,
        });
    }

    if stall {
        if trace.enabled() {
            trace.emit(Stage::If, &format!("Stall, hold PC={pc:#010x}"));
        }
        return Ok(FetchOutput {
            if_id: *if_id,
            next_pc: pc,
        });
    }

    let inst = imem.read_word(pc)?;
    let pred_next_pc = predictor.predict_next(pc);
    if trace.enabled() {
        trace.emit(
            Stage::If,
            &format!("PC={pc:#010x}, Inst={inst:#010x}, NextPC={pred_next_pc:#010x}"),
        );
    }
    Ok(FetchOutput {
        if_id: IfIdLatch {
            valid: true,
            pc,
            inst,
            pred_next_pc,
        },
        next_pc: pred_next_pc,
    })
}

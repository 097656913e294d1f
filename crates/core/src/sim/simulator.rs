//! Top-level simulator.
//!
//! Owns every state element of the core: register file, instruction and data
//! memories, the four pipeline latches, the write-back bypass register, the
//! multiplier, the divider, and the branch prediction tables.
//!
//! A `tick()` is one clock cycle. Stages are evaluated WB → MEM → EX →
//! hazard/ID → IF — the topological order of the combinational logic — with
//! every stage reading current latch values and returning next values, and
//! all sequential state committing at the end of the function (the cycle
//! edge): latches, PC, bypass register, unit pipelines, and the queued
//! predictor update. Stalls re-present latches and inject bubbles; nothing
//! else suspends the machine.

use crate::common::error::{MemSide, SimError};
use crate::config::Config;
use crate::core::arch::Gpr;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExMemLatch, IdExLatch, IfIdLatch, MemWbLatch, WbBypass};
use crate::core::pipeline::stages::{decode, execute, fetch, memory, writeback};
use crate::core::units::bru::TournamentPredictor;
use crate::core::units::div::Divider;
use crate::core::units::mem::WordMemory;
use crate::core::units::mul::Multiplier;
use crate::isa::abi;
use crate::sim::trace::Trace;
use crate::stats::SimStats;

/// The five-stage RV32IM pipeline simulator.
#[derive(Debug)]
pub struct Simulator {
    regs: Gpr,
    imem: WordMemory,
    dmem: WordMemory,
    mul: Multiplier,
    div: Divider,
    predictor: TournamentPredictor,

    if_id: IfIdLatch,
    id_ex: IdExLatch,
    ex_mem: ExMemLatch,
    mem_wb: MemWbLatch,
    wb_bypass: WbBypass,

    pc: u32,
    cycle: u64,
    max_cycles: u64,
    halted: bool,

    /// Run statistics.
    pub stats: SimStats,
    trace: Trace,
}

impl Simulator {
    /// Builds a simulator from the configuration. The register file is zero
    /// except the stack pointer, which points at the top of the data memory.
    pub fn new(config: &Config, trace: Trace) -> Self {
        let mut regs = Gpr::new();
        regs.write(abi::REG_SP, config.initial_sp());
        Self {
            regs,
            imem: WordMemory::new(config.memory.addr_bits, MemSide::Instruction),
            dmem: WordMemory::new(config.memory.addr_bits, MemSide::Data),
            mul: Multiplier::new(),
            div: Divider::new(),
            predictor: TournamentPredictor::new(&config.predictor),
            if_id: IfIdLatch::default(),
            id_ex: IdExLatch::default(),
            ex_mem: ExMemLatch::default(),
            mem_wb: MemWbLatch::default(),
            wb_bypass: WbBypass::default(),
            pc: 0,
            cycle: 0,
            max_cycles: config.run.max_cycles,
            halted: false,
            stats: SimStats::default(),
            trace,
        }
    }

    /// Loads the instruction memory image.
    ///
    /// # Errors
    ///
    /// Fails if the image exceeds the instruction memory.
    pub fn load_program(&mut self, image: &[u32]) -> Result<(), SimError> {
        self.imem.load_image(image)
    }

    /// Loads the data memory image.
    ///
    /// # Errors
    ///
    /// Fails if the image exceeds the data memory.
    pub fn load_data(&mut self, image: &[u32]) -> Result<(), SimError> {
        self.dmem.load_image(image)
    }

    /// Advances the machine one clock cycle.
    ///
    /// # Errors
    ///
    /// Out-of-range memory accesses terminate the simulation.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.trace.set_cycle(self.cycle);

        let wb = writeback::writeback_stage(&self.mem_wb, &mut self.regs, &mut self.stats, &mut self.trace);

        let mem_wb_next =
            memory::memory_stage(&self.ex_mem, &mut self.dmem, &mut self.stats, &mut self.trace)?;

        let ex = execute::execute_stage(
            &self.id_ex,
            &self.ex_mem,
            &self.mem_wb,
            &self.wb_bypass,
            &mut self.mul,
            &mut self.div,
            &mut self.predictor,
            &mut self.stats,
            &mut self.trace,
        );

        // A unit result marked consumed this cycle stays visible until the
        // edge, so the completing rd still reaches the selector logic below.
        let completing_rd = self
            .mul
            .result()
            .map(|r| r.rd)
            .or_else(|| self.div.result().map(|r| r.rd));

        let stall_unit = hazards::need_stall_unit(&self.mul, &self.div);
        let stall_load = hazards::need_stall_load_use(&self.id_ex, &self.if_id);
        let stall = stall_unit || stall_load;

        let id_ex_next = decode::decode_stage(
            &self.if_id,
            &self.regs,
            &self.id_ex,
            &self.ex_mem,
            &self.mem_wb,
            completing_rd,
            stall,
            ex.redirect,
            &mut self.trace,
        );

        let fetched = fetch::fetch_stage(
            self.pc,
            &self.imem,
            &self.predictor,
            &self.if_id,
            stall,
            ex.redirect,
            &mut self.trace,
        )?;

        // Cycle edge: commit all sequential state.
        self.mem_wb = mem_wb_next;
        self.ex_mem = ex.ex_mem;
        self.id_ex = id_ex_next;
        self.if_id = fetched.if_id;
        self.pc = fetched.next_pc;
        self.wb_bypass = wb.bypass;
        self.mul.tick();
        self.div.tick();
        self.predictor.commit_update();

        self.cycle += 1;
        self.stats.cycles = self.cycle;
        if ex.redirect != 0 {
            self.stats.flushes += 1;
        }
        if stall_unit {
            self.stats.unit_stalls += 1;
        } else if stall_load {
            self.stats.load_use_stalls += 1;
        }

        if wb.halt {
            self.halted = true;
            self.trace.flush();
        }
        Ok(())
    }

    /// Runs until EBREAK retires or the cycle cap expires.
    ///
    /// # Errors
    ///
    /// Propagates fatal memory errors; reaching the cap yields
    /// [`SimError::CycleLimit`].
    pub fn run(&mut self) -> Result<(), SimError> {
        while !self.halted {
            if self.cycle >= self.max_cycles {
                return Err(SimError::CycleLimit(self.max_cycles));
            }
            self.tick()?;
        }
        Ok(())
    }

    /// Reads an architectural register.
    pub fn reg(&self, idx: usize) -> u32 {
        self.regs.read(idx)
    }

    /// Current architectural PC.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Cycles elapsed so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Whether an EBREAK has retired.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// The trace sink, for inspecting buffered lines in tests.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// The data memory, for inspecting stores in tests.
    pub fn dmem(&self) -> &WordMemory {
        &self.dmem
    }
}

//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory size, predictor tables).
//! 2. **Structures:** Hierarchical config for memory, branch prediction, and the run.
//!
//! Configuration is supplied as JSON (CLI `--config`) or via `Config::default()`.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden.
mod defaults {
    /// Memory address width in words (2^16 words = 256 KiB per memory).
    pub const MEM_ADDR_BITS: usize = 16;

    /// Branch Target Buffer size (64 direct-mapped entries).
    pub const BTB_ENTRIES: usize = 64;

    /// Bimodal predictor table size (log2, 1024 entries).
    pub const BIMODAL_BITS: usize = 10;

    /// Gshare predictor table size (log2, 1024 entries); also bounds the
    /// global history register.
    pub const GSHARE_BITS: usize = 10;

    /// Selector (choice) table size (log2, 1024 entries).
    pub const CHOICE_BITS: usize = 10;

    /// Cycle cap: a run that has not hit EBREAK by now is declared hung.
    pub const MAX_CYCLES: u64 = 1_000_000;
}

/// Word-memory geometry for the instruction and data memories.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Address width in words; each memory holds `2^addr_bits` 32-bit words.
    pub addr_bits: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            addr_bits: defaults::MEM_ADDR_BITS,
        }
    }
}

impl MemoryConfig {
    /// Memory size in words.
    pub const fn words(&self) -> usize {
        1 << self.addr_bits
    }

    /// Byte address one past the last valid byte (top of the memory).
    pub const fn top_byte_addr(&self) -> u32 {
        (self.words() << 2) as u32
    }
}

/// Branch prediction subsystem sizing.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Number of direct-mapped BTB entries. Must be a power of 2.
    pub btb_entries: usize,
    /// Bimodal table size (log2).
    pub bimodal_bits: usize,
    /// Gshare table size (log2); the global history is masked to this width.
    pub gshare_bits: usize,
    /// Selector table size (log2).
    pub choice_bits: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            btb_entries: defaults::BTB_ENTRIES,
            bimodal_bits: defaults::BIMODAL_BITS,
            gshare_bits: defaults::GSHARE_BITS,
            choice_bits: defaults::CHOICE_BITS,
        }
    }
}

/// Run-level simulation parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Cycle cap; reaching it without EBREAK terminates the run with an error.
    pub max_cycles: u64,
    /// Initial stack pointer (x2). `None` derives the top of the data memory.
    pub stack_pointer: Option<u32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            stack_pointer: None,
        }
    }
}

/// Root configuration for the simulator.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Instruction/data memory geometry.
    pub memory: MemoryConfig,
    /// Branch prediction sizing.
    pub predictor: PredictorConfig,
    /// Run-level parameters.
    pub run: RunConfig,
}

impl Config {
    /// Initial value of the stack pointer (x2).
    ///
    /// Defaults to the byte address of the top of the data memory, which is
    /// 16-byte aligned for any power-of-two word count, so RV32 prologues
    /// that do `addi sp, sp, -N` land in valid memory.
    pub fn initial_sp(&self) -> u32 {
        self.run
            .stack_pointer
            .unwrap_or_else(|| self.memory.top_byte_addr())
    }
}

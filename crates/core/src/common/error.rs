//! Simulation error definitions.
//!
//! Everything fatal to a run funnels through [`SimError`]. Hazards detected
//! during normal operation (stalls, flushes, divider corner cases) are part of
//! the ISA semantics and never surface here; only memory-range violations,
//! loader failures, and the cycle cap terminate a simulation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two word memories an access targeted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemSide {
    /// Instruction memory (icache).
    Instruction,
    /// Data memory (dcache).
    Data,
}

impl fmt::Display for MemSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instruction => write!(f, "instruction"),
            Self::Data => write!(f, "data"),
        }
    }
}

/// Fatal simulation errors.
#[derive(Debug, Error)]
pub enum SimError {
    /// A load, store, or fetch addressed a word outside the configured memory.
    #[error("{side} memory access at {addr:#010x} is outside the {words}-word memory")]
    MemoryOutOfRange {
        /// Memory the access targeted.
        side: MemSide,
        /// Faulting byte address.
        addr: u32,
        /// Configured memory size in words.
        words: usize,
    },

    /// The cycle cap was reached without the program executing EBREAK.
    #[error("cycle limit of {0} reached without EBREAK")]
    CycleLimit(u64),

    /// A memory image file could not be read or copied.
    #[error("could not read {path}: {source}")]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A memory image line was not a bare 32-bit hex word.
    #[error("{path}:{line}: expected an eight-digit hex word, found `{text}`")]
    BadImageLine {
        /// Path of the offending image.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// The offending text after comment stripping.
        text: String,
    },

    /// The named workload's `.exe` image does not exist in the source directory.
    #[error("workload image {path} not found")]
    MissingWorkload {
        /// Expected path of the `.exe` image.
        path: PathBuf,
    },
}

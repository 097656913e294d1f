//! Simulation statistics collection and reporting.
//!
//! Tracks the meters this core actually has: cycles, retired instructions
//! and their mix, branch prediction outcomes, and stall/flush counts.

use std::time::Instant;

/// Simulation statistics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions committed in write-back.
    pub retired: u64,
    /// Loads retired.
    pub loads: u64,
    /// Stores retired.
    pub stores: u64,
    /// Branch/jump instructions resolved in execute.
    pub branches: u64,
    /// Resolutions that disagreed with the fetch-stage prediction.
    pub mispredictions: u64,
    /// Multiplier operations started.
    pub mul_ops: u64,
    /// Divider operations started.
    pub div_ops: u64,
    /// Cycles stalled on a load-use hazard.
    pub load_use_stalls: u64,
    /// Cycles stalled on a busy multiplier/divider.
    pub unit_stalls: u64,
    /// Pipeline flushes from mispredicted branches.
    pub flushes: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            retired: 0,
            loads: 0,
            stores: 0,
            branches: 0,
            mispredictions: 0,
            mul_ops: 0,
            div_ops: 0,
            load_use_stalls: 0,
            unit_stalls: 0,
            flushes: 0,
        }
    }
}

impl SimStats {
    /// Cycles per retired instruction.
    pub fn cpi(&self) -> f64 {
        if self.retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.retired as f64
        }
    }

    /// Branch prediction accuracy in [0, 1].
    pub fn branch_accuracy(&self) -> f64 {
        if self.branches == 0 {
            1.0
        } else {
            1.0 - self.mispredictions as f64 / self.branches as f64
        }
    }

    /// Prints a summary block to stderr.
    pub fn print(&self) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        eprintln!("---- simulation statistics ----");
        eprintln!("cycles            {}", self.cycles);
        eprintln!("retired           {}", self.retired);
        eprintln!("cpi               {:.3}", self.cpi());
        eprintln!("loads / stores    {} / {}", self.loads, self.stores);
        eprintln!("mul / div ops     {} / {}", self.mul_ops, self.div_ops);
        eprintln!(
            "branches          {} ({} mispredicted, {:.1}% accuracy)",
            self.branches,
            self.mispredictions,
            self.branch_accuracy() * 100.0
        );
        eprintln!(
            "stalls            {} load-use, {} mul/div",
            self.load_use_stalls, self.unit_stalls
        );
        eprintln!("flushes           {}", self.flushes);
        eprintln!("wall time         {elapsed:.3}s");
    }
}

//! Tournament branch predictor.
//!
//! A hybrid direction predictor combining a bimodal component (2-bit
//! saturating counters indexed by PC) with a gshare component (counters
//! indexed by PC XOR the global history register). A per-PC 2-bit selector
//! tracks which component has been more accurate and picks the one to trust.
//!
//! Prediction runs against cycle-edge state: the execute stage *queues* a
//! resolution and [`TournamentPredictor::commit_update`] applies it at the
//! edge, so a same-cycle fetch of the same PC observes the pre-update tables.

use super::btb::Btb;
use crate::config::PredictorConfig;

/// A queued branch resolution, applied at the cycle edge.
#[derive(Clone, Copy, Debug)]
struct Resolution {
    pc: u32,
    taken: bool,
    /// Resolved target; present only for taken branches (the BTB never
    /// learns fall-through paths).
    target: Option<u32>,
}

/// Tournament predictor with its BTB.
#[derive(Debug)]
pub struct TournamentPredictor {
    btb: Btb,
    /// Global history shift register of resolved outcomes.
    ghr: u32,
    /// Bimodal 2-bit counters, indexed by PC.
    bimodal: Vec<u8>,
    bimodal_mask: usize,
    /// Gshare 2-bit counters, indexed by PC XOR global history.
    gshare: Vec<u8>,
    gshare_mask: usize,
    /// Per-PC selector; >= 2 trusts gshare, otherwise bimodal.
    choice: Vec<u8>,
    choice_mask: usize,
    pending: Option<Resolution>,
}

/// Nudges a 2-bit saturating counter toward (`up` = true) or away from taken.
fn saturate(counter: &mut u8, up: bool) {
    if up {
        if *counter < 3 {
            *counter += 1;
        }
    } else if *counter > 0 {
        *counter -= 1;
    }
}

impl TournamentPredictor {
    /// Creates a predictor sized per the configuration. All counters start
    /// weakly not-taken; the global history starts empty.
    pub fn new(config: &PredictorConfig) -> Self {
        let bimodal_size = 1 << config.bimodal_bits;
        let gshare_size = 1 << config.gshare_bits;
        let choice_size = 1 << config.choice_bits;
        Self {
            btb: Btb::new(config.btb_entries),
            ghr: 0,
            bimodal: vec![1; bimodal_size],
            bimodal_mask: bimodal_size - 1,
            gshare: vec![1; gshare_size],
            gshare_mask: gshare_size - 1,
            choice: vec![1; choice_size],
            choice_mask: choice_size - 1,
            pending: None,
        }
    }

    fn bimodal_index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & self.bimodal_mask
    }

    fn gshare_index(&self, pc: u32) -> usize {
        (((pc >> 2) ^ self.ghr) as usize) & self.gshare_mask
    }

    fn choice_index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & self.choice_mask
    }

    /// Direction prediction for `pc` from the selected component.
    pub fn predict_taken(&self, pc: u32) -> bool {
        let bimodal_taken = self.bimodal[self.bimodal_index(pc)] >= 2;
        let gshare_taken = self.gshare[self.gshare_index(pc)] >= 2;
        if self.choice[self.choice_index(pc)] >= 2 {
            gshare_taken
        } else {
            bimodal_taken
        }
    }

    /// Fetch-stage prediction: BTB target when the BTB hits *and* the chosen
    /// component says taken, otherwise the fall-through PC.
    pub fn predict_next(&self, pc: u32) -> u32 {
        match self.btb.lookup(pc) {
            Some(target) if self.predict_taken(pc) => target,
            _ => pc.wrapping_add(4),
        }
    }

    /// Queues a branch resolution from the execute stage. At most one branch
    /// resolves per cycle; the update lands at [`Self::commit_update`].
    pub fn resolve(&mut self, pc: u32, taken: bool, target: u32) {
        self.pending = Some(Resolution {
            pc,
            taken,
            target: taken.then_some(target),
        });
    }

    /// Applies the queued resolution at the cycle edge: trains the selector
    /// toward whichever component was right (when they disagreed), updates
    /// both components, shifts the global history, and fills the BTB for
    /// taken branches.
    pub fn commit_update(&mut self) {
        let Some(res) = self.pending.take() else {
            return;
        };

        let b_idx = self.bimodal_index(res.pc);
        let g_idx = self.gshare_index(res.pc);
        let c_idx = self.choice_index(res.pc);

        let bimodal_correct = (self.bimodal[b_idx] >= 2) == res.taken;
        let gshare_correct = (self.gshare[g_idx] >= 2) == res.taken;
        if bimodal_correct != gshare_correct {
            saturate(&mut self.choice[c_idx], gshare_correct);
        }

        saturate(&mut self.bimodal[b_idx], res.taken);
        saturate(&mut self.gshare[g_idx], res.taken);

        self.ghr = ((self.ghr << 1) | u32::from(res.taken)) & self.gshare_mask as u32;

        if let Some(target) = res.target {
            self.btb.update(res.pc, target);
        }
    }
}

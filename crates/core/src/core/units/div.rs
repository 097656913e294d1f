//! Multi-cycle radix-4 divider.
//!
//! A small FSM advancing one state per cycle edge. The normal path runs
//! PREPROCESS (absolute values, result signs), sixteen ITERATE steps
//! (two quotient bits each), and POSTPROCESS (sign fixups, result latch):
//! 18 cycles from `start()` to a readable result. Division by zero and by
//! one skip straight to their dedicated states and share POSTPROCESS,
//! making both fast paths 2 cycles.
//!
//! RV32M corner semantics are produced here, not treated as errors:
//! `x / 0` yields an all-ones quotient with remainder `x`, and
//! `INT_MIN / -1` wraps to `INT_MIN` with remainder 0 (the sign fixup
//! negates the 0x8000_0000 magnitude back onto itself).

/// Divider FSM state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DivState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Computing absolute values and result signs.
    Preprocess,
    /// Radix-4 iteration, two quotient bits per cycle.
    Iterate,
    /// Sign fixups and result latch.
    Postprocess,
    /// Fast path: divisor == 1.
    ByOne,
    /// Fast path: divisor == 0 (RV32M-defined result, not an error).
    DivZero,
    /// Result latched, awaiting consumption.
    Done,
}

/// A completed division, ready for injection into the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivResult {
    /// Destination register latched at `start()`.
    pub rd: usize,
    /// Quotient or remainder, per the latched `is_rem` flag.
    pub value: u32,
}

/// Number of radix-4 iterations covering 32 dividend bits.
const ITERATIONS: u32 = 16;

/// The multi-cycle divider.
#[derive(Debug, Default)]
pub struct Divider {
    state: DivState,
    dividend: u32,
    divisor: u32,
    /// Absolute dividend, shifted left as bits are fed into the remainder.
    abs_dividend: u32,
    abs_divisor: u32,
    quotient: u32,
    /// Partial remainder; radix-4 needs up to 34 bits between shift and
    /// subtract, so it lives in 64.
    remainder: u64,
    iter: u32,
    neg_quotient: bool,
    neg_remainder: bool,
    is_signed: bool,
    is_rem: bool,
    rd: usize,
    result: Option<DivResult>,
    consumed: bool,
}

impl Divider {
    /// Creates an idle divider.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a division is in flight or a result awaits consumption.
    pub fn busy(&self) -> bool {
        self.state != DivState::Idle || self.result.is_some()
    }

    /// Current FSM state.
    pub fn state(&self) -> DivState {
        self.state
    }

    /// Starts a division. Legal only while `busy()` is false; the unit
    /// reports busy from this cycle onward.
    ///
    /// # Panics
    ///
    /// Panics if the unit is already busy (a simulator bug, not a guest one).
    pub fn start(&mut self, dividend: u32, divisor: u32, is_signed: bool, is_rem: bool, rd: usize) {
        assert!(!self.busy(), "divider started while busy");
        self.dividend = dividend;
        self.divisor = divisor;
        self.abs_dividend = 0;
        self.abs_divisor = 0;
        self.quotient = 0;
        self.remainder = 0;
        self.iter = 0;
        self.neg_quotient = false;
        self.neg_remainder = false;
        self.is_signed = is_signed;
        self.is_rem = is_rem;
        self.rd = rd;
        self.state = match divisor {
            0 => DivState::DivZero,
            1 => DivState::ByOne,
            _ => DivState::Preprocess,
        };
    }

    /// The completed result, if any. Peeking does not consume it.
    pub fn result(&self) -> Option<DivResult> {
        self.result
    }

    /// Marks the result as consumed; the unit goes idle at the next edge.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Advances the FSM one cycle edge.
    pub fn tick(&mut self) {
        if self.consumed {
            self.result = None;
            self.consumed = false;
            if self.state == DivState::Done {
                self.state = DivState::Idle;
            }
        }
        match self.state {
            DivState::Idle | DivState::Done => {}
            DivState::Preprocess => {
                if self.is_signed {
                    let a = self.dividend as i32;
                    let b = self.divisor as i32;
                    self.neg_quotient = (a < 0) != (b < 0);
                    self.neg_remainder = a < 0;
                    self.abs_dividend = a.unsigned_abs();
                    self.abs_divisor = b.unsigned_abs();
                } else {
                    self.abs_dividend = self.dividend;
                    self.abs_divisor = self.divisor;
                }
                self.state = DivState::Iterate;
            }
            DivState::Iterate => {
                self.step();
                self.iter += 1;
                if self.iter == ITERATIONS {
                    self.state = DivState::Postprocess;
                }
            }
            DivState::ByOne => {
                self.quotient = self.dividend;
                self.remainder = 0;
                self.state = DivState::Postprocess;
            }
            DivState::DivZero => {
                self.quotient = u32::MAX;
                self.remainder = u64::from(self.dividend);
                self.state = DivState::Postprocess;
            }
            DivState::Postprocess => {
                let mut quotient = self.quotient;
                let mut remainder = self.remainder as u32;
                if self.neg_quotient {
                    quotient = quotient.wrapping_neg();
                }
                if self.neg_remainder {
                    remainder = remainder.wrapping_neg();
                }
                self.result = Some(DivResult {
                    rd: self.rd,
                    value: if self.is_rem { remainder } else { quotient },
                });
                self.state = DivState::Done;
            }
        }
    }

    /// One radix-4 step: shift two dividend bits into the partial remainder,
    /// subtract the largest fitting divisor multiple, append the digit.
    fn step(&mut self) {
        self.remainder = (self.remainder << 2) | u64::from(self.abs_dividend >> 30);
        self.abs_dividend <<= 2;
        let d = u64::from(self.abs_divisor);
        let digit = if self.remainder >= 3 * d {
            3
        } else if self.remainder >= 2 * d {
            2
        } else if self.remainder >= d {
            1
        } else {
            0
        };
        self.remainder -= digit * d;
        self.quotient = (self.quotient << 2) | digit as u32;
    }
}

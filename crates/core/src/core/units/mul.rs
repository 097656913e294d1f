//! 3-cycle pipelined multiplier.
//!
//! The multiplier accepts one operation while idle and delivers the result
//! exactly three cycles later. Its three stages mirror a hardware multiplier:
//! M1 sign/zero-extends the operands to 64 bits, M2 forms two partial
//! products (operand B split at bit 32), M3 sums them into the final 64-bit
//! product. The destination register and result-half selection ride along as
//! a tag and are consumed when the execute stage injects the result.
//!
//! `busy()` is true from the start cycle through (and including) the cycle
//! the result is consumed; the cleared state becomes visible at the next
//! cycle edge, like every other sequential element.

/// Tag carried through the multiplier pipeline.
#[derive(Clone, Copy, Debug)]
struct Tag {
    rd: usize,
    want_high: bool,
}

/// M1 output: operands extended to 64 bits.
#[derive(Clone, Copy, Debug)]
struct Extended {
    ext_a: u64,
    ext_b: u64,
    tag: Tag,
}

/// M2 output: partial products of the low and high halves of operand B.
#[derive(Clone, Copy, Debug)]
struct Compressed {
    p_lo: u64,
    p_hi: u64,
    tag: Tag,
}

/// M3 output: the full 64-bit product.
#[derive(Clone, Copy, Debug)]
struct Summed {
    product: u64,
    tag: Tag,
}

/// A completed multiplication, ready for injection into the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MulResult {
    /// Destination register latched at `start()`.
    pub rd: usize,
    /// Selected half of the product.
    pub value: u32,
}

/// The pipelined multiplier.
#[derive(Debug, Default)]
pub struct Multiplier {
    m1: Option<Extended>,
    m2: Option<Compressed>,
    m3: Option<Summed>,
    result: Option<MulResult>,
    consumed: bool,
}

impl Multiplier {
    /// Creates an idle multiplier.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an operation is in flight or a result awaits consumption.
    pub fn busy(&self) -> bool {
        self.m1.is_some() || self.m2.is_some() || self.m3.is_some() || self.result.is_some()
    }

    /// Starts a multiplication. Legal only while `busy()` is false; the unit
    /// reports busy from this cycle onward.
    ///
    /// # Panics
    ///
    /// Panics if the unit is already busy (a simulator bug, not a guest one).
    pub fn start(
        &mut self,
        op1: u32,
        op2: u32,
        op1_signed: bool,
        op2_signed: bool,
        want_high: bool,
        rd: usize,
    ) {
        assert!(!self.busy(), "multiplier started while busy");
        let ext = |v: u32, signed: bool| -> u64 {
            if signed {
                v as i32 as i64 as u64
            } else {
                u64::from(v)
            }
        };
        self.m1 = Some(Extended {
            ext_a: ext(op1, op1_signed),
            ext_b: ext(op2, op2_signed),
            tag: Tag { rd, want_high },
        });
    }

    /// The completed result, if any. Peeking does not consume it.
    pub fn result(&self) -> Option<MulResult> {
        self.result
    }

    /// Marks the result as consumed; the unit goes idle at the next edge.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Advances the pipeline one cycle edge.
    pub fn tick(&mut self) {
        if self.consumed {
            self.result = None;
            self.consumed = false;
        }
        if let Some(sum) = self.m3.take() {
            let value = if sum.tag.want_high {
                (sum.product >> 32) as u32
            } else {
                sum.product as u32
            };
            self.result = Some(MulResult {
                rd: sum.tag.rd,
                value,
            });
        }
        if let Some(c) = self.m2.take() {
            self.m3 = Some(Summed {
                product: c.p_lo.wrapping_add(c.p_hi << 32),
                tag: c.tag,
            });
        }
        if let Some(e) = self.m1.take() {
            self.m2 = Some(Compressed {
                p_lo: e.ext_a.wrapping_mul(e.ext_b & 0xFFFF_FFFF),
                p_hi: e.ext_a.wrapping_mul(e.ext_b >> 32),
                tag: e.tag,
            });
        }
    }
}

//! Divider tests: per-path latency, the busy window, RV32M corner cases,
//! and the Euclidean division law.

use proptest::prelude::*;
use rstest::rstest;
use rv32pipe_core::core::units::div::{DivState, Divider};

/// Drives a division to completion, asserting it finishes within `max`
/// cycles, and returns (value, cycles).
fn divide_counting(
    dividend: u32,
    divisor: u32,
    signed: bool,
    is_rem: bool,
    max: u32,
) -> (u32, u32) {
    let mut unit = Divider::new();
    unit.start(dividend, divisor, signed, is_rem, 3);
    for cycle in 1..=max {
        assert!(unit.busy());
        unit.tick();
        if let Some(res) = unit.result() {
            assert_eq!(res.rd, 3);
            return (res.value, cycle);
        }
    }
    panic!("divider did not finish within {max} cycles");
}

fn divide(dividend: u32, divisor: u32, signed: bool, is_rem: bool) -> u32 {
    divide_counting(dividend, divisor, signed, is_rem, 32).0
}

// ──────────────────────────────────────────────────────────
// Latency per path
// ──────────────────────────────────────────────────────────

#[test]
fn divide_by_zero_takes_two_cycles() {
    let (value, cycles) = divide_counting(1234, 0, false, false, 8);
    assert_eq!(cycles, 2);
    assert_eq!(value, 0xFFFF_FFFF);
}

#[test]
fn divide_by_one_takes_two_cycles() {
    let (value, cycles) = divide_counting(1234, 1, false, false, 8);
    assert_eq!(cycles, 2);
    assert_eq!(value, 1234);
}

#[test]
fn normal_path_takes_eighteen_cycles() {
    let (value, cycles) = divide_counting(1000, 7, false, false, 32);
    assert_eq!(cycles, 18);
    assert_eq!(value, 142);
}

#[test]
fn busy_in_start_cycle_and_through_consumption() {
    let mut unit = Divider::new();
    assert!(!unit.busy());
    unit.start(9, 3, false, false, 1);
    assert!(unit.busy(), "busy must be visible the cycle start() runs");
    while unit.result().is_none() {
        unit.tick();
    }
    unit.consume();
    assert!(unit.busy(), "still busy in the consumption cycle");
    unit.tick();
    assert!(!unit.busy());
    assert_eq!(unit.state(), DivState::Idle);
}

#[test]
#[should_panic(expected = "divider started while busy")]
fn start_while_busy_asserts() {
    let mut unit = Divider::new();
    unit.start(1, 2, false, false, 1);
    unit.start(3, 4, false, false, 2);
}

// ──────────────────────────────────────────────────────────
// RV32M corner cases
// ──────────────────────────────────────────────────────────

#[rstest]
// x / 0: quotient all ones, remainder x (signed and unsigned).
#[case(42, 0, true, false, 0xFFFF_FFFF)]
#[case(42, 0, true, true, 42)]
#[case(0xFFFF_FFD6, 0, true, false, 0xFFFF_FFFF)] // -42 / 0
#[case(0xFFFF_FFD6, 0, true, true, 0xFFFF_FFD6)] // -42 rem 0
#[case(42, 0, false, false, 0xFFFF_FFFF)]
#[case(42, 0, false, true, 42)]
// INT_MIN / -1: signed overflow wraps.
#[case(0x8000_0000, 0xFFFF_FFFF, true, false, 0x8000_0000)]
#[case(0x8000_0000, 0xFFFF_FFFF, true, true, 0)]
fn corner_cases(
    #[case] dividend: u32,
    #[case] divisor: u32,
    #[case] signed: bool,
    #[case] is_rem: bool,
    #[case] expected: u32,
) {
    assert_eq!(divide(dividend, divisor, signed, is_rem), expected);
}

#[rstest]
// Sign fixups: quotient sign is the XOR of operand signs, remainder
// follows the dividend.
#[case(7, 2, 3, 1)]
#[case(-7i32 as u32, 2, -3i32 as u32, -1i32 as u32)]
#[case(7, -2i32 as u32, -3i32 as u32, 1)]
#[case(-7i32 as u32, -2i32 as u32, 3, -1i32 as u32)]
fn signed_division(
    #[case] dividend: u32,
    #[case] divisor: u32,
    #[case] quotient: u32,
    #[case] remainder: u32,
) {
    assert_eq!(divide(dividend, divisor, true, false), quotient);
    assert_eq!(divide(dividend, divisor, true, true), remainder);
}

// ──────────────────────────────────────────────────────────
// Algebraic laws
// ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn unsigned_euclidean_law(a: u32, b in 2u32..) {
        let q = divide(a, b, false, false);
        let r = divide(a, b, false, true);
        prop_assert_eq!(a, q.wrapping_mul(b).wrapping_add(r));
        prop_assert!(r < b);
    }

    #[test]
    fn signed_euclidean_law(a: i32, b: i32) {
        prop_assume!(b != 0);
        prop_assume!(!(a == i32::MIN && b == -1));
        let q = divide(a as u32, b as u32, true, false) as i32;
        let r = divide(a as u32, b as u32, true, true) as i32;
        prop_assert_eq!(a, q.wrapping_mul(b).wrapping_add(r));
        prop_assert_eq!(q, a.wrapping_div(b));
        prop_assert_eq!(r, a.wrapping_rem(b));
        prop_assert!(r == 0 || (r < 0) == (a < 0));
        prop_assert!(r.unsigned_abs() < b.unsigned_abs());
    }

    #[test]
    fn divu_by_one_is_identity(a: u32) {
        prop_assert_eq!(divide(a, 1, false, false), a);
        prop_assert_eq!(divide(a, 1, false, true), 0);
    }
}

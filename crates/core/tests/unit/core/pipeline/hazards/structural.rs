//! Structural hazard tests: the multiplier and divider hold upstream
//! instructions out of EX for the full unit latency, and their results
//! forward like any other EX producer.

use crate::common::asm::*;
use crate::common::harness::run_program;

#[test]
fn mul_stalls_upstream_for_three_cycles() {
    let sim = run_program(&[
        addi(1, 0, 6),
        addi(2, 0, 7),
        mul(3, 1, 2),
        addi(4, 0, 1), // held in ID while the multiplier runs
        ebreak(),
    ]);
    assert_eq!(sim.reg(3), 42);
    assert_eq!(sim.reg(4), 1);
    assert_eq!(sim.stats.unit_stalls, 3, "one bubble per multiplier cycle");
    assert_eq!(sim.stats.mul_ops, 1);
}

#[test]
fn dependent_instruction_picks_up_the_mul_result() {
    // add enters EX the cycle after the product is injected and must see it
    // via the EX/MEM bypass.
    let sim = run_program(&[
        addi(1, 0, 5),
        addi(2, 0, 8),
        mul(3, 1, 2),
        add(4, 3, 3),
        ebreak(),
    ]);
    assert_eq!(sim.reg(3), 40);
    assert_eq!(sim.reg(4), 80);
}

#[test]
fn div_fast_path_stalls_two_cycles() {
    let sim = run_program(&[
        addi(1, 0, 55),
        addi(2, 0, 1),
        div(3, 1, 2),
        ebreak(),
    ]);
    assert_eq!(sim.reg(3), 55);
    assert_eq!(sim.stats.unit_stalls, 2);
    assert_eq!(sim.stats.div_ops, 1);
}

#[test]
fn div_normal_path_stalls_eighteen_cycles() {
    let sim = run_program(&[
        addi(1, 0, 1000),
        addi(2, 0, 7),
        div(3, 1, 2),
        rem(4, 1, 2),
        ebreak(),
    ]);
    assert_eq!(sim.reg(3), 142);
    assert_eq!(sim.reg(4), 6);
    assert_eq!(sim.stats.unit_stalls, 36, "two full radix-4 divisions");
    assert_eq!(sim.stats.div_ops, 2);
}

#[test]
fn back_to_back_muls_serialize() {
    // The second mul cannot start until the first result is consumed.
    let sim = run_program(&[
        addi(1, 0, 3),
        mul(2, 1, 1), // 9
        mul(3, 2, 2), // 81
        ebreak(),
    ]);
    assert_eq!(sim.reg(2), 9);
    assert_eq!(sim.reg(3), 81);
    assert_eq!(sim.stats.unit_stalls, 6);
    assert_eq!(sim.stats.mul_ops, 2);
}

#[test]
fn straight_line_code_never_stalls_on_units() {
    let sim = run_program(&[
        addi(1, 0, 1),
        addi(2, 0, 2),
        add(3, 1, 2),
        ebreak(),
    ]);
    assert_eq!(sim.stats.unit_stalls, 0);
    assert_eq!(sim.stats.mul_ops, 0);
    assert_eq!(sim.stats.div_ops, 0);
}

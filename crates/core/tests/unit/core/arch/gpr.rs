//! Register file tests: the x0 invariant and plain storage behavior.

use rv32pipe_core::core::arch::Gpr;

#[test]
fn starts_zeroed() {
    let gpr = Gpr::new();
    for i in 0..32 {
        assert_eq!(gpr.read(i), 0);
    }
}

#[test]
fn x0_always_reads_zero() {
    let mut gpr = Gpr::new();
    gpr.write(0, 0xFFFF_FFFF);
    assert_eq!(gpr.read(0), 0, "x0 is hardwired to zero");
}

#[test]
fn writes_are_independent() {
    let mut gpr = Gpr::new();
    for i in 1..32u32 {
        gpr.write(i as usize, i * 3);
    }
    for i in 1..32u32 {
        assert_eq!(gpr.read(i as usize), i * 3);
    }
}

#[test]
fn overwrite_takes_latest() {
    let mut gpr = Gpr::new();
    gpr.write(7, 1);
    gpr.write(7, 2);
    assert_eq!(gpr.read(7), 2);
}

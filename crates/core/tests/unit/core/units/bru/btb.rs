//! Branch Target Buffer tests: lookup/update semantics, full-PC tag
//! matching, aliasing, and capacity edge cases.

use rv32pipe_core::core::units::bru::Btb;

// ──────────────────────────────────────────────────────────
// 1. Basic lookup/update
// ──────────────────────────────────────────────────────────

#[test]
fn lookup_empty_returns_none() {
    let btb = Btb::new(64);
    assert_eq!(btb.lookup(0x1000), None);
}

#[test]
fn update_then_lookup() {
    let mut btb = Btb::new(64);
    btb.update(0x1000, 0x2000);
    assert_eq!(btb.lookup(0x1000), Some(0x2000));
}

#[test]
fn update_overwrites_previous_target() {
    let mut btb = Btb::new(64);
    btb.update(0x1000, 0x2000);
    btb.update(0x1000, 0x3000);
    assert_eq!(btb.lookup(0x1000), Some(0x3000), "Latest update should win");
}

// ──────────────────────────────────────────────────────────
// 2. Tag matching uses the full PC
// ──────────────────────────────────────────────────────────

#[test]
fn lookup_wrong_pc_returns_none() {
    let mut btb = Btb::new(64);
    btb.update(0x1000, 0x2000);
    assert_eq!(btb.lookup(0x1004), None, "Different PC should not match");
}

#[test]
fn aliasing_pc_misses_on_tag() {
    // 64 entries: index = (pc >> 2) & 63, so pc and pc + 0x100 alias.
    let mut btb = Btb::new(64);
    btb.update(0x1000, 0xAAAA);
    assert_eq!(btb.lookup(0x1100), None, "Same index, different tag");
}

#[test]
fn aliasing_update_evicts_wholesale() {
    let mut btb = Btb::new(4);
    let pc_a = 0x1000; // index 0
    let pc_b = 0x1010; // also index 0
    btb.update(pc_a, 0xAAAA);
    btb.update(pc_b, 0xBBBB);
    assert_eq!(btb.lookup(pc_a), None, "pc_a evicted by pc_b");
    assert_eq!(btb.lookup(pc_b), Some(0xBBBB));
}

// ──────────────────────────────────────────────────────────
// 3. Capacity
// ──────────────────────────────────────────────────────────

#[test]
fn fill_entire_btb() {
    let size = 64;
    let mut btb = Btb::new(size);
    for i in 0..size as u32 {
        btb.update(i * 4, 0xF000 + i);
    }
    for i in 0..size as u32 {
        assert_eq!(btb.lookup(i * 4), Some(0xF000 + i));
    }
}

// ──────────────────────────────────────────────────────────
// 4. Edge cases
// ──────────────────────────────────────────────────────────

#[test]
fn pc_zero_and_target_zero_are_valid() {
    let mut btb = Btb::new(64);
    btb.update(0, 0x4000);
    assert_eq!(btb.lookup(0), Some(0x4000));
    btb.update(0x1000, 0);
    assert_eq!(btb.lookup(0x1000), Some(0), "Target address 0 is storable");
}

#[test]
fn loop_branch_updates_consistently() {
    // A loop: branch at 0x1008 always targets 0x1000.
    let mut btb = Btb::new(64);
    assert_eq!(btb.lookup(0x1008), None, "cold miss");
    btb.update(0x1008, 0x1000);
    for _ in 0..10 {
        assert_eq!(btb.lookup(0x1008), Some(0x1000));
    }
}

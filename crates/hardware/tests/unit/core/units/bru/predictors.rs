//! Branch Predictor Direction Tests.
//!
//! Replays synthetic branch streams through the three predictors and checks
//! what each one can and cannot learn.

use tomsim_core::config::{BranchConfig, BranchPredictorKind, PerceptronConfig, TwoLevelConfig};
use tomsim_core::core::units::bru::perceptron::PerceptronPredictor;
use tomsim_core::core::units::bru::two_level::TwoLevelPredictor;
use tomsim_core::core::units::bru::{self, BranchPredictor, BranchPredictorWrapper};
use tomsim_core::trace::BranchRecord;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn predictor(kind: BranchPredictorKind) -> BranchPredictorWrapper {
    BranchPredictorWrapper::with_kind(kind, &BranchConfig::default())
}

/// `n` outcomes of one branch following `pattern` cyclically.
fn pattern(pc: u32, pattern: &[bool], n: usize) -> Vec<BranchRecord> {
    pattern
        .iter()
        .cycle()
        .take(n)
        .map(|&taken| BranchRecord { pc, taken })
        .collect()
}

/// Mispredictions over the second half of the stream, after warm-up.
fn late_misses<P: BranchPredictor>(bp: &mut P, branches: &[BranchRecord]) -> u64 {
    let (warm, measured) = branches.split_at(branches.len() / 2);
    let _ = bru::simulate(bp, warm);
    bru::simulate(bp, measured).mispredictions
}

// ══════════════════════════════════════════════════════════
// 1. Two-bit saturating
// ══════════════════════════════════════════════════════════

#[test]
fn two_bit_learns_biased_branch() {
    let mut bp = predictor(BranchPredictorKind::TwoBitSaturating);
    assert_eq!(late_misses(&mut bp, &pattern(0x100, &[true], 100)), 0);
}

#[test]
fn two_bit_loop_exit_costs_one_miss_per_trip() {
    let mut bp = predictor(BranchPredictorKind::TwoBitSaturating);
    let branches = pattern(0x100, &[true, true, true, false], 400);
    assert_eq!(late_misses(&mut bp, &branches), 50);
}

#[test]
fn two_bit_cannot_learn_alternation() {
    let mut bp = predictor(BranchPredictorKind::TwoBitSaturating);
    let branches = pattern(0x100, &[true, false], 200);
    assert!(late_misses(&mut bp, &branches) >= 50);
}

// ══════════════════════════════════════════════════════════
// 2. Two-level adaptive
// ══════════════════════════════════════════════════════════

#[test]
fn two_level_learns_short_loop_exactly() {
    let mut bp = predictor(BranchPredictorKind::TwoLevel);
    let branches = pattern(0x100, &[true, true, true, false], 400);
    assert_eq!(late_misses(&mut bp, &branches), 0);
}

#[test]
fn two_level_separates_branches_by_address() {
    let mut bp = TwoLevelPredictor::new(&TwoLevelConfig::default());
    let mut branches = Vec::new();
    for _ in 0..200 {
        branches.push(BranchRecord { pc: 0x100, taken: true });
        branches.push(BranchRecord { pc: 0x208, taken: false });
    }
    assert_eq!(late_misses(&mut bp, &branches), 0);
}

#[test]
fn two_level_history_longer_than_pattern_needed() {
    // Period-8 pattern needs 7 bits of local history; with 6 some pattern is ambiguous.
    let mut bp = predictor(BranchPredictorKind::TwoLevel);
    let period = [true, true, true, true, true, true, true, false];
    let branches = pattern(0x100, &period, 800);
    assert!(late_misses(&mut bp, &branches) > 0);
}

// ══════════════════════════════════════════════════════════
// 3. Perceptron
// ══════════════════════════════════════════════════════════

#[test]
fn perceptron_learns_biased_branch() {
    let mut bp = predictor(BranchPredictorKind::Perceptron);
    assert_eq!(late_misses(&mut bp, &pattern(0x44, &[false], 200)), 0);
}

#[test]
fn perceptron_learns_global_correlation() {
    // Branch B repeats A's last outcome; A alternates.
    let mut bp = PerceptronPredictor::new(&PerceptronConfig::default());
    let mut branches = Vec::new();
    for i in 0..2000 {
        let a = i % 2 == 0;
        branches.push(BranchRecord { pc: 0x10, taken: a });
        branches.push(BranchRecord { pc: 0x21, taken: a });
    }
    let misses = late_misses(&mut bp, &branches);
    assert!(misses < 20, "perceptron missed {misses} correlated branches");
}

// ══════════════════════════════════════════════════════════
// 4. Replay statistics
// ══════════════════════════════════════════════════════════

#[test]
fn simulate_reports_mpki() {
    let mut bp = predictor(BranchPredictorKind::TwoBitSaturating);
    let stats = bru::simulate(&mut bp, &pattern(0x100, &[true, false], 1000));
    assert_eq!(stats.lookups, 1000);
    assert!((stats.mispredictions_per_kilo() - stats.mispredictions as f64).abs() < 1e-9);
    assert!(stats.accuracy() <= 100.0);
}

#[test]
fn configured_kind_is_used() {
    let config = BranchConfig {
        predictor: BranchPredictorKind::TwoLevel,
        ..BranchConfig::default()
    };
    assert!(matches!(
        BranchPredictorWrapper::new(&config),
        BranchPredictorWrapper::TwoLevel(_)
    ));
}

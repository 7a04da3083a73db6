//! Parameterized Core Geometries.
//!
//! The same small programs run against different station, unit, and latency
//! settings loaded through the configuration layer.

use rstest::rstest;
use tomsim_core::config::Config;
use tomsim_core::trace::TraceBuilder;

use crate::common::TestContext;
use crate::common::harness::stamps;
use crate::common::traces::{f, r};

/// A lone instruction takes latency + 5 cycles: fetch, dispatch, issue,
/// the latency, the drain, and the final counter increment.
#[rstest]
#[case(1, 6)]
#[case(4, 9)]
#[case(10, 15)]
fn single_int_scales_with_latency(#[case] latency: u64, #[case] total: u64) {
    let ctx = TestContext::new().with_config(|c| c.tomasulo.int_latency = latency);
    let report = ctx.run(&TraceBuilder::new().int(r(1), &[]).build());
    assert_eq!(report.total_cycles, total);
    assert_eq!(stamps(&report, 1).3, 3 + latency);
}

#[rstest]
#[case(1, 6)]
#[case(9, 14)]
fn single_fp_scales_with_latency(#[case] latency: u64, #[case] total: u64) {
    let ctx = TestContext::new().with_config(|c| c.tomasulo.fp_latency = latency);
    let report = ctx.run(&TraceBuilder::new().fp(f(1), &[]).build());
    assert_eq!(report.total_cycles, total);
}

#[rstest]
#[case::one_unit(1, 14)]
#[case::two_units(2, 10)]
#[case::four_units(4, 10)]
fn int_unit_count(#[case] units: usize, #[case] total: u64) {
    let ctx = TestContext::new().with_config(|c| c.tomasulo.int_units = units);
    let report = ctx.run(&TraceBuilder::new().independent_ints(2).build());
    assert_eq!(report.total_cycles, total);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(10)]
fn fetch_queue_depth_never_changes_serial_chain(#[case] depth: usize) {
    let ctx = TestContext::new().with_config(|c| c.tomasulo.fetch_queue_size = depth);
    let report = ctx.run(&TraceBuilder::new().int(r(1), &[]).int(r(2), &[r(1)]).build());
    assert_eq!(report.total_cycles, 14);
}

#[test]
fn one_station_serializes_dispatch() {
    let ctx = TestContext::new().with_config(|c| c.tomasulo.int_reservation = 1);
    let report = ctx.run(&TraceBuilder::new().independent_ints(2).build());
    // #2 waits for #1's station, freed when #1 drains in cycle 8.
    assert_eq!(stamps(&report, 2), (2, 8, 9, 13));
    assert_eq!(report.stats.stalls_structural, 5);
}

#[test]
fn geometry_from_json() {
    let config = Config::from_json(
        r#"{ "tomasulo": { "fp_units": 2, "fp_latency": 3 }, "general": { "max_cycles": 1000 } }"#,
    )
    .unwrap();
    let ctx = TestContext { config };
    let report = ctx.run(&TraceBuilder::new().fp(f(1), &[]).fp(f(2), &[]).build());
    assert_eq!(stamps(&report, 1), (1, 2, 3, 6));
    assert_eq!(stamps(&report, 2), (2, 3, 4, 7));
    assert_eq!(report.total_cycles, 9);
}

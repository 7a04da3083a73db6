//! Trace File Loading Tests.
//!
//! Writes traces to temporary files and loads them the way the CLI does.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;
use tomsim_core::common::{RegId, SimError, TraceError};
use tomsim_core::isa::OpClass;
use tomsim_core::sim::loader;
use tomsim_core::trace::TraceSource;
use tomsim_core::{Config, Simulator};

fn temp_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn load_and_run_trace_file() {
    let file = temp_json(
        r#"{ "instructions": [
            { "op": "IntCompute", "dst": [1], "src": [2, 3], "pc": 4096 },
            { "op": "IntCompute", "dst": [4], "src": [1] },
            { "op": "Trap" }
        ] }"#,
    );
    let trace = loader::load_trace(file.path()).unwrap();
    assert_eq!(trace.len(), 3);
    assert_eq!(trace.get(2).src[0], Some(RegId::int(1)));
    assert_eq!(trace.get(3).op, OpClass::Trap);

    let report = Simulator::new(Config::default()).unwrap().run(&trace).unwrap();
    assert_eq!(report.total_cycles, 14);
}

#[test]
fn lowercase_aliases_accepted() {
    let file = temp_json(
        r#"{ "instructions": [
            { "op": "load", "dst": [1], "src": [29] },
            { "op": "store", "src": [1, 29] },
            { "op": "branch", "src": [1] },
            { "op": "jump" },
            { "op": "call" },
            { "op": "fp", "dst": [33], "src": [34] }
        ] }"#,
    );
    let trace = loader::load_trace(file.path()).unwrap();
    let ops: Vec<OpClass> = (1..=trace.len()).map(|i| trace.get(i).op).collect();
    assert_eq!(
        ops,
        vec![
            OpClass::Load,
            OpClass::Store,
            OpClass::CondBranch,
            OpClass::UncondBranch,
            OpClass::Call,
            OpClass::FpCompute
        ]
    );
}

#[test]
fn misc_registers_addressable() {
    // 64 and 65 are HI and LO.
    let trace = loader::parse_trace(r#"{ "instructions": [ { "op": "int", "dst": [64, 65], "src": [1, 2] } ] }"#)
        .unwrap();
    assert_eq!(trace.get(1).dst, [Some(RegId::HI), Some(RegId::LO)]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = loader::load_trace(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
}

#[test]
fn malformed_json_is_parse_error() {
    let file = temp_json(r#"{ "instructions": [ { "op": "IntCompute" "#);
    assert!(matches!(loader::load_trace(file.path()), Err(TraceError::Parse(_))));
}

#[test]
fn too_many_destinations_rejected() {
    let err = loader::parse_trace(r#"{ "instructions": [ { "op": "int", "dst": [1, 2, 3] } ] }"#)
        .unwrap_err();
    assert!(matches!(
        err,
        TraceError::TooManyOperands {
            index: 1,
            kind: "destination",
            count: 3,
            limit: 2
        }
    ));
    assert!(err.to_string().contains("destination"));
}

#[test]
fn trace_error_converts_to_sim_error() {
    let err: SimError = loader::parse_trace(r#"{ "instructions": [] }"#).unwrap_err().into();
    assert!(matches!(err, SimError::Trace(TraceError::Empty)));
}

#[test]
fn load_branch_file() {
    let file = temp_json(
        r#"{ "branches": [ { "pc": 4096, "taken": true }, { "pc": 4100, "taken": false } ] }"#,
    );
    let branches = loader::load_branches(file.path()).unwrap();
    assert_eq!(branches.len(), 2);
    assert_eq!(branches[0].pc, 4096);
    assert!(!branches[1].taken);
}

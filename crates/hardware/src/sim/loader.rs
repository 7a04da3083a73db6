//! Trace Loader.
//!
//! This module reads instruction and branch traces from disk. It performs:
//! 1. **Parsing:** JSON documents deserialized with `serde_json`.
//! 2. **Validation:** Register ids range-checked, operand counts bounded, and
//!    stores rejected if they list destinations.
//! 3. **Conversion:** Raw records turned into [`StaticInst`] values the core can run.
//!
//! Instruction trace format:
//!
//! ```json
//! { "instructions": [
//!     { "op": "Load", "dst": [1], "src": [29], "pc": 4096, "mnemonic": "lw r1,0(sp)" },
//!     { "op": "IntCompute", "dst": [2], "src": [1, 1] },
//!     { "op": "Trap" }
//! ] }
//! ```
//!
//! Branch trace format: `{ "branches": [ { "pc": 4096, "taken": true }, ... ] }`.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::common::{RegId, TOTAL_REGS, TraceError};
use crate::isa::{MAX_DST, MAX_SRC, OpClass, StaticInst};
use crate::trace::{BranchRecord, Trace};

#[derive(Deserialize)]
struct RawTrace {
    instructions: Vec<RawInst>,
}

#[derive(Deserialize)]
struct RawInst {
    op: OpClass,
    #[serde(default)]
    src: Vec<u16>,
    #[serde(default)]
    dst: Vec<u16>,
    #[serde(default)]
    pc: Option<u32>,
    #[serde(default)]
    mnemonic: Option<String>,
}

#[derive(Deserialize)]
struct RawBranches {
    branches: Vec<BranchRecord>,
}

/// Parses an instruction trace from a JSON string.
pub fn parse_trace(json: &str) -> Result<Trace, TraceError> {
    let raw: RawTrace = serde_json::from_str(json)?;
    convert(raw)
}

/// Reads an instruction trace from any reader.
pub fn read_trace<R: Read>(reader: R) -> Result<Trace, TraceError> {
    let raw: RawTrace = serde_json::from_reader(reader)?;
    convert(raw)
}

/// Loads an instruction trace file.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace, TraceError> {
    let file = fs::File::open(path)?;
    read_trace(std::io::BufReader::new(file))
}

/// Loads a branch outcome trace file.
pub fn load_branches(path: impl AsRef<Path>) -> Result<Vec<BranchRecord>, TraceError> {
    let text = fs::read_to_string(path)?;
    parse_branches(&text)
}

/// Parses a branch outcome trace from a JSON string.
pub fn parse_branches(json: &str) -> Result<Vec<BranchRecord>, TraceError> {
    let raw: RawBranches = serde_json::from_str(json)?;
    Ok(raw.branches)
}

fn convert(raw: RawTrace) -> Result<Trace, TraceError> {
    if raw.instructions.is_empty() {
        return Err(TraceError::Empty);
    }
    raw.instructions
        .into_iter()
        .enumerate()
        .map(|(i, inst)| convert_inst(i + 1, inst))
        .collect::<Result<Vec<_>, _>>()
        .map(Trace::new)
}

fn convert_inst(index: usize, raw: RawInst) -> Result<StaticInst, TraceError> {
    if raw.op.is_store() && !raw.dst.is_empty() {
        return Err(TraceError::StoreDestination { index });
    }
    let src = registers::<MAX_SRC>(index, "source", &raw.src)?;
    let dst = registers::<MAX_DST>(index, "destination", &raw.dst)?;
    Ok(StaticInst {
        op: raw.op,
        src,
        dst,
        pc: raw.pc,
        mnemonic: raw.mnemonic,
    })
}

fn registers<const N: usize>(
    index: usize,
    kind: &'static str,
    ids: &[u16],
) -> Result<[Option<RegId>; N], TraceError> {
    if ids.len() > N {
        return Err(TraceError::TooManyOperands {
            index,
            kind,
            count: ids.len(),
            limit: N,
        });
    }
    let mut out = [None; N];
    for (slot, &id) in out.iter_mut().zip(ids) {
        let reg = RegId::new(id as usize).ok_or(TraceError::RegisterOutOfRange {
            index,
            reg: id,
            max: TOTAL_REGS - 1,
        })?;
        *slot = Some(reg);
    }
    Ok(out)
}

//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the Tomasulo core. It provides:
//! 1. **Cycle and CPI:** Total cycles, instructions, and derived CPI/IPC.
//! 2. **Instruction mix:** Counts by class (integer, floating-point, load, store, control, trap).
//! 3. **Pipeline events:** Structural stalls at dispatch and common data bus contention.
//! 4. **Timing table:** Per-instruction cycle stamps for every retired or dropped instruction.

use std::time::Instant;

use crate::core::record::{InstTag, InstructionRecord, Stage, Timestamps};
use crate::isa::OpClass;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions read from the trace into the fetch queue (traps excluded).
    pub instructions_fetched: u64,
    /// Trap instructions skipped by fetch.
    pub traps_skipped: u64,

    /// Integer compute instructions fetched.
    pub inst_int: u64,
    /// Floating-point compute instructions fetched.
    pub inst_fp: u64,
    /// Load instructions fetched.
    pub inst_load: u64,
    /// Store instructions fetched.
    pub inst_store: u64,
    /// Control-flow instructions fetched (removed at dispatch).
    pub inst_control: u64,

    /// Instructions placed in an integer reservation station.
    pub dispatched_int: u64,
    /// Instructions placed in a floating-point reservation station.
    pub dispatched_fp: u64,
    /// Control-flow instructions removed from the fetch-queue head.
    pub control_dropped: u64,
    /// Instructions started on an integer functional unit.
    pub executed_int: u64,
    /// Instructions started on a floating-point functional unit.
    pub executed_fp: u64,
    /// Results placed on the common data bus.
    pub broadcasts: u64,
    /// Stores retired straight from their functional unit.
    pub stores_retired: u64,

    /// Cycles the fetch-queue head waited for a reservation station.
    pub stalls_structural: u64,
    /// Cycles in which more than one completed instruction wanted the bus.
    pub bus_contention: u64,
    /// Operand tags cleared by broadcasts.
    pub wakeups: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_fetched: 0,
            traps_skipped: 0,
            inst_int: 0,
            inst_fp: 0,
            inst_load: 0,
            inst_store: 0,
            inst_control: 0,
            dispatched_int: 0,
            dispatched_fp: 0,
            control_dropped: 0,
            executed_int: 0,
            executed_fp: 0,
            broadcasts: 0,
            stores_retired: 0,
            stalls_structural: 0,
            bus_contention: 0,
            wakeups: 0,
        }
    }
}

impl SimStats {
    /// Counts one instruction read by fetch. Traps are counted as skipped.
    pub const fn record_fetch(&mut self, op: OpClass) {
        if !op.is_trap() {
            self.instructions_fetched += 1;
        }
        match op {
            OpClass::IntCompute => self.inst_int += 1,
            OpClass::FpCompute => self.inst_fp += 1,
            OpClass::Load => self.inst_load += 1,
            OpClass::Store => self.inst_store += 1,
            OpClass::CondBranch | OpClass::UncondBranch | OpClass::Call => self.inst_control += 1,
            OpClass::Trap => self.traps_skipped += 1,
        }
    }

    /// Cycles per fetched instruction.
    pub fn cpi(&self) -> f64 {
        if self.instructions_fetched == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_fetched as f64
        }
    }

    /// Fetched instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_fetched as f64 / self.cycles as f64
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"pipeline"`, `"instruction_mix"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "instruction_mix"];

impl SimStats {
    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`].
    /// Pass an empty slice to print all sections.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_fetched.max(1) as f64;

        if want("summary") {
            println!("\n==========================================================");
            println!("TOMASULO CORE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_fetched);
            println!("sim_traps_skipped        {}", self.traps_skipped);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("pipeline") {
            let pct = |n: u64| (n as f64 / cyc) * 100.0;
            println!("PIPELINE");
            println!("  rs.int.dispatched      {}", self.dispatched_int);
            println!("  rs.fp.dispatched       {}", self.dispatched_fp);
            println!("  control.dropped        {}", self.control_dropped);
            println!("  fu.int.started         {}", self.executed_int);
            println!("  fu.fp.started          {}", self.executed_fp);
            println!("  cdb.broadcasts         {}", self.broadcasts);
            println!("  cdb.wakeups            {}", self.wakeups);
            println!("  stores.retired         {}", self.stores_retired);
            println!(
                "  stalls.structural      {} ({:.2}%)",
                self.stalls_structural,
                pct(self.stalls_structural)
            );
            println!(
                "  cdb.contention         {} ({:.2}%)",
                self.bus_contention,
                pct(self.bus_contention)
            );
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let row = |name: &str, n: u64| {
                println!("  {name:<22} {n} ({:.2}%)", (n as f64 / instr) * 100.0);
            };
            println!("INSTRUCTION MIX");
            row("op.int", self.inst_int);
            row("op.fp", self.inst_fp);
            row("op.load", self.inst_load);
            row("op.store", self.inst_store);
            row("op.control", self.inst_control);
        }
        println!("==========================================================");
    }
}

/// Cycle stamps of one instruction, as exposed after a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstTiming {
    /// Sequence index.
    pub tag: InstTag,
    /// Opcode class.
    pub op: OpClass,
    /// Final lifecycle stage (`Retired` or `Dropped` after a complete run).
    pub stage: Stage,
    /// Cycle stamps.
    pub timing: Timestamps,
}

impl From<&InstructionRecord> for InstTiming {
    fn from(r: &InstructionRecord) -> Self {
        Self {
            tag: r.tag,
            op: r.inst.op,
            stage: r.stage(),
            timing: r.timing(),
        }
    }
}

/// Prints the per-instruction timing table.
pub fn print_timings(rows: &[InstTiming]) {
    println!(
        "{:>8}  {:<7} {:>9} {:>9} {:>9} {:>9}",
        "index", "op", "dispatch", "issue", "execute", "cdb"
    );
    for r in rows {
        let t = r.timing;
        println!(
            "{:>8}  {:<7} {:>9} {:>9} {:>9} {:>9}",
            r.tag.0, r.op, t.dispatch, t.issue, t.execute, t.broadcast
        );
    }
}

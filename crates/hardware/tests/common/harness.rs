use tomsim_core::config::Config;
use tomsim_core::core::record::{Stage, Timestamps};
use tomsim_core::sim::RunReport;
use tomsim_core::trace::Trace;
use tomsim_core::Simulator;

/// Owns a configuration and runs traces against it.
pub struct TestContext {
    pub config: Config,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let mut config = Config::default();
        // Guard against scheduler regressions turning into hung tests.
        config.general.max_cycles = Some(100_000);
        Self { config }
    }

    /// Applies `f` to the configuration.
    pub fn with_config(mut self, f: impl FnOnce(&mut Config)) -> Self {
        f(&mut self.config);
        self
    }

    /// Runs `trace` to completion.
    pub fn run(&self, trace: &Trace) -> RunReport {
        Simulator::new(self.config.clone())
            .unwrap()
            .run(trace)
            .unwrap()
    }
}

/// Stamps of instruction `seq` as a `(dispatch, issue, execute, broadcast)` tuple.
pub fn stamps(report: &RunReport, seq: usize) -> (u64, u64, u64, u64) {
    let Timestamps {
        dispatch,
        issue,
        execute,
        broadcast,
    } = report
        .timing(seq)
        .unwrap_or_else(|| panic!("instruction {seq} was never fetched"))
        .timing;
    (dispatch, issue, execute, broadcast)
}

/// Final stage of instruction `seq`.
pub fn final_stage(report: &RunReport, seq: usize) -> Stage {
    report.timing(seq).unwrap().stage
}

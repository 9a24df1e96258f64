pub mod config;
pub mod pipeline;

pub use config::ModelConfig;
pub use pipeline::analysis::{
    analyze_contract, AnalysisError, AnalysisReport, ClauseJudgment, ContractAnalyzer,
};

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for binaries embedding this crate.
///
/// Respects `RUST_LOG`; falls back to the crate default filter. Safe to call
/// more than once (later calls are no-ops).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

//! RateWatch Runner: configuration, run orchestration, report and CSV output.
//!
//! This crate builds on `ratewatch-core` to provide:
//! - TOML configuration with an environment override for the API key
//! - A single report run over the configured window ending yesterday
//! - The console text report
//! - CSV export with an appended summary block

pub mod config;
pub mod export;
pub mod report;
pub mod runner;

pub use config::{AppConfig, ChartMode, ConfigError, API_KEY_ENV, DEFAULT_CONFIG_PATH};
pub use export::{export_csv, write_csv};
pub use report::format_report;
pub use runner::{run_report, RunError, RunResult};

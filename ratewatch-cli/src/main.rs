//! RateWatch CLI: fetch a window of daily rates, report, chart, and export.
//!
//! A run resolves the window ending yesterday, fills it from the local cache
//! and the rate provider, prints the text report, writes the CSV, and shows
//! the chart.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{info, warn};
use ratewatch_core::HttpTransport;
use ratewatch_runner::{
    format_report, run_report, write_csv, AppConfig, ChartMode, RunResult, DEFAULT_CONFIG_PATH,
};

const TEXT_CHART_WIDTH: u16 = 100;
const TEXT_CHART_HEIGHT: u16 = 25;

#[derive(Parser, Debug)]
#[command(
    name = "ratewatch",
    about = "RateWatch, daily exchange-rate report with local caching"
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Number of days in the window, ending yesterday.
    #[arg(long)]
    days: Option<u32>,

    /// Base currency code (e.g. AUD).
    #[arg(long)]
    base: Option<String>,

    /// Target currency code (e.g. NZD).
    #[arg(long)]
    target: Option<String>,

    /// CSV output path.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Chart mode: interactive, text, or off.
    #[arg(long)]
    chart: Option<ChartMode>,

    /// Log progress at info level (RUST_LOG still takes precedence).
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(days) = self.days {
            config.report.days = days;
        }
        if let Some(base) = &self.base {
            config.report.base_currency = base.to_uppercase();
        }
        if let Some(target) = &self.target {
            config.report.target_currency = target.to_uppercase();
        }
        if let Some(csv) = &self.csv {
            config.output.csv_path = csv.clone();
        }
        if let Some(chart) = self.chart {
            config.output.chart = chart;
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configuration problems abort before any network activity
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    run(&config)
}

fn load_config(cli: &Cli) -> Result<AppConfig, ratewatch_runner::ConfigError> {
    let mut config = AppConfig::load(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn run(config: &AppConfig) -> Result<()> {
    let transport =
        HttpTransport::new(config.timeout()).context("failed to set up the HTTP client")?;
    let today = Local::now().date_naive();

    let result = run_report(config, &transport, today)?;
    if !result.assembly.skipped.is_empty() {
        warn!(
            "{} of {} dates had no rate",
            result.assembly.skipped.len(),
            result.assembly.requested()
        );
    }

    println!(
        "{}",
        format_report(result.series(), result.start, result.end, &result.stats)
    );

    write_csv(&result, &config.output.csv_path)?;
    info!("wrote {}", config.output.csv_path.display());

    present_chart(&result, config.output.chart)
}

fn present_chart(result: &RunResult, mode: ChartMode) -> Result<()> {
    let title = result.chart_title();
    match mode {
        ChartMode::Off => Ok(()),
        ChartMode::Interactive if std::io::stdout().is_terminal() => {
            ratewatch_tui::install_panic_hook();
            ratewatch_tui::show_chart(result.series(), &title)
        }
        ChartMode::Interactive | ChartMode::Text => {
            print!(
                "{}",
                ratewatch_tui::render_to_text(
                    result.series(),
                    &title,
                    TEXT_CHART_WIDTH,
                    TEXT_CHART_HEIGHT
                )
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_uses_defaults() {
        let cli = Cli::parse_from(["ratewatch"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(cli.days.is_none());
        assert!(!cli.verbose);

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "ratewatch",
            "--days",
            "7",
            "--base",
            "usd",
            "--target",
            "eur",
            "--csv",
            "out/rates.csv",
            "--chart",
            "text",
        ]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.report.days, 7);
        assert_eq!(config.report.base_currency, "USD");
        assert_eq!(config.report.target_currency, "EUR");
        assert_eq!(config.output.csv_path, PathBuf::from("out/rates.csv"));
        assert_eq!(config.output.chart, ChartMode::Text);
    }

    #[test]
    fn unknown_chart_mode_is_rejected() {
        assert!(Cli::try_parse_from(["ratewatch", "--chart", "pie"]).is_err());
    }
}

//! End-to-end run tests: config file on disk, stub provider, report and CSV.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use ratewatch_core::{FetchError, Transport};
use ratewatch_runner::{format_report, run_report, write_csv, AppConfig, ConfigError};

/// Serves a rate derived from the day of month; fails on the 15th.
struct DayOfMonthTransport {
    calls: AtomicUsize,
}

impl DayOfMonthTransport {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for DayOfMonthTransport {
    fn name(&self) -> &str {
        "day-of-month"
    }

    fn get(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let day: u32 = url[url.len() - 2..]
            .parse()
            .map_err(|_| FetchError::ResponseFormatChanged(url.to_string()))?;
        if day == 15 {
            return Err(FetchError::NetworkUnreachable("connection reset".into()));
        }
        Ok(format!(
            r#"{{"result":"success","conversion_rates":{{"NZD":{}}}}}"#,
            1.0 + f64::from(day) / 1000.0
        ))
    }
}

fn write_config(dir: &tempfile::TempDir, days: u32) -> std::path::PathBuf {
    let cache = dir.path().join("cache").join("rates.json");
    let csv = dir.path().join("out").join("rates.csv");
    let content = format!(
        "[api]\napi_key = \"secret\"\n\n[report]\ndays = {days}\n\n[cache]\npath = {cache:?}\n\n[output]\ncsv_path = {csv:?}\nchart = \"off\"\n"
    );
    let path = dir.path().join("ratewatch.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn thirty_day_run_writes_report_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_with_env_key(&write_config(&dir, 30), None).unwrap();
    let transport = DayOfMonthTransport::new();
    let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

    let result = run_report(&config, &transport, today).unwrap();

    assert_eq!(result.start, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(result.end, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    assert_eq!(transport.calls(), 30);
    assert_eq!(result.series().len(), 29);

    let text = format_report(result.series(), result.start, result.end, &result.stats);
    assert!(text.contains("Date Range: 2024-06-01 - 2024-06-30"));
    assert!(text.contains("Number of days: 29"));
    assert!(text.contains("Best exchange rate: 1.03000 (on 2024/06/30)"));
    assert!(text.contains("Worst exchange rate: 1.00100 (on 2024/06/01)"));

    write_csv(&result, &config.output.csv_path).unwrap();
    let csv = std::fs::read_to_string(&config.output.csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Date,AUD_NZD_ExRate");
    assert_eq!(lines.len(), 1 + 29 + 2);
    assert!(lines[31].starts_with("2024-06-01,2024-06-30,29,"));
}

#[test]
fn rerun_only_refetches_failed_dates() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_with_env_key(&write_config(&dir, 30), None).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

    let first = DayOfMonthTransport::new();
    run_report(&config, &first, today).unwrap();

    let second = DayOfMonthTransport::new();
    let result = run_report(&config, &second, today).unwrap();

    assert_eq!(second.calls(), 1);
    assert_eq!(result.assembly.cache_hits, 29);
    assert_eq!(result.assembly.skipped.len(), 1);
}

#[test]
fn missing_key_fails_before_any_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ratewatch.toml");
    std::fs::write(&path, "[report]\ndays = 3\n").unwrap();

    let err = AppConfig::load_with_env_key(&path, None).unwrap_err();
    assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    assert!(err.to_string().contains("API key not found"));
}

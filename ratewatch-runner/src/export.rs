//! CSV export of the rate series with an appended summary block.
//!
//! Layout:
//! ```text
//! Date,AUD_NZD_ExRate
//! 2024/05/01,1.1
//! 2024/05/03,1.2
//! Start Date,End Date,Number of days,Best Exchange Rate,Worst Exchange Rate,Average Exchange Rate
//! 2024-05-01,2024-05-03,2,1.2,1.1,1.15
//! ```
//! Absent statistics are written as empty cells.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ratewatch_core::{RateSeries, RateStatistics};

use crate::runner::RunResult;

const SUMMARY_HEADER: [&str; 6] = [
    "Start Date",
    "End Date",
    "Number of days",
    "Best Exchange Rate",
    "Worst Exchange Rate",
    "Average Exchange Rate",
];

/// Render the series and summary rows as CSV text.
pub fn export_csv(
    series: &RateSeries,
    start: NaiveDate,
    end: NaiveDate,
    stats: &RateStatistics,
    rate_column: &str,
) -> Result<String> {
    // The summary block has more columns than the series block
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(vec![]);

    wtr.write_record(["Date", rate_column])?;
    for point in series {
        wtr.write_record([point.date.to_string(), point.rate.to_string()])?;
    }

    wtr.write_record(SUMMARY_HEADER)?;
    let cell = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    wtr.write_record([
        start.format("%Y-%m-%d").to_string(),
        end.format("%Y-%m-%d").to_string(),
        series.len().to_string(),
        cell(stats.best()),
        cell(stats.worst()),
        cell(stats.average()),
    ])?;

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write the CSV for a finished run to `path`, creating parent directories.
pub fn write_csv(result: &RunResult, path: &Path) -> Result<()> {
    let text = export_csv(
        result.series(),
        result.start,
        result.end,
        &result.stats,
        &result.rate_column(),
    )?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

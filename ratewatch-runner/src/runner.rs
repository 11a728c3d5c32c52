//! Single report run: resolve the range, assemble the series, compute stats.

use chrono::NaiveDate;
use log::info;
use ratewatch_core::{
    assemble_series, date_range_ending, Assembly, CacheError, RangeError, RateSeries,
    RateStatistics, Transport,
};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("date range error: {0}")]
    Range(#[from] RangeError),
    #[error("rate cache error: {0}")]
    Storage(#[from] CacheError),
}

/// Everything a run produced, ready for the presenters.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub base_currency: String,
    pub target_currency: String,
    pub assembly: Assembly,
    pub stats: RateStatistics,
}

impl RunResult {
    pub fn series(&self) -> &RateSeries {
        &self.assembly.series
    }

    /// CSV column label, e.g. `AUD_NZD_ExRate`.
    pub fn rate_column(&self) -> String {
        format!("{}_{}_ExRate", self.base_currency, self.target_currency)
    }

    /// Chart title, e.g. `AUD to NZD Exchange Rate`.
    pub fn chart_title(&self) -> String {
        format!(
            "{} to {} Exchange Rate",
            self.base_currency, self.target_currency
        )
    }
}

/// Run a report over the `config.report.days` days ending yesterday
/// relative to `today`.
pub fn run_report(
    config: &AppConfig,
    transport: &dyn Transport,
    today: NaiveDate,
) -> Result<RunResult, RunError> {
    let (start, end) = date_range_ending(today, config.report.days)?;
    let query = config.query();
    info!(
        "fetching {}/{} rates {start}..={end} via {}",
        query.base_currency,
        query.target_currency,
        transport.name()
    );

    let assembly = assemble_series(
        start,
        end,
        &query,
        transport,
        &config.cache.path,
        config.cache_policy(),
    )?;
    let stats = RateStatistics::compute(&assembly.series);

    Ok(RunResult {
        start,
        end,
        base_currency: query.base_currency,
        target_currency: query.target_currency,
        assembly,
        stats,
    })
}

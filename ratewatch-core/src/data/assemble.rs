//! Series assembly: walks a date range through the cached fetcher.
//!
//! One cache handle is opened for the whole range and closed afterwards.
//! Per-date failures are recorded and skipped; only opening or closing the
//! cache can fail the call.

use super::cache::{CacheError, CachePolicy, JsonFileCache, RateCache};
use super::fetcher::{fetch_rate, FetchOutcome, RateSource};
use super::provider::{FetchError, Transport};
use super::request::{redact_url, RateQuery};
use crate::domain::{DateKey, RatePoint, RateSeries};
use chrono::NaiveDate;
use std::path::Path;

/// A date that produced no rate, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDate {
    pub date: DateKey,
    pub reason: FetchError,
}

/// The assembled series plus per-date bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assembly {
    pub series: RateSeries,
    pub skipped: Vec<SkippedDate>,
    pub cache_hits: usize,
    pub network_fetches: usize,
}

impl Assembly {
    /// Number of dates visited.
    pub fn requested(&self) -> usize {
        self.series.len() + self.skipped.len()
    }
}

/// Assemble `[start, end]` using the JSON cache at `cache_path`.
///
/// The cache is closed before returning, whether or not any date succeeded.
pub fn assemble_series(
    start: NaiveDate,
    end: NaiveDate,
    query: &RateQuery,
    transport: &dyn Transport,
    cache_path: &Path,
    policy: CachePolicy,
) -> Result<Assembly, CacheError> {
    let mut cache = JsonFileCache::open(cache_path, policy)?;
    let assembly = assemble_with_cache(start, end, query, transport, &mut cache);
    cache.close()?;
    Ok(assembly)
}

/// Assemble `[start, end]` against an already-open cache.
///
/// Dates are visited ascending, one at a time. A `start` after `end`
/// yields an empty assembly.
pub fn assemble_with_cache(
    start: NaiveDate,
    end: NaiveDate,
    query: &RateQuery,
    transport: &dyn Transport,
    cache: &mut dyn RateCache,
) -> Assembly {
    let mut assembly = Assembly::default();
    let end = DateKey::new(end);
    let mut current = Some(DateKey::new(start));

    while let Some(date) = current.filter(|d| *d <= end) {
        let url = query.url_for(date);
        log::debug!("{date}: {}", redact_url(&url, &query.api_key));
        match fetch_rate(transport, cache, &url, date, &query.target_currency) {
            FetchOutcome::Rate { rate, source } => {
                match source {
                    RateSource::Cache => assembly.cache_hits += 1,
                    RateSource::Network => assembly.network_fetches += 1,
                }
                // Dates are strictly increasing and rates validated, so push cannot fail
                if let Err(e) = assembly.series.push(RatePoint { date, rate }) {
                    log::warn!("dropping {date}: {e}");
                }
            }
            FetchOutcome::Absent(reason) => {
                assembly.skipped.push(SkippedDate { date, reason });
            }
        }
        current = date.succ();
    }

    log::info!(
        "assembled {} of {} dates ({} cached, {} fetched, {} skipped)",
        assembly.series.len(),
        assembly.requested(),
        assembly.cache_hits,
        assembly.network_fetches,
        assembly.skipped.len()
    );

    assembly
}

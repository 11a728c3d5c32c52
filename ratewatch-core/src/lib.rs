//! RateWatch Core: the cache-backed exchange-rate fetch pipeline.
//!
//! This crate contains:
//! - Domain types (date keys, rate points, ordered rate series)
//! - Date range resolution and provider request URLs
//! - The transport seam and its blocking HTTP implementation
//! - The persistent rate cache with a configurable expiry policy
//! - The cached per-date fetcher and the series assembler
//! - Summary statistics over an assembled series

pub mod data;
pub mod domain;
pub mod stats;

pub use data::{
    assemble_series, assemble_with_cache, build_request_url, date_range_ending, fetch_rate,
    get_date_range, Assembly, CacheError, CachePolicy, FetchError, FetchOutcome, HttpTransport,
    JsonFileCache, MemoryCache, RangeError, RateCache, RateQuery, RateSource, SkippedDate,
    Transport,
};
pub use domain::{DateKey, RatePoint, RateSeries};
pub use stats::{RateStatistics, SummaryStats};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: values handed across the runner/TUI boundary are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<DateKey>();
        require_sync::<DateKey>();
        require_send::<RatePoint>();
        require_sync::<RatePoint>();
        require_send::<RateSeries>();
        require_sync::<RateSeries>();
        require_send::<RateStatistics>();
        require_sync::<RateStatistics>();
        require_send::<Assembly>();
        require_sync::<Assembly>();
        require_send::<FetchError>();
        require_sync::<FetchError>();
        require_send::<CacheError>();
        require_sync::<CacheError>();
        require_send::<HttpTransport>();
        require_sync::<HttpTransport>();
    }

    /// The transport seam is object-safe so the assembler can take `&dyn Transport`.
    #[test]
    fn transport_trait_is_object_safe() {
        fn _check(t: &dyn Transport, url: &str) -> Result<String, FetchError> {
            t.get(url)
        }
    }
}

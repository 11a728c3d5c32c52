//! Rate acquisition: range resolution, requests, transport, cache, fetch, assembly.

pub mod assemble;
pub mod cache;
pub mod fetcher;
pub mod http;
pub mod provider;
pub mod range;
pub mod request;

pub use assemble::{assemble_series, assemble_with_cache, Assembly, SkippedDate};
pub use cache::{CacheError, CachePolicy, JsonFileCache, MemoryCache, RateCache};
pub use fetcher::{fetch_rate, FetchOutcome, RateSource};
pub use http::HttpTransport;
pub use provider::{FetchError, Transport};
pub use range::{date_range_ending, get_date_range, RangeError};
pub use request::{build_request_url, redact_url, RateQuery};

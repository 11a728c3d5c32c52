//! Cached single-date rate fetch.
//!
//! A fresh cache entry short-circuits the network entirely. On a miss the
//! transport is called once; only a validated success response is cached.
//! Every failure comes back as `FetchOutcome::Absent` with the reason.

use super::cache::RateCache;
use super::provider::{FetchError, Transport};
use crate::domain::DateKey;
use serde::Deserialize;
use std::collections::HashMap;

/// History endpoint response body (only the fields we read).
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    conversion_rates: Option<HashMap<String, f64>>,
}

/// Where a returned rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Cache,
    Network,
}

/// Result of fetching one date.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Rate { rate: f64, source: RateSource },
    Absent(FetchError),
}

impl FetchOutcome {
    pub fn rate(&self) -> Option<f64> {
        match self {
            Self::Rate { rate, .. } => Some(*rate),
            Self::Absent(_) => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent(_))
    }
}

/// Fetch the `target_currency` rate for `key`, consulting `cache` first.
///
/// Never fails: transport errors, unsuccessful payloads and malformed bodies
/// are logged and returned as `Absent`. A cache write failure after a
/// successful fetch is logged and the fetched rate is still returned.
pub fn fetch_rate(
    transport: &dyn Transport,
    cache: &mut dyn RateCache,
    url: &str,
    key: DateKey,
    target_currency: &str,
) -> FetchOutcome {
    if let Some(rate) = cache.get(&key) {
        log::debug!("cache hit for {key}: {rate}");
        return FetchOutcome::Rate {
            rate,
            source: RateSource::Cache,
        };
    }

    log::debug!("cache miss for {key}, requesting via {}", transport.name());
    let rate = match transport
        .get(url)
        .and_then(|body| parse_rate(&body, target_currency))
    {
        Ok(rate) => rate,
        Err(e) => {
            log::warn!("rate fetch failed for {key}: {e}");
            return FetchOutcome::Absent(e);
        }
    };

    if let Err(e) = cache.set(key, rate) {
        log::warn!("fetched {key} but could not cache it: {e}");
    }

    FetchOutcome::Rate {
        rate,
        source: RateSource::Network,
    }
}

/// Extract and validate the `currency` rate from a history response body.
pub fn parse_rate(body: &str, currency: &str) -> Result<f64, FetchError> {
    let resp: HistoryResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::ResponseFormatChanged(format!("invalid JSON body: {e}")))?;

    if resp.result.as_deref() != Some("success") {
        return Err(FetchError::ProviderFailure {
            error_type: resp.error_type.or(resp.result),
        });
    }

    let rate = resp
        .conversion_rates
        .ok_or_else(|| FetchError::ResponseFormatChanged("no conversion_rates".into()))?
        .get(currency)
        .copied()
        .ok_or_else(|| FetchError::MissingRate {
            currency: currency.to_string(),
        })?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(FetchError::InvalidRate { value: rate });
    }
    Ok(rate)
}

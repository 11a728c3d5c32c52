//! Provider request URLs.
//!
//! Layout: `{base_url}/{api_key}/history/{base_currency}/{YYYY}/{MM}/{DD}`

use crate::domain::DateKey;
use serde::{Deserialize, Serialize};

/// Everything needed to address the provider, apart from the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuery {
    pub base_url: String,
    pub api_key: String,
    pub base_currency: String,
    pub target_currency: String,
}

impl RateQuery {
    pub fn url_for(&self, date: DateKey) -> String {
        build_request_url(&self.base_url, &self.api_key, &self.base_currency, date)
    }
}

/// Build the history endpoint URL for one date.
///
/// Segments are joined verbatim; the currency code is not validated.
pub fn build_request_url(
    base_url: &str,
    api_key: &str,
    base_currency: &str,
    date: impl Into<DateKey>,
) -> String {
    let date = date.into();
    format!("{base_url}/{api_key}/history/{base_currency}/{date}")
}

/// Replace the API key segment so a URL is safe to log.
pub fn redact_url(url: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return url.to_string();
    }
    url.replace(&format!("/{api_key}/"), "/***/")
}

//! Transport trait and per-date fetch error types.
//!
//! The Transport trait abstracts the HTTP round trip so the fetcher can be
//! driven by the real provider or by a stub in tests. The cache layer sits
//! above this trait; transports don't know about the cache.

use thiserror::Error;

/// Why a single date produced no rate.
///
/// These never abort a run: the assembler records them and moves on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("provider reported failure ({})", .error_type.as_deref().unwrap_or("no success indicator"))]
    ProviderFailure { error_type: Option<String> },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("no {currency} rate in response")]
    MissingRate { currency: String },

    #[error("rate {value} is not a positive finite number")]
    InvalidRate { value: f64 },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// A blocking request/response transport.
///
/// `get` returns the response body for a successful status and an error for
/// connection failures, timeouts, and non-success statuses.
pub trait Transport: Send + Sync {
    /// Human-readable name of this transport.
    fn name(&self) -> &str;

    fn get(&self, url: &str) -> Result<String, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_failure_message_names_error_type() {
        let e = FetchError::ProviderFailure {
            error_type: Some("invalid-key".into()),
        };
        assert_eq!(e.to_string(), "provider reported failure (invalid-key)");

        let e = FetchError::ProviderFailure { error_type: None };
        assert_eq!(
            e.to_string(),
            "provider reported failure (no success indicator)"
        );
    }

    #[test]
    fn http_status_message() {
        assert_eq!(
            FetchError::HttpStatus { status: 503 }.to_string(),
            "provider returned HTTP 503"
        );
    }
}

//! Blocking HTTP transport for the rate provider.
//!
//! One request per call, no retries and no rate-limit handling: a failure
//! is reported to the fetcher, which skips the date.

use super::provider::{FetchError, Transport};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ratewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    fn get(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            // without_url keeps the API key out of the message
            .map_err(|e| FetchError::NetworkUnreachable(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        resp.text()
            .map_err(|e| FetchError::ResponseFormatChanged(e.without_url().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    #[test]
    fn returns_body_on_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v6/key/history/AUD/2024/05/01");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"result":"success"}"#);
        });

        let transport = HttpTransport::new(DEFAULT_TIMEOUT).unwrap();
        let body = transport
            .get(&server.url("/v6/key/history/AUD/2024/05/01"))
            .unwrap();

        mock.assert();
        assert_eq!(body, r#"{"result":"success"}"#);
    }

    #[test]
    fn non_success_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(404).body(r#"{"result":"error","error-type":"no-data-available"}"#);
        });

        let transport = HttpTransport::new(DEFAULT_TIMEOUT).unwrap();
        let err = transport.get(&server.url("/anything")).unwrap_err();
        assert_eq!(err, FetchError::HttpStatus { status: 404 });
    }

    #[test]
    fn connection_failure_is_network_unreachable() {
        // Grab a free port, then release it so nothing is listening
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
        let err = transport
            .get(&format!("http://127.0.0.1:{port}/v6"))
            .unwrap_err();
        assert!(matches!(err, FetchError::NetworkUnreachable(_)));
    }
}

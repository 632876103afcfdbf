use crate::{Error, ErrorContext, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// Failure of a single HTTP attempt. Several of these may be folded into
/// one [`Error::Transport`] once every endpoint has been tried.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            TransportError::Status { status, .. } => Some(*status),
        }
    }
}

/// Successful POST: the endpoint that answered and its raw body.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub endpoint: String,
    pub body: Vec<u8>,
}

pub struct HttpTransport {
    client: Client,
    api_key: String,
    endpoints: Vec<String>,
}

impl HttpTransport {
    /// `endpoints` is tried in order; it must contain at least one entry.
    pub fn new(api_key: impl Into<String>, endpoints: Vec<String>, timeout: Duration) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(Error::configuration_with_context(
                "At least one endpoint is required",
                ErrorContext::new()
                    .with_field_path("--endpoint")
                    .with_source("http_transport"),
            ));
        }
        for endpoint in &endpoints {
            Url::parse(endpoint).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid endpoint URL: {}", e),
                    ErrorContext::new()
                        .with_details(endpoint.clone())
                        .with_source("http_transport"),
                )
            })?;
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// POST a JSON body to each endpoint in turn until one answers with a
    /// 2xx status. Connection failures, timeouts and non-2xx statuses move on
    /// to the next endpoint; the last failure is reported if none succeed.
    pub fn post_json(&self, body: &[u8]) -> Result<Delivery> {
        let mut last_failure: Option<(&str, TransportError)> = None;

        for (idx, endpoint) in self.endpoints.iter().enumerate() {
            let start = Instant::now();
            debug!(endpoint = endpoint.as_str(), attempt = idx + 1, "sending synthesis request");

            match self.post_once(endpoint, body) {
                Ok(bytes) => {
                    debug!(
                        endpoint = endpoint.as_str(),
                        bytes = bytes.len(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        "synthesis request succeeded"
                    );
                    return Ok(Delivery {
                        endpoint: endpoint.clone(),
                        body: bytes,
                    });
                }
                Err(e) => {
                    warn!(
                        endpoint = endpoint.as_str(),
                        attempt = idx + 1,
                        http_status = e.status().unwrap_or(0),
                        duration_ms = start.elapsed().as_millis() as u64,
                        error = %e,
                        "synthesis request failed"
                    );
                    last_failure = Some((endpoint.as_str(), e));
                }
            }
        }

        match last_failure {
            Some((endpoint, e)) => Err(Error::Transport {
                status: e.status(),
                message: e.to_string(),
                endpoint: endpoint.to_string(),
                attempts: self.endpoints.len(),
            }),
            None => Err(Error::configuration("No endpoint configured")),
        }
    }

    fn post_once(&self, endpoint: &str, body: &[u8]) -> std::result::Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()?;
        let status = response.status();
        let bytes = response.bytes()?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(bytes.to_vec())
    }

    /// GET the audio file the provider points at. No credential is sent and
    /// there is no fallback.
    pub fn download(&self, url: &str) -> Result<Vec<u8>> {
        let fail = |e: TransportError| Error::Transport {
            status: e.status(),
            message: e.to_string(),
            endpoint: url.to_string(),
            attempts: 1,
        };

        Url::parse(url).map_err(|e| Error::Transport {
            message: format!("invalid audio URL: {}", e),
            endpoint: url.to_string(),
            status: None,
            attempts: 1,
        })?;

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fail(TransportError::Http(e)))?;
        let status = response.status();
        let bytes = response.bytes().map_err(|e| fail(TransportError::Http(e)))?;
        if !status.is_success() {
            return Err(fail(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }));
        }
        debug!(
            url,
            bytes = bytes.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "downloaded audio"
        );
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_endpoint_list() {
        let err = HttpTransport::new("key", vec![], Duration::from_secs(1))
            .err()
            .expect("empty endpoint list must fail");
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_rejects_malformed_endpoint() {
        let err = HttpTransport::new("key", vec!["not a url".into()], Duration::from_secs(1))
            .err()
            .expect("malformed endpoint must fail");
        assert!(err.to_string().contains("Invalid endpoint URL"));
    }

    #[test]
    fn test_invalid_download_url_counts_one_attempt() {
        let transport = HttpTransport::new(
            "key",
            vec!["http://127.0.0.1:9/v1/t2a_v2".into()],
            Duration::from_secs(1),
        )
        .unwrap();
        let err = transport.download("not a url").unwrap_err();
        assert!(matches!(err, Error::Transport { attempts: 1, status: None, .. }));
        assert!(err.to_string().contains("attempts: 1"));
    }

    #[test]
    fn test_status_error_display() {
        let e = TransportError::Status {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(e.to_string(), "HTTP 502: bad gateway");
        assert_eq!(e.status(), Some(502));
    }
}

//! Outbound fetch
//!
//! One shared `reqwest::Client` wrapped so the handler issues exactly one
//! request per call: validated method + URL, no custom headers, no body.
//! Transport failures (DNS, refused connections, timeouts) are flattened
//! into `Error::Upstream`; the detail stays in the log, never on the wire.

use std::time::Duration;

use anyhow::{Context, Result};
use fetchgate_shared::{Error, FetchMethod, FetchRequest};

/// Result of the single outbound call, before header filtering.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Shared outbound HTTP client.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    /// Build the client with the configured request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build upstream HTTP client")?;
        Ok(Self { client })
    }

    /// Issue the single outbound request and read the full body into
    /// memory (binary-safe, never decoded as text). HEAD responses come
    /// back with an empty body from the wire already.
    pub async fn fetch(&self, request: &FetchRequest) -> fetchgate_shared::Result<UpstreamResponse> {
        let method = match request.method {
            FetchMethod::Get => reqwest::Method::GET,
            FetchMethod::Head => reqwest::Method::HEAD,
        };

        let response = self
            .client
            .request(method, request.url.clone())
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str().ok().map(|val| (k.as_str().to_string(), val.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?
            .to_vec();

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}

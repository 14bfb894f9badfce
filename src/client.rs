//! Shared HTTP plumbing for the two ingest pipelines

use eyre::{Result, eyre};
use log::debug;

/// Media type of the metric line-protocol body
pub const CONTENT_TYPE_LINE: &str = "text/plain";
/// Media type of event payloads
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTP client for one pipeline invocation.
///
/// Carries the endpoint base and the fixed `Authorization` and
/// `Content-Type` header values applied to every request it issues.
/// Each `send_metrics`/`send_events` call constructs its own instance;
/// nothing is cached across invocations.
pub struct IngestClient {
    base: String,
    token: String,
    content_type: &'static str,
}

impl IngestClient {
    pub fn new(endpoint: &str, token: &str, content_type: &'static str) -> Self {
        Self {
            base: endpoint.trim_end_matches('/').to_string(),
            token: token.to_string(),
            content_type,
        }
    }

    /// POST a body to an API path under the endpoint base.
    ///
    /// Returns the status code for accepted responses (< 400). A rejected
    /// status or a transport-level failure is an error; the caller decides
    /// whether to swallow it. No timeout is set beyond ureq's defaults.
    pub fn post(&self, path: &str, body: &[u8]) -> Result<u16> {
        let url = format!("{}{}", self.base, path);
        debug!("POST {} ({} bytes)", url, body.len());

        let response = ureq::post(&url)
            .header("Authorization", &format!("Api-Token {}", self.token))
            .header("Content-Type", self.content_type)
            .send(body)
            .map_err(|e| eyre!("POST {} failed: {}", url, e))?;

        Ok(response.status().as_u16())
    }
}

/// Outcome summary for one pipeline invocation.
///
/// `attempted` counts network requests, not records: the metric pipeline
/// batches every metric into a single request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DeliveryReport {
    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.delivered += 1;
    }

    pub fn record_failure(&mut self) {
        self.attempted += 1;
        self.failed += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }
}

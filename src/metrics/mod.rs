//! Metric pipeline: line-protocol encoding and batched delivery

pub mod encode;

use indexmap::IndexMap;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::client::{CONTENT_TYPE_LINE, DeliveryReport, IngestClient};

/// Ingest path for the metric line protocol
pub const METRICS_PATH: &str = "/api/v2/metrics/ingest";

/// A single numeric data point.
///
/// `value` holds the numeric literal text and is forwarded verbatim; a
/// malformed value is the receiver's to reject, not validated here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Metric {
    pub name: String,
    pub value: String,
    /// Key/value labels; insertion order is the wire order
    #[serde(default)]
    pub dimensions: IndexMap<String, String>,
}

/// Encode all metrics into one line-protocol blob and POST it as a single
/// request, no matter how many metrics are batched.
///
/// A failed delivery is logged and counted in the report, never returned
/// as an error.
pub fn send_metrics(endpoint: &str, token: &str, metrics: &[Metric]) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    if metrics.is_empty() {
        info!("No metrics to send");
        return report;
    }

    let blob = encode::render_lines(metrics);
    info!("Sending {} metric(s)", metrics.len());
    info!("Line protocol payload:\n{}", blob);

    let client = IngestClient::new(endpoint, token, CONTENT_TYPE_LINE);
    match client.post(METRICS_PATH, blob.as_bytes()) {
        Ok(status) => {
            info!("Metric ingest accepted with status {}", status);
            report.record_success();
        }
        Err(e) => {
            error!("Metric ingest failed: {}", e);
            report.record_failure();
        }
    }

    report
}

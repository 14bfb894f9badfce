//! Event pipeline: record classification, payload shaping, per-record delivery

pub mod payload;
pub mod tags;

use indexmap::IndexMap;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::client::{CONTENT_TYPE_JSON, DeliveryReport, IngestClient};

/// Ingest path for event payloads
pub const EVENTS_PATH: &str = "/api/v1/events";

/// Event type vocabulary of the ingest API.
///
/// Anything outside the known set deserializes to `Other`, which the
/// pipeline skips without failing. The original type string is not kept,
/// so the skip log cannot name it; identify the record by title instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    CustomInfo,
    AvailabilityEvent,
    ErrorEvent,
    PerformanceEvent,
    ResourceContention,
    CustomDeployment,
    #[serde(other)]
    Other,
}

/// Flat input record: the field superset across both wire shapes.
///
/// Only the subset relevant to the resolved type is serialized; the rest
/// is carried and ignored. Keys are camelCase to match the wire
/// vocabulary the records describe.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deployment_name: Option<String>,
    pub deployment_version: Option<String>,
    pub deployment_project: Option<String>,
    pub remediation_action: Option<String>,
    pub ci_back_link: Option<String>,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dimensions: IndexMap<String, String>,
}

impl EventRecord {
    fn label(&self) -> &str {
        self.title.as_deref().unwrap_or("<untitled>")
    }
}

/// Build and POST one JSON payload per supported record, sequentially and
/// in input order.
///
/// Every record is handled independently: a failed delivery is logged and
/// counted, and the next record is still attempted. Unsupported types are
/// skipped, not failed.
pub fn send_events(
    endpoint: &str,
    token: &str,
    source: &str,
    events: &[EventRecord],
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    if events.is_empty() {
        info!("No events to send");
        return report;
    }

    let client = IngestClient::new(endpoint, token, CONTENT_TYPE_JSON);

    for record in events {
        let Some(payload) = payload::build_payload(record, source) else {
            warn!("Skipping event '{}': unsupported event type", record.label());
            report.record_skip();
            continue;
        };

        let body = match serde_json::to_string(&payload) {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to serialize event '{}': {}", record.label(), e);
                report.record_failure();
                continue;
            }
        };
        info!("Event payload: {}", body);

        match client.post(EVENTS_PATH, body.as_bytes()) {
            Ok(status) => {
                info!("Event '{}' accepted with status {}", record.label(), status);
                report.record_success();
            }
            Err(e) => {
                error!("Event '{}' delivery failed: {}", record.label(), e);
                report.record_failure();
            }
        }
    }

    report
}

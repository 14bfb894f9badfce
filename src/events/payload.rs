//! Wire payload shapes for the event ingest API
//!
//! Two JSON shapes exist: the "standard" shape shared by the five
//! informational/problem event types, and the deployment shape used only
//! by `CUSTOM_DEPLOYMENT`. The input record is a superset of both; shape
//! selection picks which subset of its fields goes onto the wire.

use indexmap::IndexMap;
use serde::Serialize;

use super::tags::{TagAttachRule, extract_rules};
use super::{EventRecord, EventType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachRules {
    /// Entity ids from the record, verbatim; omitted when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entity_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_rule: Vec<TagAttachRule>,
}

/// Shape for the five standard event types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardEvent {
    pub event_type: EventType,
    pub attach_rules: AttachRules,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub custom_properties: IndexMap<String, String>,
}

/// Shape for `CUSTOM_DEPLOYMENT` events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEvent {
    pub event_type: EventType,
    pub attach_rules: AttachRules,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_back_link: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub custom_properties: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    Standard(StandardEvent),
    Deployment(DeploymentEvent),
}

/// Pick the wire shape for one record, or `None` when its type is not one
/// the ingest API accepts. The five-type boundary of the standard shape is
/// part of the wire contract; do not widen it casually.
pub fn build_payload(record: &EventRecord, source: &str) -> Option<EventPayload> {
    let attach_rules = AttachRules {
        entity_ids: record.entities.clone(),
        tag_rule: extract_rules(&record.tags),
    };

    match record.event_type {
        EventType::CustomInfo
        | EventType::AvailabilityEvent
        | EventType::ErrorEvent
        | EventType::PerformanceEvent
        | EventType::ResourceContention => Some(EventPayload::Standard(StandardEvent {
            event_type: record.event_type,
            attach_rules,
            source: source.to_string(),
            description: record.description.clone(),
            title: record.title.clone(),
            custom_properties: record.dimensions.clone(),
        })),
        EventType::CustomDeployment => Some(EventPayload::Deployment(DeploymentEvent {
            event_type: record.event_type,
            attach_rules,
            source: source.to_string(),
            deployment_name: record.deployment_name.clone(),
            deployment_version: record.deployment_version.clone(),
            deployment_project: record.deployment_project.clone(),
            remediation_action: record.remediation_action.clone(),
            ci_back_link: record.ci_back_link.clone(),
            custom_properties: record.dimensions.clone(),
        })),
        EventType::Other => None,
    }
}

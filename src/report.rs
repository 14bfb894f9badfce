//! Report file loading: the collaborator-facing input format
//!
//! A report file is YAML with two optional top-level lists, `metrics` and
//! `events`, already structured the way the pipelines consume them. This
//! is the only parsing the tool does; producing the file is the CI job's
//! business.

use eyre::{Context, Result};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::events::EventRecord;
use crate::metrics::Metric;
use crate::metrics::encode::sanitize_key;

/// Parsed report file: ordered metric and event records
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportFile {
    pub metrics: Vec<Metric>,
    pub events: Vec<EventRecord>,
}

impl ReportFile {
    /// Load and parse a YAML report file.
    ///
    /// Metrics whose name sanitizes to the empty string can never form a
    /// valid line and are dropped here with a warning.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report file: {}", path.display()))?;

        let mut report: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse report file: {}", path.display()))?;

        report.metrics.retain(|metric| {
            let keep = !sanitize_key(&metric.name).is_empty();
            if !keep {
                warn!("Dropping metric with empty name (value: {})", metric.value);
            }
            keep
        });

        Ok(report)
    }
}

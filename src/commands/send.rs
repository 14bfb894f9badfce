//! Send a report file to the ingest endpoints
//!
//! Runs the metric pipeline, then the event pipeline, each with its own
//! client. By default delivery failures only show up in the log and the
//! summary; under the strict policy they also fail the process.

use colored::*;
use eyre::{Result, eyre};
use std::path::Path;

use crate::client::DeliveryReport;
use crate::config::{Config, DeliveryPolicy};
use crate::events::{self, payload::build_payload};
use crate::metrics::{self, encode::render_lines};
use crate::report::ReportFile;

/// Run the send command
pub fn run(
    file: &Path,
    endpoint: Option<String>,
    token: Option<String>,
    strict: bool,
    dry_run: bool,
    config: &Config,
) -> Result<()> {
    let report = ReportFile::load(file)?;

    if dry_run {
        return render_only(&report, &config.source);
    }

    let endpoint = endpoint.or_else(|| config.endpoint.clone()).ok_or_else(|| {
        eyre!("No endpoint configured: pass --endpoint or set `endpoint` in beacon.yaml")
    })?;
    let token = token
        .or_else(|| std::env::var("BEACON_API_TOKEN").ok())
        .or_else(|| config.token.clone())
        .ok_or_else(|| eyre!("No API token configured: pass --token or set BEACON_API_TOKEN"))?;

    let policy = if strict {
        DeliveryPolicy::Strict
    } else {
        config.delivery
    };

    let metric_report = metrics::send_metrics(&endpoint, &token, &report.metrics);
    let event_report = events::send_events(&endpoint, &token, &config.source, &report.events);

    print_summary(&report, &metric_report, &event_report);

    let failed = metric_report.failed + event_report.failed;
    if policy == DeliveryPolicy::Strict && failed > 0 {
        return Err(eyre!("{} delivery request(s) failed", failed));
    }

    Ok(())
}

/// Render everything a real run would send, without network calls
fn render_only(report: &ReportFile, source: &str) -> Result<()> {
    if !report.metrics.is_empty() {
        println!("Line protocol payload:");
        print!("{}", render_lines(&report.metrics));
    }

    let mut skipped = 0;
    for record in &report.events {
        match build_payload(record, source) {
            Some(payload) => println!("Event payload: {}", serde_json::to_string(&payload)?),
            None => skipped += 1,
        }
    }

    println!();
    println!("Dry run complete:");
    println!("  Would send: {} metric(s)", report.metrics.len());
    println!(
        "  Would send: {} event(s), {} skipped",
        report.events.len() - skipped,
        skipped
    );

    Ok(())
}

fn print_summary(report: &ReportFile, metrics: &DeliveryReport, events: &DeliveryReport) {
    println!();
    println!("Send complete:");
    println!(
        "  Metrics: {} in {} request(s)",
        report.metrics.len(),
        metrics.attempted
    );
    println!(
        "  Events: {} delivered, {} skipped",
        events.delivered, events.skipped
    );

    let failed = metrics.failed + events.failed;
    if failed > 0 {
        println!("  {}", format!("{} request(s) failed (see log)", failed).red());
    }
}

//! Line-protocol rendering for metric ingestion
//!
//! One data point per line: `name[,key="value"]* value`, each line
//! newline-terminated. Names and dimension keys are normalized with
//! [`sanitize_key`]; dimension values and the metric value itself pass
//! through verbatim.

use lazy_regex::regex_replace_all;

use super::Metric;

/// Normalize a metric name or dimension key for the line protocol:
/// lowercase, with every character outside `[.0-9a-z_-]` replaced by `_`.
///
/// Total over all inputs and idempotent.
pub fn sanitize_key(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    regex_replace_all!(r"[^.0-9a-z_-]", &lowered, "_").into_owned()
}

/// Render metrics as one multi-line blob in input order.
///
/// Dimensions with empty values are skipped, not emitted as empty-quoted
/// pairs. Dimension values are not quoted or escaped beyond the literal
/// surrounding quotes: the receiving parser owns that grammar, and this
/// matches what it accepts, so a value containing `"` or a newline will
/// corrupt its line. An empty input yields an empty string.
pub fn render_lines(metrics: &[Metric]) -> String {
    let mut out = String::new();

    for metric in metrics {
        out.push_str(&sanitize_key(&metric.name));

        for (key, value) in &metric.dimensions {
            if value.is_empty() {
                continue;
            }
            out.push(',');
            out.push_str(&sanitize_key(key));
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }

        out.push(' ');
        out.push_str(&metric.value);
        out.push('\n');
    }

    out
}

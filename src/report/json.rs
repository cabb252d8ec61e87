use serde::Serialize;

use crate::error::AppResult;
use crate::run::RunReport;

#[derive(Serialize)]
struct JsonReport<'report> {
    #[serde(flatten)]
    report: &'report RunReport,
    throughput_rps: f64,
}

/// Serializes the report as a single JSON object.
///
/// Unavailable latency statistics become `null`.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(report: &RunReport) -> AppResult<String> {
    let payload = JsonReport {
        report,
        throughput_rps: report.throughput(),
    };
    Ok(serde_json::to_string(&payload)?)
}

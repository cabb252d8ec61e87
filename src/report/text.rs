use crate::metrics::{FailureCounts, StatusCounts};
use crate::run::RunReport;

/// Lines of the text report, in print order.
#[must_use]
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let summary = &report.summary;
    let mut lines = vec![
        "Benchmarking finished.".to_owned(),
        format!("Requests completed: {}", summary.success_count),
        format!("Requests failed: {}", summary.failure_count),
    ];

    match summary.latency {
        Some(latency) => {
            lines.push(format!("Min response time: {:.2} ms", latency.min_ms));
            lines.push(format!("Max response time: {:.2} ms", latency.max_ms));
            lines.push(format!("Avg response time: {:.2} ms", latency.mean_ms));
            lines.push(format!(
                "Percentiles: p50 {:.2} ms, p90 {:.2} ms, p99 {:.2} ms",
                latency.p50_ms, latency.p90_ms, latency.p99_ms
            ));
        }
        None => lines.push("Latency: unavailable (no successful requests)".to_owned()),
    }

    if summary.success_count > 0 {
        lines.push(status_line(&summary.status_counts));
    }
    if summary.failure_count > 0 {
        lines.push(failure_line(&summary.failure_counts));
    }
    lines.push(format!(
        "Elapsed: {:.2} s ({:.2} req/s)",
        report.elapsed.as_secs_f64(),
        report.throughput()
    ));
    lines
}

fn status_line(counts: &StatusCounts) -> String {
    format!(
        "Status codes: 2xx={}, 3xx={}, 4xx={}, 5xx={}, other={}",
        counts.status_2xx,
        counts.status_3xx,
        counts.status_4xx,
        counts.status_5xx,
        counts.status_other
    )
}

fn failure_line(counts: &FailureCounts) -> String {
    format!(
        "Failures: timeout={}, connect={}, protocol={}, panic={}, other={}",
        counts.timeout, counts.connect, counts.protocol, counts.panic, counts.other
    )
}

//! Final report rendering: human-readable text or one JSON object.
mod json;
mod text;


use std::io::Write;

use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::run::RunReport;

pub use json::render_json;
pub use text::summary_lines;

/// Writes the report for a completed run to stdout.
///
/// # Errors
///
/// Returns an error when serialization or writing to stdout fails.
pub fn print_report(report: &RunReport, format: OutputFormat) -> AppResult<()> {
    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for line in summary_lines(report) {
                writeln!(stdout, "{}", line)?;
            }
        }
        OutputFormat::Json => writeln!(stdout, "{}", render_json(report)?)?,
    }
    stdout.flush()?;
    Ok(())
}

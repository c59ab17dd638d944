pub mod aggregate;
pub mod chart;
pub mod counter;
pub mod error;
pub mod input;
pub mod parser;
pub mod report;

use std::path::Path;

pub use aggregate::{aggregate_lines, AnalysisResult, AnalyzeOpts};
pub use error::AnalyzeError;

/// Read `path` and aggregate every line of it.
pub fn analyze_file(path: &Path, opts: &AnalyzeOpts) -> Result<AnalysisResult, AnalyzeError> {
    let lines = input::read_log_lines(path)?;
    log::info!("read {} lines from {}", lines.len(), path.display());
    let result = aggregate_lines(&lines, opts);
    if result.timestamp_errors.total > 0 {
        log::info!(
            "{} line(s) had an unparsable timestamp and were left out of the hourly trend",
            result.timestamp_errors.total
        );
    }
    Ok(result)
}

/// Full run: analyze the log, draw charts (when a renderer is given), then
/// write the CSV report. Nothing is rendered or written if reading fails.
pub fn run(
    log_path: &Path,
    output_csv: &Path,
    opts: &AnalyzeOpts,
    charts: Option<&mut dyn chart::ChartRenderer>,
) -> Result<AnalysisResult, AnalyzeError> {
    let result = analyze_file(log_path, opts)?;
    if let Some(renderer) = charts {
        renderer.render(&result)?;
    }
    report::write_report_file(output_csv, &result)?;
    Ok(result)
}

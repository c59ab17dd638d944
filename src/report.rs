use crate::aggregate::AnalysisResult;
use crate::error::AnalyzeError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the five report sections as CSV.
///
/// Sections always appear in the same order, each as a title row, a column
/// row, its data rows and a blank separator row.
pub fn write_report<W: Write>(mut out: W, result: &AnalysisResult) -> Result<(), csv::Error> {
    let top_ips = result
        .top_ips()
        .into_iter()
        .map(|item| [item.name, item.count.to_string()]);
    write_section(&mut out, "Top Requests by IP", ["IP Address", "Requests"], top_ips)?;

    let top_endpoint = result
        .top_endpoint
        .iter()
        .map(|item| [item.name.clone(), item.count.to_string()]);
    write_section(&mut out, "Top Endpoint", ["Endpoint", "Access Count"], top_endpoint)?;

    let hourly = result
        .hourly_trend
        .iter()
        .map(|(hour, count)| [hour.to_string(), count.to_string()]);
    write_section(&mut out, "Hourly Request Trend", ["Hour", "Requests"], hourly)?;

    let statuses = result
        .status_counts
        .iter()
        .map(|(code, count)| [code.to_string(), count.to_string()]);
    write_section(&mut out, "HTTP Status Code Analysis", ["Status Code", "Count"], statuses)?;

    let suspicious = result
        .suspicious_ips
        .iter()
        .map(|(ip, count)| [ip.to_string(), count.to_string()]);
    write_section(&mut out, "Suspicious IPs", ["IP Address", "Failed Logins"], suspicious)?;

    out.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the report into it.
pub fn write_report_file(path: &Path, result: &AnalysisResult) -> Result<(), AnalyzeError> {
    let file = File::create(path)?;
    write_report(file, result)
        .map_err(|source| AnalyzeError::Report { path: path.to_path_buf(), source })?;
    log::info!("report written to {}", path.display());
    Ok(())
}

// The csv writer emits `""` for an empty record, so the blank separator row
// goes straight to `out` once the section's writer is flushed and dropped.
fn write_section<W, I>(out: &mut W, title: &str, columns: [&str; 2], rows: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = [String; 2]>,
{
    {
        let mut w = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::CRLF)
            .from_writer(&mut *out);
        w.write_record([title])?;
        w.write_record(columns)?;
        for row in rows {
            w.write_record(&row)?;
        }
        w.flush()?;
    }
    out.write_all(b"\r\n")?;
    Ok(())
}

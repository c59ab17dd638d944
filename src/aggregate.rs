use crate::counter::{CountItem, FrequencyTable};
use crate::error::AnalyzeError;
use crate::parser::{self, Extraction};
use serde::Serialize;
use std::collections::BTreeMap;

const MAX_ERROR_SAMPLES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOpts {
    /// A failed-login count strictly above this marks an IP as suspicious.
    pub threshold: usize,
    /// Length of the ranked IP and endpoint lists.
    pub top_n: usize,
}

impl Default for AnalyzeOpts {
    fn default() -> Self {
        Self { threshold: 10, top_n: 5 }
    }
}

impl AnalyzeOpts {
    pub fn new(threshold: usize, top_n: usize) -> Result<Self, AnalyzeError> {
        if top_n == 0 {
            return Err(AnalyzeError::InvalidTopN);
        }
        Ok(Self { threshold, top_n })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorsOut {
    pub total: usize,
    pub samples: Vec<ErrorSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSample {
    pub line_number: usize,
    pub kind: String,
    pub fragment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub total_lines: usize,
    pub ip_counts: FrequencyTable,
    pub endpoint_counts: FrequencyTable,
    pub top_endpoint: Option<CountItem>,
    pub hourly_trend: BTreeMap<u32, usize>,
    pub status_counts: FrequencyTable,
    pub failed_attempts: FrequencyTable,
    pub suspicious_ips: FrequencyTable,
    pub threshold: usize,
    pub top_n: usize,
    pub timestamp_errors: ErrorsOut,
}

impl AnalysisResult {
    pub fn top_ips(&self) -> Vec<CountItem> {
        self.ip_counts.top(self.top_n)
    }

    pub fn top_endpoints(&self) -> Vec<CountItem> {
        self.endpoint_counts.top(self.top_n)
    }

    /// Hourly counts for every hour of the day, zero-filled.
    pub fn full_day_trend(&self) -> [usize; 24] {
        let mut out = [0usize; 24];
        for (&hour, &count) in &self.hourly_trend {
            if let Some(slot) = out.get_mut(hour as usize) {
                *slot = count;
            }
        }
        out
    }
}

/// Accumulates per-line extractions; consumed by `finish`.
#[derive(Debug, Default)]
pub struct AnalysisBuilder {
    opts: AnalyzeOpts,
    lines: usize,
    ip_counts: FrequencyTable,
    endpoint_counts: FrequencyTable,
    hourly_trend: BTreeMap<u32, usize>,
    status_counts: FrequencyTable,
    failed_attempts: FrequencyTable,
    timestamp_errors: ErrorsOut,
}

impl AnalysisBuilder {
    pub fn new(opts: AnalyzeOpts) -> Self {
        Self { opts, ..Default::default() }
    }

    pub fn push_line(&mut self, line: &str) {
        self.lines += 1;
        let fields = parser::extract_fields(line);

        if let Some(ip) = fields.ip {
            self.ip_counts.increment(ip);
        }
        if let Some(endpoint) = fields.endpoint {
            self.endpoint_counts.increment(endpoint);
        }
        if let Some(ip) = fields.failed_ip() {
            self.failed_attempts.increment(ip);
        }
        match fields.timestamp {
            Extraction::Parsed(ts) => *self.hourly_trend.entry(ts.hour()).or_insert(0) += 1,
            Extraction::Malformed(fragment) => {
                log::debug!("line {}: skipping unparsable timestamp {:?}", self.lines, fragment);
                self.timestamp_errors.total += 1;
                if self.timestamp_errors.samples.len() < MAX_ERROR_SAMPLES {
                    self.timestamp_errors.samples.push(ErrorSample {
                        line_number: self.lines,
                        kind: "malformed_timestamp".into(),
                        fragment: fragment.to_string(),
                    });
                }
            }
            Extraction::Absent => {}
        }
        if let Some(status) = fields.status {
            self.status_counts.increment(status);
        }
    }

    pub fn finish(self) -> AnalysisResult {
        let top_endpoint = self.endpoint_counts.most_common();
        let suspicious_ips = self.failed_attempts.filter_above(self.opts.threshold);
        AnalysisResult {
            total_lines: self.lines,
            ip_counts: self.ip_counts,
            endpoint_counts: self.endpoint_counts,
            top_endpoint,
            hourly_trend: self.hourly_trend,
            status_counts: self.status_counts,
            failed_attempts: self.failed_attempts,
            suspicious_ips,
            threshold: self.opts.threshold,
            top_n: self.opts.top_n,
            timestamp_errors: self.timestamp_errors,
        }
    }
}

pub fn aggregate_lines<S: AsRef<str>>(lines: &[S], opts: &AnalyzeOpts) -> AnalysisResult {
    let mut builder = AnalysisBuilder::new(*opts);
    for line in lines {
        builder.push_line(line.as_ref());
    }
    builder.finish()
}

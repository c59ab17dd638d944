use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("log file not found: {}", path.display())]
    LogFileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("top_n must be at least 1")]
    InvalidTopN,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzeError {
    /// True for the "input does not exist" failure; every other variant is
    /// reported with its own message.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AnalyzeError::LogFileNotFound { .. })
    }
}

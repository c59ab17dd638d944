use crate::error::AnalyzeError;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Load the whole log into memory, one entry per line.
///
/// `\r\n` and bare `\r` endings are read as `\n`, and the terminator is kept
/// so that a trailing token (a status code at the very end of a line, say) is
/// still followed by whitespace.
pub fn read_log_lines(path: &Path) -> Result<Vec<String>, AnalyzeError> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|source| AnalyzeError::Read { path: path.to_path_buf(), source })?;
    Ok(split_lines(&content))
}

pub fn split_lines(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    normalized.split_inclusive('\n').map(str::to_string).collect()
}

fn open_error(path: &Path, e: std::io::Error) -> AnalyzeError {
    if e.kind() == ErrorKind::NotFound {
        AnalyzeError::LogFileNotFound { path: path.to_path_buf() }
    } else {
        AnalyzeError::Read { path: path.to_path_buf(), source: e }
    }
}

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

/// Errors that can occur while loading a subject's records.
/// None of them are retried; the subject just stays empty.
#[derive(Debug)]
pub enum LoadError {
    /// Local file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// Network-level failure (DNS, connection refused, body read).
    Network(String),
    /// Server answered with a non-success status.
    Http { status: u16, url: String },
    /// Bytes are not a readable workbook.
    Workbook(String),
    /// The workbook has no sheet with this name.
    MissingSheet { sheet: String, available: Vec<String> },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            LoadError::Network(msg) => write!(f, "network error: {msg}"),
            LoadError::Http { status, url } => write!(f, "HTTP {status} fetching {url}"),
            LoadError::Workbook(msg) => write!(f, "workbook error: {msg}"),
            LoadError::MissingSheet { sheet, available } => write!(
                f,
                "sheet '{sheet}' not found (available: {})",
                available.join(", ")
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Where the workbook bytes come from.
#[async_trait]
pub trait WorkbookSource: Send + Sync {
    /// Short human-readable location, for logs and the title bar.
    fn describe(&self) -> String;

    /// Fetches the whole workbook. Called once per session.
    async fn fetch(&self) -> Result<Vec<u8>, LoadError>;
}

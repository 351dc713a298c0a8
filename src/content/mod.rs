//! # Content Loading
//!
//! Fetches the workbook once and turns each subject sheet into records.
//!
//! ```text
//! WorkbookSource::fetch()  ──bytes──▶  workbook::parse_sheet(sheet)  ──▶  Vec<Record>
//!   FileSource  (path)
//!   HttpSource  (http/https URL)
//! ```
//!
//! A failed fetch fails every subject; a failed sheet only fails its own
//! subject.

pub mod source;
pub mod sources;
pub mod workbook;

use std::sync::Arc;

use log::{info, warn};

pub use source::{LoadError, WorkbookSource};
pub use sources::{FileSource, HttpSource};

use crate::core::Record;

/// Picks a source for a workbook location: URLs go over HTTP, anything else is a path.
pub fn source_for(location: &str) -> Arc<dyn WorkbookSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpSource::new(location))
    } else {
        Arc::new(FileSource::new(location))
    }
}

/// Fetches the workbook and parses each sheet, in order.
///
/// The outer error is a fetch failure; inner results are per sheet.
pub async fn load_subjects(
    source: &dyn WorkbookSource,
    sheets: &[String],
) -> Result<Vec<Result<Vec<Record>, LoadError>>, LoadError> {
    let bytes = source.fetch().await?;
    info!(
        "Parsing {} sheet(s) from {} ({} bytes)",
        sheets.len(),
        source.describe(),
        bytes.len()
    );
    let results = sheets
        .iter()
        .map(|sheet| {
            let result = workbook::parse_sheet(&bytes, sheet);
            if let Err(e) = &result {
                warn!("Sheet {}: {}", sheet, e);
            }
            result
        })
        .collect();
    Ok(results)
}

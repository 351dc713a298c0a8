//! # Workbook Parsing
//!
//! Turns one sheet of an `.xlsx` workbook into flat `Record`s.
//!
//! Layout of a subject sheet:
//!
//! ```text
//! row 0      header (ignored)
//! row 1..    branch | topic | subtopic | description | image | video
//! ```
//!
//! Every cell is stringified. Rows with an empty branch or subtopic are
//! dropped without complaint; an empty image/video cell means "no media".

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx, XlsxError, open_workbook_from_rs};
use log::debug;

use crate::content::LoadError;
use crate::core::Record;

pub const COLUMN_COUNT: usize = 6;

/// Parses `sheet` out of raw workbook bytes.
pub fn parse_sheet(bytes: &[u8], sheet: &str) -> Result<Vec<Record>, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: XlsxError| LoadError::Workbook(e.to_string()))?;

    let names = workbook.sheet_names();
    if !names.iter().any(|name| name == sheet) {
        return Err(LoadError::MissingSheet {
            sheet: sheet.to_string(),
            available: names,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e: XlsxError| LoadError::Workbook(e.to_string()))?;
    Ok(records_from_range(&range))
}

/// Converts a used cell range into records, skipping sheet row 1 (the header).
pub fn records_from_range(range: &Range<Data>) -> Vec<Record> {
    // The used range starts at the first non-empty cell, so a blank header
    // row or blank leading columns are not part of it.
    let (start_row, start_col) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));
    let header_rows = 1usize.saturating_sub(start_row);

    let rows: Vec<[String; COLUMN_COUNT]> = range
        .rows()
        .skip(header_rows)
        .map(|row| {
            std::array::from_fn(|col| {
                col.checked_sub(start_col)
                    .and_then(|i| row.get(i))
                    .map(cell_text)
                    .unwrap_or_default()
            })
        })
        .collect();

    let total = rows.len();
    let records: Vec<Record> = rows.into_iter().filter_map(row_to_record).collect();
    if records.len() < total {
        debug!("Dropped {} row(s) without branch or subtopic", total - records.len());
    }
    records
}

/// Builds a record from six ordered cells. `None` if branch or subtopic is empty.
pub fn row_to_record(cells: [String; COLUMN_COUNT]) -> Option<Record> {
    let [branch, topic, subtopic, description, image, video] = cells;
    if branch.is_empty() || subtopic.is_empty() {
        return None;
    }
    Some(Record {
        branch,
        topic,
        subtopic,
        description,
        image: Some(image).filter(|s| !s.is_empty()),
        video: Some(video).filter(|s| !s.is_empty()),
    })
}

/// Stringifies a cell. Whole floats print without a fraction (`3.0` → `3`).
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::workbook_bytes;

    fn cells(values: [&str; COLUMN_COUNT]) -> [String; COLUMN_COUNT] {
        values.map(str::to_string)
    }

    #[test]
    fn test_row_to_record_maps_columns() {
        let record = row_to_record(cells([
            "Plant Kingdom",
            "",
            "Algae",
            "Simple plants",
            "algae.png",
            "",
        ]))
        .unwrap();
        assert_eq!(record.branch, "Plant Kingdom");
        assert!(!record.has_topic());
        assert_eq!(record.subtopic, "Algae");
        assert_eq!(record.image.as_deref(), Some("algae.png"));
        assert_eq!(record.video, None);
    }

    #[test]
    fn test_row_without_branch_or_subtopic_is_dropped() {
        assert!(row_to_record(cells(["", "T", "S", "d", "", ""])).is_none());
        assert!(row_to_record(cells(["B", "T", "", "d", "", ""])).is_none());
    }

    #[test]
    fn test_cell_text_numbers() {
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("x".to_string())), "x");
    }

    #[test]
    fn test_parse_sheet_skips_header_and_drops_bad_rows() {
        let bytes = workbook_bytes(&[(
            "Botany",
            vec![
                vec!["Branch", "Topic", "Subtopic", "Description", "Image", "Video"],
                vec!["Plant Kingdom", "", "Algae", "d1"],
                vec!["", "", "Orphan", "no branch"],
                vec!["Plant Kingdom", "", "Fungi", "d2", "", "https://youtu.be/dQw4w9WgXcQ"],
            ],
        )]);

        let records = parse_sheet(&bytes, "Botany").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subtopic, "Algae");
        assert_eq!(records[1].video.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
    }

    #[test]
    fn test_parse_sheet_blank_header_row_keeps_first_data_row() {
        let bytes = workbook_bytes(&[(
            "Botany",
            vec![
                vec![],
                vec!["Plant Kingdom", "", "Algae", "d1"],
                vec!["Plant Kingdom", "", "Fungi", "d2"],
            ],
        )]);

        let records = parse_sheet(&bytes, "Botany").unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.subtopic.as_str()).collect();
        assert_eq!(names, vec!["Algae", "Fungi"]);
    }

    #[test]
    fn test_parse_sheet_picks_named_sheet() {
        let bytes = workbook_bytes(&[
            ("Botany", vec![vec!["h"], vec!["Cell", "", "Mitosis", "d"]]),
            ("Zoology", vec![vec!["h"], vec!["Chordata", "Mammals", "Whale", "big"]]),
        ]);

        let zoology = parse_sheet(&bytes, "Zoology").unwrap();
        assert_eq!(zoology.len(), 1);
        assert_eq!(zoology[0].topic, "Mammals");
    }

    #[test]
    fn test_parse_sheet_missing_sheet() {
        let bytes = workbook_bytes(&[("Botany", vec![vec!["h"]])]);
        let err = parse_sheet(&bytes, "Physics").unwrap_err();
        match err {
            LoadError::MissingSheet { sheet, available } => {
                assert_eq!(sheet, "Physics");
                assert_eq!(available, vec!["Botany".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_garbage_is_workbook_error() {
        let err = parse_sheet(b"not a zip file", "Botany").unwrap_err();
        assert!(matches!(err, LoadError::Workbook(_)));
    }
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use rust_xlsxwriter::Workbook;

use crate::core::Record;
use crate::core::config::SubjectSpec;
use crate::core::state::{App, LoadState};

/// A record without media.
pub fn record(branch: &str, topic: &str, subtopic: &str, description: &str) -> Record {
    Record {
        branch: branch.to_string(),
        topic: topic.to_string(),
        subtopic: subtopic.to_string(),
        description: description.to_string(),
        image: None,
        video: None,
    }
}

pub fn botany_records() -> Vec<Record> {
    let mut mito = record("Cell", "Organelles", "Mitochondria", "Powerhouse of the cell");
    mito.image = Some("https://example.com/mito.png".to_string());
    mito.video = Some("https://youtu.be/dQw4w9WgXcQ".to_string());
    vec![
        record("Plant Kingdom", "", "Algae", "d1"),
        record("Plant Kingdom", "", "Fungi", "d2"),
        mito,
        record("Cell", "Division", "Mitosis", "Nuclear division"),
        record("Cell", "Organelles", "Ribosome", "Protein synthesis"),
    ]
}

pub fn zoology_records() -> Vec<Record> {
    vec![
        record("Chordata", "Mammals", "Whale", "Large marine mammal"),
        record("Chordata", "Birds", "Sparrow", "Small bird"),
    ]
}

/// Botany + Zoology subjects, both pending, with `records` placed in Botany.
pub fn test_app_with(records: Vec<Record>) -> App {
    let mut app = App::new(&[SubjectSpec::new("Botany"), SubjectSpec::new("Zoology")]);
    app.subjects[0].records = records;
    app
}

/// Botany + Zoology subjects, both loaded with sample records.
pub fn test_app() -> App {
    let mut app = test_app_with(botany_records());
    app.subjects[1].records = zoology_records();
    for subject in &mut app.subjects {
        subject.load = LoadState::Loaded;
    }
    app.status_message.clear();
    app
}

/// Builds an `.xlsx` workbook in memory. Empty strings leave the cell blank.
pub fn workbook_bytes(sheets: &[(&str, Vec<Vec<&str>>)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

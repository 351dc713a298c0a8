//! # Application State
//!
//! Core session state for studytree. Domain logic only, no TUI types.
//! Presentation state (selection, scroll offsets) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── subjects: Vec<Subject>          // one per workbook sheet
//! │   ├── records: Vec<Record>        // flat rows, assigned once on load
//! │   └── load: LoadState             // Pending / Loaded / Failed
//! ├── expanded_subject: Option<usize> // accordion: at most one open
//! ├── expanded_branch: Option<String>
//! ├── expanded_topic: Option<String>
//! ├── cursor: NavCursor               // open subtopic + siblings
//! ├── media_view: MediaView           // fullscreen media in the overlay
//! └── status_message: String          // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::{ResolvedConfig, SubjectSpec};
use crate::core::cursor::NavCursor;
use crate::core::media::MediaView;
use crate::core::record::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Subject {
    /// Sheet name in the workbook.
    pub sheet: String,
    /// Display label.
    pub label: String,
    pub records: Vec<Record>,
    pub load: LoadState,
}

impl Subject {
    pub fn new(spec: &SubjectSpec) -> Self {
        Self {
            sheet: spec.sheet.clone(),
            label: spec.label.clone(),
            records: Vec::new(),
            load: LoadState::Pending,
        }
    }
}

pub struct App {
    pub subjects: Vec<Subject>,
    pub expanded_subject: Option<usize>,
    pub expanded_branch: Option<String>,
    pub expanded_topic: Option<String>,
    pub cursor: NavCursor,
    pub media_view: MediaView,
    pub status_message: String,
}

impl App {
    pub fn new(subjects: &[SubjectSpec]) -> Self {
        Self {
            subjects: subjects.iter().map(Subject::new).collect(),
            expanded_subject: None,
            expanded_branch: None,
            expanded_topic: None,
            cursor: NavCursor::default(),
            media_view: MediaView::None,
            status_message: String::from("Loading study content..."),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(&config.subjects)
    }

    /// Records of the expanded subject, empty if none is expanded.
    pub fn current_records(&self) -> &[Record] {
        self.expanded_subject
            .and_then(|i| self.subjects.get(i))
            .map(|s| s.records.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.subjects.iter().any(|s| s.load == LoadState::Pending)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{test_app, test_app_with};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app_with(vec![]);
        assert_eq!(app.subjects.len(), 2);
        assert!(app.is_loading());
        assert!(app.expanded_subject.is_none());
        assert!(!app.cursor.is_open());
        assert!(app.current_records().is_empty());
    }

    #[test]
    fn test_current_records_follow_expanded_subject() {
        let mut app = test_app();
        assert!(app.current_records().is_empty());
        app.expanded_subject = Some(0);
        assert_eq!(app.current_records().len(), app.subjects[0].records.len());
        app.expanded_subject = Some(7);
        assert!(app.current_records().is_empty());
    }
}

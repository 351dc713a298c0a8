//! # Navigation Cursor
//!
//! Tracks which subtopic is open in the detail overlay and where it sits in
//! its sibling list.
//!
//! ```text
//!            open()                     next() at last
//!  Closed ───────────▶ Open(i, list) ─────────────────▶ Closed
//!    ▲                  │  ▲   │
//!    │     close()      │  │   │ next() / previous()
//!    └──────────────────┘  └───┘
//! ```
//!
//! `next()` past the end closes the cursor. `previous()` at the start does
//! nothing. The asymmetry is intentional.

use std::fmt;

use log::{debug, error};

use crate::core::record::{Record, Sibling};

#[derive(Debug)]
pub enum CursorError {
    /// The requested subtopic is not in the sibling list built from its own
    /// branch/topic. The caller passed an inconsistent context.
    SubtopicNotFound {
        branch: String,
        topic: Option<String>,
        subtopic: String,
    },
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::SubtopicNotFound {
                branch,
                topic,
                subtopic,
            } => write!(
                f,
                "subtopic '{subtopic}' not found under branch '{branch}', topic {topic:?}"
            ),
        }
    }
}

impl std::error::Error for CursorError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavCursor {
    #[default]
    Closed,
    Open { index: usize, siblings: Vec<Sibling> },
}

/// What the presentation layer needs to draw the open subtopic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub video: Option<&'a str>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    /// Zero-based position in the sibling list.
    pub position: usize,
    pub total: usize,
}

/// Siblings of a subtopic: the records of `branch` under `topic` (or the
/// topic-less ones when `topic` is `None`), in source order.
pub fn siblings_of(records: &[Record], branch: &str, topic: Option<&str>) -> Vec<Sibling> {
    records
        .iter()
        .filter(|r| r.belongs_to(branch, topic))
        .map(Record::sibling)
        .collect()
}

impl NavCursor {
    /// Opens `subtopic` within its branch/topic group.
    ///
    /// Duplicate subtopic names resolve to the first match. On error the
    /// cursor is left untouched.
    pub fn open(
        &mut self,
        records: &[Record],
        subtopic: &str,
        branch: &str,
        topic: Option<&str>,
    ) -> Result<(), CursorError> {
        let siblings = siblings_of(records, branch, topic);
        let Some(index) = siblings.iter().position(|s| s.subtopic == subtopic) else {
            let err = CursorError::SubtopicNotFound {
                branch: branch.to_string(),
                topic: topic.map(str::to_string),
                subtopic: subtopic.to_string(),
            };
            error!("Cursor open failed: {}", err);
            return Err(err);
        };
        debug!(
            "Cursor opened '{}' at {}/{} (branch={}, topic={:?})",
            subtopic,
            index + 1,
            siblings.len(),
            branch,
            topic
        );
        *self = NavCursor::Open { index, siblings };
        Ok(())
    }

    /// Moves to the next sibling, or closes when already on the last one.
    pub fn next(&mut self) {
        let NavCursor::Open { index, siblings } = self else {
            return;
        };
        if *index + 1 < siblings.len() {
            *index += 1;
            return;
        }
        debug!("Cursor stepped past last sibling, closing");
        *self = NavCursor::Closed;
    }

    /// Moves to the previous sibling. No-op at the first one.
    pub fn previous(&mut self) {
        if let NavCursor::Open { index, .. } = self
            && *index > 0
        {
            *index -= 1;
        }
    }

    pub fn close(&mut self) {
        *self = NavCursor::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, NavCursor::Open { .. })
    }

    /// Current index, `None` when closed.
    pub fn index(&self) -> Option<usize> {
        match self {
            NavCursor::Open { index, .. } => Some(*index),
            NavCursor::Closed => None,
        }
    }

    pub fn current(&self) -> Option<&Sibling> {
        match self {
            NavCursor::Open { index, siblings } => siblings.get(*index),
            NavCursor::Closed => None,
        }
    }

    pub fn snapshot(&self) -> Option<CursorSnapshot<'_>> {
        let NavCursor::Open { index, siblings } = self else {
            return None;
        };
        let current = siblings.get(*index)?;
        Some(CursorSnapshot {
            title: &current.subtopic,
            description: &current.description,
            image: current.image.as_deref(),
            video: current.video.as_deref(),
            can_go_previous: *index > 0,
            can_go_next: *index + 1 < siblings.len(),
            position: *index,
            total: siblings.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn plant_kingdom() -> Vec<Record> {
        vec![
            record("Plant Kingdom", "", "Algae", "d1"),
            record("Plant Kingdom", "", "Fungi", "d2"),
        ]
    }

    #[test]
    fn test_open_next_next_closes() {
        let records = plant_kingdom();
        let mut cursor = NavCursor::default();

        cursor.open(&records, "Algae", "Plant Kingdom", None).unwrap();
        let snap = cursor.snapshot().unwrap();
        assert_eq!(cursor.index(), Some(0));
        assert_eq!(snap.title, "Algae");
        assert!(snap.can_go_next);
        assert!(!snap.can_go_previous);

        cursor.next();
        let snap = cursor.snapshot().unwrap();
        assert_eq!(cursor.index(), Some(1));
        assert_eq!(snap.title, "Fungi");
        assert_eq!(snap.description, "d2");
        assert!(!snap.can_go_next);
        assert!(snap.can_go_previous);

        cursor.next();
        assert_eq!(cursor, NavCursor::Closed);
        assert!(cursor.snapshot().is_none());
        assert_eq!(cursor.index(), None);
    }

    #[test]
    fn test_steps_to_last_then_close() {
        let records: Vec<Record> = (0..5)
            .map(|i| record("B", "T", &format!("S{i}"), "d"))
            .collect();
        let mut cursor = NavCursor::default();
        cursor.open(&records, "S1", "B", Some("T")).unwrap();

        let index = cursor.index().unwrap();
        let steps = records.len() - 1 - index;
        for _ in 0..steps {
            cursor.next();
            assert!(cursor.is_open());
        }
        assert_eq!(cursor.index(), Some(4));
        cursor.next();
        assert!(!cursor.is_open());
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let records = plant_kingdom();
        let mut cursor = NavCursor::default();
        cursor.open(&records, "Algae", "Plant Kingdom", None).unwrap();

        cursor.previous();
        assert_eq!(cursor.index(), Some(0));
        assert!(cursor.is_open());
    }

    #[test]
    fn test_previous_moves_back() {
        let records = plant_kingdom();
        let mut cursor = NavCursor::default();
        cursor.open(&records, "Fungi", "Plant Kingdom", None).unwrap();
        cursor.previous();
        assert_eq!(cursor.current().unwrap().subtopic, "Algae");
    }

    #[test]
    fn test_next_does_not_wrap() {
        let records = plant_kingdom();
        let mut cursor = NavCursor::default();
        cursor.open(&records, "Fungi", "Plant Kingdom", None).unwrap();
        cursor.next();
        assert_ne!(cursor.index(), Some(0));
        assert_eq!(cursor.index(), None);
    }

    #[test]
    fn test_siblings_scoped_to_topic() {
        let records = vec![
            record("Cell", "Organelles", "Mitochondria", "d1"),
            record("Cell", "", "Overview", "d2"),
            record("Cell", "Organelles", "Ribosome", "d3"),
            record("Genes", "Organelles", "Other", "d4"),
        ];
        let mut cursor = NavCursor::default();
        cursor.open(&records, "Ribosome", "Cell", Some("Organelles")).unwrap();
        let snap = cursor.snapshot().unwrap();
        assert_eq!(snap.position, 1);
        assert_eq!(snap.total, 2);

        cursor.open(&records, "Overview", "Cell", None).unwrap();
        assert_eq!(cursor.snapshot().unwrap().total, 1);
    }

    #[test]
    fn test_duplicate_names_pick_first() {
        let records = vec![
            record("B", "", "Same", "first"),
            record("B", "", "Other", "x"),
            record("B", "", "Same", "second"),
        ];
        let mut cursor = NavCursor::default();
        cursor.open(&records, "Same", "B", None).unwrap();
        assert_eq!(cursor.index(), Some(0));
        assert_eq!(cursor.snapshot().unwrap().description, "first");
    }

    #[test]
    fn test_open_missing_subtopic_fails_loudly() {
        let records = plant_kingdom();
        let mut cursor = NavCursor::default();
        cursor.open(&records, "Algae", "Plant Kingdom", None).unwrap();
        cursor.next();

        let err = cursor
            .open(&records, "Algae", "Plant Kingdom", Some("Wrong topic"))
            .unwrap_err();
        assert!(matches!(err, CursorError::SubtopicNotFound { .. }));
        assert!(err.to_string().contains("Algae"));
        // Cursor untouched by the failed open
        assert_eq!(cursor.index(), Some(1));
    }

    #[test]
    fn test_close_from_any_state() {
        let records = plant_kingdom();
        let mut cursor = NavCursor::default();
        cursor.close();
        assert!(!cursor.is_open());

        cursor.open(&records, "Fungi", "Plant Kingdom", None).unwrap();
        cursor.close();
        assert!(!cursor.is_open());
    }

    #[test]
    fn test_media_in_snapshot() {
        let mut r = record("B", "", "S", "d");
        r.image = Some("pic.jpg".to_string());
        r.video = Some("https://youtu.be/dQw4w9WgXcQ".to_string());
        let records = vec![r];
        let mut cursor = NavCursor::default();
        cursor.open(&records, "S", "B", None).unwrap();
        let snap = cursor.snapshot().unwrap();
        assert_eq!(snap.image, Some("pic.jpg"));
        assert_eq!(snap.video, Some("https://youtu.be/dQw4w9WgXcQ"));
        assert!(!snap.can_go_next);
        assert!(!snap.can_go_previous);
    }
}

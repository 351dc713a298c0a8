//! # Hierarchy Builder
//!
//! Derives the branch → topic → subtopic tree from a flat record list.
//! Nothing here is cached: every query walks the records again, which is
//! fine for a sheet of study notes.
//!
//! ```text
//! branch
//! ├── topic            (distinct, first-occurrence order)
//! │   └── subtopic
//! └── subtopic         (records of the branch with an empty topic)
//! ```
//!
//! All functions are total. A branch that matches nothing simply yields
//! empty collections.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::record::{Record, SubtopicSummary};

/// Distinct branch names in first-occurrence order.
pub fn branches_of(records: &[Record]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.branch.as_str())
        .filter(|branch| seen.insert(*branch))
        .collect()
}

/// Distinct non-empty topics of `branch` in first-occurrence order.
pub fn topics_of<'a>(records: &'a [Record], branch: &str) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| r.branch == branch && r.has_topic())
        .map(|r| r.topic.as_str())
        .filter(|topic| seen.insert(*topic))
        .collect()
}

/// True if at least one record of `branch` has no topic.
pub fn has_direct_subtopics(records: &[Record], branch: &str) -> bool {
    records.iter().any(|r| r.belongs_to(branch, None))
}

/// Topic-less records of `branch`, in source order.
pub fn direct_subtopics_of(records: &[Record], branch: &str) -> Vec<SubtopicSummary> {
    records
        .iter()
        .filter(|r| r.belongs_to(branch, None))
        .map(Record::summary)
        .collect()
}

/// Records of `branch` filed under `topic`, in source order.
pub fn subtopics_of(records: &[Record], branch: &str, topic: &str) -> Vec<SubtopicSummary> {
    records
        .iter()
        .filter(|r| r.belongs_to(branch, Some(topic)))
        .map(Record::summary)
        .collect()
}

/// Both child families of a branch.
///
/// A branch may carry topic-bearing and topic-less records at the same
/// time. The tree shows only one family (topics win), but the view keeps
/// both so the hidden side stays reachable and can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchView<'a> {
    pub branch: &'a str,
    pub topics: Vec<&'a str>,
    pub direct: Vec<SubtopicSummary>,
}

/// Which family a branch renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchLayout {
    Topics,
    Direct,
    Empty,
}

impl BranchView<'_> {
    pub fn layout(&self) -> BranchLayout {
        if !self.topics.is_empty() {
            BranchLayout::Topics
        } else if !self.direct.is_empty() {
            BranchLayout::Direct
        } else {
            BranchLayout::Empty
        }
    }

    /// Direct subtopics that the topic layout does not show.
    pub fn hidden_direct(&self) -> &[SubtopicSummary] {
        match self.layout() {
            BranchLayout::Topics => &self.direct,
            _ => &[],
        }
    }
}

pub fn branch_view<'a>(records: &'a [Record], branch: &'a str) -> BranchView<'a> {
    BranchView {
        branch,
        topics: topics_of(records, branch),
        direct: direct_subtopics_of(records, branch),
    }
}

/// The whole tree of one subject, for `--dump`.
#[derive(Debug, Serialize)]
pub struct SubjectTree<'a> {
    pub subject: &'a str,
    pub branches: Vec<BranchTree<'a>>,
}

#[derive(Debug, Serialize)]
pub struct BranchTree<'a> {
    pub branch: &'a str,
    pub topics: Vec<TopicTree<'a>>,
    pub subtopics: Vec<SubtopicSummary>,
}

#[derive(Debug, Serialize)]
pub struct TopicTree<'a> {
    pub topic: &'a str,
    pub subtopics: Vec<SubtopicSummary>,
}

/// Builds the full tree of a subject. Both child families are kept per branch.
pub fn subject_tree<'a>(subject: &'a str, records: &'a [Record]) -> SubjectTree<'a> {
    let branches = branches_of(records)
        .into_iter()
        .map(|branch| BranchTree {
            branch,
            topics: topics_of(records, branch)
                .into_iter()
                .map(|topic| TopicTree {
                    topic,
                    subtopics: subtopics_of(records, branch, topic),
                })
                .collect(),
            subtopics: direct_subtopics_of(records, branch),
        })
        .collect();
    SubjectTree { subject, branches }
}

//! # Records
//!
//! The flat rows every other part of the app is derived from. One `Record`
//! per data row of a subject sheet; nothing is stored in tree form.

use serde::Serialize;

/// A single row of study content.
///
/// `topic` is empty when the subtopic hangs directly off its branch.
/// Records are never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub branch: String,
    pub topic: String,
    pub subtopic: String,
    pub description: String,
    pub image: Option<String>,
    pub video: Option<String>,
}

impl Record {
    pub fn has_topic(&self) -> bool {
        !self.topic.is_empty()
    }

    /// True if this record sits under `branch` and `topic`.
    /// `None` (or an empty topic) selects the topic-less records of the branch.
    pub fn belongs_to(&self, branch: &str, topic: Option<&str>) -> bool {
        if self.branch != branch {
            return false;
        }
        match topic.filter(|t| !t.is_empty()) {
            Some(topic) => self.topic == topic,
            None => !self.has_topic(),
        }
    }

    /// Projection used by tree listings (no video).
    pub fn summary(&self) -> SubtopicSummary {
        SubtopicSummary {
            subtopic: self.subtopic.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
        }
    }

    /// Projection used by the navigation cursor.
    pub fn sibling(&self) -> Sibling {
        Sibling {
            subtopic: self.subtopic.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            video: self.video.clone(),
        }
    }
}

/// A subtopic as listed under a branch or topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtopicSummary {
    pub subtopic: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A subtopic as held in the cursor's sibling list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sibling {
    pub subtopic: String,
    pub description: String,
    pub image: Option<String>,
    pub video: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::test_support::record;

    #[test]
    fn test_belongs_to_topic() {
        let r = record("Plant Kingdom", "Algae", "Green algae", "d");
        assert!(r.belongs_to("Plant Kingdom", Some("Algae")));
        assert!(!r.belongs_to("Plant Kingdom", None));
        assert!(!r.belongs_to("Animal Kingdom", Some("Algae")));
    }

    #[test]
    fn test_belongs_to_topicless() {
        let r = record("Plant Kingdom", "", "Fungi", "d");
        assert!(r.belongs_to("Plant Kingdom", None));
        assert!(r.belongs_to("Plant Kingdom", Some("")));
        assert!(!r.belongs_to("Plant Kingdom", Some("Algae")));
    }

    #[test]
    fn test_summary_drops_video() {
        let mut r = record("B", "", "S", "desc");
        r.image = Some("img.png".to_string());
        r.video = Some("clip.mp4".to_string());
        let summary = r.summary();
        assert_eq!(summary.subtopic, "S");
        assert_eq!(summary.image.as_deref(), Some("img.png"));

        let sibling = r.sibling();
        assert_eq!(sibling.video.as_deref(), Some("clip.mp4"));
    }
}

//! # Actions
//!
//! Everything that can happen in studytree becomes an `Action`.
//! User opens a branch? That's `Action::ToggleBranch(name)`.
//! A sheet finished loading? That's `Action::DatasetLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller should
//! perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::hierarchy::{branch_view, branches_of};
use crate::core::media::{MediaKind, MediaView, resolve_video};
use crate::core::record::Record;
use crate::core::state::{App, LoadState};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleSubject(usize),
    ToggleBranch(String),
    ToggleTopic(String),
    OpenSubtopic {
        branch: String,
        topic: Option<String>,
        subtopic: String,
    },
    NextSubtopic,
    PreviousSubtopic,
    CloseDetail,
    ShowMedia(MediaKind),
    HideMedia,
    OpenMedia(MediaKind),
    DatasetLoaded {
        subject: usize,
        records: Vec<Record>,
    },
    DatasetFailed {
        subject: usize,
        error: String,
    },
    Quit,
}

/// Where the tree should scroll after an expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Branch(String),
    Topic { branch: String, topic: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    ScrollTo(Anchor),
    OpenExternal(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action_name(&action));
    match action {
        Action::ToggleSubject(index) => {
            if index >= app.subjects.len() {
                warn!("ToggleSubject for unknown subject index {}", index);
                return Effect::None;
            }
            app.expanded_subject = if app.expanded_subject == Some(index) {
                None
            } else {
                Some(index)
            };
            app.expanded_branch = None;
            app.expanded_topic = None;
            Effect::None
        }
        Action::ToggleBranch(branch) => {
            app.expanded_branch = if app.expanded_branch.as_deref() == Some(branch.as_str()) {
                None
            } else {
                Some(branch.clone())
            };
            app.expanded_topic = None;
            Effect::ScrollTo(Anchor::Branch(branch))
        }
        Action::ToggleTopic(topic) => {
            let Some(branch) = app.expanded_branch.clone() else {
                warn!("ToggleTopic '{}' with no expanded branch", topic);
                return Effect::None;
            };
            app.expanded_topic = if app.expanded_topic.as_deref() == Some(topic.as_str()) {
                None
            } else {
                Some(topic.clone())
            };
            Effect::ScrollTo(Anchor::Topic { branch, topic })
        }
        Action::OpenSubtopic {
            branch,
            topic,
            subtopic,
        } => {
            let Some(subject) = app.expanded_subject else {
                warn!("OpenSubtopic '{}' with no expanded subject", subtopic);
                return Effect::None;
            };
            let Some(records) = app.subjects.get(subject).map(|s| &s.records) else {
                return Effect::None;
            };
            match app
                .cursor
                .open(records, &subtopic, &branch, topic.as_deref())
            {
                Ok(()) => {
                    app.media_view = MediaView::None;
                    refresh_status(app);
                }
                Err(e) => app.status_message = e.to_string(),
            }
            Effect::None
        }
        Action::NextSubtopic => {
            app.cursor.next();
            app.media_view = MediaView::None;
            refresh_status(app);
            Effect::None
        }
        Action::PreviousSubtopic => {
            app.cursor.previous();
            app.media_view = MediaView::None;
            refresh_status(app);
            Effect::None
        }
        Action::CloseDetail => {
            app.cursor.close();
            app.media_view = MediaView::None;
            refresh_status(app);
            Effect::None
        }
        Action::ShowMedia(kind) => {
            if media_url(app, kind).is_some() {
                app.media_view = kind.into();
            } else {
                app.status_message = format!("No {} for this subtopic", kind.label());
            }
            Effect::None
        }
        Action::HideMedia => {
            app.media_view = MediaView::None;
            Effect::None
        }
        Action::OpenMedia(kind) => {
            let Some(url) = media_url(app, kind).map(str::to_string) else {
                app.status_message = format!("No {} for this subtopic", kind.label());
                return Effect::None;
            };
            let target = match kind {
                MediaKind::Image => Some(url.clone()),
                MediaKind::Video => resolve_video(&url).playable_url().map(str::to_string),
            };
            match target {
                Some(target) => Effect::OpenExternal(target),
                None => {
                    app.status_message = format!("Cannot play video link: {url}");
                    Effect::None
                }
            }
        }
        Action::DatasetLoaded { subject, records } => {
            let Some(entry) = app.subjects.get_mut(subject) else {
                warn!("DatasetLoaded for unknown subject index {}", subject);
                return Effect::None;
            };
            info!("Loaded {} records for {}", records.len(), entry.sheet);
            report_hidden_subtopics(&entry.sheet, &records);
            entry.records = records;
            entry.load = LoadState::Loaded;
            refresh_status(app);
            Effect::None
        }
        Action::DatasetFailed { subject, error } => {
            let Some(entry) = app.subjects.get_mut(subject) else {
                warn!("DatasetFailed for unknown subject index {}", subject);
                return Effect::None;
            };
            warn!("Failed to load {}: {}", entry.sheet, error);
            entry.records.clear();
            entry.load = LoadState::Failed(error);
            refresh_status(app);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Media reference of the open subtopic.
fn media_url(app: &App, kind: MediaKind) -> Option<&str> {
    let current = app.cursor.current()?;
    match kind {
        MediaKind::Image => current.image.as_deref(),
        MediaKind::Video => current.video.as_deref(),
    }
}

fn refresh_status(app: &mut App) {
    let pending = app
        .subjects
        .iter()
        .filter(|s| s.load == LoadState::Pending)
        .count();
    let failed: Vec<&str> = app
        .subjects
        .iter()
        .filter(|s| matches!(s.load, LoadState::Failed(_)))
        .map(|s| s.label.as_str())
        .collect();

    app.status_message = if pending > 0 {
        format!("Loading {pending} subject(s)...")
    } else if !failed.is_empty() {
        format!("Failed to load: {}", failed.join(", "))
    } else {
        String::new()
    };
}

/// Warns about branches whose topic-less records are hidden behind topics.
fn report_hidden_subtopics(sheet: &str, records: &[Record]) {
    for branch in branches_of(records) {
        let view = branch_view(records, branch);
        let hidden = view.hidden_direct();
        if !hidden.is_empty() {
            warn!(
                "{}: branch '{}' mixes topics with {} topic-less subtopic(s); they are not shown in the tree",
                sheet,
                branch,
                hidden.len()
            );
        }
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::ToggleSubject(_) => "ToggleSubject",
        Action::ToggleBranch(_) => "ToggleBranch",
        Action::ToggleTopic(_) => "ToggleTopic",
        Action::OpenSubtopic { .. } => "OpenSubtopic",
        Action::NextSubtopic => "NextSubtopic",
        Action::PreviousSubtopic => "PreviousSubtopic",
        Action::CloseDetail => "CloseDetail",
        Action::ShowMedia(_) => "ShowMedia",
        Action::HideMedia => "HideMedia",
        Action::OpenMedia(_) => "OpenMedia",
        Action::DatasetLoaded { .. } => "DatasetLoaded",
        Action::DatasetFailed { .. } => "DatasetFailed",
        Action::Quit => "Quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, test_app, test_app_with};

    fn open(app: &mut App, branch: &str, topic: Option<&str>, subtopic: &str) -> Effect {
        update(
            app,
            Action::OpenSubtopic {
                branch: branch.to_string(),
                topic: topic.map(str::to_string),
                subtopic: subtopic.to_string(),
            },
        )
    }

    #[test]
    fn test_subjects_behave_as_accordion() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        assert_eq!(app.expanded_subject, Some(0));

        update(&mut app, Action::ToggleSubject(1));
        assert_eq!(app.expanded_subject, Some(1));

        update(&mut app, Action::ToggleSubject(1));
        assert_eq!(app.expanded_subject, None);
    }

    #[test]
    fn test_subject_toggle_resets_branch_and_topic() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        update(&mut app, Action::ToggleBranch("Cell".to_string()));
        update(&mut app, Action::ToggleTopic("Organelles".to_string()));

        update(&mut app, Action::ToggleSubject(1));
        assert!(app.expanded_branch.is_none());
        assert!(app.expanded_topic.is_none());
    }

    #[test]
    fn test_unknown_subject_index_is_ignored() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ToggleSubject(9)), Effect::None);
        assert!(app.expanded_subject.is_none());
    }

    #[test]
    fn test_branch_toggle_scrolls_to_anchor() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        let effect = update(&mut app, Action::ToggleBranch("Cell".to_string()));
        assert_eq!(effect, Effect::ScrollTo(Anchor::Branch("Cell".to_string())));
        assert_eq!(app.expanded_branch.as_deref(), Some("Cell"));

        update(&mut app, Action::ToggleBranch("Cell".to_string()));
        assert!(app.expanded_branch.is_none());
    }

    #[test]
    fn test_topic_toggle_scrolls_and_collapses() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        update(&mut app, Action::ToggleBranch("Cell".to_string()));
        let effect = update(&mut app, Action::ToggleTopic("Organelles".to_string()));
        assert_eq!(
            effect,
            Effect::ScrollTo(Anchor::Topic {
                branch: "Cell".to_string(),
                topic: "Organelles".to_string(),
            })
        );
        assert_eq!(app.expanded_topic.as_deref(), Some("Organelles"));

        update(&mut app, Action::ToggleBranch("Plant Kingdom".to_string()));
        assert!(app.expanded_topic.is_none());
    }

    #[test]
    fn test_topic_toggle_without_branch_is_ignored() {
        let mut app = test_app();
        let effect = update(&mut app, Action::ToggleTopic("Organelles".to_string()));
        assert_eq!(effect, Effect::None);
        assert!(app.expanded_topic.is_none());
    }

    #[test]
    fn test_open_next_close_flow() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        open(&mut app, "Plant Kingdom", None, "Algae");
        assert_eq!(app.cursor.index(), Some(0));

        update(&mut app, Action::NextSubtopic);
        assert_eq!(app.cursor.snapshot().unwrap().title, "Fungi");

        update(&mut app, Action::NextSubtopic);
        assert!(!app.cursor.is_open());
    }

    #[test]
    fn test_open_uses_expanded_subject_records() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(1));
        open(&mut app, "Chordata", Some("Mammals"), "Whale");
        assert_eq!(app.cursor.snapshot().unwrap().description, "Large marine mammal");
    }

    #[test]
    fn test_open_inconsistent_context_sets_status() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        open(&mut app, "Plant Kingdom", Some("Nope"), "Algae");
        assert!(!app.cursor.is_open());
        assert!(app.status_message.contains("Algae"));
    }

    #[test]
    fn test_close_resets_media_view() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        open(&mut app, "Cell", Some("Organelles"), "Mitochondria");
        update(&mut app, Action::ShowMedia(MediaKind::Image));
        assert_eq!(app.media_view, MediaView::Image);

        update(&mut app, Action::CloseDetail);
        assert_eq!(app.media_view, MediaView::None);
        assert!(!app.cursor.is_open());
    }

    #[test]
    fn test_show_missing_media_keeps_view() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        open(&mut app, "Plant Kingdom", None, "Algae");
        update(&mut app, Action::ShowMedia(MediaKind::Video));
        assert_eq!(app.media_view, MediaView::None);
        assert_eq!(app.status_message, "No video for this subtopic");
    }

    #[test]
    fn test_moving_on_clears_transient_status() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        open(&mut app, "Plant Kingdom", None, "Algae");
        update(&mut app, Action::ShowMedia(MediaKind::Video));
        assert_eq!(app.status_message, "No video for this subtopic");

        update(&mut app, Action::NextSubtopic);
        assert!(app.status_message.is_empty());

        update(&mut app, Action::ShowMedia(MediaKind::Video));
        update(&mut app, Action::CloseDetail);
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn test_moving_on_keeps_load_failure_status() {
        let mut app = test_app();
        app.subjects[1].load = LoadState::Failed("sheet not found".to_string());
        update(&mut app, Action::ToggleSubject(0));
        open(&mut app, "Plant Kingdom", None, "Algae");
        assert_eq!(app.status_message, "Failed to load: Zoology");

        update(&mut app, Action::ShowMedia(MediaKind::Video));
        update(&mut app, Action::PreviousSubtopic);
        assert_eq!(app.status_message, "Failed to load: Zoology");
    }

    #[test]
    fn test_open_media_resolves_hosted_video() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSubject(0));
        open(&mut app, "Cell", Some("Organelles"), "Mitochondria");
        assert_eq!(
            update(&mut app, Action::OpenMedia(MediaKind::Video)),
            Effect::OpenExternal("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            update(&mut app, Action::OpenMedia(MediaKind::Image)),
            Effect::OpenExternal("https://example.com/mito.png".to_string())
        );
    }

    #[test]
    fn test_open_media_unresolvable_video() {
        let mut r = record("B", "", "S", "d");
        r.video = Some("https://www.youtube.com/channel".to_string());
        let mut app = test_app_with(vec![r]);
        update(&mut app, Action::ToggleSubject(0));
        open(&mut app, "B", None, "S");
        assert_eq!(update(&mut app, Action::OpenMedia(MediaKind::Video)), Effect::None);
        assert!(app.status_message.starts_with("Cannot play video link"));
    }

    #[test]
    fn test_dataset_loaded_assigns_records() {
        let mut app = test_app_with(vec![]);
        update(
            &mut app,
            Action::DatasetLoaded {
                subject: 0,
                records: vec![record("B", "", "S", "d")],
            },
        );
        assert_eq!(app.subjects[0].records.len(), 1);
        assert_eq!(app.subjects[0].load, LoadState::Loaded);
        assert_eq!(app.status_message, "Loading 1 subject(s)...");
    }

    #[test]
    fn test_dataset_failure_leaves_subject_empty() {
        let mut app = test_app_with(vec![]);
        update(
            &mut app,
            Action::DatasetLoaded {
                subject: 0,
                records: vec![record("B", "", "S", "d")],
            },
        );
        update(
            &mut app,
            Action::DatasetFailed {
                subject: 1,
                error: "sheet not found".to_string(),
            },
        );
        assert!(app.subjects[1].records.is_empty());
        assert_eq!(app.subjects[1].load, LoadState::Failed("sheet not found".to_string()));
        assert_eq!(app.status_message, "Failed to load: Zoology");
        assert!(!app.is_loading());
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}

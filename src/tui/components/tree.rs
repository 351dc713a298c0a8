//! # Study Tree Component
//!
//! The expandable subject → branch → topic → subtopic list.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TreeState` lives in `TuiState` (selection + scroll offset)
//! - `StudyTree` is created each frame with the rows built from `App`
//!
//! Rows are rebuilt from core state on every frame by `build_rows()`; the
//! tree itself never stores content.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use unicode_width::UnicodeWidthStr;

use crate::core::action::{Action, Anchor};
use crate::core::hierarchy::{BranchLayout, branch_view, branches_of, subtopics_of};
use crate::core::state::{App, LoadState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Subject(usize),
    Branch(String),
    Topic {
        branch: String,
        topic: String,
    },
    Subtopic {
        branch: String,
        topic: Option<String>,
        subtopic: String,
    },
    /// Non-interactive placeholder (loading, failed, empty).
    Status(String),
}

impl TreeNode {
    /// The action activating this node dispatches, if any.
    pub fn activate(&self) -> Option<Action> {
        match self {
            TreeNode::Subject(i) => Some(Action::ToggleSubject(*i)),
            TreeNode::Branch(branch) => Some(Action::ToggleBranch(branch.clone())),
            TreeNode::Topic { topic, .. } => Some(Action::ToggleTopic(topic.clone())),
            TreeNode::Subtopic {
                branch,
                topic,
                subtopic,
            } => Some(Action::OpenSubtopic {
                branch: branch.clone(),
                topic: topic.clone(),
                subtopic: subtopic.clone(),
            }),
            TreeNode::Status(_) => None,
        }
    }

    fn matches(&self, anchor: &Anchor) -> bool {
        match (self, anchor) {
            (TreeNode::Branch(b), Anchor::Branch(a)) => b == a,
            (
                TreeNode::Topic { branch, topic },
                Anchor::Topic {
                    branch: anchor_branch,
                    topic: anchor_topic,
                },
            ) => branch == anchor_branch && topic == anchor_topic,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub node: TreeNode,
    pub depth: u16,
    pub label: String,
    /// `Some(expanded)` for nodes with children, `None` for leaves.
    pub expanded: Option<bool>,
}

/// Flattens the visible part of the tree.
pub fn build_rows(app: &App) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for (i, subject) in app.subjects.iter().enumerate() {
        let subject_open = app.expanded_subject == Some(i);
        rows.push(TreeRow {
            node: TreeNode::Subject(i),
            depth: 0,
            label: subject.label.clone(),
            expanded: Some(subject_open),
        });
        if !subject_open {
            continue;
        }

        let placeholder = match &subject.load {
            LoadState::Pending => Some("Loading...".to_string()),
            LoadState::Failed(e) => Some(format!("Failed to load: {e}")),
            LoadState::Loaded if subject.records.is_empty() => Some("No content".to_string()),
            LoadState::Loaded => None,
        };
        if let Some(text) = placeholder {
            rows.push(status_row(text));
            continue;
        }

        let records = &subject.records;
        for branch in branches_of(records) {
            let branch_open = app.expanded_branch.as_deref() == Some(branch);
            rows.push(TreeRow {
                node: TreeNode::Branch(branch.to_string()),
                depth: 1,
                label: branch.to_string(),
                expanded: Some(branch_open),
            });
            if !branch_open {
                continue;
            }

            let view = branch_view(records, branch);
            match view.layout() {
                BranchLayout::Topics => {
                    for topic in &view.topics {
                        let topic_open = app.expanded_topic.as_deref() == Some(*topic);
                        rows.push(TreeRow {
                            node: TreeNode::Topic {
                                branch: branch.to_string(),
                                topic: topic.to_string(),
                            },
                            depth: 2,
                            label: topic.to_string(),
                            expanded: Some(topic_open),
                        });
                        if topic_open {
                            for item in subtopics_of(records, branch, topic) {
                                rows.push(subtopic_row(branch, Some(*topic), item.subtopic, 3));
                            }
                        }
                    }
                }
                BranchLayout::Direct => {
                    for item in view.direct {
                        rows.push(subtopic_row(branch, None, item.subtopic, 2));
                    }
                }
                BranchLayout::Empty => {}
            }
        }
    }
    rows
}

fn subtopic_row(branch: &str, topic: Option<&str>, subtopic: String, depth: u16) -> TreeRow {
    TreeRow {
        node: TreeNode::Subtopic {
            branch: branch.to_string(),
            topic: topic.map(str::to_string),
            subtopic: subtopic.clone(),
        },
        depth,
        label: subtopic,
        expanded: None,
    }
}

fn status_row(text: String) -> TreeRow {
    TreeRow {
        node: TreeNode::Status(text.clone()),
        depth: 1,
        label: text,
        expanded: None,
    }
}

/// Persistent selection and scroll state for the tree.
#[derive(Default)]
pub struct TreeState {
    pub list_state: ListState,
    /// Row count of the last build, for clamping.
    pub row_count: usize,
}

impl TreeState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            list_state,
            row_count: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn select(&mut self, index: usize) {
        let max = self.row_count.saturating_sub(1);
        self.list_state.select(Some(index.min(max)));
    }

    /// Syncs with a fresh row list so the selection stays in range.
    pub fn sync(&mut self, rows: &[TreeRow]) {
        self.row_count = rows.len();
        self.select(self.selected());
    }

    /// Selects the anchored row and scrolls it to the top of the viewport.
    pub fn scroll_to(&mut self, rows: &[TreeRow], anchor: &Anchor) {
        self.row_count = rows.len();
        if let Some(index) = rows.iter().position(|row| row.node.matches(anchor)) {
            self.select(index);
            *self.list_state.offset_mut() = index;
        }
    }

    /// Index of the closest row above `index` with a smaller depth.
    pub fn parent_of(rows: &[TreeRow], index: usize) -> Option<usize> {
        let depth = rows.get(index)?.depth;
        rows[..index].iter().rposition(|row| row.depth < depth)
    }
}

/// Events emitted by the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// Enter/Space/→ on the selected row.
    Activate,
    /// ← on the selected row.
    Collapse,
}

impl EventHandler for TreeState {
    type Event = TreeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TreeEvent> {
        match event {
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
                self.select(self.selected().saturating_sub(1));
                None
            }
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
                self.select(self.selected() + 1);
                None
            }
            TuiEvent::Home => {
                self.select(0);
                None
            }
            TuiEvent::End => {
                self.select(self.row_count.saturating_sub(1));
                None
            }
            TuiEvent::ScrollUp => {
                let offset = self.list_state.offset_mut();
                *offset = offset.saturating_sub(1);
                None
            }
            TuiEvent::ScrollDown => {
                let max = self.row_count.saturating_sub(1);
                let offset = self.list_state.offset_mut();
                *offset = (*offset + 1).min(max);
                None
            }
            TuiEvent::ScrollPageUp => {
                self.select(self.selected().saturating_sub(10));
                None
            }
            TuiEvent::ScrollPageDown => {
                self.select(self.selected() + 10);
                None
            }
            TuiEvent::Submit | TuiEvent::CursorRight | TuiEvent::InputChar(' ') => {
                Some(TreeEvent::Activate)
            }
            TuiEvent::CursorLeft => Some(TreeEvent::Collapse),
            _ => None,
        }
    }
}

/// Transient render wrapper for the tree.
pub struct StudyTree<'a> {
    rows: &'a [TreeRow],
    state: &'a mut TreeState,
}

impl<'a> StudyTree<'a> {
    pub fn new(rows: &'a [TreeRow], state: &'a mut TreeState) -> Self {
        Self { rows, state }
    }
}

impl Component for StudyTree<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Subjects ");

        let inner_width = area.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| ListItem::new(row_line(row, inner_width)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        self.state.row_count = self.rows.len();
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn row_line(row: &TreeRow, width: usize) -> Line<'static> {
    let indent = "  ".repeat(row.depth as usize);
    let marker = match row.expanded {
        Some(true) => "▾ ",
        Some(false) => "▸ ",
        None if matches!(row.node, TreeNode::Status(_)) => "  ",
        None => "• ",
    };
    let style = match row.node {
        TreeNode::Subject(_) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        TreeNode::Branch(_) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        TreeNode::Topic { .. } => Style::default().fg(Color::Green),
        TreeNode::Subtopic { .. } => Style::default().fg(Color::White),
        TreeNode::Status(_) => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    };

    let prefix_width = indent.width() + marker.width();
    let label = truncate_str(&row.label, width.saturating_sub(prefix_width));
    Line::from(vec![
        Span::raw(indent),
        Span::styled(marker, style),
        Span::styled(label, style),
    ])
}

/// Truncate a string to fit within `max_width` display columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

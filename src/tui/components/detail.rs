//! # Detail Overlay Component
//!
//! Overlay showing the open subtopic: title, position among its siblings,
//! media references and the scrollable description. Opened by activating a
//! subtopic in the tree, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `DetailState` lives in `TuiState` (scroll, maximize toggle)
//! - `DetailOverlay` is created each frame from a `CursorSnapshot`
//!
//! The description is pre-wrapped with `textwrap` so the canvas height of
//! the `ScrollView` is known before rendering.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::action::Action;
use crate::core::cursor::CursorSnapshot;
use crate::core::media::{MediaKind, MediaView, VideoRef, resolve_video};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the detail overlay.
#[derive(Default)]
pub struct DetailState {
    pub scroll: ScrollViewState,
    /// Overlay fills the whole screen instead of a centered box.
    pub maximized: bool,
    /// Mirrors `App::media_view`; synced by the event loop before handling input.
    pub media_view: MediaView,
}

impl DetailState {
    /// Scroll back to the top, used when the shown subtopic changes.
    pub fn reset_scroll(&mut self) {
        self.scroll = ScrollViewState::default();
    }
}

/// Events emitted by the detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailEvent {
    Previous,
    Next,
    Close,
    ShowMedia(MediaKind),
    HideMedia,
    OpenMedia(MediaKind),
}

impl DetailEvent {
    pub fn into_action(self) -> Action {
        match self {
            DetailEvent::Previous => Action::PreviousSubtopic,
            DetailEvent::Next => Action::NextSubtopic,
            DetailEvent::Close => Action::CloseDetail,
            DetailEvent::ShowMedia(kind) => Action::ShowMedia(kind),
            DetailEvent::HideMedia => Action::HideMedia,
            DetailEvent::OpenMedia(kind) => Action::OpenMedia(kind),
        }
    }
}

impl EventHandler for DetailState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::Escape if self.media_view != MediaView::None => Some(DetailEvent::HideMedia),
            TuiEvent::Escape => Some(DetailEvent::Close),
            TuiEvent::CursorLeft | TuiEvent::InputChar('p') => Some(DetailEvent::Previous),
            TuiEvent::CursorRight | TuiEvent::InputChar('n') => Some(DetailEvent::Next),
            TuiEvent::InputChar('i') => Some(DetailEvent::ShowMedia(MediaKind::Image)),
            TuiEvent::InputChar('v') => Some(DetailEvent::ShowMedia(MediaKind::Video)),
            // In the media view `o` opens whatever is being shown
            TuiEvent::InputChar('o') if self.media_view == MediaView::Video => {
                Some(DetailEvent::OpenMedia(MediaKind::Video))
            }
            TuiEvent::InputChar('o') => Some(DetailEvent::OpenMedia(MediaKind::Image)),
            TuiEvent::InputChar('O') => Some(DetailEvent::OpenMedia(MediaKind::Video)),
            TuiEvent::InputChar('f') => {
                self.maximized = !self.maximized;
                None
            }
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.scroll.scroll_up();
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.scroll.scroll_down();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll.scroll_page_down();
                None
            }
            TuiEvent::Home => {
                self.scroll.scroll_to_top();
                None
            }
            TuiEvent::End => {
                self.scroll.scroll_to_bottom();
                None
            }
            _ => None,
        }
    }
}

/// Splits a description into display paragraphs.
///
/// Paragraphs are separated by a blank line. Paragraphs with Latin text get
/// a leading line break so they sit apart from the surrounding script.
pub fn format_description(description: &str) -> Vec<String> {
    description
        .split("\n\n")
        .map(|paragraph| {
            if paragraph.chars().any(|c| c.is_ascii_alphabetic()) {
                format!("\n{paragraph}")
            } else {
                paragraph.to_string()
            }
        })
        .collect()
}

/// Wraps the formatted description to `width` columns, one blank line
/// between paragraphs.
pub fn description_lines(description: &str, width: u16) -> Vec<String> {
    let options = textwrap::Options::new((width as usize).max(1))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);

    let mut lines = Vec::new();
    for (i, paragraph) in format_description(description).iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(
            textwrap::wrap(paragraph, &options)
                .into_iter()
                .map(|line| line.into_owned()),
        );
    }
    lines
}

/// Transient render wrapper for the detail overlay.
pub struct DetailOverlay<'a> {
    snapshot: CursorSnapshot<'a>,
    state: &'a mut DetailState,
}

impl<'a> DetailOverlay<'a> {
    pub fn new(snapshot: CursorSnapshot<'a>, state: &'a mut DetailState) -> Self {
        Self { snapshot, state }
    }

    fn help_line(&self) -> Line<'static> {
        if self.state.media_view != MediaView::None {
            return Line::from(" o Open externally  Esc Back ").centered();
        }
        let mut parts = Vec::new();
        if self.snapshot.can_go_previous {
            parts.push("← Previous");
        }
        parts.push(if self.snapshot.can_go_next {
            "→ Next"
        } else {
            "→ Finish"
        });
        if self.snapshot.image.is_some() {
            parts.push("i Image");
        }
        if self.snapshot.video.is_some() {
            parts.push("v Video");
        }
        parts.push(if self.state.maximized {
            "f Restore"
        } else {
            "f Maximize"
        });
        parts.push("Esc Close");
        Line::from(format!(" {} ", parts.join("  "))).centered()
    }

    fn media_summary(&self) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::new();
        if let Some(image) = self.snapshot.image {
            lines.push(Line::from(vec![
                Span::styled("Image  ", label),
                Span::raw(image),
            ]));
        }
        if let Some(video) = self.snapshot.video {
            lines.push(Line::from(vec![
                Span::styled("Video  ", label),
                Span::raw(video),
            ]));
        }
        lines
    }

    fn render_media(&self, frame: &mut Frame, area: Rect) {
        let (kind, url) = match self.state.media_view {
            MediaView::Image => (MediaKind::Image, self.snapshot.image),
            MediaView::Video => (MediaKind::Video, self.snapshot.video),
            MediaView::None => return,
        };
        let Some(url) = url else {
            return;
        };

        let heading = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled(kind.label().to_uppercase(), heading)),
            Line::from(""),
        ];
        match kind {
            MediaKind::Image => lines.push(Line::from(url.to_string())),
            MediaKind::Video => match resolve_video(url) {
                VideoRef::Direct(direct) => {
                    lines.push(Line::from("Video file"));
                    lines.push(Line::from(direct));
                }
                VideoRef::Embed(embed) => {
                    lines.push(Line::from("Embedded player"));
                    lines.push(Line::from(embed));
                }
                VideoRef::Unresolvable(link) => {
                    lines.push(Line::from(Span::styled(
                        "No playable video id in link",
                        Style::default().fg(Color::Red),
                    )));
                    lines.push(Line::from(link));
                }
            },
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_description(&mut self, frame: &mut Frame, area: Rect) {
        // One column for the scrollbar
        let content_width = area.width.saturating_sub(1);
        let lines: Vec<Line> = description_lines(self.snapshot.description, content_width)
            .into_iter()
            .map(Line::from)
            .collect();
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).max(1);

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines).style(Style::default().fg(Color::White)),
            Rect::new(0, 0, content_width, height),
        );
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll);
    }
}

impl Component for DetailOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = if self.state.maximized {
            area
        } else {
            centered_rect(80, 80, area)
        };
        frame.render_widget(Clear, overlay);

        let title = format!(
            " {} ({}/{}) ",
            self.snapshot.title,
            self.snapshot.position + 1,
            self.snapshot.total
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Left)
            .title_bottom(self.help_line())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        if self.state.media_view != MediaView::None {
            self.render_media(frame, inner);
            return;
        }

        let media = self.media_summary();
        let media_height = if media.is_empty() {
            0
        } else {
            media.len() as u16 + 1
        };
        let [media_area, body_area] =
            Layout::vertical([Constraint::Length(media_height), Constraint::Min(0)]).areas(inner);
        if media_height > 0 {
            frame.render_widget(Paragraph::new(media), media_area);
        }
        self.render_description(frame, body_area);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

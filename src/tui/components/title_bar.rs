//! # TitleBar Component
//!
//! Top status bar showing where the content came from and the current
//! status message.
//!
//! Stateless: all data arrives as props and the bar is a single line.
//!
//! 1. **Status message**: `"StudyTree (botany.xlsx) | Loading 2 subject(s)..."`
//! 2. **Default**: `"StudyTree (botany.xlsx)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component.
pub struct TitleBar {
    /// Workbook path or URL
    pub source: String,
    /// Status message (loading progress, load failures, navigation errors)
    pub status_message: String,
}

impl TitleBar {
    pub fn new(source: String, status_message: String) -> Self {
        Self {
            source,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.status_message.is_empty() {
            format!("StudyTree ({})", self.source)
        } else {
            format!("StudyTree ({}) | {}", self.source, self.status_message)
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}

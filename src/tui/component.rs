use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props are plain struct fields set by the parent before each frame.
/// Stateful widgets borrow their persistent state (`&mut TreeState`,
/// `&mut DetailState`) so `render` can adjust selection or scroll offsets
/// while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Persistent component state that turns raw input into its own events.
///
/// Returning `None` means the input was either consumed locally (scrolling,
/// selection) or ignored.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}

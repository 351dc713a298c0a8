use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{DetailOverlay, StudyTree, TitleBar, build_rows};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const TREE_HELP: &str = " ↑/↓ Move  Enter Open  ← Collapse  q Quit ";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, tree_area, help_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(tui.source.clone(), app.status_message.clone());
    title_bar.render(frame, title_area);

    let rows = build_rows(app);
    tui.tree_area = tree_area;
    StudyTree::new(&rows, &mut tui.tree).render(frame, tree_area);

    frame.render_widget(
        Span::styled(TREE_HELP, Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlay last so it sits on top of the tree
    if let Some(snapshot) = app.cursor.snapshot() {
        tui.detail.media_view = app.media_view;
        DetailOverlay::new(snapshot, &mut tui.detail).render(frame, frame.area());
    }
}

/// Hit test: which tree row index is at screen row `row`?
///
/// `area` is the bordered tree area, `offset` the list scroll offset.
pub fn hit_test_tree(row: u16, area: Rect, offset: usize, row_count: usize) -> Option<usize> {
    let top = area.y + 1;
    let bottom = (area.y + area.height).saturating_sub(1);
    if row < top || row >= bottom {
        return None;
    }
    let index = offset + (row - top) as usize;
    (index < row_count).then_some(index)
}

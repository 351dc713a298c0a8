//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! - Ctrl+C and `q` quit from anywhere.
//! - While a subtopic is open, input goes to the detail overlay.
//! - Otherwise input goes to the tree.
//!
//! ## Redraw Strategy
//!
//! The loop only redraws after an input event, a resize, or an action from
//! the background loader. While subjects are still loading the poll timeout
//! is short so load results show up promptly.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::content::{load_subjects, source_for};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{DetailState, TreeEvent, TreeState, build_rows};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub tree: TreeState,
    pub detail: DetailState,
    /// Screen area of the tree from the last draw, for mouse hit testing
    pub tree_area: Rect,
    /// Workbook path or URL shown in the title bar
    pub source: String,
    /// (title, position) of the subtopic the overlay last showed
    shown: Option<(String, usize)>,
}

impl TuiState {
    pub fn new(source: String) -> Self {
        Self {
            tree: TreeState::new(),
            detail: DetailState::default(),
            tree_area: Rect::default(),
            source,
            shown: None,
        }
    }

    /// Resets the overlay scroll when a different subtopic is shown.
    fn track_shown(&mut self, app: &App) {
        let shown = app
            .cursor
            .snapshot()
            .map(|s| (s.title.to_string(), s.position));
        if shown != self.shown {
            self.detail.reset_scroll();
            self.shown = shown;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(config.workbook.clone());

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_load(
        config.workbook.clone(),
        config.subjects.iter().map(|s| s.sheet.clone()).collect(),
        tx,
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            tui.track_shown(&app);
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.is_loading() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::ForceQuit | TuiEvent::InputChar('q')) {
                should_quit |= dispatch(&mut app, &mut tui, Action::Quit);
                continue;
            }

            if app.cursor.is_open() {
                tui.detail.media_view = app.media_view;
                if let Some(detail_event) = tui.detail.handle_event(&event) {
                    should_quit |= dispatch(&mut app, &mut tui, detail_event.into_action());
                }
                continue;
            }

            should_quit |= handle_tree_event(&mut app, &mut tui, &event);
        }

        if should_quit {
            break;
        }

        // Handle background task actions (load results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            should_quit |= dispatch(&mut app, &mut tui, action);
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Routes an event to the tree. Returns true if the app should quit.
fn handle_tree_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> bool {
    let rows = build_rows(app);
    tui.tree.sync(&rows);

    if let TuiEvent::MouseClick(_col, row) = *event {
        let offset = tui.tree.list_state.offset();
        let Some(index) = ui::hit_test_tree(row, tui.tree_area, offset, rows.len()) else {
            return false;
        };
        tui.tree.select(index);
        return match rows[index].node.activate() {
            Some(action) => dispatch(app, tui, action),
            None => false,
        };
    }

    let Some(tree_event) = tui.tree.handle_event(event) else {
        return false;
    };
    let Some(row) = rows.get(tui.tree.selected()) else {
        return false;
    };
    match tree_event {
        TreeEvent::Activate => match row.node.activate() {
            Some(action) => dispatch(app, tui, action),
            None => false,
        },
        TreeEvent::Collapse => {
            // An expanded node collapses itself; anything else jumps to its parent
            if row.expanded == Some(true)
                && let Some(action) = row.node.activate()
            {
                return dispatch(app, tui, action);
            }
            if let Some(parent) = TreeState::parent_of(&rows, tui.tree.selected()) {
                tui.tree.select(parent);
            }
            false
        }
    }
}

/// Runs an action through the reducer and performs its effect.
/// Returns true if the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::ScrollTo(anchor) => {
            let rows = build_rows(app);
            tui.tree.scroll_to(&rows, &anchor);
            false
        }
        Effect::OpenExternal(url) => {
            info!("Opening externally: {}", url);
            if let Err(e) = open::that(&url) {
                warn!("Failed to open {}: {}", url, e);
                app.status_message = format!("Could not open {url}: {e}");
            }
            false
        }
    }
}

/// Fetches the workbook once and reports each subject back as an action.
fn spawn_load(location: String, sheets: Vec<String>, tx: mpsc::Sender<Action>) {
    info!("Spawning load of {} subject(s) from {}", sheets.len(), location);
    tokio::spawn(async move {
        let source = source_for(&location);
        match load_subjects(source.as_ref(), &sheets).await {
            Ok(results) => {
                for (subject, result) in results.into_iter().enumerate() {
                    let action = match result {
                        Ok(records) => Action::DatasetLoaded { subject, records },
                        Err(e) => Action::DatasetFailed {
                            subject,
                            error: e.to_string(),
                        },
                    };
                    if tx.send(action).is_err() {
                        debug!("Event loop gone, dropping load results");
                        return;
                    }
                }
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", location, e);
                for subject in 0..sheets.len() {
                    let _ = tx.send(Action::DatasetFailed {
                        subject,
                        error: e.to_string(),
                    });
                }
            }
        }
    });
}

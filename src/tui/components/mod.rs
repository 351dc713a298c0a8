//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar showing the workbook source and status
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it
//! each frame:
//! - `TreeState` / `StudyTree`: the expandable subject hierarchy
//! - `DetailState` / `DetailOverlay`: the open subtopic with sibling navigation
//!
//! Each file keeps its state, events, rendering and tests together.
//!
//! ```text
//! components/
//! ├── mod.rs        (this file)
//! ├── title_bar.rs  (Top status bar)
//! ├── tree.rs       (Subject → branch → topic → subtopic list)
//! └── detail.rs     (Subtopic overlay, media view)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod detail;
pub mod tree;
pub use detail::{DetailOverlay, DetailState};
pub use tree::{StudyTree, TreeEvent, TreeState, build_rows};

//! # Core Application Logic
//!
//! This module contains studytree's navigation model.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Records (flat rows)  │
//!                    │  • Hierarchy queries    │
//!                    │  • Navigation cursor    │
//!                    │  • State + update()     │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  --dump    │      │  content   │
//!     │  Adapter   │      │   (JSON)   │      │  (loader)  │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`record`]: The `Record` row and its projections
//! - [`hierarchy`]: Branch/topic/subtopic queries over records
//! - [`cursor`]: The `NavCursor` state machine for next/previous
//! - [`media`]: Video reference resolution and media view modes
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Config file loading and resolution

pub mod action;
pub mod config;
pub mod cursor;
pub mod hierarchy;
pub mod media;
pub mod record;
pub mod state;

pub use record::Record;

//! # Core Application Logic
//!
//! The study session itself. It knows nothing about terminals or prompts.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Dataset (read-only)  │
//!                    │  • Selection (state)    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Pure.           │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │  Console   │
//!           │  Adapter   │              │  Adapter   │
//!           │ (ratatui)  │              │ (stdin/out)│
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`dataset`]: `Entry` and the immutable `Dataset`
//! - [`loader`]: reads the spreadsheet into a `Dataset` (the only I/O here, run once)
//! - [`search`]: keyword search
//! - [`selection`]: `Selection`, the current-entry state machine
//! - [`state`]: `App`, all session state in one place
//! - [`action`]: `Action` and `update()`
//! - [`config`]: settings resolution
//! - [`error`]: errors and user-facing notices

pub mod action;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod search;
pub mod selection;
pub mod state;

pub use action::{Action, Effect, update};
pub use dataset::{Dataset, Entry, EntryNumber};
pub use selection::{Filter, Mode, Selection};
pub use state::App;

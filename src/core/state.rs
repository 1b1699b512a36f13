//! # Application State
//!
//! Everything one study session knows. Presentation-only state (which
//! overlay is open, the text in the query box) lives in the front ends.
//!
//! ```text
//! App
//! ├── dataset: Arc<Dataset>         // immutable, loaded once
//! ├── selection: Selection          // mode, filter, current entry, reveal
//! ├── query: String                 // last applied keyword / number query
//! ├── field_scope: FieldScope       // keyword search fields
//! ├── category_scope: CategoryScope // keyword search categories
//! ├── matches: Vec<usize>           // keyword search results, dataset order
//! ├── match_cursor: usize           // which match is shown
//! ├── hide_resolution: bool         // resolution hidden until revealed
//! ├── reviewed: usize               // draws in this TotalRandom session
//! ├── notice: Option<Notice>        // recoverable warning for the user
//! └── rng: StdRng                   // random picker
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::dataset::{Dataset, Entry};
use crate::core::error::Notice;
use crate::core::search::{CategoryScope, FieldScope};
use crate::core::selection::Selection;

pub struct App {
    pub dataset: Arc<Dataset>,
    pub selection: Selection,
    pub query: String,
    pub field_scope: FieldScope,
    pub category_scope: CategoryScope,
    pub matches: Vec<usize>,
    pub match_cursor: usize,
    pub hide_resolution: bool,
    pub reviewed: usize,
    pub notice: Option<Notice>,
    pub rng: StdRng,
}

impl App {
    pub fn new(dataset: Arc<Dataset>, rng: StdRng) -> Self {
        Self {
            dataset,
            selection: Selection::new(),
            query: String::new(),
            field_scope: FieldScope::default(),
            category_scope: CategoryScope::default(),
            matches: Vec::new(),
            match_cursor: 0,
            hide_resolution: false,
            reviewed: 0,
            notice: None,
            rng,
        }
    }

    pub fn from_config(dataset: Arc<Dataset>, config: &ResolvedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut app = Self::new(dataset, rng);
        app.hide_resolution = config.hide_resolution;
        app
    }

    /// The entry currently on display, if any.
    pub fn current(&self) -> Option<&Entry> {
        self.selection
            .current_entry()
            .and_then(|i| self.dataset.get(i))
    }

    /// Whether the current card should show its resolution and rule.
    pub fn resolution_visible(&self) -> bool {
        !self.hide_resolution || self.selection.resolution_revealed()
    }

    /// Size of the pool the sequential position indexes into.
    pub fn sequential_count(&self) -> usize {
        self.selection
            .category()
            .map(|c| self.dataset.category_pool(c).len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.current().is_none());
        assert!(app.notice.is_none());
        assert!(app.matches.is_empty());
        assert_eq!(app.reviewed, 0);
        assert!(app.resolution_visible());
    }

    #[test]
    fn test_hidden_resolution_needs_reveal() {
        let mut app = test_app();
        app.hide_resolution = true;
        app.selection.show(Some(0));
        assert!(!app.resolution_visible());
        app.selection.reveal_resolution();
        assert!(app.resolution_visible());
    }
}

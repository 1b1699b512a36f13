//! # Selection State
//!
//! Which entry is "current", and the rules that keep it honest as the user
//! switches mode, changes filter, steps through a category or searches.
//!
//! ```text
//! Selection
//! ├── active_mode: Mode             // which study mode is open
//! ├── active_filter: Option<Filter> // category, keyword or number string
//! ├── current_entry: Option<usize>  // dataset row index, None = nothing shown
//! ├── resolution_revealed: bool     // reset whenever current_entry changes
//! └── sequential_position: usize    // 1-based, Sequential mode only
//! ```
//!
//! Every operation is total. "Not found" and "empty pool" both end up as
//! `current_entry == None`; the caller decides what message to show.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::dataset::Dataset;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    ByCategoryRandom,
    Sequential,
    KeywordSearch,
    ByNumber,
    TotalRandom,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::ByCategoryRandom,
        Mode::Sequential,
        Mode::KeywordSearch,
        Mode::ByNumber,
        Mode::TotalRandom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::ByCategoryRandom => "Review by Category",
            Mode::Sequential => "Sequential Review",
            Mode::KeywordSearch => "Keyword Search",
            Mode::ByNumber => "Search by Number",
            Mode::TotalRandom => "Total Random Shuffle",
        }
    }

    pub fn index(&self) -> usize {
        Mode::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Mode::ALL[(self.index() + 1) % Mode::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Mode::ALL[(self.index() + Mode::ALL.len() - 1) % Mode::ALL.len()]
    }

    /// Modes whose filter is a category.
    pub fn uses_category(&self) -> bool {
        matches!(self, Mode::ByCategoryRandom | Mode::Sequential)
    }

    /// Modes whose filter is typed text.
    pub fn uses_text_query(&self) -> bool {
        matches!(self, Mode::KeywordSearch | Mode::ByNumber)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Category(String),
    Keyword(String),
    Number(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    active_mode: Mode,
    active_filter: Option<Filter>,
    current_entry: Option<usize>,
    resolution_revealed: bool,
    sequential_position: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    pub fn new() -> Self {
        Self {
            active_mode: Mode::default(),
            active_filter: None,
            current_entry: None,
            resolution_revealed: false,
            sequential_position: 1,
        }
    }

    pub fn active_mode(&self) -> Mode {
        self.active_mode
    }

    pub fn active_filter(&self) -> Option<&Filter> {
        self.active_filter.as_ref()
    }

    pub fn current_entry(&self) -> Option<usize> {
        self.current_entry
    }

    pub fn resolution_revealed(&self) -> bool {
        self.resolution_revealed
    }

    pub fn sequential_position(&self) -> usize {
        self.sequential_position
    }

    /// The category filter, if one is active.
    pub fn category(&self) -> Option<&str> {
        match &self.active_filter {
            Some(Filter::Category(c)) => Some(c),
            _ => None,
        }
    }

    /// Switch mode. A selection made under one mode is never valid under another.
    ///
    /// Re-entering the active mode starts it afresh as well.
    pub fn set_mode(&mut self, mode: Mode) {
        self.active_mode = mode;
        self.active_filter = None;
        self.sequential_position = 1;
        self.clear();
    }

    /// Replace the active filter, dropping the current entry if it no longer fits.
    ///
    /// Category and number filters keep a current entry that still matches.
    /// A keyword change always drops it: the match set is recomputed. Clearing
    /// the filter clears the selection. In Sequential mode a new category
    /// restarts at position 1.
    pub fn set_filter(&mut self, filter: Option<Filter>, dataset: &Dataset) {
        if filter == self.active_filter {
            return;
        }

        let still_valid = match (&filter, self.current_entry.and_then(|i| dataset.get(i))) {
            (_, None) | (None, _) => false,
            (Some(Filter::Category(c)), Some(entry)) => entry.category == *c,
            (Some(Filter::Number(n)), Some(entry)) => entry.number.as_str() == n.trim(),
            (Some(Filter::Keyword(_)), Some(_)) => false,
        };

        if matches!(filter, Some(Filter::Category(_))) && self.active_mode == Mode::Sequential {
            self.sequential_position = 1;
        }

        self.active_filter = filter;
        if !still_valid {
            self.clear();
        }
    }

    /// Pick one entry of `pool` uniformly at random.
    ///
    /// An empty pool leaves nothing selected. The reveal flag is cleared even
    /// when the draw lands on the entry already shown.
    pub fn advance_random<R: Rng + ?Sized>(&mut self, pool: &[usize], rng: &mut R) -> Option<usize> {
        match pool.choose(rng) {
            Some(&index) => {
                self.current_entry = Some(index);
                self.resolution_revealed = false;
                Some(index)
            }
            None => {
                self.clear();
                None
            }
        }
    }

    /// Show the entry at a 1-based `requested_position` in a number-sorted pool.
    ///
    /// Positions past the end wrap to 1 and positions below 1 wrap to the
    /// end, so a +/- control cycles. The reveal flag is only cleared when
    /// the resolved entry differs from the one already shown.
    pub fn advance_sequential(&mut self, pool_sorted_by_number: &[usize], requested_position: i64) -> Option<usize> {
        let count = pool_sorted_by_number.len();
        if count == 0 {
            self.sequential_position = 1;
            self.clear();
            return None;
        }

        let resolved = resolve_position(requested_position, count);
        self.sequential_position = resolved;
        let index = pool_sorted_by_number[resolved - 1];
        self.show(Some(index));
        Some(index)
    }

    /// Show `entry` (or nothing). Clears the reveal flag if the entry changes.
    pub fn show(&mut self, entry: Option<usize>) {
        if entry != self.current_entry {
            self.current_entry = entry;
            self.resolution_revealed = false;
        }
    }

    /// Reveal the resolution of the current entry. No effect with nothing selected.
    pub fn reveal_resolution(&mut self) {
        if self.current_entry.is_some() {
            self.resolution_revealed = true;
        }
    }

    fn clear(&mut self) {
        self.current_entry = None;
        self.resolution_revealed = false;
    }
}

/// Map a requested 1-based position onto `1..=count` with wrap-around.
/// `count` must be non-zero.
fn resolve_position(requested: i64, count: usize) -> usize {
    let count_i = i64::try_from(count).unwrap_or(i64::MAX);
    let wrapped = if requested > count_i {
        1
    } else if requested < 1 {
        count_i
    } else {
        requested
    };
    usize::try_from(wrapped.clamp(1, count_i)).unwrap_or(1)
}

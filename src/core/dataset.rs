//! # Dataset
//!
//! The immutable table of situations. Loaded once at startup (see
//! [`loader`](super::loader)) and shared by reference for the rest of the
//! process. Nothing here ever mutates an entry.
//!
//! Entries are addressed by their row index in dataset order. Pools are
//! plain `Vec<usize>` of those indices, so a selection never holds a borrow
//! into the table.

use std::cmp::Ordering;
use std::fmt;

/// The identifier printed next to a situation ("#17").
///
/// Stored as the trimmed string form so that a typed query compares against
/// exactly what the user sees. Ordering is numeric when both sides parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryNumber(String);

impl EntryNumber {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn numeric(&self) -> Option<f64> {
        self.0.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

impl fmt::Display for EntryNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Ord for EntryNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for EntryNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One situation / recommended resolution / rule record.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub number: EntryNumber,
    pub category: String,
    pub situation: String,
    pub resolution: String,
    pub rule: String,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    entries: Vec<Entry>,
    categories: Vec<String>,
    /// Header of the column the categories came from ("Section", "Stroke").
    category_label: String,
}

impl Dataset {
    pub fn new(entries: Vec<Entry>, category_label: impl Into<String>) -> Self {
        let mut categories: Vec<String> = entries
            .iter()
            .map(|e| e.category.clone())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        Self {
            entries,
            categories,
            category_label: category_label.into(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct non-empty category values, sorted.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category_label(&self) -> &str {
        &self.category_label
    }

    /// Every entry, in dataset order.
    pub fn all(&self) -> Vec<usize> {
        (0..self.entries.len()).collect()
    }

    /// Entries in `category`, in dataset order.
    pub fn category_pool(&self, category: &str) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.category == category)
            .map(|(i, _)| i)
            .collect()
    }

    /// Entries in `category`, ordered ascending by number.
    /// The sort is stable, so duplicate numbers keep dataset order.
    pub fn sequential_pool(&self, category: &str) -> Vec<usize> {
        let mut pool = self.category_pool(category);
        pool.sort_by(|&a, &b| self.entries[a].number.cmp(&self.entries[b].number));
        pool
    }

    /// Find the entry whose number matches `query` after trimming both sides.
    ///
    /// Blank queries match nothing. Duplicate numbers resolve to the first
    /// entry in dataset order.
    pub fn lookup_by_number(&self, query: &str) -> Option<usize> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .position(|e| e.number.as_str() == query)
    }

    /// Smallest and largest numeric entry numbers, for the "available" hint.
    pub fn number_range(&self) -> Option<(i64, i64)> {
        let mut numbers = self
            .entries
            .iter()
            .filter_map(|e| e.number.numeric())
            .map(|n| n as i64);
        let first = numbers.next()?;
        Some(numbers.fold((first, first), |(lo, hi), n| (lo.min(n), hi.max(n))))
    }
}

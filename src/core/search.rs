//! Keyword search over situations and resolutions.

use crate::core::dataset::{Dataset, Entry};

/// Which text fields a keyword search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldScope {
    Situation,
    Resolution,
    #[default]
    Both,
}

impl FieldScope {
    pub fn label(&self) -> &'static str {
        match self {
            FieldScope::Situation => "Situation",
            FieldScope::Resolution => "Resolution",
            FieldScope::Both => "Situation + Resolution",
        }
    }

    /// Cycle order used by the interactive surface.
    pub fn next(&self) -> Self {
        match self {
            FieldScope::Both => FieldScope::Situation,
            FieldScope::Situation => FieldScope::Resolution,
            FieldScope::Resolution => FieldScope::Both,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryScope {
    #[default]
    All,
    Only(String),
}

impl CategoryScope {
    pub fn admits(&self, entry: &Entry) -> bool {
        match self {
            CategoryScope::All => true,
            CategoryScope::Only(c) => entry.category == *c,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryScope::All => "All categories",
            CategoryScope::Only(c) => c,
        }
    }

    /// All, then each of `categories` in order, then back to All.
    pub fn next(&self, categories: &[String]) -> Self {
        let following = match self {
            CategoryScope::All => categories.first(),
            CategoryScope::Only(c) => categories
                .iter()
                .position(|x| x == c)
                .and_then(|i| categories.get(i + 1)),
        };
        following
            .map(|c| CategoryScope::Only(c.clone()))
            .unwrap_or_default()
    }
}

/// Lowercase `text` one char at a time.
///
/// Search and highlighting both fold through here so a match the search
/// reports is always one the card can mark.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive substring search, returning matches in dataset order.
///
/// A blank query matches nothing.
pub fn keyword_search(
    dataset: &Dataset,
    query: &str,
    field_scope: FieldScope,
    category_scope: &CategoryScope,
) -> Vec<usize> {
    let needle = fold_case(query.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    dataset
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| category_scope.admits(e))
        .filter(|(_, e)| {
            let in_situation = || fold_case(&e.situation).contains(&needle);
            let in_resolution = || fold_case(&e.resolution).contains(&needle);
            match field_scope {
                FieldScope::Situation => in_situation(),
                FieldScope::Resolution => in_resolution(),
                FieldScope::Both => in_situation() || in_resolution(),
            }
        })
        .map(|(i, _)| i)
        .collect()
}

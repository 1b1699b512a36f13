//! # Errors and Notices
//!
//! Two very different kinds of "something went wrong" live here:
//!
//! - [`DatasetError`] and [`ConfigError`] are real errors. A dataset that
//!   cannot be loaded is fatal to startup.
//! - [`Notice`] is not an error at all. A number that doesn't exist or a
//!   category with no entries is an ordinary outcome of user input; the
//!   reducer records a notice and the selection falls back to "nothing".

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load the dataset. Fatal: there is nothing to study without it.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error reading dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported dataset format: {0:?} (expected xlsx, xls, xlsb, ods or csv)")]
    UnsupportedFormat(String),
    #[error("workbook has no sheets")]
    NoSheets,
    #[error("sheet not found: {0}")]
    SheetNotFound(String),
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("no category column found (looked for Section, Stroke)")]
    NoCategoryColumn,
    #[error("dataset has no usable rows")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A recoverable, user-visible warning produced by a navigation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Lookup by number found nothing.
    NotFound { query: String },
    /// Keyword search found nothing.
    NoMatches { query: String },
    /// The chosen category has no entries.
    EmptyPool { category: String },
    /// A category mode was asked to advance before a category was chosen.
    NoCategory,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NotFound { query } => write!(f, "No situation found with number: {query}"),
            Notice::NoMatches { query } => write!(f, "No situations match \"{query}\""),
            Notice::EmptyPool { category } => write!(f, "No situations found for {category}"),
            Notice::NoCategory => write!(f, "Pick a category to start"),
        }
    }
}

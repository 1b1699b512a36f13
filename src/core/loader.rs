//! # Data Loader
//!
//! Reads the situations spreadsheet into a [`Dataset`]. Runs once at startup.
//!
//! Spreadsheets (xlsx, xlsm, xlsb, xls, ods) go through `calamine`; plain
//! CSV goes through the `csv` crate. Both are reduced to a grid of trimmed
//! strings first, so header detection and row validation are shared.

use calamine::{Data, Reader, open_workbook_auto};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::dataset::{Dataset, Entry, EntryNumber};
use crate::core::error::DatasetError;

pub const NUMBER_COLUMN: &str = "Number";
pub const SITUATION_COLUMN: &str = "Situation";
pub const RESOLUTION_COLUMN: &str = "Recommended resolution";
pub const RULE_COLUMN: &str = "Applicable Rule";

/// Category columns tried in order when none is configured.
pub const CATEGORY_CANDIDATES: [&str; 2] = ["Section", "Stroke"];

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Category column header. `None` auto-detects from [`CATEGORY_CANDIDATES`].
    pub category_column: Option<String>,
    /// Worksheet name. `None` uses the first sheet. Ignored for CSV.
    pub sheet: Option<String>,
}

pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset, DatasetError> {
    if let Err(e) = fs::metadata(path) {
        return Err(match e.kind() {
            io::ErrorKind::NotFound => DatasetError::NotFound(path.to_path_buf()),
            _ => DatasetError::Io(e),
        });
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let grid = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path, options.sheet.as_deref())?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string())),
    };

    let dataset = dataset_from_grid(grid, options)?;
    info!(
        "Loaded {} situations from {} ({} categories by {})",
        dataset.len(),
        path.display(),
        dataset.categories().len(),
        dataset.category_label()
    );
    Ok(dataset)
}

fn read_csv(path: &Path) -> Result<Vec<Vec<String>>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(|s| s.trim().to_string()).collect());
    }
    Ok(grid)
}

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>, DatasetError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| DatasetError::SheetNotFound(name.to_string()))?,
        None => sheet_names.first().cloned().ok_or(DatasetError::NoSheets)?,
    };
    debug!("Reading sheet {:?} from {}", sheet_name, path.display());

    let range = workbook.worksheet_range(&sheet_name)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            // Whole numbers print without ".0" so "17" finds situation 17
            if f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => {
            if *b {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        Data::Error(e) => format!("#ERROR: {:?}", e),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Column positions resolved from the header row.
struct Columns {
    number: usize,
    category: usize,
    situation: usize,
    resolution: usize,
    rule: usize,
    category_label: String,
}

impl Columns {
    fn from_header(header: &[String], options: &LoadOptions) -> Result<Self, DatasetError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
        };
        let require = |name: &str| find(name).ok_or_else(|| DatasetError::MissingColumn(name.to_string()));

        let (category, category_label) = match &options.category_column {
            Some(name) => (require(name)?, name.trim().to_string()),
            None => CATEGORY_CANDIDATES
                .iter()
                .find_map(|name| find(name).map(|i| (i, name.to_string())))
                .ok_or(DatasetError::NoCategoryColumn)?,
        };

        Ok(Self {
            number: require(NUMBER_COLUMN)?,
            situation: require(SITUATION_COLUMN)?,
            resolution: require(RESOLUTION_COLUMN)?,
            rule: require(RULE_COLUMN)?,
            category,
            category_label,
        })
    }
}

/// Turn a grid of cells (header first) into a dataset.
pub fn dataset_from_grid(grid: Vec<Vec<String>>, options: &LoadOptions) -> Result<Dataset, DatasetError> {
    let mut rows = grid.into_iter();
    let header = rows.next().ok_or(DatasetError::Empty)?;
    let columns = Columns::from_header(&header, options)?;

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = 0usize;

    // Row numbers in log messages are 1-based spreadsheet rows (header is row 1)
    for (offset, row) in rows.enumerate() {
        let line = offset + 2;
        let cell = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("");

        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        if cell(columns.situation).is_empty() {
            debug!("Row {}: no situation, skipped", line);
            skipped += 1;
            continue;
        }
        if cell(columns.number).is_empty() {
            warn!("Row {}: situation without a number, skipped", line);
            skipped += 1;
            continue;
        }

        let number = EntryNumber::new(cell(columns.number));
        if !seen.insert(number.clone()) {
            warn!("Row {}: duplicate situation number {}", line, number);
        }

        entries.push(Entry {
            number,
            category: cell(columns.category).to_string(),
            situation: cell(columns.situation).to_string(),
            resolution: cell(columns.resolution).to_string(),
            rule: cell(columns.rule).to_string(),
        });
    }

    if skipped > 0 {
        info!("Skipped {} incomplete rows", skipped);
    }
    if entries.is_empty() {
        return Err(DatasetError::Empty);
    }

    Ok(Dataset::new(entries, columns.category_label))
}

/// Default dataset file, relative to the working directory.
pub fn default_dataset_path() -> PathBuf {
    PathBuf::from("Situations-n-Resolutions-with-sections.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn header() -> Vec<String> {
        row(&[" Number", "Section ", "Situation", "Recommended resolution", " Applicable Rule "])
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let grid = vec![
            header(),
            row(&["1", "Starts", "False start", "DQ", "101.1"]),
        ];
        let ds = dataset_from_grid(grid, &LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.category_label(), "Section");
        assert_eq!(ds.entries()[0].rule, "101.1");
    }

    #[test]
    fn test_detects_stroke_column() {
        let grid = vec![
            row(&["Number", "Stroke", "Situation", "Recommended resolution", "Applicable Rule"]),
            row(&["5", "Butterfly", "One-hand touch", "DQ", "101.3.4"]),
        ];
        let ds = dataset_from_grid(grid, &LoadOptions::default()).unwrap();
        assert_eq!(ds.category_label(), "Stroke");
        assert_eq!(ds.categories(), ["Butterfly"]);
    }

    #[test]
    fn test_configured_category_column() {
        let grid = vec![
            row(&["Number", "Section", "Topic", "Situation", "Recommended resolution", "Applicable Rule"]),
            row(&["5", "Strokes", "Butterfly", "One-hand touch", "DQ", "101.3.4"]),
        ];
        let options = LoadOptions {
            category_column: Some("Topic".to_string()),
            sheet: None,
        };
        let ds = dataset_from_grid(grid, &options).unwrap();
        assert_eq!(ds.entries()[0].category, "Butterfly");
    }

    #[test]
    fn test_missing_columns() {
        let grid = vec![row(&["Number", "Section", "Situation", "Applicable Rule"])];
        let err = dataset_from_grid(grid, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(c) if c == RESOLUTION_COLUMN));

        let grid = vec![row(&["Number", "Situation", "Recommended resolution", "Applicable Rule"])];
        let err = dataset_from_grid(grid, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DatasetError::NoCategoryColumn));
    }

    #[test]
    fn test_skips_incomplete_rows() {
        let grid = vec![
            header(),
            row(&["1", "Starts", "False start", "DQ", "101.1"]),
            row(&["", "", "", "", ""]),
            row(&["2", "Starts", "", "orphan", ""]),
            row(&["", "Starts", "No number", "DQ", ""]),
            row(&["3", "Turns"]),
            row(&["4", "Turns", "Short row"]),
        ];
        let ds = dataset_from_grid(grid, &LoadOptions::default()).unwrap();
        let numbers: Vec<&str> = ds.entries().iter().map(|e| e.number.as_str()).collect();
        assert_eq!(numbers, ["1", "4"]);
        assert_eq!(ds.entries()[1].resolution, "");
    }

    #[test]
    fn test_keeps_duplicate_numbers_in_order() {
        let grid = vec![
            header(),
            row(&["7", "Starts", "first", "a", "r"]),
            row(&["7", "Turns", "second", "b", "r"]),
        ];
        let ds = dataset_from_grid(grid, &LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.lookup_by_number("7"), Some(0));
    }

    #[test]
    fn test_empty_grids() {
        let err = dataset_from_grid(Vec::new(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));

        let err = dataset_from_grid(vec![header()], &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_cell_to_string_whole_floats() {
        assert_eq!(cell_to_string(&Data::Float(17.0)), "17");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Int(3)), "3");
        assert_eq!(cell_to_string(&Data::String("  text ".to_string())), "text");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/situations.xlsx"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
    }
}

//! Display-ready row models for the three data tables.

use serde::Serialize;

use super::field::{self, FieldValue, NOT_FOUND};

/// One column of the metadata table.
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub is_date: bool,
    pub job_numbers: bool,
}

const fn col(key: &'static str, label: &'static str) -> Column {
    Column {
        key,
        label,
        is_date: false,
        job_numbers: false,
    }
}

/// The metadata columns shown on the Display tab, after the leading
/// Document Symbol column.
pub const DATA_COLUMNS: &[Column] = &[
    col("agendas", "Agenda"),
    col("sessions", "Session"),
    col("distribution", "Distribution"),
    col("area", "Area"),
    col("subjects", "Subjects"),
    Column {
        key: "job_numbers",
        label: "Job Number",
        is_date: false,
        job_numbers: true,
    },
    col("title_en", "Title"),
    Column {
        key: "publication_date",
        label: "Publication Date",
        is_date: true,
        job_numbers: false,
    },
    Column {
        key: "release_dates",
        label: "Release Date",
        is_date: true,
        job_numbers: false,
    },
];

/// Header row for the Display tab table, used by the view and the exporters.
pub fn display_header() -> Vec<String> {
    std::iter::once("Document Symbol".to_string())
        .chain(DATA_COLUMNS.iter().map(|c| c.label.to_string()))
        .collect()
}

/// Result of a lookup for one document symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayRow {
    /// The backend returned a record; `fields` runs parallel to `DATA_COLUMNS`.
    Found {
        symbol: String,
        fields: Vec<FieldValue>,
    },
    /// The lookup ran but returned no data for this symbol.
    NotFound { symbol: String },
    /// The element for this symbol was structurally malformed.
    ApiError { symbol: String },
}

impl DisplayRow {
    /// Renders the row as display strings, one per table column.
    pub fn cells(&self) -> Vec<String> {
        match self {
            DisplayRow::Found { symbol, fields } => {
                let mut cells = Vec::with_capacity(DATA_COLUMNS.len() + 1);
                cells.push(symbol.clone());
                for (column, value) in DATA_COLUMNS.iter().zip(fields) {
                    if column.job_numbers {
                        cells.push(field::format_job_numbers(value));
                    } else {
                        cells.push(field::format(value, column.is_date));
                    }
                }
                cells
            }
            DisplayRow::NotFound { symbol } => sentinel_row(symbol, NOT_FOUND),
            DisplayRow::ApiError { symbol } => sentinel_row(symbol, "API Error"),
        }
    }
}

fn sentinel_row(symbol: &str, sentinel: &str) -> Vec<String> {
    std::iter::once(symbol.to_string())
        .chain(DATA_COLUMNS.iter().map(|_| sentinel.to_string()))
        .collect()
}

/// One create/update outcome: the symbol and the backend's result text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    pub docsymbol: String,
    pub text: String,
}

impl ActionResult {
    pub fn cells(&self) -> Vec<String> {
        vec![self.docsymbol.clone(), self.text.clone()]
    }

    pub fn header() -> Vec<String> {
        vec!["Document Symbol".to_string(), "Result".to_string()]
    }
}

/// One file-send outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileResult {
    pub filename: String,
    pub docsymbol: String,
    pub language: String,
    pub jobnumber: String,
    pub result: String,
}

impl FileResult {
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.filename.clone(),
            self.docsymbol.clone(),
            self.language.clone(),
            self.jobnumber.clone(),
            self.result.clone(),
        ]
    }

    pub fn header() -> Vec<String> {
        ["Filename", "Document Symbol", "Language", "Job Number", "Result"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

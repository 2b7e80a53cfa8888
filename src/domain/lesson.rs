// ==========================================
// Lesson Audit - Lesson domain model
// ==========================================
// RawTable / RawLessonRow: parser output, untyped cells
// LessonRecord: normalized record, read-only for every check
// ==========================================

use crate::domain::types::{GroupingField, CLOCK_FORMAT, HEADER_ROW_OFFSET};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RawLessonRow - one source row
// ==========================================
// Lifetime: parser -> normalizer only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLessonRow {
    pub row_number: usize,              // row number in the source sheet (header = 1)
    pub cells: HashMap<String, String>, // header -> cell text, untrimmed
    #[serde(default)]
    pub numbers: HashMap<String, f64>, // header -> native numeric value (spreadsheet cells only)
}

impl RawLessonRow {
    /// Cell text as given, or None when the column is missing or the cell is blank
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Native numeric value of a spreadsheet cell; CSV rows never carry one
    pub fn number(&self, column: &str) -> Option<f64> {
        self.numbers.get(column).copied()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

// ==========================================
// RawTable - header + rows of one sheet
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawLessonRow>,
}

impl RawTable {
    /// Header names are trimmed; cell values are not.
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row positioned right after the previous one.
    pub fn push_row<S: AsRef<str>>(&mut self, values: &[S]) {
        let row_number = self.rows.len() + HEADER_ROW_OFFSET;
        self.push_row_at(row_number, values);
    }

    /// Append a row with an explicit source row number (parsers skipping blank rows).
    pub fn push_row_at<S: AsRef<str>>(&mut self, row_number: usize, values: &[S]) {
        let cells = self
            .headers
            .iter()
            .zip(values.iter())
            .map(|(h, v)| (h.clone(), v.as_ref().to_string()))
            .collect();
        self.rows.push(RawLessonRow {
            row_number,
            cells,
            numbers: HashMap::new(),
        });
    }

    /// Like `push_row_at`, plus the numeric value of each cell that had one
    pub fn push_row_with_numbers<S: AsRef<str>>(
        &mut self,
        row_number: usize,
        values: &[S],
        numbers: &[Option<f64>],
    ) {
        self.push_row_at(row_number, values);
        let numbers: HashMap<String, f64> = self
            .headers
            .iter()
            .zip(numbers.iter())
            .filter_map(|(h, n)| n.map(|n| (h.clone(), n)))
            .collect();
        if let Some(row) = self.rows.last_mut() {
            row.numbers = numbers;
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// First header equal to `name` ignoring ASCII case
    pub fn find_column_ci(&self, name: &str) -> Option<&str> {
        let wanted = name.trim();
        self.headers
            .iter()
            .find(|h| h.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// LessonRecord - normalized lesson
// ==========================================
// Built once per run by RecordNormalizer, never mutated afterwards.
// Invariant: end_instant >= start_instant whenever both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    // ===== Identity =====
    pub row_number: usize, // stable identity used by every report

    // ===== Source text (as originally given) =====
    pub raw_date: String,
    pub raw_start: String,
    pub raw_end: String,
    pub raw_declared: String,

    // ===== Parsed date / time =====
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub start_instant: Option<NaiveDateTime>,
    pub end_instant: Option<NaiveDateTime>, // overnight rollover already applied

    // ===== Keys =====
    pub teacher_key: String,       // trimmed, upper-cased; may be empty
    pub class_key: Option<String>, // None when the input has no class column
    pub location_label: String,    // verbatim unless location normalization is on
    pub subject: Option<String>,

    // ===== Durations (hours, 2 decimals) =====
    pub computed_hours: Option<f64>,
    pub declared_hours: Option<f64>,
}

impl LessonRecord {
    /// (start, end) when both instants are known
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.start_instant.zip(self.end_instant)
    }

    /// Start time as HH:MM, empty when unparseable
    pub fn start_clock(&self) -> String {
        format_clock(self.start_time)
    }

    /// End time as HH:MM, empty when unparseable
    pub fn end_clock(&self) -> String {
        format_clock(self.end_time)
    }

    /// Value of the overlap grouping key, if any
    pub fn grouping_value(&self, field: GroupingField) -> Option<&str> {
        match field {
            GroupingField::Teacher => Some(self.teacher_key.as_str()),
            GroupingField::Class => self.class_key.as_deref(),
        }
    }
}

pub fn format_clock(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format(CLOCK_FORMAT).to_string())
        .unwrap_or_default()
}

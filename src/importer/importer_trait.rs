// ==========================================
// Lesson Audit - Importer traits
// ==========================================
// Interfaces only, implementations live next door
// ==========================================

use crate::domain::lesson::RawTable;
use crate::importer::error::AuditResult;
use chrono::NaiveDate;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// Implementors: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// Parse a file into its header row and data rows
    ///
    /// # Returns
    /// - Ok(RawTable): trimmed headers, untrimmed cells, fully blank rows skipped
    /// - Err: missing file, wrong format, unreadable content
    fn parse_to_raw_table(&self, file_path: &Path) -> AuditResult<RawTable>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// Implementor: DataCleaner
// Every method is total: bad input gives None, never an error.
pub trait DataCleaner: Send + Sync {
    /// TRIM, optionally UPPER
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// Blank / whitespace -> None, otherwise trimmed
    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// Day-first calendar date, time-of-day discarded
    fn parse_date_day_first(&self, value: &str) -> Option<NaiveDate>;

    /// Plain decimal number rounded to 2 places
    fn parse_decimal(&self, value: &str) -> Option<f64>;
}

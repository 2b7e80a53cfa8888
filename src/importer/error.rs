// ==========================================
// Lesson Audit - Error types
// ==========================================
// thiserror derive; row-level problems never show up here,
// they degrade to absent values inside LessonRecord
// ==========================================

use thiserror::Error;

/// Audit error type
#[derive(Error, Debug)]
pub enum AuditError {
    // ===== File errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .csv/.xlsx/.xlsm/.xls/.ods)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    #[error("worksheet not found: {0}")]
    SheetNotFound(String),

    #[error("workbook has no worksheet or no header row")]
    EmptyWorkbook,

    // ===== Input validation (fatal, whole batch) =====
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    // ===== Configuration =====
    #[error("config read failed ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    #[error("invalid config value (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== Report output =====
    #[error("report write failed: {0}")]
    ReportWriteError(String),

    // ===== Generic =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for AuditError {
    fn from(err: csv::Error) -> Self {
        AuditError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for AuditError {
    fn from(err: calamine::Error) -> Self {
        AuditError::ExcelParseError(err.to_string())
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::ReportWriteError(err.to_string())
    }
}

/// Result alias
pub type AuditResult<T> = Result<T, AuditError>;

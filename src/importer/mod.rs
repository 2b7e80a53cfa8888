// ==========================================
// Lesson Audit - Import layer
// ==========================================
// File -> RawTable -> LessonRecord
// Supports: Excel / ODS / CSV
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod record_normalizer;
pub mod time_parser;

// Implementations
pub use data_cleaner::{round2, DataCleaner as DataCleanerImpl};
pub use error::{AuditError, AuditResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use record_normalizer::{apply_overnight_rollover, RecordNormalizer};
pub use time_parser::TimeParser;

// Traits
pub use importer_trait::{DataCleaner, FileParser};

// ==========================================
// Lesson Audit - Domain layer
// ==========================================
// Records, report rows, shared types
// No I/O, no check logic
// ==========================================

pub mod lesson;
pub mod report;
pub mod types;

pub use lesson::{format_clock, LessonRecord, RawLessonRow, RawTable};
pub use report::{AuditReport, AuditSummary, DuplicatePair, HourMismatch, OverlapPair};
pub use types::{GroupingField, CLOCK_FORMAT, DATE_FORMAT, HEADER_ROW_OFFSET};

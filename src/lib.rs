// ==========================================
// Lesson Audit - core library
// ==========================================
// Validates lesson attendance registers:
// declared vs computed hours, exact duplicates,
// teacher / class schedule overlaps
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain - records, report rows, shared types
pub mod domain;

// Import - file parsing and record normalization
pub mod importer;

// Engine - audit checks and orchestration
pub mod engine;

// Report - CSV / JSON output
pub mod report;

// Configuration
pub mod config;

// Logging
pub mod logging;

// Timing guards
pub mod perf;

// ==========================================
// Re-exports
// ==========================================

pub use config::{AuditConfig, ColumnLayout};

pub use domain::{
    AuditReport, AuditSummary, DuplicatePair, GroupingField, HourMismatch, LessonRecord,
    OverlapPair, RawTable,
};

pub use engine::{
    AuditCheck, AuditOrchestrator, DuplicateDetector, HourConsistencyChecker, OverlapDetector,
};

pub use importer::{AuditError, AuditResult, UniversalFileParser};

pub use report::ReportAssembler;

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Lesson Audit";

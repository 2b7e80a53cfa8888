// ==========================================
// Lesson Audit - Check engine
// ==========================================
// Checks read normalized records only; they never parse, never write files
// ==========================================

pub mod check_trait;
pub mod duplicate_detector;
pub mod hour_consistency;
pub mod orchestrator;
pub mod overlap_detector;

#[cfg(test)]
pub(crate) mod test_support;

pub use check_trait::AuditCheck;
pub use duplicate_detector::{DuplicateDetector, DuplicateKey};
pub use hour_consistency::HourConsistencyChecker;
pub use orchestrator::AuditOrchestrator;
pub use overlap_detector::OverlapDetector;

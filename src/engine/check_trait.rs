// ==========================================
// Lesson Audit - Check trait
// ==========================================
// Every check reads the same immutable record slice and returns
// a fresh, deterministically ordered result table.
// Checks never depend on each other's findings.
// ==========================================

use crate::domain::lesson::LessonRecord;

pub trait AuditCheck {
    /// One row of the result table
    type Finding;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Run the check over a whole batch
    fn run(&self, records: &[LessonRecord]) -> Vec<Self::Finding>;
}

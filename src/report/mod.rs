// ==========================================
// Lesson Audit - Report output
// ==========================================

pub mod assembler;

pub use assembler::{
    ReportAssembler, ReportTable, CLASS_OVERLAPS_FILE, DUPLICATE_PAIRS_FILE,
    HOUR_MISMATCHES_FILE, SUMMARY_FILE, TEACHER_OVERLAPS_FILE,
};

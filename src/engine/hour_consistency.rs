// ==========================================
// Lesson Audit - Hour consistency check
// ==========================================
// Mismatch: |computed - declared| > tolerance (hours)
// Records missing either value are skipped silently
// ==========================================

use crate::domain::lesson::LessonRecord;
use crate::domain::report::HourMismatch;
use crate::engine::check_trait::AuditCheck;
use crate::importer::data_cleaner::round2;

pub struct HourConsistencyChecker {
    tolerance_hours: f64,
}

impl HourConsistencyChecker {
    /// Negative tolerances are treated as zero
    pub fn new(tolerance_hours: f64) -> Self {
        Self {
            tolerance_hours: tolerance_hours.max(0.0),
        }
    }

    pub fn tolerance_hours(&self) -> f64 {
        self.tolerance_hours
    }

    /// Mismatch iff |round2(computed - declared)| > tolerance.
    ///
    /// Both sides already carry 2 decimals, so the raw difference only adds float
    /// noise: 2.02 - 2.0 is 0.020000000000000018, which would exceed a 0.02 tolerance.
    /// The reported `difference` is the same rounded value.
    fn check_record(&self, record: &LessonRecord) -> Option<HourMismatch> {
        let (computed, declared) = record.computed_hours.zip(record.declared_hours)?;

        let difference = round2(computed - declared);
        if difference.abs() <= self.tolerance_hours {
            return None;
        }

        Some(HourMismatch {
            row_number: record.row_number,
            date: record.raw_date.clone(),
            start: record.raw_start.clone(),
            end: record.raw_end.clone(),
            declared_hours: declared,
            computed_hours: computed,
            difference,
            teacher_key: record.teacher_key.clone(),
        })
    }
}

impl AuditCheck for HourConsistencyChecker {
    type Finding = HourMismatch;

    fn name(&self) -> &'static str {
        "hour_consistency"
    }

    fn run(&self, records: &[LessonRecord]) -> Vec<HourMismatch> {
        records.iter().filter_map(|r| self.check_record(r)).collect()
    }
}

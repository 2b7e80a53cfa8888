// ==========================================
// Lesson Audit - Report model
// ==========================================
// One row type per result table + run summary
// Row order is part of the contract: identical input -> identical tables
// ==========================================

use crate::domain::types::GroupingField;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// HourMismatch - declared vs computed duration
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourMismatch {
    pub row_number: usize,
    pub date: String,  // as given
    pub start: String, // as given
    pub end: String,   // as given
    pub declared_hours: f64,
    pub computed_hours: f64,
    pub difference: f64, // computed - declared, 2 decimals
    pub teacher_key: String,
}

// ==========================================
// DuplicatePair - two rows sharing the duplicate key
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePair {
    pub row_a: usize, // row_a < row_b
    pub row_b: usize,
    pub date: Option<NaiveDate>,
    pub teacher_key: String,
    pub start: String, // HH:MM or empty
    pub end: String,   // HH:MM or empty
    pub location: String,
    pub subject_a: Option<String>,
    pub subject_b: Option<String>,
}

// ==========================================
// OverlapPair - two intersecting intervals in one (date, key) partition
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapPair {
    pub grouping: GroupingField,
    pub date: NaiveDate,
    pub key: String,
    pub row_a: usize, // earlier-starting interval
    pub row_b: usize,
    pub start_a: String,
    pub end_a: String,
    pub start_b: String,
    pub end_b: String,
}

// ==========================================
// AuditSummary - counts per check
// ==========================================
// Zero means "nothing found", which includes "nothing applicable".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total_records: usize,
    pub hour_mismatches: usize,
    pub duplicate_pairs: usize,
    pub teacher_overlaps: usize,
    pub class_overlaps: usize,
    pub records_without_duration: usize, // start or end instant missing
    pub records_without_date: usize,
}

// ==========================================
// AuditReport - full output of one run
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub run_id: String,
    pub source: Option<String>,
    pub tolerance_hours: f64,
    pub summary: AuditSummary,
    pub hour_mismatches: Vec<HourMismatch>,
    pub duplicate_pairs: Vec<DuplicatePair>,
    pub teacher_overlaps: Vec<OverlapPair>,
    pub class_overlaps: Vec<OverlapPair>,
}

impl AuditReport {
    pub fn has_findings(&self) -> bool {
        !(self.hour_mismatches.is_empty()
            && self.duplicate_pairs.is_empty()
            && self.teacher_overlaps.is_empty()
            && self.class_overlaps.is_empty())
    }
}

// ==========================================
// Lesson Audit - Duplicate detector
// ==========================================
// Key: (date, start HH:MM, end HH:MM, location, teacher)
// Every unordered pair inside a group is reported: k members -> k(k-1)/2 rows
// Order: groups by ascending key, pairs by row number
// ==========================================

use crate::domain::lesson::LessonRecord;
use crate::domain::report::DuplicatePair;
use crate::engine::check_trait::AuditCheck;
use chrono::NaiveDate;
use std::collections::BTreeMap;

// ==========================================
// DuplicateKey - structured composite key
// ==========================================
// Compared field by field, so no delimiter can make two keys collide.
// An absent date sorts before every real date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DuplicateKey {
    pub date: Option<NaiveDate>,
    pub start: String,
    pub end: String,
    pub location: String,
    pub teacher: String,
}

impl DuplicateKey {
    pub fn of(record: &LessonRecord) -> Self {
        Self {
            date: record.date,
            start: record.start_clock(),
            end: record.end_clock(),
            location: record.location_label.clone(),
            teacher: record.teacher_key.clone(),
        }
    }
}

pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Records grouped by key, groups of one dropped
    pub fn groups<'a>(
        &self,
        records: &'a [LessonRecord],
    ) -> BTreeMap<DuplicateKey, Vec<&'a LessonRecord>> {
        let mut groups: BTreeMap<DuplicateKey, Vec<&LessonRecord>> = BTreeMap::new();
        for record in records {
            groups.entry(DuplicateKey::of(record)).or_default().push(record);
        }
        groups.retain(|_, members| members.len() > 1);
        for members in groups.values_mut() {
            members.sort_by_key(|r| r.row_number);
        }
        groups
    }
}

impl AuditCheck for DuplicateDetector {
    type Finding = DuplicatePair;

    fn name(&self) -> &'static str {
        "duplicates"
    }

    fn run(&self, records: &[LessonRecord]) -> Vec<DuplicatePair> {
        let mut pairs = Vec::new();

        for (key, members) in self.groups(records) {
            for (i, first) in members.iter().enumerate() {
                for second in &members[i + 1..] {
                    pairs.push(DuplicatePair {
                        row_a: first.row_number,
                        row_b: second.row_number,
                        date: key.date,
                        teacher_key: key.teacher.clone(),
                        start: key.start.clone(),
                        end: key.end.clone(),
                        location: key.location.clone(),
                        subject_a: first.subject.clone(),
                        subject_b: second.subject.clone(),
                    });
                }
            }
        }

        pairs
    }
}

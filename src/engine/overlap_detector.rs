// ==========================================
// Lesson Audit - Overlap detector
// ==========================================
// Partition: (date, key) where key = teacher or class
// Intervals are half-open: [start, end)
// A pair overlaps iff the later start is strictly before the earlier end
// ==========================================

use crate::domain::lesson::LessonRecord;
use crate::domain::report::OverlapPair;
use crate::domain::types::GroupingField;
use crate::engine::check_trait::AuditCheck;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct OverlapDetector {
    field: GroupingField,
}

impl OverlapDetector {
    pub fn new(field: GroupingField) -> Self {
        Self { field }
    }

    pub fn by_teacher() -> Self {
        Self::new(GroupingField::Teacher)
    }

    pub fn by_class() -> Self {
        Self::new(GroupingField::Class)
    }

    pub fn field(&self) -> GroupingField {
        self.field
    }

    /// Records with a full interval and a non-empty key, partitioned and sorted
    /// by (start, row number) inside each partition
    fn partitions<'a>(
        &self,
        records: &'a [LessonRecord],
    ) -> BTreeMap<(NaiveDate, String), Vec<&'a LessonRecord>> {
        let mut partitions: BTreeMap<(NaiveDate, String), Vec<&LessonRecord>> = BTreeMap::new();

        for record in records {
            let (Some(date), Some(_)) = (record.date, record.interval()) else {
                continue;
            };
            let key = match record.grouping_value(self.field) {
                Some(k) if !k.is_empty() => k,
                _ => continue,
            };
            partitions
                .entry((date, key.to_string()))
                .or_default()
                .push(record);
        }

        for members in partitions.values_mut() {
            members.sort_by_key(|r| (r.start_instant, r.row_number));
        }
        partitions
    }
}

impl AuditCheck for OverlapDetector {
    type Finding = OverlapPair;

    fn name(&self) -> &'static str {
        match self.field {
            GroupingField::Teacher => "teacher_overlaps",
            GroupingField::Class => "class_overlaps",
        }
    }

    fn run(&self, records: &[LessonRecord]) -> Vec<OverlapPair> {
        let mut pairs = Vec::new();

        for ((date, key), members) in self.partitions(records) {
            for (i, first) in members.iter().enumerate() {
                let Some((_, first_end)) = first.interval() else {
                    continue;
                };
                for second in &members[i + 1..] {
                    let Some((second_start, _)) = second.interval() else {
                        continue;
                    };
                    // sorted by start: nothing further can overlap `first`
                    if second_start >= first_end {
                        break;
                    }
                    pairs.push(OverlapPair {
                        grouping: self.field,
                        date,
                        key: key.clone(),
                        row_a: first.row_number,
                        row_b: second.row_number,
                        start_a: first.start_clock(),
                        end_a: first.end_clock(),
                        start_b: second.start_clock(),
                        end_b: second.end_clock(),
                    });
                }
            }
        }

        pairs
    }
}

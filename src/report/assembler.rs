// ==========================================
// Lesson Audit - Report assembler
// ==========================================
// One CSV per result table + summary.json in the output directory
// Tables are written even when empty (header only)
// ==========================================

use crate::domain::report::{AuditReport, DuplicatePair, HourMismatch, OverlapPair};
use crate::domain::types::DATE_FORMAT;
use crate::importer::error::{AuditError, AuditResult};
use chrono::NaiveDate;
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const HOUR_MISMATCHES_FILE: &str = "hour_mismatches.csv";
pub const DUPLICATE_PAIRS_FILE: &str = "duplicate_pairs.csv";
pub const TEACHER_OVERLAPS_FILE: &str = "teacher_overlaps.csv";
pub const CLASS_OVERLAPS_FILE: &str = "class_overlaps.csv";
pub const SUMMARY_FILE: &str = "summary.json";

// ==========================================
// ReportTable - one row type of a result table
// ==========================================
pub trait ReportTable {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn format_hours(value: f64) -> String {
    format!("{:.2}", value)
}

impl ReportTable for HourMismatch {
    fn headers() -> &'static [&'static str] {
        &[
            "row",
            "date",
            "start",
            "end",
            "declared_hours",
            "computed_hours",
            "difference",
            "teacher",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.row_number.to_string(),
            self.date.clone(),
            self.start.clone(),
            self.end.clone(),
            format_hours(self.declared_hours),
            format_hours(self.computed_hours),
            format_hours(self.difference),
            self.teacher_key.clone(),
        ]
    }
}

impl ReportTable for DuplicatePair {
    fn headers() -> &'static [&'static str] {
        &[
            "row_a",
            "row_b",
            "date",
            "teacher",
            "start",
            "end",
            "location",
            "subject_a",
            "subject_b",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.row_a.to_string(),
            self.row_b.to_string(),
            format_date(self.date),
            self.teacher_key.clone(),
            self.start.clone(),
            self.end.clone(),
            self.location.clone(),
            self.subject_a.clone().unwrap_or_default(),
            self.subject_b.clone().unwrap_or_default(),
        ]
    }
}

impl ReportTable for OverlapPair {
    fn headers() -> &'static [&'static str] {
        &[
            "grouping", "date", "key", "row_a", "row_b", "start_a", "end_a", "start_b", "end_b",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.grouping.to_string(),
            format_date(Some(self.date)),
            self.key.clone(),
            self.row_a.to_string(),
            self.row_b.to_string(),
            self.start_a.clone(),
            self.end_a.clone(),
            self.start_b.clone(),
            self.end_b.clone(),
        ]
    }
}

// ==========================================
// ReportAssembler
// ==========================================
pub struct ReportAssembler {
    output_dir: PathBuf,
}

impl ReportAssembler {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every table plus the summary; returns the written paths
    pub fn write(&self, report: &AuditReport) -> AuditResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            AuditError::ReportWriteError(format!("{}: {}", self.output_dir.display(), e))
        })?;

        let written = vec![
            self.write_table(HOUR_MISMATCHES_FILE, &report.hour_mismatches)?,
            self.write_table(DUPLICATE_PAIRS_FILE, &report.duplicate_pairs)?,
            self.write_table(TEACHER_OVERLAPS_FILE, &report.teacher_overlaps)?,
            self.write_table(CLASS_OVERLAPS_FILE, &report.class_overlaps)?,
            self.write_summary(report)?,
        ];

        info!(
            run_id = %report.run_id,
            dir = %self.output_dir.display(),
            files = written.len(),
            "report written"
        );
        Ok(written)
    }

    fn write_table<T: ReportTable>(&self, file_name: &str, rows: &[T]) -> AuditResult<PathBuf> {
        let path = self.output_dir.join(file_name);
        let write_err =
            |e: &dyn std::fmt::Display| AuditError::ReportWriteError(format!("{}: {}", path.display(), e));

        let mut writer = Writer::from_path(&path).map_err(|e| write_err(&e))?;
        writer.write_record(T::headers()).map_err(|e| write_err(&e))?;
        for row in rows {
            writer.write_record(row.row()).map_err(|e| write_err(&e))?;
        }
        writer.flush().map_err(|e| write_err(&e))?;

        Ok(path)
    }

    fn write_summary(&self, report: &AuditReport) -> AuditResult<PathBuf> {
        let path = self.output_dir.join(SUMMARY_FILE);
        let summary = serde_json::json!({
            "run_id": report.run_id,
            "source": report.source,
            "tolerance_hours": report.tolerance_hours,
            "summary": report.summary,
        });
        let body = serde_json::to_string_pretty(&summary)?;
        fs::write(&path, body)
            .map_err(|e| AuditError::ReportWriteError(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }
}

// ==========================================
// Lesson Audit - Audit orchestrator
// ==========================================
// Flow: parse -> normalize -> 4 independent checks -> AuditReport
// Single-threaded, one batch per run, no state kept between runs
// ==========================================

use crate::config::AuditConfig;
use crate::domain::lesson::{LessonRecord, RawTable};
use crate::domain::report::{AuditReport, AuditSummary};
use crate::engine::check_trait::AuditCheck;
use crate::engine::duplicate_detector::DuplicateDetector;
use crate::engine::hour_consistency::HourConsistencyChecker;
use crate::engine::overlap_detector::OverlapDetector;
use crate::importer::error::AuditResult;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::record_normalizer::RecordNormalizer;
use crate::perf::PerfGuard;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct AuditOrchestrator {
    config: AuditConfig,
    normalizer: RecordNormalizer,
    hours: HourConsistencyChecker,
    duplicates: DuplicateDetector,
    teacher_overlaps: OverlapDetector,
    class_overlaps: OverlapDetector,
}

impl AuditOrchestrator {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            normalizer: RecordNormalizer::new(&config),
            hours: HourConsistencyChecker::new(config.tolerance_hours()),
            duplicates: DuplicateDetector,
            teacher_overlaps: OverlapDetector::by_teacher(),
            class_overlaps: OverlapDetector::by_class(),
            config,
        }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit a spreadsheet or CSV file
    ///
    /// # Errors
    /// - FileNotFound / UnsupportedFormat / SheetNotFound: the input cannot be read
    /// - MissingColumns: a required header is absent, no results are produced
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> AuditResult<AuditReport> {
        let path = path.as_ref();
        let table = {
            let _perf = PerfGuard::new("parse_file");
            UniversalFileParser::new(self.config.sheet_name.clone()).parse(path)?
        };

        let mut report = self.run_table(&table)?;
        report.source = Some(path.display().to_string());
        Ok(report)
    }

    /// Audit an already-parsed table
    pub fn run_table(&self, table: &RawTable) -> AuditResult<AuditReport> {
        let run_id = Uuid::new_v4().to_string();
        let records = {
            let _perf = PerfGuard::new("normalize").with_rows(table.len());
            self.normalizer.normalize(table)?
        };
        Ok(self.run_records(run_id, &records))
    }

    /// Run every check over a normalized batch
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn run_records(&self, run_id: String, records: &[LessonRecord]) -> AuditReport {
        info!(
            run_id = %run_id,
            tolerance_hours = self.hours.tolerance_hours(),
            "audit started"
        );

        let hour_mismatches = run_check(&self.hours, records);
        let duplicate_pairs = run_check(&self.duplicates, records);
        let teacher_overlaps = run_check(&self.teacher_overlaps, records);
        let class_overlaps = run_check(&self.class_overlaps, records);

        let summary = AuditSummary {
            total_records: records.len(),
            hour_mismatches: hour_mismatches.len(),
            duplicate_pairs: duplicate_pairs.len(),
            teacher_overlaps: teacher_overlaps.len(),
            class_overlaps: class_overlaps.len(),
            records_without_duration: records.iter().filter(|r| r.interval().is_none()).count(),
            records_without_date: records.iter().filter(|r| r.date.is_none()).count(),
        };

        if summary.records_without_duration > 0 || summary.records_without_date > 0 {
            warn!(
                run_id = %run_id,
                without_duration = summary.records_without_duration,
                without_date = summary.records_without_date,
                "records with unparseable date or time skipped by interval checks"
            );
        }

        info!(
            run_id = %run_id,
            total = summary.total_records,
            hour_mismatches = summary.hour_mismatches,
            duplicate_pairs = summary.duplicate_pairs,
            teacher_overlaps = summary.teacher_overlaps,
            class_overlaps = summary.class_overlaps,
            "audit finished"
        );

        AuditReport {
            run_id,
            source: None,
            tolerance_hours: self.hours.tolerance_hours(),
            summary,
            hour_mismatches,
            duplicate_pairs,
            teacher_overlaps,
            class_overlaps,
        }
    }
}

fn run_check<C: AuditCheck>(check: &C, records: &[LessonRecord]) -> Vec<C::Finding> {
    let _perf = PerfGuard::new(check.name()).with_rows(records.len());
    let findings = check.run(records);
    debug!(check = check.name(), findings = findings.len(), "check done");
    findings
}

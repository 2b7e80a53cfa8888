// ==========================================
// Lesson Audit - Record normalizer
// ==========================================
// RawTable -> Vec<LessonRecord>
// Fatal: required column missing (whole batch)
// Per row: unparseable fields become None, never an error
// ==========================================

use crate::config::{AuditConfig, ColumnLayout};
use crate::domain::lesson::{LessonRecord, RawLessonRow, RawTable};
use crate::importer::data_cleaner::{round2, DataCleaner};
use crate::importer::error::{AuditError, AuditResult};
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use crate::importer::time_parser::TimeParser;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Optional columns resolved once per table
#[derive(Debug, Clone, Copy, Default)]
struct OptionalColumns<'a> {
    class_label: Option<&'a str>,
    subject: Option<&'a str>,
}

pub struct RecordNormalizer {
    columns: ColumnLayout,
    normalize_location: bool,
    cleaner: DataCleaner,
    time_parser: TimeParser,
}

impl RecordNormalizer {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            normalize_location: config.normalize_location,
            cleaner: DataCleaner,
            time_parser: TimeParser,
        }
    }

    /// Check that every required column is present (exact header match)
    ///
    /// # Returns
    /// - Err(MissingColumns): every missing name, in configured order
    pub fn validate_columns(&self, table: &RawTable) -> AuditResult<()> {
        let missing: Vec<String> = self
            .columns
            .required()
            .iter()
            .filter(|c| !table.has_column(c))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            warn!(missing = ?missing, "required columns missing");
            Err(AuditError::MissingColumns(missing))
        }
    }

    /// Normalize every row of the table, preserving input order
    pub fn normalize(&self, table: &RawTable) -> AuditResult<Vec<LessonRecord>> {
        self.validate_columns(table)?;

        let optional = OptionalColumns {
            class_label: table.find_column_ci(&self.columns.class_label),
            subject: Some(self.columns.subject.as_str()).filter(|c| table.has_column(c)),
        };
        debug!(
            rows = table.len(),
            class_column = ?optional.class_label,
            subject_column = ?optional.subject,
            "normalizing records"
        );

        Ok(table
            .rows
            .iter()
            .map(|row| self.normalize_row(row, optional))
            .collect())
    }

    fn normalize_row(&self, row: &RawLessonRow, optional: OptionalColumns<'_>) -> LessonRecord {
        let cols = &self.columns;

        let date = row
            .get(&cols.date)
            .and_then(|v| self.cleaner.parse_date_day_first(v));
        let start_time = self.parse_time(row, &cols.start_time);
        let end_time = self.parse_time(row, &cols.end_time);

        let start_instant = date.zip(start_time).map(|(d, t)| d.and_time(t));
        let end_instant = date.zip(end_time).map(|(d, t)| d.and_time(t));
        let end_instant = apply_overnight_rollover(start_instant, end_instant);

        let computed_hours = start_instant
            .zip(end_instant)
            .map(|(start, end)| round2((end - start).num_seconds() as f64 / SECONDS_PER_HOUR));
        let declared_hours = row
            .get(&cols.declared_hours)
            .and_then(|v| self.cleaner.parse_decimal(v));

        let raw_location = raw_cell(row, &cols.location);
        let location_label = if self.normalize_location {
            self.cleaner.clean_text(&raw_location, true)
        } else {
            raw_location
        };

        LessonRecord {
            row_number: row.row_number,
            raw_date: raw_cell(row, &cols.date),
            raw_start: raw_cell(row, &cols.start_time),
            raw_end: raw_cell(row, &cols.end_time),
            raw_declared: raw_cell(row, &cols.declared_hours),
            date,
            start_time,
            end_time,
            start_instant,
            end_instant,
            teacher_key: self.cleaner.clean_text(&raw_cell(row, &cols.teacher), true),
            class_key: optional
                .class_label
                .map(|c| self.cleaner.clean_text(&raw_cell(row, c), true)),
            location_label,
            subject: optional
                .subject
                .and_then(|c| self.cleaner.normalize_null(row.cells.get(c).cloned())),
            computed_hours,
            declared_hours,
        }
    }

    /// Numeric spreadsheet cells go straight to the day-fraction rule
    fn parse_time(&self, row: &RawLessonRow, column: &str) -> Option<NaiveTime> {
        match row.number(column) {
            Some(fraction) => self.time_parser.from_day_fraction(fraction),
            None => self.time_parser.parse(row.get(column)),
        }
    }
}

/// An end before its start spans midnight: push it one day forward.
/// Applied once; keeps end >= start.
pub fn apply_overnight_rollover(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Option<NaiveDateTime> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Some(e + Duration::days(1)),
        _ => end,
    }
}

fn raw_cell(row: &RawLessonRow, column: &str) -> String {
    row.cells.get(column).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADERS: [&str; 6] = [
        "DATA LEZIONE",
        "TOTALE_ORE",
        "ORA_INIZIO",
        "ORA_FINE",
        "SEDE",
        "Codice Fiscale",
    ];

    fn normalizer() -> RecordNormalizer {
        RecordNormalizer::new(&AuditConfig::default())
    }

    fn single_row(values: [&str; 6]) -> LessonRecord {
        let mut table = RawTable::new(&HEADERS);
        table.push_row(&values);
        normalizer().normalize(&table).unwrap().remove(0)
    }

    #[test]
    fn test_normalize_basic_row() {
        let record = single_row(["05/03/2024", "2", "09:00", "11:00", "Milano", " rssmra80a01h501u "]);

        assert_eq!(record.row_number, 2);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(record.start_time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(record.computed_hours, Some(2.0));
        assert_eq!(record.declared_hours, Some(2.0));
        assert_eq!(record.teacher_key, "RSSMRA80A01H501U");
        assert_eq!(record.location_label, "Milano");
        assert_eq!(record.class_key, None);
        assert_eq!(record.subject, None);
    }

    #[test]
    fn test_overnight_rollover() {
        let record = single_row(["05/03/2024", "0.75", "23:30", "00:15", "Milano", "CF1"]);

        let (start, end) = record.interval().unwrap();
        assert!(end >= start);
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
        assert_eq!(record.computed_hours, Some(0.75));
    }

    #[test]
    fn test_equal_start_end_is_zero_not_rollover() {
        let record = single_row(["05/03/2024", "0", "10:00", "10:00", "Milano", "CF1"]);
        assert_eq!(record.computed_hours, Some(0.0));
    }

    #[test]
    fn test_unparseable_fields_degrade_to_none() {
        let record = single_row(["ieri", "due", "9:00", "xx", "", ""]);

        assert_eq!(record.date, None);
        assert_eq!(record.start_time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(record.end_time, None);
        assert_eq!(record.start_instant, None);
        assert_eq!(record.end_instant, None);
        assert_eq!(record.computed_hours, None);
        assert_eq!(record.declared_hours, None);
        assert_eq!(record.teacher_key, "");
        assert_eq!(record.raw_date, "ieri");
        assert_eq!(record.raw_end, "xx");
    }

    #[test]
    fn test_missing_columns_is_fatal() {
        let table = RawTable::new(&["DATA LEZIONE", "ORA_INIZIO", "SEDE"]);
        let result = normalizer().normalize(&table);

        match result {
            Err(AuditError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["TOTALE_ORE", "ORA_FINE", "Codice Fiscale"]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_required_columns_are_case_sensitive() {
        let table = RawTable::new(&[
            "DATA LEZIONE",
            "TOTALE_ORE",
            "ORA_INIZIO",
            "ORA_FINE",
            "SEDE",
            "codice fiscale",
        ]);
        assert!(normalizer().normalize(&table).is_err());
    }

    #[test]
    fn test_class_and_subject_columns() {
        let mut headers = HEADERS.to_vec();
        headers.push("CLASSE");
        headers.push("Materia");
        let mut table = RawTable::new(&headers);
        table.push_row(&["05/03/2024", "1", "09:00", "10:00", "Milano", "CF1", " 3a ", " Storia "]);
        table.push_row(&["05/03/2024", "1", "09:00", "10:00", "Milano", "CF1", "", ""]);

        let records = normalizer().normalize(&table).unwrap();
        assert_eq!(records[0].class_key.as_deref(), Some("3A"));
        assert_eq!(records[0].subject.as_deref(), Some("Storia"));
        assert_eq!(records[1].class_key.as_deref(), Some(""));
        assert_eq!(records[1].subject, None);
    }

    #[test]
    fn test_location_verbatim_by_default() {
        let record = single_row(["05/03/2024", "1", "09:00", "10:00", " milano ", "CF1"]);
        assert_eq!(record.location_label, " milano ");
    }

    #[test]
    fn test_location_normalized_when_enabled() {
        let config = AuditConfig {
            normalize_location: true,
            ..AuditConfig::default()
        };
        let mut table = RawTable::new(&HEADERS);
        table.push_row(&["05/03/2024", "1", "09:00", "10:00", " milano ", "CF1"]);

        let records = RecordNormalizer::new(&config).normalize(&table).unwrap();
        assert_eq!(records[0].location_label, "MILANO");
    }

    #[test]
    fn test_numeric_time_cells_use_day_fraction() {
        // spreadsheet cells 0.25 / 0.5: text alone would read as 00:25 / 00:50
        let mut table = RawTable::new(&HEADERS);
        table.push_row_with_numbers(
            2,
            &["05/03/2024", "6", "0.25", "0.5", "Milano", "CF1"],
            &[None, Some(6.0), Some(0.25), Some(0.5), None, None],
        );

        let record = normalizer().normalize(&table).unwrap().remove(0);
        assert_eq!(record.start_time, NaiveTime::from_hms_opt(6, 0, 0));
        assert_eq!(record.end_time, NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(record.computed_hours, Some(6.0));
        assert_eq!(record.declared_hours, Some(6.0));
    }

    #[test]
    fn test_header_only_table() {
        let table = RawTable::new(&HEADERS);
        assert!(normalizer().normalize(&table).unwrap().is_empty());
    }
}

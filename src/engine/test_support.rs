use crate::config::AuditConfig;
use crate::domain::lesson::{LessonRecord, RawTable};
use crate::importer::record_normalizer::RecordNormalizer;

pub(crate) const HEADERS: [&str; 7] = [
    "DATA LEZIONE",
    "TOTALE_ORE",
    "ORA_INIZIO",
    "ORA_FINE",
    "SEDE",
    "Codice Fiscale",
    "classe",
];

/// Rows: date, declared hours, start, end, location, teacher, class
pub(crate) fn table(rows: &[[&str; 7]]) -> RawTable {
    let mut table = RawTable::new(&HEADERS);
    for row in rows {
        table.push_row(row);
    }
    table
}

pub(crate) fn records(rows: &[[&str; 7]]) -> Vec<LessonRecord> {
    RecordNormalizer::new(&AuditConfig::default())
        .normalize(&table(rows))
        .unwrap()
}

// ==========================================
// Lesson Audit - File parsers
// ==========================================
// Supports: Excel / ODS (calamine), CSV (csv)
// Output: RawTable with source row numbers
// ==========================================

use crate::domain::lesson::RawTable;
use crate::domain::types::HEADER_ROW_OFFSET;
use crate::importer::error::{AuditError, AuditResult};
use crate::importer::importer_trait::FileParser;
use crate::importer::time_parser::TimeParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Serials below this are day fractions (time-of-day cells), not dates
const DAY_FRACTION_LIMIT: f64 = 2.0;

fn ensure_exists(path: &Path) -> AuditResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AuditError::FileNotFound(path.display().to_string()))
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn clean_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// ';' when the header line has semicolons and no commas, ',' otherwise
    fn detect_delimiter(content: &str) -> u8 {
        let header = content.lines().next().unwrap_or("");
        if header.contains(';') && !header.contains(',') {
            b';'
        } else {
            b','
        }
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> AuditResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(AuditError::UnsupportedFormat(ext));
        }

        let content = std::fs::read_to_string(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // rows may be shorter or longer than the header
            .delimiter(Self::detect_delimiter(&content))
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();
        let mut table = RawTable::new(&headers);

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let values: Vec<&str> = record.iter().collect();
            if values.iter().all(|v| v.trim().is_empty()) {
                continue;
            }
            // empty lines yield no record, so the index alone drifts; use the source line
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + HEADER_ROW_OFFSET);
            table.push_row_at(row_number, &values);
        }

        debug!(rows = table.len(), columns = table.headers.len(), "CSV parsed");
        Ok(table)
    }
}

// ==========================================
// Excel Parser
// ==========================================
#[derive(Default)]
pub struct ExcelParser {
    pub sheet_name: Option<String>,
}

impl ExcelParser {
    pub fn new(sheet_name: Option<String>) -> Self {
        Self { sheet_name }
    }
}

/// Native numeric value of a cell, if it has one
fn cell_to_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

/// Render one cell as text the normalizer understands
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            if serial < DAY_FRACTION_LIMIT {
                // time-of-day cell: "0.25" as text would read as 00:25
                return match TimeParser.from_day_fraction(serial) {
                    Some(t) => t.format("%H:%M:%S").to_string(),
                    None => serial.to_string(),
                };
            }
            match dt.as_datetime() {
                Some(ndt) if ndt.time() == chrono::NaiveTime::MIN => {
                    ndt.format("%Y-%m-%d").to_string()
                }
                Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => serial.to_string(),
            }
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> AuditResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(AuditError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = match &self.sheet_name {
            Some(wanted) => sheet_names
                .iter()
                .find(|n| *n == wanted)
                .cloned()
                .ok_or_else(|| AuditError::SheetNotFound(wanted.clone()))?,
            None => sheet_names.first().cloned().ok_or(AuditError::EmptyWorkbook)?,
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // The used range may not start at A1
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        let mut rows = range.rows();
        let header_row = rows.next().ok_or(AuditError::EmptyWorkbook)?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| clean_header(&cell_to_text(cell)))
            .collect();
        let mut table = RawTable::new(&headers);

        for (idx, data_row) in rows.enumerate() {
            let values: Vec<String> = data_row.iter().map(cell_to_text).collect();
            if values.iter().all(|v| v.trim().is_empty()) {
                continue;
            }
            let numbers: Vec<Option<f64>> = data_row.iter().map(cell_to_number).collect();
            table.push_row_with_numbers(first_row + idx + HEADER_ROW_OFFSET, &values, &numbers);
        }

        debug!(
            sheet = %sheet_name,
            rows = table.len(),
            columns = table.headers.len(),
            "worksheet parsed"
        );
        Ok(table)
    }
}

// ==========================================
// Universal parser (dispatch on extension)
// ==========================================
#[derive(Default)]
pub struct UniversalFileParser {
    pub sheet_name: Option<String>,
}

impl UniversalFileParser {
    pub fn new(sheet_name: Option<String>) -> Self {
        Self { sheet_name }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> AuditResult<RawTable> {
        let path = file_path.as_ref();
        let ext = extension_of(path);

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(path),
            e if EXCEL_EXTENSIONS.contains(&e) => {
                ExcelParser::new(self.sheet_name.clone()).parse_to_raw_table(path)
            }
            _ => Err(AuditError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let file = csv_file(&[
            "DATA LEZIONE,ORA_INIZIO,SEDE",
            "05/03/2024,09:00, Milano ",
            "06/03/2024,14.30,Torino",
        ]);

        let table = CsvParser.parse_to_raw_table(file.path()).unwrap();

        assert_eq!(table.headers, vec!["DATA LEZIONE", "ORA_INIZIO", "SEDE"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].row_number, 2);
        // cell values stay verbatim
        assert_eq!(table.rows[0].cells.get("SEDE"), Some(&" Milano ".to_string()));
        assert_eq!(table.rows[1].get("ORA_INIZIO"), Some("14.30"));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(AuditError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_blank_rows_keeps_row_numbers() {
        let file = csv_file(&["A,B", "1,2", ",", "3,4"]);

        let table = CsvParser.parse_to_raw_table(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].row_number, 2);
        assert_eq!(table.rows[1].row_number, 4);
    }

    #[test]
    fn test_csv_parser_empty_line_keeps_row_numbers() {
        let file = csv_file(&["A,B", "1,2", "", "3,4"]);

        let table = CsvParser.parse_to_raw_table(file.path()).unwrap();

        let rows: Vec<usize> = table.rows.iter().map(|r| r.row_number).collect();
        assert_eq!(rows, vec![2, 4]);
        assert!(table.rows.iter().all(|r| r.numbers.is_empty()));
    }

    #[test]
    fn test_csv_parser_semicolon_and_bom() {
        let file = csv_file(&["\u{feff}DATA LEZIONE;TOTALE_ORE", "05/03/2024;2"]);

        let table = CsvParser.parse_to_raw_table(file.path()).unwrap();

        assert_eq!(table.headers, vec!["DATA LEZIONE", "TOTALE_ORE"]);
        assert_eq!(table.rows[0].get("TOTALE_ORE"), Some("2"));
    }

    #[test]
    fn test_csv_parser_header_only() {
        let file = csv_file(&["A,B"]);
        let table = CsvParser.parse_to_raw_table(file.path()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers.len(), 2);
    }

    #[test]
    fn test_excel_parser_file_not_found() {
        let result = ExcelParser::default().parse_to_raw_table(Path::new("missing.xlsx"));
        assert!(matches!(result, Err(AuditError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_unsupported_format() {
        let result = UniversalFileParser::default().parse("lessons.json");
        assert!(matches!(result, Err(AuditError::UnsupportedFormat(ext)) if ext == "json"));
    }

    #[test]
    fn test_time_cell_rendered_as_clock() {
        let six_am = Data::DateTime(ExcelDateTime::new(0.25, ExcelDateTimeType::DateTime, false));
        let text = cell_to_text(&six_am);

        assert_eq!(text, "06:00:00");
        assert_eq!(TimeParser.parse(Some(&text)), chrono::NaiveTime::from_hms_opt(6, 0, 0));

        let ten_48 = Data::DateTime(ExcelDateTime::new(0.45, ExcelDateTimeType::DateTime, false));
        assert_eq!(cell_to_text(&ten_48), "10:48:00");
    }

    #[test]
    fn test_cell_to_number() {
        assert_eq!(cell_to_number(&Data::Float(0.25)), Some(0.25));
        assert_eq!(cell_to_number(&Data::Int(2)), Some(2.0));
        assert_eq!(cell_to_number(&Data::String("0.25".to_string())), None);
        assert_eq!(cell_to_number(&Data::Empty), None);
    }

    #[test]
    fn test_cell_to_text() {
        assert_eq!(cell_to_text(&Data::Float(0.5)), "0.5");
        assert_eq!(cell_to_text(&Data::Float(2.0)), "2");
        assert_eq!(cell_to_text(&Data::Int(3)), "3");
        assert_eq!(cell_to_text(&Data::Empty), "");
        assert_eq!(cell_to_text(&Data::String(" 3A ".to_string())), " 3A ");
    }
}

// ==========================================
// Lesson Audit - Data cleaner
// ==========================================
// TRIM / UPPER / NULL normalization, day-first dates, decimals
// Unparseable input degrades to None
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use chrono::NaiveDate;

/// Day-first formats, tried in order.
/// Two-digit years come before four-digit ones: `%Y` would also accept "24" as year 24.
/// `%y` maps 00-69 to 20xx and 70-99 to 19xx.
const DATE_FORMATS: [&str; 7] = [
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    "%Y-%m-%d",
];

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_date_day_first(&self, value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        // drop a trailing time-of-day: "05/03/2024 10:00", "2024-03-05T10:00:00"
        let token = trimmed.split_whitespace().next()?;
        let token = match token.split_once('T') {
            Some((date, _)) if date.len() == 10 => date,
            _ => token,
        };

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
    }

    fn parse_decimal(&self, value: &str) -> Option<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(round2)
    }
}

/// Round to 2 decimals, half away from zero. Never returns -0.0.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

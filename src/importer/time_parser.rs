// ==========================================
// Lesson Audit - Time parser
// ==========================================
// Accepted encodings, first success wins:
// 1. clock text  HH:MM / HH.MM / HH:MM:SS
// 2. spreadsheet day fraction 0 <= f < 2 (f * 1440 minutes)
// Anything else is None, never an error.
// ==========================================

use chrono::NaiveTime;

const MINUTES_PER_DAY: f64 = 1440.0;

pub struct TimeParser;

impl TimeParser {
    /// Parse a time-of-day from an optional cell value
    ///
    /// # Rounding
    /// Day fractions round the minute half-up; a minute rounding to 60
    /// carries into the next hour (modulo 24).
    pub fn parse(&self, value: Option<&str>) -> Option<NaiveTime> {
        let trimmed = value?.trim();
        if trimmed.is_empty() {
            return None;
        }

        let clock = trimmed.replace('.', ":");
        self.parse_clock(&clock)
            .or_else(|| trimmed.parse::<f64>().ok().and_then(|f| self.from_day_fraction(f)))
    }

    /// HH:MM or HH:MM:SS, hour 1-2 digits, minute/second exactly 2 digits
    fn parse_clock(&self, value: &str) -> Option<NaiveTime> {
        let parts: Vec<&str> = value.split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return None;
        }
        if !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
            return None;
        }
        if parts[0].is_empty() || parts[0].len() > 2 || parts[1..].iter().any(|p| p.len() != 2) {
            return None;
        }

        let hour = parts[0].parse().ok()?;
        let minute = parts[1].parse().ok()?;
        let second = match parts.get(2) {
            Some(s) => s.parse().ok()?,
            None => 0,
        };
        NaiveTime::from_hms_opt(hour, minute, second)
    }

    /// Numeric cells (spreadsheet serials) skip the clock formats entirely:
    /// 0.25 is 06:00, never 00:25.
    pub fn from_day_fraction(&self, fraction: f64) -> Option<NaiveTime> {
        if !fraction.is_finite() || !(0.0..2.0).contains(&fraction) {
            return None;
        }

        let minutes = fraction * MINUTES_PER_DAY;
        let mut hour = (minutes / 60.0).floor() as u32 % 24;
        let mut minute = (minutes % 60.0).round() as u32;
        if minute == 60 {
            minute = 0;
            hour = (hour + 1) % 24;
        }
        NaiveTime::from_hms_opt(hour, minute, 0)
    }
}

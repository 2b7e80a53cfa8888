// ==========================================
// Lesson Audit - Audit configuration
// ==========================================
// Sources, later wins: defaults -> JSON file -> environment
// ==========================================

use crate::importer::error::{AuditError, AuditResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Upper end of the usual tolerance range (minutes)
pub const TYPICAL_MAX_TOLERANCE_MINUTES: f64 = 5.0;

// ==========================================
// Environment keys
// ==========================================
pub mod config_keys {
    pub const TOLERANCE_MINUTES: &str = "LESSON_AUDIT_TOLERANCE_MINUTES";
    pub const SHEET: &str = "LESSON_AUDIT_SHEET";
    pub const NORMALIZE_LOCATION: &str = "LESSON_AUDIT_NORMALIZE_LOCATION";
}

// ==========================================
// ColumnLayout - source header names
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub date: String,
    pub declared_hours: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub teacher: String,
    /// Optional, matched ignoring case
    pub class_label: String,
    /// Optional, exact match
    pub subject: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            date: "DATA LEZIONE".to_string(),
            declared_hours: "TOTALE_ORE".to_string(),
            start_time: "ORA_INIZIO".to_string(),
            end_time: "ORA_FINE".to_string(),
            location: "SEDE".to_string(),
            teacher: "Codice Fiscale".to_string(),
            class_label: "classe".to_string(),
            subject: "Materia".to_string(),
        }
    }
}

impl ColumnLayout {
    /// Columns whose absence aborts the run, in reporting order
    pub fn required(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.declared_hours.as_str(),
            self.start_time.as_str(),
            self.end_time.as_str(),
            self.location.as_str(),
            self.teacher.as_str(),
        ]
    }
}

// ==========================================
// AuditConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Hour-mismatch tolerance in minutes
    pub tolerance_minutes: f64,

    /// Worksheet to read from a workbook (None = first sheet)
    pub sheet_name: Option<String>,

    /// Trim + upper-case the location before building duplicate keys
    pub normalize_location: bool,

    pub columns: ColumnLayout,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            tolerance_minutes: 1.0,
            sheet_name: None,
            normalize_location: false,
            columns: ColumnLayout::default(),
        }
    }
}

impl AuditConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| AuditError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: AuditConfig =
            serde_json::from_str(&raw).map_err(|e| AuditError::ConfigReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply LESSON_AUDIT_* environment variables
    pub fn with_env_overrides(self) -> AuditResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, tests)
    pub fn with_overrides<F>(mut self, lookup: F) -> AuditResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(config_keys::TOLERANCE_MINUTES) {
            self.tolerance_minutes =
                v.trim()
                    .parse::<f64>()
                    .map_err(|e| AuditError::ConfigValueError {
                        key: config_keys::TOLERANCE_MINUTES.to_string(),
                        value: v.clone(),
                        message: e.to_string(),
                    })?;
        }

        if let Some(v) = lookup(config_keys::SHEET) {
            let v = v.trim();
            self.sheet_name = if v.is_empty() { None } else { Some(v.to_string()) };
        }

        if let Some(v) = lookup(config_keys::NORMALIZE_LOCATION) {
            self.normalize_location = is_true(&v);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> AuditResult<()> {
        if !self.tolerance_minutes.is_finite() || self.tolerance_minutes < 0.0 {
            return Err(AuditError::ConfigValueError {
                key: "tolerance_minutes".to_string(),
                value: self.tolerance_minutes.to_string(),
                message: "must be a finite number >= 0".to_string(),
            });
        }
        if self.tolerance_minutes > TYPICAL_MAX_TOLERANCE_MINUTES {
            warn!(
                tolerance_minutes = self.tolerance_minutes,
                "tolerance above the usual 0-5 minute range"
            );
        }

        let required = self.columns.required();
        if let Some(blank) = required.iter().position(|c| c.trim().is_empty()) {
            return Err(AuditError::ConfigValueError {
                key: format!("columns[{}]", blank),
                value: String::new(),
                message: "required column name is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Tolerance in hours, the unit of every duration in a LessonRecord
    pub fn tolerance_hours(&self) -> f64 {
        self.tolerance_minutes / 60.0
    }
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.tolerance_minutes, 1.0);
        assert!((config.tolerance_hours() - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(config.columns.required()[0], "DATA LEZIONE");
        assert_eq!(config.columns.required()[5], "Codice Fiscale");
        assert!(!config.normalize_location);
    }

    #[test]
    fn test_from_file_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{ "tolerance_minutes": 3, "columns": {{ "location": "AULA" }} }}"#
        )
        .unwrap();

        let config = AuditConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tolerance_minutes, 3.0);
        assert_eq!(config.columns.location, "AULA");
        assert_eq!(config.columns.teacher, "Codice Fiscale");
        assert_eq!(config.sheet_name, None);
    }

    #[test]
    fn test_from_file_missing() {
        let result = AuditConfig::from_file("no_such_config.json");
        assert!(matches!(result, Err(AuditError::ConfigReadError { .. })));
    }

    #[test]
    fn test_overrides() {
        let config = AuditConfig::default()
            .with_overrides(lookup_from(&[
                (config_keys::TOLERANCE_MINUTES, "2.5"),
                (config_keys::SHEET, "Foglio1"),
                (config_keys::NORMALIZE_LOCATION, "yes"),
            ]))
            .unwrap();

        assert_eq!(config.tolerance_minutes, 2.5);
        assert_eq!(config.sheet_name.as_deref(), Some("Foglio1"));
        assert!(config.normalize_location);
    }

    #[test]
    fn test_override_invalid_tolerance() {
        let result = AuditConfig::default()
            .with_overrides(lookup_from(&[(config_keys::TOLERANCE_MINUTES, "abc")]));
        assert!(matches!(result, Err(AuditError::ConfigValueError { .. })));

        let result = AuditConfig::default()
            .with_overrides(lookup_from(&[(config_keys::TOLERANCE_MINUTES, "-1")]));
        assert!(matches!(result, Err(AuditError::ConfigValueError { .. })));
    }

    #[test]
    fn test_blank_required_column_rejected() {
        let mut config = AuditConfig::default();
        config.columns.end_time = " ".to_string();
        assert!(config.validate().is_err());
    }
}

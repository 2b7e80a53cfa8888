// ==========================================
// Lesson Audit - Configuration layer
// ==========================================
// Tolerance, worksheet selection, column names
// ==========================================

pub mod audit_config;

pub use audit_config::{config_keys, AuditConfig, ColumnLayout, TYPICAL_MAX_TOLERANCE_MINUTES};

// ==========================================
// Lesson Audit - Domain types
// ==========================================
// Shared enums and constants of the audit domain
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset between a zero-based data index and the reported row number:
/// one line for the header, one to make numbering 1-based.
pub const HEADER_ROW_OFFSET: usize = 2;

/// Clock format used in every report table
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Date format used in every report table
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// Grouping field (overlap partitioning)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupingField {
    Teacher, // teacher fiscal code
    Class,   // class label
}

impl fmt::Display for GroupingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingField::Teacher => write!(f, "TEACHER"),
            GroupingField::Class => write!(f, "CLASS"),
        }
    }
}

//! Validation report types.

/// Message carried by a passing report.
pub const VALID_MESSAGE: &str = "valid";

/// Outcome of validating one rule sheet.
///
/// Validation stops at the first violation, so a failed report carries exactly one
/// human-readable message naming the sheet and row.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Whether the sheet passed every check
    pub passed: bool,

    /// `"valid"` on success, otherwise the first violation found
    pub message: String,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationStats {
    /// Number of `ColumnLevel` rows examined
    pub column_rows: usize,

    /// Number of `TableLevel` rows examined
    pub table_rows: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a passing report.
    pub fn success(stats: ValidationStats) -> Self {
        Self {
            passed: true,
            message: VALID_MESSAGE.to_string(),
            stats,
        }
    }

    /// Creates a failed report.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            stats: ValidationStats::default(),
        }
    }

    /// Sets the statistics.
    pub fn with_stats(mut self, stats: ValidationStats) -> Self {
        self.stats = stats;
        self
    }

    /// The `(ok, message)` pair.
    pub fn into_parts(self) -> (bool, String) {
        (self.passed, self.message)
    }
}

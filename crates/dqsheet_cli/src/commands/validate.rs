use anyhow::{Context, Result};
use dqsheet_core::ValidationReport;
use dqsheet_parser::read_workbook;
use dqsheet_validator::RuleSheetValidator;
use std::fs;
use tracing::info;

use crate::output;

pub fn execute(workbook_path: &str, format: &str) -> Result<()> {
    info!("Validating rule workbook: {}", workbook_path);

    let bytes = fs::read(workbook_path)
        .with_context(|| format!("Failed to read workbook: {}", workbook_path))?;

    // Unreadable workbooks and missing sheets are reported like any other violation
    let report = match read_workbook(&bytes) {
        Ok(sheet) => RuleSheetValidator::new().validate(&sheet),
        Err(err) => ValidationReport::failure(err.to_string()),
    };

    output::print_validation_report(&report, workbook_path, format);

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

use colored::*;
use dqsheet_core::ValidationReport;
use dqsheet_sdk::RunSummary;
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, workbook: &str, format: &str) {
    match format {
        "json" => print_json_report(report, workbook),
        _ => print_text_report(report, workbook),
    }
}

fn print_text_report(report: &ValidationReport, workbook: &str) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  RULE SHEET VALIDATION".bold());
    println!("{}", "═".repeat(60));
    println!("  Workbook: {}", workbook);

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
        println!("\n{}", "Error:".red().bold());
        println!("  {}", report.message.red());
    }

    println!("\n{}", "Summary:".bold());
    println!("  ColumnLevel rows: {}", report.stats.column_rows);
    println!("  TableLevel rows:  {}", report.stats.table_rows);
    println!("  Duration:         {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport, workbook: &str) {
    let output = json!({
        "workbook": workbook,
        "passed": report.passed,
        "message": report.message,
        "summary": {
            "column_rows": report.stats.column_rows,
            "table_rows": report.stats.table_rows,
            "duration_ms": report.stats.duration_ms,
        }
    });

    println!("{:#}", output);
}

pub fn print_run_summary(summary: &RunSummary) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  RUN SUMMARY".bold());
    println!("{}", "═".repeat(60));

    for outcome in &summary.outcomes {
        if outcome.is_success() {
            println!("{} {}", "✓".green().bold(), outcome.object);
        } else {
            println!("{} {}", "✗".red().bold(), outcome.object);
        }
        if !outcome.report.passed {
            println!("    {}", outcome.report.message.red());
        }
        for document in &outcome.written {
            println!("    → {}", document);
        }
        for error in &outcome.write_errors {
            println!("    {}", error.yellow());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Workbooks passed:  {}", summary.passed());
    println!("  Workbooks failed:  {}", summary.failed());
    println!("  Documents written: {}", summary.documents_written());
    println!("{}", "═".repeat(60));
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

use anyhow::{Context, Result};
use dqsheet_sdk::{LocalStore, ObjectStore, WorkbookError, process_workbook};
use std::fs;
use tracing::info;

use crate::output;

pub fn execute(workbook_path: &str, output_dir: Option<&str>) -> Result<()> {
    info!("Compiling rule workbook: {}", workbook_path);

    let bytes = fs::read(workbook_path)
        .with_context(|| format!("Failed to read workbook: {}", workbook_path))?;

    let documents = match process_workbook(&bytes) {
        Ok((_, documents)) => documents,
        Err(WorkbookError::Invalid(report)) => {
            output::print_validation_report(&report, workbook_path, "text");
            std::process::exit(1);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to compile workbook: {}", workbook_path));
        }
    };

    match output_dir {
        Some(dir) => {
            let store = LocalStore::new(dir);
            for document in &documents {
                store
                    .write_string(&document.name, &document.content)
                    .with_context(|| format!("Failed to write document: {}", document.name))?;
                output::print_info(&format!("Wrote {}/{}", dir, document.name));
            }
            output::print_success(&format!("Compiled {} document(s)", documents.len()));
        }
        None => {
            for (i, document) in documents.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                println!("# {}", document.name);
                print!("{}", document.content);
            }
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use dqsheet_core::RunConfig;
use dqsheet_parser::parse_config_file;
use dqsheet_sdk::{LocalStore, Pipeline};
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(input: Option<&str>, output_dir: Option<&str>, config_path: Option<&str>) -> Result<()> {
    let mut config = match config_path {
        Some(path) => parse_config_file(Path::new(path))
            .with_context(|| format!("Failed to parse run configuration: {}", path))?,
        None => RunConfig::default(),
    };

    // Command-line arguments take precedence over the configuration file
    if let Some(input) = input {
        config.input_prefix = input.to_string();
    }
    if let Some(output_dir) = output_dir {
        config.output_prefix = Some(output_dir.to_string());
    }
    if config.input_prefix.is_empty() {
        config.input_prefix = ".".to_string();
    }

    info!(
        "Compiling workbooks in {} into {}",
        config.input_prefix,
        config.output_prefix()
    );

    let pipeline = Pipeline::new(LocalStore::new("."), config);
    let summary = match pipeline.run() {
        Ok(summary) => summary,
        Err(err) => {
            output::print_error(&err.to_string());
            std::process::exit(1);
        }
    };

    output::print_run_summary(&summary);

    Ok(())
}

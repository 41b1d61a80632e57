mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dqsheet")]
#[command(version, about = "Data-quality rule sheet compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the ColumnLevel and TableLevel sheets of a rule workbook
    Validate {
        /// Path to the rule workbook (xlsx)
        workbook: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Validate a rule workbook and compile it into one scan document per table
    Compile {
        /// Path to the rule workbook (xlsx)
        workbook: String,

        /// Directory to write documents to (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Compile every workbook in a directory
    Run {
        /// Directory holding the rule workbooks
        input: Option<String>,

        /// Directory to write documents to (defaults to the input directory)
        #[arg(short, long)]
        output: Option<String>,

        /// Run configuration file (YAML or TOML)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Validate { workbook, format } => commands::validate::execute(&workbook, &format),

        Commands::Compile { workbook, output } => {
            commands::compile::execute(&workbook, output.as_deref())
        }

        Commands::Run {
            input,
            output,
            config,
        } => commands::run::execute(input.as_deref(), output.as_deref(), config.as_deref()),
    }
}

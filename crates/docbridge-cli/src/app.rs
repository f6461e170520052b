//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use docbridge_core::{download_file_name, export_docx, import_docx, ConvertConfig, Metadata};

#[derive(Parser)]
#[command(name = "docbridge")]
#[command(author, version, about = "Convert between DOCX and editor HTML", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DOCX file to HTML and metadata (JSON)
    Import {
        /// Input DOCX file
        input: PathBuf,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert an HTML file to DOCX
    Export {
        /// Input HTML file
        input: PathBuf,

        /// Document title
        #[arg(long, default_value = "")]
        title: String,

        /// Document author
        #[arg(long, default_value = "")]
        author: String,

        /// Output DOCX file (defaults to the title-based download name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a liveness report
    Health,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ConvertConfig::load(cli.config.as_deref())?;
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Import { input, output } => {
            import_command(&input, output.as_deref())?;
        }
        Commands::Export {
            input,
            title,
            author,
            output,
        } => {
            let metadata = Metadata::new(title, author);
            export_command(&input, &metadata, output.as_deref(), &config)?;
        }
        Commands::Health => {
            println!("{}", health_report());
        }
    }

    Ok(())
}

/// Send `tracing` output to stderr; `RUST_LOG` overrides the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the import command
///
/// Prints the JSON document to stdout, or writes it to `output`.
pub fn import_command(input: &Path, output: Option<&Path>) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let bytes =
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let imported = import_docx(&file_name, &bytes)?;
    let json = serde_json::to_string_pretty(&imported).context("Failed to serialize result")?;

    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            println!("  Created: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Execute the export command
///
/// Returns the path of the written DOCX file.
pub fn export_command(
    input: &Path,
    metadata: &Metadata,
    output: Option<&Path>,
    config: &ConvertConfig,
) -> Result<PathBuf> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let html = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let bytes = export_docx(&html, metadata, config)?;

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(download_file_name(metadata)),
    };
    fs::write(&output_path, &bytes)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;
    println!("  Created: {}", output_path.display());

    Ok(output_path)
}

/// Liveness report printed by the health command
pub fn health_report() -> String {
    serde_json::json!({ "ok": true }).to_string()
}

//! docbridge CLI - Command-line interface library
//!
//! This library provides the CLI functionality for docbridge:
//! - Import: Convert DOCX to HTML and metadata (JSON)
//! - Export: Convert HTML to DOCX
//! - Health: Print a liveness report
//!
//! # Library Usage
//!
//! ```ignore
//! use docbridge_cli::{run_cli, export_command};
//!
//! // Run the full CLI
//! run_cli();
//!
//! // Or use individual commands programmatically
//! export_command(&input, &metadata, None, &config)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Import a DOCX file
//! docbridge import report.docx --output report.json
//!
//! # Export HTML to DOCX
//! docbridge export page.html --title "Report" --author "Ana"
//!
//! # Use a configuration file
//! docbridge --config docbridge.toml export page.html -o out.docx
//! ```

pub mod app;

pub use app::{export_command, health_report, import_command, run_cli};

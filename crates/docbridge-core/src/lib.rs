//! docbridge-core - HTML and DOCX conversion for a web document editor
//!
//! Exports editor HTML (headings, paragraphs, nested lists, blockquotes,
//! bold/italic runs, hyperlinks, alignment) to DOCX, and imports DOCX back
//! to HTML with the document's title and author.
//!
//! # Example
//!
//! ```
//! use docbridge_core::{export_docx, import_docx, ConvertConfig, Metadata};
//!
//! let config = ConvertConfig::default();
//! let metadata = Metadata::new("Notes", "Ana");
//! let bytes = export_docx("<h1>Notes</h1><p>Hello <b>world</b></p>", &metadata, &config)?;
//!
//! let imported = import_docx("notes.docx", &bytes)?;
//! assert!(imported.html.contains("<h1>Notes</h1>"));
//! assert_eq!(imported.metadata, Some(metadata));
//! # Ok::<(), docbridge_core::ConvertError>(())
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod hyperlink;
mod lists;
pub mod metadata;
pub mod node;
pub mod render;
pub mod runs;
pub mod style;

pub use config::{ConvertConfig, LayoutSettings, LinkSettings, ListSettings, ParserSettings};
pub use convert::{
    download_file_name, export_docx, import_docx, ImportedDocument, DOCX_MEDIA_TYPE, EMPTY_HTML,
};
pub use error::{ConfigError, ConvertError, ErrorKind, RenderError, Result};
pub use hyperlink::emit_hyperlink;
pub use metadata::Metadata;
pub use node::{parse_body, Element, HtmlNode};
pub use render::{render_document, BlockKind};
pub use runs::extract_runs;
pub use style::{RunStyle, TextRun};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "1.0.0");
    }
}

//! # docbridge-ooxml
//!
//! OOXML (Office Open XML) package handling for docbridge.
//!
//! This crate provides functionality to:
//! - Read DOCX packages and convert their body to HTML
//! - Read and write core document properties (title, author)
//! - Build a word-processing document in memory and serialize it to DOCX
//!
//! ## Example: Writing a Document
//!
//! ```
//! use docbridge_ooxml::{DocumentModel, DocxWriter, Paragraph, ParagraphStyle, Run};
//!
//! let mut doc = DocumentModel::new();
//! let mut heading = Paragraph::with_style(ParagraphStyle::Heading(1));
//! heading.push_run(Run::text("Hello"));
//! doc.push(heading);
//!
//! let bytes = DocxWriter::write(&doc)?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), docbridge_ooxml::OoxmlError>(())
//! ```
//!
//! ## Example: Reading a Document
//!
//! ```no_run
//! use docbridge_ooxml::{docx_to_html, read_core_properties, OoxmlArchive};
//!
//! let archive = OoxmlArchive::open("document.docx")?;
//! let html = docx_to_html(&archive)?;
//! let title = read_core_properties(&archive).and_then(|p| p.title);
//! println!("{:?}: {}", title, html);
//! # Ok::<(), docbridge_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod core_props;
pub mod document;
pub mod error;
pub mod html;
pub mod model;
pub mod numbering;
pub mod relationships;
pub mod styles;
pub mod writer;
mod xml;

#[cfg(test)]
pub(crate) mod test_utils;

pub use archive::OoxmlArchive;
pub use error::{OoxmlError, Result};
pub use html::{docx_to_html, read_core_properties, HtmlConverter};
pub use model::{
    Alignment, CoreProperties, DocumentModel, HyperlinkRun, PageSetup, Paragraph, ParagraphChild,
    ParagraphStyle, Run, Twips, MAX_LIST_LEVEL,
};
pub use numbering::Numbering;
pub use relationships::Relationships;
pub use styles::{Style, StyleSheet, StyleType};
pub use writer::DocxWriter;
pub use xml::escape_xml;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

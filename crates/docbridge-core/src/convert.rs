//! Import and export entry points

use docbridge_ooxml::{docx_to_html, read_core_properties, DocxWriter, OoxmlArchive};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::config::ConvertConfig;
use crate::error::{ConvertError, RenderError, Result};
use crate::metadata::Metadata;
use crate::render::render_document;

/// HTML returned when a document has no convertible content
pub const EMPTY_HTML: &str = "<p></p>";

/// Media type of generated documents
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Result of importing a DOCX file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedDocument {
    /// Body content as HTML
    pub html: String,
    /// Title and author, None when the properties could not be read
    #[serde(serialize_with = "serialize_metadata")]
    pub metadata: Option<Metadata>,
}

fn serialize_metadata<S: Serializer>(
    metadata: &Option<Metadata>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match metadata {
        Some(metadata) => metadata.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Render HTML and metadata into DOCX bytes
pub fn export_docx(html: &str, metadata: &Metadata, config: &ConvertConfig) -> Result<Vec<u8>> {
    metadata.validate()?;

    let doc = render_document(html, metadata, config)?;
    let bytes = DocxWriter::write(&doc).map_err(RenderError::from)?;

    info!(
        "Exported {} paragraphs ({} bytes)",
        doc.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Convert an uploaded DOCX file to HTML and metadata
///
/// `file_name` must end in `.docx` (any case) and `bytes` must not be empty.
pub fn import_docx(file_name: &str, bytes: &[u8]) -> Result<ImportedDocument> {
    if !file_name.to_lowercase().ends_with(".docx") {
        return Err(ConvertError::InvalidRequest(
            "Expected a .docx file".to_string(),
        ));
    }
    if bytes.is_empty() {
        return Err(ConvertError::InvalidRequest("Empty file".to_string()));
    }

    let archive = OoxmlArchive::from_bytes(bytes).map_err(ConvertError::Import)?;
    let html = docx_to_html(&archive).map_err(ConvertError::Import)?;
    let html = html.trim();

    let metadata = read_core_properties(&archive).and_then(|core| Metadata::from_core(&core));
    if metadata.is_none() {
        debug!("No usable metadata in {}", file_name);
    }

    info!("Imported {} ({} bytes of HTML)", file_name, html.len());
    Ok(ImportedDocument {
        html: if html.is_empty() {
            EMPTY_HTML.to_string()
        } else {
            html.to_string()
        },
        metadata,
    })
}

/// File name offered for download: the title (or "document") plus `.docx`
///
/// Double quotes become single quotes so the name fits in a quoted header.
pub fn download_file_name(metadata: &Metadata) -> String {
    let title = if metadata.title.is_empty() {
        "document"
    } else {
        metadata.title.as_str()
    };
    format!("{}.docx", title.replace('"', "'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn export(html: &str) -> Vec<u8> {
        export_docx(html, &Metadata::default(), &ConvertConfig::default()).unwrap()
    }

    #[test]
    fn test_export_produces_package() {
        let bytes = export("<p>Hello</p>");
        let archive = OoxmlArchive::from_bytes(&bytes).unwrap();
        assert!(archive.contains("word/document.xml"));
        assert!(archive.contains("docProps/core.xml"));
        assert!(archive
            .get_string("word/document.xml")
            .unwrap()
            .contains("Hello"));
    }

    #[test]
    fn test_export_rejects_long_metadata() {
        let metadata = Metadata::new("t".repeat(201), "a");
        let err = export_docx("<p>x</p>", &metadata, &ConvertConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_export_drops_characters_xml_cannot_carry() {
        let metadata = Metadata::new("T\u{2}", "A\u{1b}");
        let bytes =
            export_docx("<p>a\u{1}b\u{b}</p>", &metadata, &ConvertConfig::default()).unwrap();

        let archive = OoxmlArchive::from_bytes(&bytes).unwrap();
        let document = archive.get_string("word/document.xml").unwrap();
        let core = archive.get_string("docProps/core.xml").unwrap();
        for part in [&document, &core] {
            assert!(!part.contains(['\u{1}', '\u{2}', '\u{b}', '\u{1b}']));
        }
        assert!(document.contains("ab"));

        let imported = import_docx("controls.docx", &bytes).unwrap();
        assert_eq!(imported.html, "<p>ab</p>");
        assert_eq!(imported.metadata, Some(Metadata::new("T", "A")));
    }

    #[test]
    fn test_export_render_failure_is_export_error() {
        let mut config = ConvertConfig::default();
        config.lists.max_depth = 0;
        let err = export_docx(
            "<ul><li>a<ul><li>b</li></ul></li></ul>",
            &Metadata::default(),
            &config,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Export);
        assert!(err.to_string().starts_with("Export error: "));
    }

    #[test]
    fn test_import_validates_request() {
        let err = import_docx("notes.txt", b"data").unwrap_err();
        assert_eq!(err.to_string(), "Expected a .docx file");
        assert_eq!(err.status_code(), 400);

        let err = import_docx("empty.docx", b"").unwrap_err();
        assert_eq!(err.to_string(), "Empty file");
    }

    #[test]
    fn test_import_accepts_any_extension_case() {
        let bytes = export("<p>x</p>");
        assert!(import_docx("REPORT.DOCX", &bytes).is_ok());
    }

    #[test]
    fn test_import_garbage_is_import_error() {
        let err = import_docx("broken.docx", b"not a zip").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Import);
        assert_eq!(err.status_code(), 422);
        assert!(err.to_string().starts_with("Import error: "));
    }

    #[test]
    fn test_import_empty_document_defaults_html() {
        let bytes = export("");
        let imported = import_docx("blank.docx", &bytes).unwrap();
        assert_eq!(imported.html, EMPTY_HTML);
        assert_eq!(imported.metadata, Some(Metadata::default()));
    }

    #[test]
    fn test_imported_document_json() {
        let doc = ImportedDocument {
            html: "<p>x</p>".to_string(),
            metadata: Some(Metadata::new("T", "A")),
        };
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"html":"<p>x</p>","metadata":{"title":"T","author":"A"}}"#
        );

        let doc = ImportedDocument {
            html: EMPTY_HTML.to_string(),
            metadata: None,
        };
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"html":"<p></p>","metadata":{}}"#
        );
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name(&Metadata::new("My \"Plan\"", "a")),
            "My 'Plan'.docx"
        );
        assert_eq!(download_file_name(&Metadata::new("", "a")), "document.docx");
        assert_eq!(download_file_name(&Metadata::default()), "Untitled.docx");
    }
}

//! Integration tests for docbridge CLI
//!
//! These tests drive the export and import commands through real files:
//! HTML -> DOCX -> JSON

use std::fs;

use docbridge_cli::{export_command, import_command};
use docbridge_core::{ConvertConfig, Metadata};
use docbridge_ooxml::OoxmlArchive;
use tempfile::TempDir;

const PAGE: &str = r#"<h1>Quarterly Report</h1>
<p style="text-align:center">Prepared by <b>finance</b> and <i>ops</i>.</p>
<ul>
  <li><span class="li-text">Revenue</span>
    <ul><li>Up 4%</li></ul>
  </li>
  <li data-heading="2">Costs</li>
</ul>
<p>Details at <a href="https://example.com/q3">the portal</a>.</p>"#;

fn export_page(dir: &TempDir, metadata: &Metadata) -> std::path::PathBuf {
    let html_path = dir.path().join("page.html");
    fs::write(&html_path, PAGE).expect("Failed to write page.html");

    let docx_path = dir.path().join("report.docx");
    export_command(
        &html_path,
        metadata,
        Some(&docx_path),
        &ConvertConfig::default(),
    )
    .expect("Export failed")
}

#[test]
fn test_export_then_import() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let metadata = Metadata::new("Q3 Report", "Finance Team");

    let docx_path = export_page(&temp_dir, &metadata);
    let archive = OoxmlArchive::open(&docx_path).expect("Failed to open output.docx");
    assert!(archive.contains("word/document.xml"));
    assert!(archive.contains("word/numbering.xml"));

    let json_path = temp_dir.path().join("report.json");
    import_command(&docx_path, Some(&json_path)).expect("Import failed");

    let json = fs::read_to_string(&json_path).expect("Failed to read report.json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("Valid JSON");

    assert_eq!(parsed["metadata"]["title"], "Q3 Report");
    assert_eq!(parsed["metadata"]["author"], "Finance Team");

    let html = parsed["html"].as_str().expect("html field");
    assert!(html.starts_with("<h1>Quarterly Report</h1>"), "{}", html);
    assert!(html.contains("<strong>finance</strong>"));
    assert!(html.contains("<em>ops</em>"));
    assert!(html.contains("<ul><li>Revenue<ul><li>Up 4%</li></ul></li><li>Costs</li></ul>"));
    assert!(html.contains("<a href=\"https://example.com/q3\">the portal</a>"));
}

#[test]
fn test_export_with_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("docbridge.toml");
    fs::write(
        &config_path,
        "[layout]\npage_width_in = 8.5\npage_height_in = 11.0\n",
    )
    .expect("Failed to write config");

    let config = ConvertConfig::from_file(&config_path).expect("Valid config");
    let html_path = temp_dir.path().join("page.html");
    fs::write(&html_path, "<p>Letter</p>").expect("Failed to write page.html");

    let docx_path = temp_dir.path().join("letter.docx");
    export_command(&html_path, &Metadata::default(), Some(&docx_path), &config)
        .expect("Export failed");

    let archive = OoxmlArchive::open(&docx_path).expect("Failed to open letter.docx");
    let document = archive
        .get_string("word/document.xml")
        .expect("document.xml not found");
    assert!(document.contains(r#"w:w="12240""#));
    assert!(document.contains(r#"w:h="15840""#));
}

#[test]
fn test_import_rejects_wrong_extension() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let docx_path = export_page(&temp_dir, &Metadata::default());

    let renamed = temp_dir.path().join("report.zip");
    fs::rename(&docx_path, &renamed).expect("Failed to rename");

    let err = import_command(&renamed, None).unwrap_err();
    assert_eq!(err.to_string(), "Expected a .docx file");
}

#[test]
fn test_import_rejects_empty_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("empty.docx");
    fs::write(&path, b"").expect("Failed to write empty.docx");

    let err = import_command(&path, None).unwrap_err();
    assert_eq!(err.to_string(), "Empty file");
}

#[test]
fn test_missing_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing.html");

    let err = export_command(&missing, &Metadata::default(), None, &ConvertConfig::default())
        .unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
}

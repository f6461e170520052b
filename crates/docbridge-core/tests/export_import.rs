//! Export -> import round trips through the public facade

use docbridge_core::{export_docx, import_docx, ConvertConfig, ImportedDocument, Metadata};

fn roundtrip(html: &str, metadata: &Metadata) -> ImportedDocument {
    let bytes = export_docx(html, metadata, &ConvertConfig::default()).unwrap();
    import_docx("roundtrip.docx", &bytes).unwrap()
}

#[test]
fn headings_and_paragraphs_survive() {
    let imported = roundtrip(
        "<h1>Title</h1><h2>Section</h2><h3>Sub</h3><p>Body text</p>",
        &Metadata::default(),
    );
    assert_eq!(
        imported.html,
        "<h1>Title</h1><h2>Section</h2><h3>Sub</h3><p>Body text</p>"
    );
}

#[test]
fn inline_formatting_and_links_survive() {
    let imported = roundtrip(
        r#"<p>a <b>bold</b> <em>slanted</em> <a href="https://x.io/?q=1&amp;r=2">link</a></p>"#,
        &Metadata::default(),
    );
    assert_eq!(
        imported.html,
        r#"<p>a <strong>bold</strong> <em>slanted</em> <a href="https://x.io/?q=1&amp;r=2">link</a></p>"#
    );
}

#[test]
fn nested_lists_survive() {
    let imported = roundtrip(
        "<ol><li>first<ul><li>inner</li></ul></li><li>second</li></ol><ul><li>after</li></ul>",
        &Metadata::default(),
    );
    assert_eq!(
        imported.html,
        "<ol><li>first<ul><li>inner</li></ul></li><li>second</li></ol><ul><li>after</li></ul>"
    );
}

#[test]
fn alignment_and_blockquote_text_survive() {
    let imported = roundtrip(
        r#"<p style="text-align:right">right</p><blockquote>quoted<p>inner</p></blockquote>"#,
        &Metadata::default(),
    );
    assert_eq!(
        imported.html,
        r#"<p style="text-align:right">right</p><p>quoted</p><p>inner</p>"#
    );
}

#[test]
fn metadata_survives() {
    let metadata = Metadata::new("Plan \"B\" <draft>", "Zoë");
    let imported = roundtrip("<p>x</p>", &metadata);
    assert_eq!(imported.metadata, Some(metadata));
}

#[test]
fn empty_metadata_becomes_defaults() {
    let imported = roundtrip("<p>x</p>", &Metadata::new("", ""));
    assert_eq!(imported.metadata, Some(Metadata::default()));
}

#[test]
fn malformed_html_is_tolerated() {
    let imported = roundtrip("<p>open <b>bold <i>both</p><p>next", &Metadata::default());
    assert!(imported.html.contains("<strong>bold </strong>"));
    assert!(imported.html.contains("next"));
}

#[test]
fn empty_input_imports_as_empty_paragraph() {
    let imported = roundtrip("", &Metadata::default());
    assert_eq!(imported.html, "<p></p>");
}

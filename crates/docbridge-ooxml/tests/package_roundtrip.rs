//! Writer output read back through the importer
//!
//! These tests only use the public API: a `DocumentModel` is serialized with
//! `DocxWriter` and the bytes are converted back with `docx_to_html`.

use docbridge_ooxml::{
    docx_to_html, read_core_properties, Alignment, CoreProperties, DocumentModel, DocxWriter,
    HyperlinkRun, OoxmlArchive, Paragraph, ParagraphStyle, Run, Twips,
};

fn roundtrip(doc: &DocumentModel) -> (String, Option<CoreProperties>) {
    let bytes = DocxWriter::write(doc).unwrap();
    let archive = OoxmlArchive::from_bytes(&bytes).unwrap();
    (
        docx_to_html(&archive).unwrap(),
        read_core_properties(&archive),
    )
}

fn list_item(style: ParagraphStyle, level: u32, text: &str) -> Paragraph {
    let mut para = Paragraph::with_style(style);
    para.list_level = Some(level);
    if level > 0 {
        para.indent_left = Some(Twips::from_inches(0.3 * f64::from(level + 1)));
    }
    para.push_run(Run::text(text));
    para
}

#[test]
fn headings_paragraphs_and_formatting_survive() {
    let mut doc = DocumentModel::new();

    let mut heading = Paragraph::with_style(ParagraphStyle::Heading(2));
    heading.push_run(Run {
        text: "Section".to_string(),
        size_pt: Some(18),
        ..Default::default()
    });
    doc.push(heading);

    let mut body = Paragraph::default();
    body.alignment = Some(Alignment::Center);
    body.push_run(Run::text("plain "));
    body.push_run(Run {
        text: "strong".to_string(),
        bold: true,
        ..Default::default()
    });
    body.push_run(Run {
        text: " slanted".to_string(),
        italic: true,
        ..Default::default()
    });
    doc.push(body);

    let (html, _) = roundtrip(&doc);
    assert_eq!(
        html,
        "<h2>Section</h2><p style=\"text-align:center\">plain <strong>strong</strong><em> slanted</em></p>"
    );
}

#[test]
fn nested_lists_survive() {
    let mut doc = DocumentModel::new();
    doc.push(list_item(ParagraphStyle::ListBullet, 0, "A"));
    doc.push(list_item(ParagraphStyle::ListBullet, 1, "A1"));
    doc.push(list_item(ParagraphStyle::ListBullet, 0, "B"));
    doc.push(list_item(ParagraphStyle::ListNumber, 0, "one"));
    doc.push(list_item(ParagraphStyle::ListNumber, 0, "two"));

    let (html, _) = roundtrip(&doc);
    assert_eq!(
        html,
        "<ul><li>A<ul><li>A1</li></ul></li><li>B</li></ul><ol><li>one</li><li>two</li></ol>"
    );
}

#[test]
fn hyperlinks_survive_and_share_relationships() {
    let mut doc = DocumentModel::new();
    let mut para = Paragraph::default();
    for text in ["first", " second"] {
        let rel_id = doc.relate_hyperlink("https://example.com/a?b=1&c=2");
        para.push_hyperlink(HyperlinkRun {
            rel_id,
            text: text.to_string(),
            color: "0000EE".to_string(),
        });
    }
    doc.push(para);
    assert_eq!(doc.relationships().len(), 4);

    let (html, _) = roundtrip(&doc);
    assert_eq!(
        html,
        "<p><a href=\"https://example.com/a?b=1&amp;c=2\">first</a><a href=\"https://example.com/a?b=1&amp;c=2\"> second</a></p>"
    );
}

#[test]
fn core_properties_survive() {
    let mut doc = DocumentModel::new();
    doc.core = CoreProperties {
        title: Some("Plan \"B\" & more".to_string()),
        creator: Some("Ana".to_string()),
    };

    let (_, props) = roundtrip(&doc);
    assert_eq!(props, Some(doc.core.clone()));
}

#[test]
fn line_breaks_survive() {
    let mut doc = DocumentModel::new();
    let mut para = Paragraph::default();
    para.push_run(Run::text("one\ntwo"));
    doc.push(para);

    let (html, _) = roundtrip(&doc);
    assert_eq!(html, "<p>one<br />two</p>");
}

#[test]
fn empty_document_converts_to_nothing() {
    let mut doc = DocumentModel::new();
    let mut para = Paragraph::default();
    para.push_run(Run::default());
    doc.push(para);

    let (html, props) = roundtrip(&doc);
    assert_eq!(html, "");
    assert_eq!(props, Some(CoreProperties::default()));
}

//! Clickable hyperlinks inside a paragraph

use docbridge_ooxml::{DocumentModel, HyperlinkRun, Paragraph};

/// Relate `url` as an external target and append a styled hyperlink run
///
/// The URL is recorded verbatim. Empty display text falls back to the URL.
pub fn emit_hyperlink(
    doc: &mut DocumentModel,
    paragraph: &mut Paragraph,
    url: &str,
    text: &str,
    color: &str,
) {
    let rel_id = doc.relate_hyperlink(url);
    let text = if text.is_empty() { url } else { text };
    paragraph.push_hyperlink(HyperlinkRun {
        rel_id,
        text: text.to_string(),
        color: color.to_string(),
    });
}

//! DOCX to HTML conversion
//!
//! Produces body content for the editor: headings, paragraphs, nested
//! bulleted and numbered lists, bold/italic runs, hyperlinks, line breaks
//! and tables. Anything else is reduced to its text.

use tracing::{debug, warn};

use crate::archive::OoxmlArchive;
use crate::document::{Block, Document, Hyperlink, Paragraph, ParagraphChild, Run, Table};
use crate::error::Result;
use crate::model::{CoreProperties, MAX_LIST_LEVEL};
use crate::numbering::Numbering;
use crate::relationships::Relationships;
use crate::styles::StyleSheet;

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// List membership of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListItem {
    ordered: bool,
    level: usize,
}

/// Renders a parsed document to HTML using its styles, numbering and links
#[derive(Debug, Default)]
pub struct HtmlConverter {
    styles: StyleSheet,
    numbering: Numbering,
    relationships: Relationships,
    /// Open lists, outermost first; `true` for `ol`
    open_lists: Vec<bool>,
    output: String,
}

impl HtmlConverter {
    /// Create a converter from already-parsed parts
    pub fn new(styles: StyleSheet, numbering: Numbering, relationships: Relationships) -> Self {
        Self {
            styles,
            numbering,
            relationships,
            open_lists: Vec::new(),
            output: String::new(),
        }
    }

    /// Create a converter for a package
    ///
    /// Unreadable auxiliary parts (styles, numbering, relationships) are
    /// replaced by empty definitions; the document still converts.
    pub fn from_archive(archive: &OoxmlArchive) -> Self {
        let styles = archive
            .styles_xml()
            .map(StyleSheet::parse)
            .transpose()
            .unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable styles part");
                None
            })
            .unwrap_or_default();
        let numbering = archive
            .numbering_xml()
            .map(Numbering::parse)
            .transpose()
            .unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable numbering part");
                None
            })
            .unwrap_or_default();
        let relationships = archive
            .document_rels_xml()
            .map(Relationships::parse)
            .transpose()
            .unwrap_or_else(|e| {
                warn!(error = %e, "ignoring unreadable document relationships");
                None
            })
            .unwrap_or_default();

        Self::new(styles, numbering, relationships)
    }

    /// Convert a parsed document to HTML
    pub fn convert(mut self, doc: &Document) -> String {
        self.output.clear();

        for block in &doc.blocks {
            match block {
                Block::Paragraph(para) => self.paragraph(para),
                Block::Table(table) => {
                    self.close_lists(0);
                    self.table(table);
                }
            }
        }
        self.close_lists(0);

        debug!(
            blocks = doc.blocks.len(),
            bytes = self.output.len(),
            "converted document to html"
        );
        self.output
    }

    fn paragraph(&mut self, para: &Paragraph) {
        if para.is_empty() {
            return;
        }

        let heading = para
            .style_id
            .as_deref()
            .and_then(|id| self.styles.heading_level(id))
            .map(|level| level.min(6));

        match (self.list_item(para), heading) {
            (Some(item), None) => {
                self.open_item(item);
                let content = self.inline_html(para);
                self.output.push_str(&content);
            }
            (_, heading) => {
                self.close_lists(0);
                let tag = match heading {
                    Some(level) => format!("h{}", level),
                    None => "p".to_string(),
                };
                let content = self.inline_html(para);
                self.output.push_str(&format!(
                    "<{}{}>{}</{}>",
                    tag,
                    alignment_attr(para.alignment.as_deref()),
                    content,
                    tag
                ));
            }
        }
    }

    /// Decide whether a paragraph is a list item, and of which kind
    fn list_item(&self, para: &Paragraph) -> Option<ListItem> {
        let level = para
            .numbering
            .as_ref()
            .map(|n| n.ilvl.min(MAX_LIST_LEVEL))
            .unwrap_or(0);

        let explicit = para
            .numbering
            .as_ref()
            .map(|n| n.num_id.as_str())
            .filter(|id| !id.is_empty());
        // numId 0 explicitly removes numbering
        if explicit == Some("0") {
            return None;
        }

        let style_id = para.style_id.as_deref();
        let num_id = explicit.or_else(|| style_id.and_then(|id| self.styles.num_id(id)));
        if let Some(num_id) = num_id {
            return Some(ListItem {
                ordered: self.numbering.is_ordered(num_id, level),
                level: level as usize,
            });
        }

        let name = style_id.map(|id| self.styles.name(id).to_lowercase())?;
        let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.starts_with("listbullet") {
            Some(ListItem {
                ordered: false,
                level: 0,
            })
        } else if compact.starts_with("listnumber") {
            Some(ListItem {
                ordered: true,
                level: 0,
            })
        } else {
            None
        }
    }

    /// Open the `li` for an item, opening or closing lists to reach its level
    fn open_item(&mut self, item: ListItem) {
        let depth = item.level + 1;
        self.close_lists(depth);

        if self.open_lists.len() == depth && self.open_lists.last() != Some(&item.ordered) {
            self.close_lists(depth - 1);
        }

        if self.open_lists.len() == depth {
            self.output.push_str("</li><li>");
            return;
        }

        while self.open_lists.len() < depth {
            self.output
                .push_str(if item.ordered { "<ol><li>" } else { "<ul><li>" });
            self.open_lists.push(item.ordered);
        }
    }

    /// Close open lists until at most `depth` remain
    fn close_lists(&mut self, depth: usize) {
        while self.open_lists.len() > depth {
            if let Some(ordered) = self.open_lists.pop() {
                self.output
                    .push_str(if ordered { "</li></ol>" } else { "</li></ul>" });
            }
        }
    }

    fn table(&mut self, table: &Table) {
        self.output.push_str("<table>");
        for row in &table.rows {
            self.output.push_str("<tr>");
            for cell in &row.cells {
                self.output.push_str("<td>");
                for para in cell.paragraphs.iter().filter(|p| !p.is_empty()) {
                    let content = self.inline_html(para);
                    self.output.push_str(&format!("<p>{}</p>", content));
                }
                self.output.push_str("</td>");
            }
            self.output.push_str("</tr>");
        }
        self.output.push_str("</table>");
    }

    fn inline_html(&self, para: &Paragraph) -> String {
        let mut html = String::new();
        let mut pending: Vec<Run> = Vec::new();
        for child in &para.children {
            match child {
                ParagraphChild::Run(run) => pending.push(run.clone()),
                ParagraphChild::Hyperlink(link) => {
                    html.push_str(&runs_html(&pending));
                    pending.clear();
                    html.push_str(&self.hyperlink_html(link));
                }
            }
        }
        html.push_str(&runs_html(&pending));
        html
    }

    fn hyperlink_html(&self, link: &Hyperlink) -> String {
        let inner = runs_html(&link.runs);
        let href = match (&link.id, &link.anchor) {
            (Some(id), _) => match self.relationships.get(id) {
                Some(target) => Some(target.to_string()),
                None => {
                    warn!(rel_id = %id, "hyperlink relationship not found");
                    None
                }
            },
            (None, Some(anchor)) => Some(format!("#{}", anchor)),
            (None, None) => None,
        };

        match href {
            Some(href) => format!("<a href=\"{}\">{}</a>", escape_html(&href), inner),
            None => inner,
        }
    }
}

/// Convert a package's main document to HTML body content
pub fn docx_to_html(archive: &OoxmlArchive) -> Result<String> {
    let document = Document::parse(archive.document_xml()?)?;
    Ok(HtmlConverter::from_archive(archive).convert(&document))
}

/// Read the core properties of a package, if present and well-formed
pub fn read_core_properties(archive: &OoxmlArchive) -> Option<CoreProperties> {
    let xml = archive.core_xml()?;
    match CoreProperties::parse(xml) {
        Ok(props) => Some(props),
        Err(e) => {
            debug!(error = %e, "core properties unreadable");
            None
        }
    }
}

/// Render runs, joining neighbours the producer split with equal formatting
fn runs_html(runs: &[Run]) -> String {
    let mut html = String::new();
    let mut iter = runs.iter().peekable();
    while let Some(first) = iter.next() {
        let mut text = first.text.clone();
        while let Some(next) = iter.next_if(|r| r.bold == first.bold && r.italic == first.italic) {
            text.push_str(&next.text);
        }

        let mut piece = escape_html(&text).replace('\n', "<br />");
        if first.italic {
            piece = format!("<em>{}</em>", piece);
        }
        if first.bold {
            piece = format!("<strong>{}</strong>", piece);
        }
        html.push_str(&piece);
    }
    html
}

fn alignment_attr(jc: Option<&str>) -> &'static str {
    match jc {
        Some("center") => " style=\"text-align:center\"",
        Some("right") | Some("end") => " style=\"text-align:right\"",
        Some("both") | Some("distribute") => " style=\"text-align:justify\"",
        _ => "",
    }
}

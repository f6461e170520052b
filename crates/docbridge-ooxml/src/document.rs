//! Document content parsing (word/document.xml)
//!
//! This module parses the main document content and extracts
//! paragraphs and tables, the block-level elements the importer renders.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::xml::{get_attr_local, is_toggle_on};

/// A parsed Word document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Document body blocks
    pub blocks: Vec<Block>,
}

/// Block-level elements
#[derive(Debug, Clone)]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A paragraph with its content and style
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// Style ID (references styles.xml)
    pub style_id: Option<String>,
    /// Numbering info (for list items)
    pub numbering: Option<NumberingRef>,
    /// Alignment from `w:jc`
    pub alignment: Option<String>,
    /// Children (runs and hyperlinks)
    pub children: Vec<ParagraphChild>,
}

/// Child elements of a paragraph
#[derive(Debug, Clone)]
pub enum ParagraphChild {
    /// A text run
    Run(Run),
    /// A hyperlink
    Hyperlink(Hyperlink),
}

/// A hyperlink with its target and content
#[derive(Debug, Clone, Default)]
pub struct Hyperlink {
    /// Relationship ID for external URLs (r:id)
    pub id: Option<String>,
    /// Internal anchor name (w:anchor)
    pub anchor: Option<String>,
    /// Child runs inside the hyperlink
    pub runs: Vec<Run>,
}

/// A text run with formatting
///
/// Line breaks are stored as `'\n'` and tabs as `'\t'`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    /// The text content
    pub text: String,
    /// Whether the text is bold
    pub bold: bool,
    /// Whether the text is italic
    pub italic: bool,
}

/// Reference to numbering definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingRef {
    /// Numbering instance ID
    pub num_id: String,
    /// Indent level (0-based)
    pub ilvl: u32,
}

/// A table
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
}

/// A table row
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
}

/// A table cell
#[derive(Debug, Clone, Default)]
pub struct TableCell {
    /// Paragraphs in this cell
    pub paragraphs: Vec<Paragraph>,
}

/// Parser state that is not tied to one element
#[derive(Default)]
struct ParseState {
    in_body: bool,
    in_paragraph_props: bool,
    in_text_element: bool,
    /// Depth inside `mc:Fallback`, whose content duplicates `mc:Choice`
    fallback_depth: u32,
    /// Depth of nested tables; only the outermost one is structured
    table_depth: u32,
    current_para: Option<Paragraph>,
    current_run: Option<Run>,
    current_hyperlink: Option<Hyperlink>,
    current_table: Option<Table>,
    current_row: Option<TableRow>,
    current_cell: Option<TableCell>,
}

impl ParseState {
    fn start(&mut self, e: &BytesStart, is_empty: bool) {
        let name = e.local_name();
        let name = name.as_ref();

        if name == b"Fallback" {
            if !is_empty {
                self.fallback_depth += 1;
            }
            return;
        }
        if self.fallback_depth > 0 {
            return;
        }

        match name {
            b"body" => self.in_body = true,
            b"p" if self.in_body => self.current_para = Some(Paragraph::default()),
            b"pPr" if self.current_para.is_some() && !is_empty => {
                self.in_paragraph_props = true;
            }
            b"pStyle" if self.in_paragraph_props => {
                if let Some(para) = self.current_para.as_mut() {
                    para.style_id = get_attr_local(e, b"val");
                }
            }
            b"numId" if self.in_paragraph_props => {
                if let (Some(para), Some(val)) =
                    (self.current_para.as_mut(), get_attr_local(e, b"val"))
                {
                    let numbering = para.numbering.get_or_insert(NumberingRef {
                        num_id: String::new(),
                        ilvl: 0,
                    });
                    numbering.num_id = val;
                }
            }
            b"ilvl" if self.in_paragraph_props => {
                if let (Some(para), Some(ilvl)) = (
                    self.current_para.as_mut(),
                    get_attr_local(e, b"val").and_then(|v| v.parse().ok()),
                ) {
                    let numbering = para.numbering.get_or_insert(NumberingRef {
                        num_id: String::new(),
                        ilvl: 0,
                    });
                    numbering.ilvl = ilvl;
                }
            }
            b"jc" if self.in_paragraph_props => {
                if let Some(para) = self.current_para.as_mut() {
                    para.alignment = get_attr_local(e, b"val");
                }
            }
            b"r" if self.current_para.is_some() => self.current_run = Some(Run::default()),
            b"b" => {
                if let Some(run) = self.current_run.as_mut() {
                    run.bold = is_toggle_on(e);
                }
            }
            b"i" => {
                if let Some(run) = self.current_run.as_mut() {
                    run.italic = is_toggle_on(e);
                }
            }
            b"t" if self.current_run.is_some() && !is_empty => self.in_text_element = true,
            b"tab" => {
                if let Some(run) = self.current_run.as_mut() {
                    run.text.push('\t');
                }
            }
            b"br" | b"cr" => {
                let is_page_break = get_attr_local(e, b"type")
                    .map(|t| t != "textWrapping")
                    .unwrap_or(false);
                if let (Some(run), false) = (self.current_run.as_mut(), is_page_break) {
                    run.text.push('\n');
                }
            }
            b"hyperlink" if self.current_para.is_some() => {
                self.current_hyperlink = Some(Hyperlink {
                    id: get_attr_local(e, b"id"),
                    anchor: get_attr_local(e, b"anchor"),
                    runs: Vec::new(),
                });
            }
            b"tbl" if self.in_body => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.current_table = Some(Table::default());
                }
            }
            b"tr" if self.table_depth == 1 => self.current_row = Some(TableRow::default()),
            b"tc" if self.table_depth == 1 => self.current_cell = Some(TableCell::default()),
            _ => {}
        }
    }

    fn end(&mut self, local: &[u8], blocks: &mut Vec<Block>) {
        if local == b"Fallback" {
            self.fallback_depth = self.fallback_depth.saturating_sub(1);
            return;
        }
        if self.fallback_depth > 0 {
            return;
        }

        match local {
            b"body" => self.in_body = false,
            b"pPr" => self.in_paragraph_props = false,
            b"t" => self.in_text_element = false,
            b"r" => {
                if let Some(run) = self.current_run.take() {
                    if !run.text.is_empty() {
                        if let Some(hyperlink) = self.current_hyperlink.as_mut() {
                            hyperlink.runs.push(run);
                        } else if let Some(para) = self.current_para.as_mut() {
                            para.children.push(ParagraphChild::Run(run));
                        }
                    }
                }
            }
            b"hyperlink" => {
                if let (Some(hyperlink), Some(para)) =
                    (self.current_hyperlink.take(), self.current_para.as_mut())
                {
                    para.children.push(ParagraphChild::Hyperlink(hyperlink));
                }
            }
            b"p" => {
                if let Some(para) = self.current_para.take() {
                    if let Some(cell) = self.current_cell.as_mut() {
                        cell.paragraphs.push(para);
                    } else if self.table_depth == 0 {
                        blocks.push(Block::Paragraph(para));
                    }
                }
            }
            b"tc" if self.table_depth == 1 => {
                if let (Some(cell), Some(row)) =
                    (self.current_cell.take(), self.current_row.as_mut())
                {
                    row.cells.push(cell);
                }
            }
            b"tr" if self.table_depth == 1 => {
                if let (Some(row), Some(table)) =
                    (self.current_row.take(), self.current_table.as_mut())
                {
                    table.rows.push(row);
                }
            }
            b"tbl" if self.table_depth > 0 => {
                self.table_depth -= 1;
                if self.table_depth == 0 {
                    if let Some(table) = self.current_table.take() {
                        blocks.push(Block::Table(table));
                    }
                }
            }
            _ => {}
        }
    }
}

impl Document {
    /// Parse a document from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        // Whitespace inside runs is content
        reader.config_mut().trim_text(false);

        let mut blocks = Vec::new();
        let mut state = ParseState::default();
        let mut saw_document = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"document" {
                        saw_document = true;
                    }
                    state.start(e, false);
                }
                Ok(Event::Empty(ref e)) => {
                    state.start(e, true);
                    // A self-closing element is also its own end
                    match e.local_name().as_ref() {
                        b"p" | b"r" | b"hyperlink" | b"tc" => {
                            state.end(e.local_name().as_ref(), &mut blocks)
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) => state.end(e.local_name().as_ref(), &mut blocks),
                Ok(Event::Text(ref e)) => {
                    if state.in_text_element && state.fallback_depth == 0 {
                        if let Some(run) = state.current_run.as_mut() {
                            run.text.push_str(&e.unescape().unwrap_or_default());
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        if !saw_document {
            return Err(OoxmlError::InvalidStructure(
                "main document part has no w:document element".to_string(),
            ));
        }

        Ok(Document { blocks })
    }

    /// Get all paragraphs (flattening tables)
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().flat_map(|block| match block {
            Block::Paragraph(p) => vec![p].into_iter(),
            Block::Table(t) => t
                .rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .flat_map(|c| c.paragraphs.iter())
                .collect::<Vec<_>>()
                .into_iter(),
        })
    }

    /// Plain text of the whole document, one line per paragraph
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Paragraph {
    /// Concatenated text of all runs, including hyperlink runs
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                ParagraphChild::Run(run) => text.push_str(&run.text),
                ParagraphChild::Hyperlink(link) => {
                    for run in &link.runs {
                        text.push_str(&run.text);
                    }
                }
            }
        }
        text
    }

    /// Whether the paragraph has no visible text
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<w:body>{}</w:body>
</w:document>"#,
            body
        )
    }

    fn first_paragraph(doc: &Document) -> &Paragraph {
        match &doc.blocks[0] {
            Block::Paragraph(p) => p,
            Block::Table(_) => panic!("expected a paragraph"),
        }
    }

    #[test]
    fn test_parse_simple_paragraph() {
        let xml = wrap(r#"<w:p><w:r><w:t xml:space="preserve">Hello, </w:t></w:r><w:r><w:t>World</w:t></w:r></w:p>"#);
        let doc = Document::parse(xml.as_bytes()).unwrap();

        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(first_paragraph(&doc).plain_text(), "Hello, World");
    }

    #[test]
    fn test_parse_styled_numbered_aligned_paragraph() {
        let xml = wrap(
            r#"<w:p><w:pPr><w:pStyle w:val="ListNumber"/><w:numPr><w:ilvl w:val="2"/><w:numId w:val="7"/></w:numPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Item</w:t></w:r></w:p>"#,
        );
        let doc = Document::parse(xml.as_bytes()).unwrap();
        let para = first_paragraph(&doc);

        assert_eq!(para.style_id.as_deref(), Some("ListNumber"));
        assert_eq!(
            para.numbering,
            Some(NumberingRef {
                num_id: "7".to_string(),
                ilvl: 2
            })
        );
        assert_eq!(para.alignment.as_deref(), Some("center"));
    }

    #[test]
    fn test_parse_run_formatting() {
        let xml = wrap(
            r#"<w:p><w:r><w:rPr><w:b/><w:i w:val="0"/></w:rPr><w:t>bold</w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>it</w:t></w:r></w:p>"#,
        );
        let doc = Document::parse(xml.as_bytes()).unwrap();
        let runs: Vec<&Run> = first_paragraph(&doc)
            .children
            .iter()
            .filter_map(|c| match c {
                ParagraphChild::Run(r) => Some(r),
                _ => None,
            })
            .collect();

        assert!(runs[0].bold && !runs[0].italic);
        assert!(!runs[1].bold && runs[1].italic);
    }

    #[test]
    fn test_parse_breaks_and_tabs() {
        let xml = wrap(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t><w:br w:type="page"/></w:r></w:p>"#,
        );
        let doc = Document::parse(xml.as_bytes()).unwrap();
        assert_eq!(first_paragraph(&doc).plain_text(), "a\tb\nc");
    }

    #[test]
    fn test_parse_hyperlinks() {
        let xml = wrap(
            r##"<w:p><w:hyperlink r:id="rId9"><w:r><w:t>External</w:t></w:r></w:hyperlink><w:hyperlink w:anchor="intro"><w:r><w:t>Internal</w:t></w:r></w:hyperlink></w:p>"##,
        );
        let doc = Document::parse(xml.as_bytes()).unwrap();
        let links: Vec<&Hyperlink> = first_paragraph(&doc)
            .children
            .iter()
            .filter_map(|c| match c {
                ParagraphChild::Hyperlink(h) => Some(h),
                _ => None,
            })
            .collect();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].id.as_deref(), Some("rId9"));
        assert_eq!(links[1].anchor.as_deref(), Some("intro"));
        assert_eq!(links[1].runs[0].text, "Internal");
    }

    #[test]
    fn test_parse_table() {
        let xml = wrap(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>A1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B1</w:t></w:r></w:p></w:tc></w:tr><w:tr><w:tc><w:p/></w:tc></w:tr></w:tbl><w:p><w:r><w:t>After</w:t></w:r></w:p>"#,
        );
        let doc = Document::parse(xml.as_bytes()).unwrap();

        assert_eq!(doc.blocks.len(), 2);
        match &doc.blocks[0] {
            Block::Table(t) => {
                assert_eq!(t.rows.len(), 2);
                assert_eq!(t.rows[0].cells.len(), 2);
                assert_eq!(t.rows[0].cells[1].paragraphs[0].plain_text(), "B1");
                assert_eq!(t.rows[1].cells[0].paragraphs.len(), 1);
            }
            Block::Paragraph(_) => panic!("expected a table"),
        }
        assert_eq!(doc.plain_text(), "A1\nB1\n\nAfter");
    }

    #[test]
    fn test_fallback_content_is_skipped() {
        let xml = wrap(
            r#"<w:p><w:r><mc:AlternateContent xmlns:mc="mc"><mc:Choice Requires="wps"><w:t>choice</w:t></mc:Choice><mc:Fallback><w:t>fallback</w:t></mc:Fallback></mc:AlternateContent></w:r></w:p>"#,
        );
        let doc = Document::parse(xml.as_bytes()).unwrap();
        assert_eq!(first_paragraph(&doc).plain_text(), "choice");
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = Document::parse(wrap("").as_bytes()).unwrap();
        assert!(doc.blocks.is_empty());
    }

    #[test]
    fn test_non_document_xml_is_rejected() {
        let result = Document::parse(b"<html><body/></html>");
        assert!(matches!(result, Err(OoxmlError::InvalidStructure(_))));
    }

    #[test]
    fn test_empty_paragraph_detection() {
        let xml = wrap(r#"<w:p/><w:p><w:r><w:t>  </w:t></w:r></w:p>"#);
        let doc = Document::parse(xml.as_bytes()).unwrap();
        assert_eq!(doc.blocks.len(), 2);
        assert!(doc.paragraphs().all(Paragraph::is_empty));
    }
}

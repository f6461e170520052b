//! HTML to word-processing document rendering
//!
//! The body is walked once, depth first. Each top-level element is
//! classified into a [`BlockKind`] and turned into one or more paragraphs of
//! a [`DocumentModel`].

use docbridge_ooxml::{Alignment, DocumentModel, Paragraph, ParagraphStyle, Run, Twips};
use tracing::debug;

use crate::config::ConvertConfig;
use crate::error::RenderError;
use crate::hyperlink::emit_hyperlink;
use crate::metadata::Metadata;
use crate::node::{parse_body, Element, HtmlNode};
use crate::runs::element_runs;
use crate::style::{RunStyle, TextRun};

/// How a top-level element is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `h1`..`h3`
    Heading(u8),
    Blockquote,
    /// `ul` or `ol`
    List { ordered: bool },
    /// `p` or `div`
    Paragraph,
    /// Any other element, rendered like a paragraph
    Fallback,
}

impl BlockKind {
    /// Classify an element by tag name
    pub fn of(element: &Element) -> Self {
        match element.tag.to_ascii_lowercase().as_str() {
            "h1" => BlockKind::Heading(1),
            "h2" => BlockKind::Heading(2),
            "h3" => BlockKind::Heading(3),
            "blockquote" => BlockKind::Blockquote,
            "ul" => BlockKind::List { ordered: false },
            "ol" => BlockKind::List { ordered: true },
            "p" | "div" => BlockKind::Paragraph,
            _ => BlockKind::Fallback,
        }
    }
}

/// Base run size in points for heading level 1..=3
pub fn heading_size(level: u8) -> Option<u32> {
    match level {
        1 => Some(24),
        2 => Some(18),
        3 => Some(14),
        _ => None,
    }
}

/// Alignment requested by an inline `style` attribute
///
/// The lower-cased attribute is searched for `text-align:center`,
/// `text-align:right` and `text-align:justify`, in that order.
pub fn alignment_from_style(element: &Element) -> Option<Alignment> {
    let style = element.attr("style")?.to_lowercase();
    if style.contains("text-align:center") {
        Some(Alignment::Center)
    } else if style.contains("text-align:right") {
        Some(Alignment::Right)
    } else if style.contains("text-align:justify") {
        Some(Alignment::Justify)
    } else {
        None
    }
}

/// Render an HTML string into a document model
pub fn render_document(
    html: &str,
    metadata: &Metadata,
    config: &ConvertConfig,
) -> Result<DocumentModel, RenderError> {
    let nodes = parse_body(html, config.parser.max_depth)?;

    let mut renderer = Renderer::new(config);
    renderer.doc.page = config.layout.page_setup();
    renderer.doc.core = metadata.to_core();

    if !nodes.iter().any(|node| node.as_element().is_some()) {
        renderer.doc.push(Paragraph::default());
    }

    for node in &nodes {
        match node {
            HtmlNode::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    renderer.push_text_paragraph(text, None);
                }
            }
            HtmlNode::Element(element) => renderer.render_block(element)?,
        }
    }

    debug!("Rendered {} paragraphs", renderer.doc.len());
    Ok(renderer.doc)
}

/// Accumulates paragraphs for one conversion
pub(crate) struct Renderer<'a> {
    pub(crate) doc: DocumentModel,
    pub(crate) config: &'a ConvertConfig,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(config: &'a ConvertConfig) -> Self {
        Self {
            doc: DocumentModel::new(),
            config,
        }
    }

    /// Render one top-level element
    pub(crate) fn render_block(&mut self, element: &Element) -> Result<(), RenderError> {
        let kind = BlockKind::of(element);
        debug!("<{}> rendered as {:?}", element.tag, kind);

        match kind {
            BlockKind::Heading(level) => {
                let mut paragraph = Paragraph::with_style(ParagraphStyle::Heading(level));
                paragraph.alignment = alignment_from_style(element);
                let runs = element_runs(element, RunStyle::sized(heading_size(level)));
                self.populate(&mut paragraph, runs);
                self.doc.push(paragraph);
            }
            BlockKind::Blockquote => self.render_blockquote(element),
            BlockKind::List { ordered } => self.render_list(element, ordered, 1)?,
            BlockKind::Paragraph | BlockKind::Fallback => {
                let mut paragraph = Paragraph::default();
                paragraph.alignment = alignment_from_style(element);
                let runs = element_runs(element, RunStyle::default());
                self.populate(&mut paragraph, runs);
                self.doc.push(paragraph);
            }
        }
        Ok(())
    }

    fn render_blockquote(&mut self, element: &Element) {
        let indent = Some(Twips::from_inches(self.config.layout.blockquote_indent_in));

        for child in &element.children {
            match child {
                HtmlNode::Text(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        self.push_text_paragraph(text, indent);
                    }
                }
                HtmlNode::Element(inner) => {
                    let mut paragraph = Paragraph::default();
                    paragraph.indent_left = indent;
                    let runs = element_runs(inner, RunStyle::default());
                    self.populate(&mut paragraph, runs);
                    self.doc.push(paragraph);
                }
            }
        }
    }

    fn push_text_paragraph(&mut self, text: &str, indent_left: Option<Twips>) {
        let mut paragraph = Paragraph::default();
        paragraph.indent_left = indent_left;
        paragraph.push_run(Run::text(text));
        self.doc.push(paragraph);
    }

    /// Append runs to a paragraph; a paragraph without runs gets one empty run
    pub(crate) fn populate(&mut self, paragraph: &mut Paragraph, runs: Vec<TextRun>) {
        if runs.is_empty() {
            paragraph.push_run(Run::default());
            return;
        }

        for run in runs {
            match run.link {
                Some(url) => {
                    emit_hyperlink(
                        &mut self.doc,
                        paragraph,
                        &url,
                        &run.text,
                        &self.config.links.color,
                    );
                }
                None => paragraph.push_run(Run {
                    text: run.text,
                    bold: run.style.bold,
                    italic: run.style.italic,
                    size_pt: run.style.size_pt,
                }),
            }
        }
    }
}

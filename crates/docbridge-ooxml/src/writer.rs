//! DOCX generation from a [`DocumentModel`]
//!
//! Every part of the package is produced from scratch; no template is read.
//! Run formatting is written inline so the output renders the same in
//! editors that ignore style inheritance.

use tracing::debug;

use crate::archive::{
    OoxmlArchive, CONTENT_TYPES_PART, CORE_PROPS_PART, DOCUMENT_PART, DOCUMENT_RELS_PART,
    NUMBERING_PART, STYLES_PART,
};
use crate::error::Result;
use crate::model::{
    DocumentModel, HyperlinkRun, Paragraph, ParagraphChild, ParagraphStyle, Run, MAX_LIST_LEVEL,
};
use crate::relationships::Relationships;
use crate::xml::escape_xml;

/// Package-level relationships part
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";
/// Extended (application) properties part
pub const APP_PROPS_PART: &str = "docProps/app.xml";
/// Document settings part
pub const SETTINGS_PART: &str = "word/settings.xml";

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Serializes a document model into DOCX bytes
#[derive(Debug, Default)]
pub struct DocxWriter {
    /// Output buffer for `word/document.xml`
    output: String,
}

impl DocxWriter {
    /// Create a new writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a document to DOCX bytes
    pub fn write(doc: &DocumentModel) -> Result<Vec<u8>> {
        let archive = DocxWriter::new().build_archive(doc);
        archive.to_bytes()
    }

    /// Assemble all package parts for a document
    pub fn build_archive(mut self, doc: &DocumentModel) -> OoxmlArchive {
        let mut archive = OoxmlArchive::new();

        archive.set_string(CONTENT_TYPES_PART, content_types_xml());
        archive.set_string(PACKAGE_RELS_PART, package_rels_xml());
        archive.set_string(CORE_PROPS_PART, doc.core.to_xml());
        archive.set_string(APP_PROPS_PART, app_xml());
        archive.set_string(DOCUMENT_PART, self.generate_document_xml(doc));
        archive.set_string(STYLES_PART, styles_xml());
        archive.set_string(NUMBERING_PART, numbering_xml());
        archive.set_string(SETTINGS_PART, settings_xml());
        archive.set_string(DOCUMENT_RELS_PART, doc.relationships().to_xml());

        debug!(
            paragraphs = doc.len(),
            relationships = doc.relationships().len(),
            "assembled docx package"
        );
        archive
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, doc: &DocumentModel) -> String {
        self.output.clear();

        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            WORDPROCESSING_NS, RELATIONSHIPS_NS
        ));
        self.output.push('\n');
        self.output.push_str("<w:body>\n");

        for paragraph in &doc.paragraphs {
            self.generate_paragraph(paragraph);
        }

        self.generate_section_properties(doc);

        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        std::mem::take(&mut self.output)
    }

    /// Generate XML for a paragraph
    fn generate_paragraph(&mut self, para: &Paragraph) {
        self.output.push_str("<w:p>\n");
        self.generate_paragraph_properties(para);

        for child in &para.children {
            match child {
                ParagraphChild::Run(run) => self.generate_run(run),
                ParagraphChild::Hyperlink(link) => self.generate_hyperlink(link),
            }
        }

        self.output.push_str("</w:p>\n");
    }

    /// Generate `w:pPr`, children in schema order
    fn generate_paragraph_properties(&mut self, para: &Paragraph) {
        let style_id = para.style.style_id();
        let numbering = para.style.num_id();
        if style_id.is_none()
            && numbering.is_none()
            && para.indent_left.is_none()
            && para.alignment.is_none()
        {
            return;
        }

        self.output.push_str("<w:pPr>\n");
        if let Some(style) = style_id {
            self.output
                .push_str(&format!("<w:pStyle w:val=\"{}\"/>\n", escape_xml(&style)));
        }
        if let Some(num_id) = numbering {
            self.output.push_str("<w:numPr>\n");
            self.output.push_str(&format!(
                "<w:ilvl w:val=\"{}\"/>\n",
                para.list_level.unwrap_or(0).min(MAX_LIST_LEVEL)
            ));
            self.output
                .push_str(&format!("<w:numId w:val=\"{}\"/>\n", num_id));
            self.output.push_str("</w:numPr>\n");
        }
        if let Some(indent) = para.indent_left {
            self.output
                .push_str(&format!("<w:ind w:left=\"{}\"/>\n", indent.0));
        }
        if let Some(alignment) = para.alignment {
            self.output
                .push_str(&format!("<w:jc w:val=\"{}\"/>\n", alignment.as_jc()));
        }
        self.output.push_str("</w:pPr>\n");
    }

    /// Generate XML for a formatted run
    fn generate_run(&mut self, run: &Run) {
        if run.text.is_empty() && !run.bold && !run.italic && run.size_pt.is_none() {
            self.output.push_str("<w:r/>\n");
            return;
        }

        self.output.push_str("<w:r>\n");
        if run.bold || run.italic || run.size_pt.is_some() {
            self.output.push_str("<w:rPr>\n");
            if run.bold {
                self.output.push_str("<w:b/>\n");
            }
            if run.italic {
                self.output.push_str("<w:i/>\n");
            }
            if let Some(size) = run.size_pt {
                let half_points = size * 2;
                self.output
                    .push_str(&format!("<w:sz w:val=\"{}\"/>\n", half_points));
                self.output
                    .push_str(&format!("<w:szCs w:val=\"{}\"/>\n", half_points));
            }
            self.output.push_str("</w:rPr>\n");
        }
        self.generate_run_text(&run.text);
        self.output.push_str("</w:r>\n");
    }

    /// Generate a hyperlink wrapping one underlined, colored run
    fn generate_hyperlink(&mut self, link: &HyperlinkRun) {
        self.output.push_str(&format!(
            "<w:hyperlink r:id=\"{}\">\n",
            escape_xml(&link.rel_id)
        ));
        self.output.push_str("<w:r>\n");
        self.output.push_str("<w:rPr>\n");
        self.output.push_str("<w:rStyle w:val=\"Hyperlink\"/>\n");
        self.output
            .push_str(&format!("<w:color w:val=\"{}\"/>\n", escape_xml(&link.color)));
        self.output.push_str("<w:u w:val=\"single\"/>\n");
        self.output.push_str("</w:rPr>\n");
        self.generate_run_text(&link.text);
        self.output.push_str("</w:r>\n");
        self.output.push_str("</w:hyperlink>\n");
    }

    /// Generate run content, mapping tabs and line breaks to their elements
    fn generate_run_text(&mut self, text: &str) {
        let mut segment = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\t' => {
                    self.flush_text(&mut segment);
                    self.output.push_str("<w:tab/>\n");
                }
                '\r' | '\n' => {
                    if c == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    self.flush_text(&mut segment);
                    self.output.push_str("<w:br/>\n");
                }
                _ => segment.push(c),
            }
        }
        self.flush_text(&mut segment);
    }

    fn flush_text(&mut self, segment: &mut String) {
        if segment.is_empty() {
            return;
        }
        self.output.push_str(&format!(
            "<w:t xml:space=\"preserve\">{}</w:t>\n",
            escape_xml(segment)
        ));
        segment.clear();
    }

    /// Generate the trailing section properties (page size and margins)
    fn generate_section_properties(&mut self, doc: &DocumentModel) {
        let page = &doc.page;
        self.output.push_str("<w:sectPr>\n");
        self.output.push_str(&format!(
            "<w:pgSz w:w=\"{}\" w:h=\"{}\"/>\n",
            page.width.0, page.height.0
        ));
        self.output.push_str(&format!(
            "<w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" w:header=\"708\" w:footer=\"708\" w:gutter=\"0\"/>\n",
            page.margin_top.0, page.margin_right.0, page.margin_bottom.0, page.margin_left.0
        ));
        self.output.push_str("</w:sectPr>\n");
    }
}

fn content_types_xml() -> String {
    let overrides = [
        (
            DOCUMENT_PART,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            STYLES_PART,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            NUMBERING_PART,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        ),
        (
            SETTINGS_PART,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
        ),
        (
            CORE_PROPS_PART,
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            APP_PROPS_PART,
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];

    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    out.push('\n');
    out.push_str(r#"  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    out.push('\n');
    out.push_str(r#"  <Default Extension="xml" ContentType="application/xml"/>"#);
    out.push('\n');
    for (part, content_type) in overrides {
        out.push_str(&format!(
            r#"  <Override PartName="/{}" ContentType="{}"/>"#,
            part, content_type
        ));
        out.push('\n');
    }
    out.push_str("</Types>");
    out
}

fn package_rels_xml() -> String {
    let mut rels = Relationships::new();
    rels.add(DOCUMENT_PART, Relationships::TYPE_OFFICE_DOCUMENT);
    rels.add(CORE_PROPS_PART, Relationships::TYPE_CORE_PROPERTIES);
    rels.add(APP_PROPS_PART, Relationships::TYPE_EXTENDED_PROPERTIES);
    rels.to_xml()
}

fn app_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <Application>docbridge {}</Application>
</Properties>"#,
        crate::VERSION
    )
}

fn settings_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:settings xmlns:w="{}">
  <w:defaultTabStop w:val="720"/>
  <w:compat>
    <w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/>
  </w:compat>
</w:settings>"#,
        WORDPROCESSING_NS
    )
}

fn styles_xml() -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, WORDPROCESSING_NS));
    out.push('\n');
    out.push_str(
        r#"  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
"#,
    );

    for (level, size_pt) in [(1u8, 24u32), (2, 18), (3, 14)] {
        let style = ParagraphStyle::Heading(level);
        out.push_str(&format!(
            r#"  <w:style w:type="paragraph" w:styleId="{id}">
    <w:name w:val="{name}"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:uiPriority w:val="9"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{outline}"/></w:pPr>
    <w:rPr><w:b/><w:sz w:val="{half}"/><w:szCs w:val="{half}"/></w:rPr>
  </w:style>
"#,
            id = style.style_id().unwrap_or_default(),
            name = style.name().to_lowercase(),
            outline = level - 1,
            half = size_pt * 2,
        ));
    }

    for style in [ParagraphStyle::ListBullet, ParagraphStyle::ListNumber] {
        out.push_str(&format!(
            r#"  <w:style w:type="paragraph" w:styleId="{id}">
    <w:name w:val="{name}"/>
    <w:basedOn w:val="Normal"/>
    <w:uiPriority w:val="99"/>
    <w:pPr><w:numPr><w:numId w:val="{num}"/></w:numPr><w:contextualSpacing/></w:pPr>
  </w:style>
"#,
            id = style.style_id().unwrap_or_default(),
            name = style.name(),
            num = style.num_id().unwrap_or_default(),
        ));
    }

    out.push_str(
        r#"  <w:style w:type="character" w:styleId="Hyperlink">
    <w:name w:val="Hyperlink"/>
    <w:uiPriority w:val="99"/>
    <w:unhideWhenUsed/>
    <w:rPr><w:color w:val="0000EE"/><w:u w:val="single"/></w:rPr>
  </w:style>
"#,
    );
    out.push_str("</w:styles>");
    out
}

fn numbering_xml() -> String {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(&format!(r#"<w:numbering xmlns:w="{}">"#, WORDPROCESSING_NS));
    out.push('\n');

    for (abstract_id, ordered) in [(1u32, false), (2, true)] {
        out.push_str(&format!(
            "  <w:abstractNum w:abstractNumId=\"{}\">\n",
            abstract_id
        ));
        out.push_str("    <w:multiLevelType w:val=\"hybridMultilevel\"/>\n");
        for ilvl in 0..=MAX_LIST_LEVEL {
            let (format, text) = if ordered {
                ("decimal", format!("%{}.", ilvl + 1))
            } else {
                ("bullet", "\u{2022}".to_string())
            };
            out.push_str(&format!(
                "    <w:lvl w:ilvl=\"{ilvl}\"><w:start w:val=\"1\"/><w:numFmt w:val=\"{format}\"/><w:lvlText w:val=\"{text}\"/><w:lvlJc w:val=\"left\"/><w:pPr><w:ind w:left=\"{left}\" w:hanging=\"360\"/></w:pPr></w:lvl>\n",
                ilvl = ilvl,
                format = format,
                text = text,
                left = 720 * (ilvl + 1),
            ));
        }
        out.push_str("  </w:abstractNum>\n");
    }
    out.push_str("  <w:num w:numId=\"1\"><w:abstractNumId w:val=\"1\"/></w:num>\n");
    out.push_str("  <w:num w:numId=\"2\"><w:abstractNumId w:val=\"2\"/></w:num>\n");
    out.push_str("</w:numbering>");
    out
}

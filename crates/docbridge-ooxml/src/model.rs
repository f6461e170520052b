//! In-memory word-processing document built before serialization
//!
//! A [`DocumentModel`] is an ordered list of paragraphs plus document-level
//! properties. It is filled in one pass and then handed to
//! [`DocxWriter`](crate::writer::DocxWriter); nothing is removed mid-build.

use std::collections::HashMap;

use crate::relationships::Relationships;

/// Length in twentieths of a point, the unit WordprocessingML uses for
/// page geometry and indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Twips(pub u32);

impl Twips {
    /// Twips per inch
    pub const PER_INCH: f64 = 1440.0;

    /// Convert inches, rounding to the nearest twip
    pub fn from_inches(inches: f64) -> Self {
        Twips((inches.max(0.0) * Self::PER_INCH).round() as u32)
    }

    /// The value in inches
    pub fn inches(self) -> f64 {
        f64::from(self.0) / Self::PER_INCH
    }
}

/// Paragraph style applied through `w:pStyle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphStyle {
    /// Body text (no explicit style reference)
    #[default]
    Normal,
    /// Heading 1..=3
    Heading(u8),
    /// "List Bullet"
    ListBullet,
    /// "List Number"
    ListNumber,
}

impl ParagraphStyle {
    /// Style ID written to `w:pStyle`, None for the default style
    pub fn style_id(self) -> Option<String> {
        match self {
            ParagraphStyle::Normal => None,
            ParagraphStyle::Heading(level) => Some(format!("Heading{}", level)),
            ParagraphStyle::ListBullet => Some("ListBullet".to_string()),
            ParagraphStyle::ListNumber => Some("ListNumber".to_string()),
        }
    }

    /// Human readable style name, as shown in a word processor
    pub fn name(self) -> String {
        match self {
            ParagraphStyle::Normal => "Normal".to_string(),
            ParagraphStyle::Heading(level) => format!("Heading {}", level),
            ParagraphStyle::ListBullet => "List Bullet".to_string(),
            ParagraphStyle::ListNumber => "List Number".to_string(),
        }
    }

    /// Numbering instance (`w:numId`) the style's list definition uses
    pub fn num_id(self) -> Option<u32> {
        match self {
            ParagraphStyle::ListBullet => Some(1),
            ParagraphStyle::ListNumber => Some(2),
            _ => None,
        }
    }
}

/// Paragraph alignment (`w:jc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of the `w:jc` element
    pub fn as_jc(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// A formatted text run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    /// The text content; may be empty
    pub text: String,
    /// Whether the text is bold
    pub bold: bool,
    /// Whether the text is italic
    pub italic: bool,
    /// Font size in points, None inherits from the paragraph style
    pub size_pt: Option<u32>,
}

impl Run {
    /// Create an unformatted run
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// A clickable run whose target lives in the relationship table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkRun {
    /// Relationship ID of the external target
    pub rel_id: String,
    /// Display text
    pub text: String,
    /// Link color as RRGGBB
    pub color: String,
}

/// Child elements of a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphChild {
    /// A plain formatted run
    Run(Run),
    /// A hyperlink wrapping one underlined, colored run
    Hyperlink(HyperlinkRun),
}

impl ParagraphChild {
    /// Visible text of this child
    pub fn text(&self) -> &str {
        match self {
            ParagraphChild::Run(run) => &run.text,
            ParagraphChild::Hyperlink(link) => &link.text,
        }
    }
}

/// Deepest list level a numbering definition carries (`w:ilvl` 0 to 8)
pub const MAX_LIST_LEVEL: u32 = 8;

/// A paragraph with its runs and paragraph-level properties
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    /// Paragraph style
    pub style: ParagraphStyle,
    /// Nesting level for list paragraphs (`w:ilvl`)
    pub list_level: Option<u32>,
    /// Left indentation
    pub indent_left: Option<Twips>,
    /// Explicit alignment, None keeps the style default (left)
    pub alignment: Option<Alignment>,
    /// Runs and hyperlinks, in order
    pub children: Vec<ParagraphChild>,
}

impl Paragraph {
    /// Create an empty paragraph with the given style
    pub fn with_style(style: ParagraphStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Append a run
    pub fn push_run(&mut self, run: Run) {
        self.children.push(ParagraphChild::Run(run));
    }

    /// Append a hyperlink run
    pub fn push_hyperlink(&mut self, link: HyperlinkRun) {
        self.children.push(ParagraphChild::Hyperlink(link));
    }

    /// Concatenated visible text
    pub fn text(&self) -> String {
        self.children.iter().map(ParagraphChild::text).collect()
    }

    /// Iterate over the plain runs
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().filter_map(|c| match c {
            ParagraphChild::Run(run) => Some(run),
            ParagraphChild::Hyperlink(_) => None,
        })
    }

    /// Iterate over the hyperlink runs
    pub fn hyperlinks(&self) -> impl Iterator<Item = &HyperlinkRun> {
        self.children.iter().filter_map(|c| match c {
            ParagraphChild::Hyperlink(link) => Some(link),
            ParagraphChild::Run(_) => None,
        })
    }
}

/// Page size and margins of the single section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub width: Twips,
    pub height: Twips,
    pub margin_top: Twips,
    pub margin_right: Twips,
    pub margin_bottom: Twips,
    pub margin_left: Twips,
}

impl PageSetup {
    /// A page with the same margin on every side
    pub fn uniform(width_in: f64, height_in: f64, margin_in: f64) -> Self {
        let margin = Twips::from_inches(margin_in);
        Self {
            width: Twips::from_inches(width_in),
            height: Twips::from_inches(height_in),
            margin_top: margin,
            margin_right: margin,
            margin_bottom: margin,
            margin_left: margin,
        }
    }

    /// A4 portrait with 0.79in margins
    pub fn a4() -> Self {
        Self::uniform(8.27, 11.69, 0.79)
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

/// Dublin Core document properties (`docProps/core.xml`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoreProperties {
    /// `dc:title`
    pub title: Option<String>,
    /// `dc:creator`
    pub creator: Option<String>,
}

/// A word-processing document under construction
#[derive(Debug, Clone)]
pub struct DocumentModel {
    /// Body paragraphs, in order
    pub paragraphs: Vec<Paragraph>,
    /// Document properties
    pub core: CoreProperties,
    /// Section geometry
    pub page: PageSetup,
    relationships: Relationships,
    hyperlink_ids: HashMap<String, String>,
}

impl Default for DocumentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentModel {
    /// Create an empty document
    ///
    /// The fixed parts every generated package carries (styles, numbering,
    /// settings) are related first so hyperlink IDs never collide with them.
    pub fn new() -> Self {
        let mut relationships = Relationships::new();
        relationships.add("styles.xml", Relationships::TYPE_STYLES);
        relationships.add("numbering.xml", Relationships::TYPE_NUMBERING);
        relationships.add("settings.xml", Relationships::TYPE_SETTINGS);

        Self {
            paragraphs: Vec::new(),
            core: CoreProperties::default(),
            page: PageSetup::default(),
            relationships,
            hyperlink_ids: HashMap::new(),
        }
    }

    /// Append a paragraph
    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Register an external hyperlink target and return its relationship ID
    ///
    /// The same URL always maps to the same ID within one document.
    pub fn relate_hyperlink(&mut self, url: &str) -> String {
        if let Some(id) = self.hyperlink_ids.get(url) {
            return id.clone();
        }
        let id = self
            .relationships
            .add_external(url, Relationships::TYPE_HYPERLINK);
        self.hyperlink_ids.insert(url.to_string(), id.clone());
        id
    }

    /// Relationships of the main document part
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Number of paragraphs
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the document has no paragraphs
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

//! Style definitions parsing (word/styles.xml)
//!
//! Only what the importer needs is kept: style names, inheritance, outline
//! levels and list numbering attached to paragraph styles.

use std::collections::{HashMap, HashSet};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::xml::get_attr_local;

/// Collection of styles from a document
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// All styles, keyed by style ID
    styles: HashMap<String, Style>,
    /// Default paragraph style ID
    pub default_paragraph: Option<String>,
}

/// A Word style definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Style ID (used in document references)
    pub id: String,
    /// Display name
    pub name: String,
    /// Style type
    pub style_type: StyleType,
    /// Base style ID (for inheritance)
    pub based_on: Option<String>,
    /// Outline level (0-8, where 0 = Heading 1)
    pub outline_level: Option<u8>,
    /// Numbering instance attached through the style's `w:numPr`
    pub num_id: Option<String>,
}

/// Type of style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    /// Paragraph style
    Paragraph,
    /// Character (run) style
    Character,
    /// Table style
    Table,
    /// Numbering style
    Numbering,
}

impl StyleSheet {
    /// Parse styles from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut stylesheet = StyleSheet::default();
        let mut buf = Vec::new();
        let mut current_style: Option<StyleBuilder> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let name = e.local_name();
                    if name.as_ref() == b"style" {
                        current_style = Some(StyleBuilder {
                            id: get_attr_local(e, b"styleId"),
                            style_type: get_attr_local(e, b"type").map(|t| match t.as_str() {
                                "character" => StyleType::Character,
                                "table" => StyleType::Table,
                                "numbering" => StyleType::Numbering,
                                _ => StyleType::Paragraph,
                            }),
                            is_default: get_attr_local(e, b"default").as_deref() == Some("1"),
                            ..Default::default()
                        });
                    } else if let Some(builder) = current_style.as_mut() {
                        let val = get_attr_local(e, b"val");
                        match name.as_ref() {
                            b"name" => builder.name = val,
                            b"basedOn" => builder.based_on = val,
                            b"outlineLvl" => {
                                builder.outline_level = val.and_then(|v| v.parse().ok())
                            }
                            b"numId" => builder.num_id = val,
                            _ => {}
                        }
                    }
                }
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref() == b"style" {
                        if let Some(builder) = current_style.take() {
                            let is_default = builder.is_default;
                            if let Some(style) = builder.build() {
                                if is_default && style.style_type == StyleType::Paragraph {
                                    stylesheet.default_paragraph = Some(style.id.clone());
                                }
                                stylesheet.styles.insert(style.id.clone(), style);
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(stylesheet)
    }

    /// Get a style by ID
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Number of styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the sheet has no styles
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Get the heading level (1-9) for a paragraph style, if it is a heading
    ///
    /// Resolved through the inheritance chain, by outline level first and by
    /// the conventional names (`heading N`, `Title`) second. Unknown style IDs
    /// are matched by name against the ID itself.
    pub fn heading_level(&self, style_id: &str) -> Option<u8> {
        let chain = self.resolve_chain(style_id);
        if chain.is_empty() {
            return heading_level_from_name(style_id);
        }

        chain
            .iter()
            .find_map(|s| s.outline_level.filter(|l| *l < 9).map(|l| l + 1))
            .or_else(|| {
                chain.iter().find_map(|s| {
                    heading_level_from_name(&s.name).or_else(|| heading_level_from_name(&s.id))
                })
            })
    }

    /// Numbering instance a paragraph style attaches, following inheritance
    pub fn num_id(&self, style_id: &str) -> Option<&str> {
        self.resolve_chain(style_id)
            .into_iter()
            .find_map(|s| s.num_id.as_deref())
    }

    /// Display name of a style, falling back to the ID
    pub fn name<'a>(&'a self, style_id: &'a str) -> &'a str {
        self.get(style_id).map(|s| s.name.as_str()).unwrap_or(style_id)
    }

    /// Resolve the full inheritance chain for a style
    pub fn resolve_chain(&self, style_id: &str) -> Vec<&Style> {
        let mut chain = Vec::new();
        let mut current = style_id;
        let mut seen = HashSet::new();

        while let Some(style) = self.get(current) {
            if !seen.insert(&style.id) {
                break;
            }
            chain.push(style);
            match style.based_on {
                Some(ref base) => current = base,
                None => break,
            }
        }

        chain
    }
}

/// Heading level implied by a style name or ID (`heading 2`, `Heading2`, `Title`)
pub fn heading_level_from_name(name: &str) -> Option<u8> {
    let normalized: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if normalized == "title" {
        return Some(1);
    }
    normalized
        .strip_prefix("heading")
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=9).contains(n))
}

#[derive(Default)]
struct StyleBuilder {
    id: Option<String>,
    name: Option<String>,
    style_type: Option<StyleType>,
    based_on: Option<String>,
    outline_level: Option<u8>,
    num_id: Option<String>,
    is_default: bool,
}

impl StyleBuilder {
    fn build(self) -> Option<Style> {
        let id = self.id?;
        Some(Style {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            style_type: self.style_type.unwrap_or(StyleType::Paragraph),
            based_on: self.based_on,
            outline_level: self.outline_level,
            num_id: self.num_id,
        })
    }
}

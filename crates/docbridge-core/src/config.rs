//! Conversion settings
//!
//! Every section has defaults, so an empty file (or no file) is a valid
//! configuration:
//!
//! ```toml
//! [layout]
//! page_width_in = 8.5
//! page_height_in = 11.0
//!
//! [lists]
//! max_depth = 16
//! ```

use std::path::Path;

use docbridge_ooxml::PageSetup;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level conversion settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConvertConfig {
    /// Page geometry and indentation
    pub layout: LayoutSettings,
    /// List rendering
    pub lists: ListSettings,
    /// HTML parsing limits
    pub parser: ParserSettings,
    /// Hyperlink appearance
    pub links: LinkSettings,
}

impl ConvertConfig {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Load settings from a file if one is given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Page geometry and indentation, in inches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutSettings {
    pub page_width_in: f64,
    pub page_height_in: f64,
    /// Margin applied on all four sides
    pub margin_in: f64,
    /// Left indent of blockquote paragraphs
    pub blockquote_indent_in: f64,
    /// Indent per list level; nested items get `step * (level + 1)`
    pub list_indent_step_in: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_width_in: 8.27,
            page_height_in: 11.69,
            margin_in: 0.79,
            blockquote_indent_in: 0.5,
            list_indent_step_in: 0.3,
        }
    }
}

impl LayoutSettings {
    /// Page setup for the document section
    pub fn page_setup(&self) -> PageSetup {
        PageSetup::uniform(self.page_width_in, self.page_height_in, self.margin_in)
    }
}

/// List rendering settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListSettings {
    /// Class of the span that holds a list item's own text
    pub item_text_class: String,
    /// Attribute marking a list item as a heading (`1`, `2` or `3`)
    pub heading_attribute: String,
    /// Deepest nesting level rendered before failing
    pub max_depth: usize,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            item_text_class: "li-text".to_string(),
            heading_attribute: "data-heading".to_string(),
            max_depth: 32,
        }
    }
}

/// HTML parsing limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserSettings {
    /// Deepest element nesting accepted from the parser
    pub max_depth: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// Hyperlink appearance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinkSettings {
    /// Run color as RRGGBB
    pub color: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            color: "0000EE".to_string(),
        }
    }
}

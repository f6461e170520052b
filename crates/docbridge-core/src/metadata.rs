//! Document title and author

use docbridge_ooxml::CoreProperties;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConvertError;

/// Title used when none is given
pub const DEFAULT_TITLE: &str = "Untitled";
/// Author used when none is given
pub const DEFAULT_AUTHOR: &str = "Anonymous";
/// Longest accepted title, in characters
pub const MAX_TITLE_CHARS: usize = 200;
/// Longest accepted author, in characters
pub const MAX_AUTHOR_CHARS: usize = 120;

/// Title and author of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub title: String,
    pub author: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

impl Metadata {
    /// Create metadata from a title and author
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// Copy with empty fields replaced by their defaults
    pub fn resolved(&self) -> Self {
        Self {
            title: non_empty_or(&self.title, DEFAULT_TITLE),
            author: non_empty_or(&self.author, DEFAULT_AUTHOR),
        }
    }

    /// Reject over-length fields
    pub fn validate(&self) -> Result<(), ConvertError> {
        check_length("title", &self.title, MAX_TITLE_CHARS)?;
        check_length("author", &self.author, MAX_AUTHOR_CHARS)
    }

    /// Metadata from a document's core properties
    ///
    /// Blank fields take the defaults. Returns None when the stored values
    /// are not acceptable metadata.
    pub fn from_core(core: &CoreProperties) -> Option<Self> {
        let metadata = Self::new(
            core.title.as_deref().unwrap_or_default(),
            core.creator.as_deref().unwrap_or_default(),
        )
        .resolved();

        match metadata.validate() {
            Ok(()) => Some(metadata),
            Err(e) => {
                debug!("Ignoring document properties: {}", e);
                None
            }
        }
    }

    /// Core properties written on export
    pub fn to_core(&self) -> CoreProperties {
        let resolved = self.resolved();
        CoreProperties {
            title: Some(resolved.title),
            creator: Some(resolved.author),
        }
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ConvertError> {
    let len = value.chars().count();
    if len > max {
        return Err(ConvertError::Validation(format!(
            "{} must be at most {} characters, got {}",
            field, max, len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let metadata = Metadata::default();
        assert_eq!(metadata.title, "Untitled");
        assert_eq!(metadata.author, "Anonymous");
    }

    #[test]
    fn test_empty_fields_resolve_to_defaults() {
        assert_eq!(Metadata::new("", "").resolved(), Metadata::default());
        assert_eq!(
            Metadata::new("Plan", "").resolved(),
            Metadata::new("Plan", "Anonymous")
        );
    }

    #[test]
    fn test_validate_counts_characters() {
        assert!(Metadata::new("é".repeat(200), "a").validate().is_ok());

        let err = Metadata::new("x".repeat(201), "a").validate().unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert!(err.to_string().contains("title"));

        assert!(Metadata::new("t", "y".repeat(121)).validate().is_err());
    }

    #[test]
    fn test_from_core() {
        let core = CoreProperties {
            title: Some("Report".to_string()),
            creator: None,
        };
        assert_eq!(
            Metadata::from_core(&core),
            Some(Metadata::new("Report", "Anonymous"))
        );

        let too_long = CoreProperties {
            title: Some("x".repeat(300)),
            creator: Some("a".to_string()),
        };
        assert_eq!(Metadata::from_core(&too_long), None);
    }

    #[test]
    fn test_to_core() {
        let core = Metadata::new("", "Ana").to_core();
        assert_eq!(core.title.as_deref(), Some("Untitled"));
        assert_eq!(core.creator.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let metadata: Metadata = serde_json::from_str(r#"{"title":"Notes"}"#).unwrap();
        assert_eq!(metadata, Metadata::new("Notes", "Anonymous"));
    }
}

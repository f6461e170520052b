//! Error types for conversions

use std::path::PathBuf;

use docbridge_ooxml::OoxmlError;
use thiserror::Error;

/// Errors raised while rendering HTML into a document
#[derive(Error, Debug)]
pub enum RenderError {
    /// A list is nested deeper than the configured maximum
    #[error("list nesting level {level} exceeds the maximum of {max}")]
    NestingTooDeep { level: usize, max: usize },

    /// The HTML element tree is deeper than the configured maximum
    #[error("HTML element nesting exceeds the maximum depth of {max}")]
    DocumentTooDeep { max: usize },

    /// The finished document could not be serialized
    #[error("failed to write package: {0}")]
    Package(#[from] OoxmlError),
}

/// How a failed conversion should be reported to a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is unacceptable (wrong file type, empty upload)
    InvalidRequest,
    /// The request is well formed but a field fails validation
    Validation,
    /// The uploaded document could not be read
    Import,
    /// The document could not be produced
    Export,
}

impl ErrorKind {
    /// Conventional HTTP status for this kind of failure
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::InvalidRequest => 400,
            ErrorKind::Validation => 422,
            ErrorKind::Import => 422,
            ErrorKind::Export => 500,
        }
    }
}

/// Errors returned by the conversion facade
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The request was rejected before any conversion started
    #[error("{0}")]
    InvalidRequest(String),

    /// A metadata field is out of bounds
    #[error("{0}")]
    Validation(String),

    /// The uploaded document is not a readable DOCX package
    #[error("Import error: {0}")]
    Import(#[source] OoxmlError),

    /// Rendering or serialization failed
    #[error("Export error: {0}")]
    Export(#[from] RenderError),
}

impl ConvertError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ConvertError::Validation(_) => ErrorKind::Validation,
            ConvertError::Import(_) => ErrorKind::Import,
            ConvertError::Export(_) => ErrorKind::Export,
        }
    }

    /// Conventional HTTP status for the error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

/// Errors loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the configuration schema
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for the conversion facade
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_and_status_codes() {
        let invalid = ConvertError::InvalidRequest("Empty file".to_string());
        assert_eq!(invalid.kind(), ErrorKind::InvalidRequest);
        assert_eq!(invalid.status_code(), 400);
        assert_eq!(invalid.to_string(), "Empty file");

        let validation = ConvertError::Validation("title too long".to_string());
        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(validation.status_code(), 422);

        let import = ConvertError::Import(OoxmlError::MissingFile("word/document.xml".into()));
        assert_eq!(import.status_code(), 422);
        assert!(import.to_string().starts_with("Import error: "));

        let export = ConvertError::from(RenderError::NestingTooDeep { level: 33, max: 32 });
        assert_eq!(export.status_code(), 500);
        assert_eq!(
            export.to_string(),
            "Export error: list nesting level 33 exceeds the maximum of 32"
        );
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Table extraction interface for transcript documents.
//!
//! Provides the [`TableExtractor`] trait implemented once per
//! [`DocumentFormat`], and the [`ExtractError`] type every extractor
//! reports through.

use std::path::Path;

use credit_audit_transcript_models::RawTable;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Errors that can occur while extracting tables from a document.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The bytes are not a valid document of the claimed format.
    #[error("Failed to parse {format} document: {message}")]
    DocumentParse {
        /// The format the bytes were parsed as.
        format: DocumentFormat,
        /// What went wrong.
        message: String,
    },

    /// The file name does not name a supported format.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

impl ExtractError {
    /// Builds a [`ExtractError::DocumentParse`] for `format`.
    #[must_use]
    pub fn parse(format: DocumentFormat, message: impl Into<String>) -> Self {
        Self::DocumentParse {
            format,
            message: message.into(),
        }
    }
}

/// Supported transcript document formats.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentFormat {
    /// Office Open XML word-processor document (`.docx`)
    Docx,
    /// Portable Document Format (`.pdf`)
    Pdf,
}

impl DocumentFormat {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Docx, Self::Pdf]
    }

    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }

    /// Selects a format from a file name's extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnsupportedFormat`] if the extension is
    /// missing or names neither format.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ExtractError::UnsupportedFormat(filename.to_owned()))?;

        Self::all()
            .iter()
            .copied()
            .find(|f| f.extension() == extension)
            .ok_or_else(|| ExtractError::UnsupportedFormat(filename.to_owned()))
    }
}

/// Extracts raw tables from an in-memory document.
pub trait TableExtractor {
    /// The format this extractor reads.
    fn format(&self) -> DocumentFormat;

    /// Extracts every course table from `bytes`, in document order.
    ///
    /// An empty list means the document parsed but held no tables; it is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::DocumentParse`] if `bytes` is not a valid
    /// document of this extractor's format.
    fn extract(&self, bytes: &[u8]) -> Result<Vec<RawTable>, ExtractError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_format_by_extension() {
        assert_eq!(
            DocumentFormat::from_filename("transcript.docx").unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_filename("成績單.PDF").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_filename("/tmp/a.b/Transcript.DocX").unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn rejects_unknown_extensions() {
        for name in ["transcript.doc", "transcript.xlsx", "transcript", "pdf", ""] {
            assert!(
                matches!(
                    DocumentFormat::from_filename(name),
                    Err(ExtractError::UnsupportedFormat(_))
                ),
                "{name:?}"
            );
        }
    }

    #[test]
    fn parse_error_message_names_format() {
        let err = ExtractError::parse(DocumentFormat::Pdf, "bad header");
        assert_eq!(err.to_string(), "Failed to parse PDF document: bad header");
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! End-to-end transcript credit audit.
//!
//! Selects an extractor from the document's file name, extracts its tables,
//! and aggregates them into a
//! [`ClassificationResult`](credit_audit_transcript_models::ClassificationResult).
//! [`report`] renders the result and [`export`] writes its course lists as
//! CSV.

pub mod export;
pub mod report;

use std::path::Path;

use credit_audit_docx::DocxExtractor;
use credit_audit_extract::{DocumentFormat, ExtractError, TableExtractor};
use credit_audit_pdf::{PdfError, PdfExtractor};
use credit_audit_transcript_models::ClassificationResult;

/// Errors that can occur while auditing a transcript.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The document could not be read or is of an unsupported format.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The PDF extractor could not be configured.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// Writing a CSV export failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Rendering the JSON report failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for an audit run.
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Replacement for the built-in PDF course line pattern.
    pub line_pattern: Option<String>,
}

/// Builds the extractor for `format`.
///
/// # Errors
///
/// Returns [`AuditError::Pdf`] if a custom line pattern is invalid.
pub fn extractor_for(
    format: DocumentFormat,
    options: &AuditOptions,
) -> Result<Box<dyn TableExtractor>, AuditError> {
    let extractor: Box<dyn TableExtractor> = match format {
        DocumentFormat::Docx => Box::new(DocxExtractor::new()),
        DocumentFormat::Pdf => match options.line_pattern.as_deref() {
            Some(pattern) => Box::new(PdfExtractor::with_line_pattern(pattern)?),
            None => Box::new(PdfExtractor::new()),
        },
    };
    Ok(extractor)
}

/// Audits an in-memory document.
///
/// `filename` only selects the extractor. A document without course tables
/// yields an empty result, not an error. A document that cannot be parsed
/// is returned as [`ExtractError::DocumentParse`] instead of an empty result,
/// so callers can tell a corrupt file from a transcript with no courses.
///
/// # Errors
///
/// * [`ExtractError::UnsupportedFormat`] if `filename` names neither format;
///   nothing is parsed in that case
/// * [`ExtractError::DocumentParse`] if the bytes are not a valid document
/// * [`AuditError::Pdf`] if a custom line pattern is invalid
pub fn audit_document(
    filename: &str,
    bytes: &[u8],
    options: &AuditOptions,
) -> Result<ClassificationResult, AuditError> {
    let format = DocumentFormat::from_filename(filename)?;
    let extractor = extractor_for(format, options)?;

    log::info!(
        "Extracting {} tables from {filename} ({} bytes)",
        extractor.format(),
        bytes.len()
    );
    let tables = extractor.extract(bytes)?;

    Ok(credit_audit_classifier::aggregate(&tables))
}

/// Reads and audits a document on disk.
///
/// # Errors
///
/// Returns [`AuditError::Io`] if the file cannot be read, otherwise as
/// [`audit_document`].
pub fn audit_file(path: &Path, options: &AuditOptions) -> Result<ClassificationResult, AuditError> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Reject the extension before touching the file.
    DocumentFormat::from_filename(&filename)?;

    let bytes = std::fs::read(path)?;
    audit_document(&filename, &bytes, options)
}

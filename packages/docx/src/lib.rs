#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Transcript table extraction from Word documents.
//!
//! A DOCX file is a zip container; the tables live in its
//! `word/document.xml` part. [`DocxExtractor`] reads every top-level table
//! and treats its first row as the header row.

pub mod document;
pub mod table;

use credit_audit_extract::{DocumentFormat, ExtractError, TableExtractor};
use credit_audit_transcript_models::RawTable;

use crate::table::Grid;

/// Errors specific to DOCX extraction.
#[derive(Debug, thiserror::Error)]
pub enum DocxError {
    /// The bytes are not a readable zip container.
    #[error("Invalid DOCX container: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A required part is absent from the container.
    #[error("Missing document part: {0}")]
    MissingPart(&'static str),

    /// The document XML is malformed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Reading a part failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DocxError> for ExtractError {
    fn from(e: DocxError) -> Self {
        Self::parse(DocumentFormat::Docx, e.to_string())
    }
}

/// Extracts transcript tables from DOCX bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Creates a new `DocxExtractor`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TableExtractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract(&self, bytes: &[u8]) -> Result<Vec<RawTable>, ExtractError> {
        Ok(read_tables(bytes)?)
    }
}

fn into_raw_table(mut grid: Grid) -> Option<RawTable> {
    if grid.len() < 2 {
        return None;
    }
    let headers = grid.remove(0);
    Some(RawTable::new(headers, grid))
}

/// Reads every top-level table with at least one data row.
///
/// # Errors
///
/// Returns a [`DocxError`] if the container or its XML cannot be read.
pub fn read_tables(bytes: &[u8]) -> Result<Vec<RawTable>, DocxError> {
    let xml = document::main_document_xml(bytes)?;
    let grids = table::parse_grids(&xml)?;
    let found = grids.len();

    let tables: Vec<RawTable> = grids.into_iter().filter_map(into_raw_table).collect();

    log::info!(
        "Extracted {} DOCX tables ({} skipped without data rows)",
        tables.len(),
        found - tables.len()
    );

    Ok(tables)
}

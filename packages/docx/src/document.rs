//! DOCX container access.

use std::io::{Cursor, Read as _};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::DocxError;

/// Path of the main document part inside the container.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// Reads the main document part out of a DOCX container.
///
/// # Errors
///
/// * [`DocxError::Archive`] if `bytes` is not a zip archive
/// * [`DocxError::MissingPart`] if the archive has no main document part
/// * [`DocxError::Io`] if the part cannot be decompressed as UTF-8 text
pub fn main_document_xml(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let mut part = match archive.by_name(MAIN_DOCUMENT_PART) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Err(DocxError::MissingPart(MAIN_DOCUMENT_PART)),
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;

    log::debug!("Read {} bytes from {MAIN_DOCUMENT_PART}", xml.len());

    Ok(xml)
}

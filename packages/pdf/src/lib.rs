#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Transcript table extraction from PDF documents.
//!
//! Glyphs are pulled out of the PDF with pure-Rust extraction
//! ([`pdf_extract`]), laid out into one text per page by [`layout`], and
//! parsed in two stages:
//!
//! 1. [`text_table`] looks for column-aligned tables on each page and maps
//!    their headers to canonical labels
//! 2. if no page has a table, [`regex_rows`] matches individual course lines
//!    against a [`LineGrammar`](regex_rows::LineGrammar)
//!
//! The primary entry point is [`PdfExtractor`], which implements the
//! [`TableExtractor`] trait.

pub mod layout;
pub mod regex_rows;
pub mod text_table;

use credit_audit_extract::{DocumentFormat, ExtractError, TableExtractor};
use credit_audit_transcript_models::RawTable;

use crate::layout::{Glyph, GlyphCollector};
use crate::regex_rows::LineGrammar;

/// Errors specific to PDF extraction.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// A line pattern failed to compile.
    #[error("Invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),

    /// A line pattern compiled but cannot be used.
    #[error("Invalid line pattern: {0}")]
    Pattern(String),
}

impl From<PdfError> for ExtractError {
    fn from(e: PdfError) -> Self {
        Self::parse(DocumentFormat::Pdf, e.to_string())
    }
}

fn read_glyphs(bytes: &[u8]) -> Result<Vec<Vec<Glyph>>, PdfError> {
    let mut document = pdf_extract::Document::load_mem(bytes)
        .map_err(|e| PdfError::Extraction(format!("failed to load PDF: {e}")))?;

    if document.is_encrypted() {
        document
            .decrypt("")
            .map_err(|e| PdfError::Extraction(format!("failed to decrypt PDF: {e}")))?;
    }

    let mut collector = GlyphCollector::new();
    pdf_extract::output_doc(&document, &mut collector)
        .map_err(|e| PdfError::Extraction(format!("failed to extract text from PDF: {e}")))?;

    Ok(collector.into_pages())
}

/// Extracts the text of every page of a PDF, in page order.
///
/// Each page is laid out by [`layout::render_page`], so column gaps appear as
/// tabs.
///
/// # Errors
///
/// Returns [`PdfError::Extraction`] if the bytes are not a readable PDF,
/// including when the underlying parser panics on them.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, PdfError> {
    let glyph_pages = std::panic::catch_unwind(|| read_glyphs(bytes))
        .map_err(|_| PdfError::Extraction("PDF parser aborted on malformed input".to_owned()))??;

    let pages: Vec<String> = glyph_pages.into_iter().map(layout::render_page).collect();

    log::debug!(
        "Extracted {} pages ({} characters) from PDF",
        pages.len(),
        pages.iter().map(String::len).sum::<usize>()
    );

    Ok(pages)
}

/// Extracts transcript tables from PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    grammar: LineGrammar,
}

impl PdfExtractor {
    /// Creates a `PdfExtractor` using the built-in transcript line layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `PdfExtractor` with a custom fallback line pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`PdfError`] if the pattern is invalid; see
    /// [`LineGrammar::new`].
    pub fn with_line_pattern(pattern: &str) -> Result<Self, PdfError> {
        Ok(Self {
            grammar: LineGrammar::new(pattern)?,
        })
    }

    /// Parses the text of each page into tables.
    ///
    /// Column-aligned tables win; the line grammar only runs when no page
    /// has one. Returns an empty list when neither stage finds anything.
    #[must_use]
    pub fn tables_from_pages<S: AsRef<str>>(&self, pages: &[S]) -> Vec<RawTable> {
        let tables: Vec<RawTable> = pages
            .iter()
            .flat_map(|page| text_table::detect_tables(page.as_ref()))
            .filter_map(text_table::standardize)
            .collect();

        if !tables.is_empty() {
            log::info!("Detected {} column-aligned PDF tables", tables.len());
            return tables;
        }

        log::info!("No PDF tables detected, falling back to line matching");
        self.grammar.extract(pages).into_iter().collect()
    }
}

impl TableExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<Vec<RawTable>, ExtractError> {
        let pages = extract_pages(bytes)?;
        Ok(self.tables_from_pages(&pages))
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use super::*;

    /// Builds a PDF with one Helvetica 12pt text item per `(x, y, text)`.
    fn pdf(pages: &[&[(u32, u32, &str)]]) -> Vec<u8> {
        let kids: Vec<String> = (0..pages.len())
            .map(|i| format!("{} 0 R", 4 + 2 * i))
            .collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_owned(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_owned(),
        ];
        for (i, items) in pages.iter().enumerate() {
            let content: String = items
                .iter()
                .map(|(x, y, text)| format!("BT /F1 12 Tf {x} {y} Td ({text}) Tj ET\n"))
                .collect();
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}endstream",
                content.len()
            ));
        }

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            write!(out, "{} 0 obj\n{body}\nendobj\n", i + 1).unwrap();
        }

        let xref = out.len();
        write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).unwrap();
        for offset in offsets {
            write!(out, "{offset:010} 00000 n \n").unwrap();
        }
        write!(
            out,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
            objects.len() + 1
        )
        .unwrap();

        out.into_bytes()
    }

    #[test]
    fn extracts_column_aligned_tables_from_pdf_bytes() {
        let bytes = pdf(&[
            &[
                (72, 720, "Course"),
                (300, 720, "Credit"),
                (450, 720, "Grade"),
                (72, 700, "Calculus"),
                (300, 700, "3"),
                (450, 700, "B"),
            ],
            &[
                (72, 720, "Course"),
                (300, 720, "Credit"),
                (450, 720, "Grade"),
                (72, 700, "Physics"),
                (300, 700, "3"),
                (450, 700, "A"),
            ],
        ]);

        let pages = extract_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], "Course\tCredit\tGrade\nCalculus\t3\tB");

        let tables = PdfExtractor::new().extract(&bytes).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].headers(), &["科目名稱", "學分", "成績"]);
        assert_eq!(tables[0].rows(), &[vec!["Calculus", "3", "B"]]);
        assert_eq!(tables[1].rows(), &[vec!["Physics", "3", "A"]]);
    }

    #[test]
    fn falls_back_to_line_matching_on_pdf_bytes() {
        let bytes = pdf(&[&[
            (72, 720, "Transcript"),
            (72, 700, "Calculus 3 B"),
            (72, 680, "Physics 3 D"),
        ]]);

        let extractor =
            PdfExtractor::with_line_pattern(r"^(?P<name>\S+) (?P<credit>\d+) (?P<grade>[A-E])$")
                .unwrap();
        let tables = extractor.extract(&bytes).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows().len(), 2);
        assert_eq!(tables[0].rows()[1][2], "Physics");
        assert_eq!(tables[0].rows()[1][4], "D");
    }

    #[test]
    fn prefers_aligned_tables() {
        let pages = ["科目名稱\t學分\t成績\n\
                      大一英文\t2\tA\n\
                      \n\
                      111 上 0272 綜合日語（一）Ｃ 3 B+\n"];
        let tables = PdfExtractor::new().tables_from_pages(&pages);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers(), &["科目名稱", "學分", "成績"]);
        assert_eq!(tables[0].rows(), &[vec!["大一英文", "2", "A"]]);
    }

    #[test]
    fn collects_tables_from_every_page() {
        let pages = [
            "課程名稱    學分數    GPA\n日本史    2    A",
            "Course\tCredit\tGrade\nCalculus\t3\tC\n",
        ];
        let tables = PdfExtractor::new().tables_from_pages(&pages);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].headers(), &["科目名稱", "學分", "成績"]);
        assert_eq!(tables[1].rows()[0][0], "Calculus");
    }

    #[test]
    fn falls_back_to_line_matching() {
        let pages = ["東海大學 歷年成績單\n\
                      111 上 0272 綜合日語（一）Ｃ 3 B+\n\
                      111 上 0280 體育 0 通過\n"];
        let tables = PdfExtractor::new().tables_from_pages(&pages);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers()[2], "科目名稱");
        assert_eq!(tables[0].rows().len(), 2);
        assert!(tables[0].rows()[0][2].contains("綜合日語"));
        assert_eq!(tables[0].rows()[0][3], "3");
        assert_eq!(tables[0].rows()[0][4], "B+");
    }

    #[test]
    fn summary_footer_does_not_block_line_matching() {
        let pages = ["東海大學 歷年成績單\n\
                      111 上 0272 綜合日語（一）Ｃ 3 B+\n\
                      111 下 0273 綜合日語（二）Ｃ 3 A\n\
                      \n\
                      總學分\t128\n\
                      平均成績\t85.2\n"];
        let tables = PdfExtractor::new().tables_from_pages(&pages);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers()[0], "學年度");

        let result = credit_audit_classifier::aggregate(&tables);
        assert_eq!(result.passed.len(), 2);
        assert!(result.failed.is_empty());
        assert!((result.total - 6.0).abs() < 1e-9);
    }

    #[test]
    fn unmatched_text_yields_no_tables() {
        let extractor = PdfExtractor::new();
        assert!(extractor.tables_from_pages::<&str>(&[]).is_empty());
        assert!(extractor.tables_from_pages(&[""]).is_empty());
        assert!(
            extractor
                .tables_from_pages(&["just a letter\nwith no courses\n"])
                .is_empty()
        );
    }

    #[test]
    fn custom_line_pattern_is_used_for_fallback() {
        let extractor =
            PdfExtractor::with_line_pattern(r"^(?P<name>\S+) (?P<credit>\d+) (?P<grade>[A-E])$")
                .unwrap();
        let tables = extractor.tables_from_pages(&["Calculus 3 B\n"]);
        assert_eq!(tables[0].rows()[0][2], "Calculus");
    }

    #[test]
    fn rejects_invalid_pdf_bytes() {
        let inputs: [&[u8]; 3] = [b"", b"PK\x03\x04 this is a zip", b"%PDF-1.4 truncated"];
        for bytes in inputs {
            let err = PdfExtractor::new().extract(bytes).unwrap_err();
            assert!(
                matches!(
                    err,
                    ExtractError::DocumentParse {
                        format: DocumentFormat::Pdf,
                        ..
                    }
                ),
                "{err}"
            );
        }
    }
}

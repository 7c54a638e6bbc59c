//! WordprocessingML table parsing.
//!
//! Walks `word/document.xml` and collects every top-level `w:tbl` as a grid
//! of cell strings. Nested tables are skipped entirely. Horizontally merged
//! cells (`w:gridSpan`) are repeated across the columns they span, and
//! vertically merged continuation cells (`w:vMerge`) repeat the text of the
//! cell above.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::DocxError;

/// Rows of cell strings, header row first.
pub type Grid = Vec<Vec<String>>;

/// Word caps a table at 63 columns.
const MAX_GRID_SPAN: usize = 63;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum VerticalMerge {
    #[default]
    None,
    Restart,
    Continue,
}

#[derive(Debug)]
struct Cell {
    paragraphs: Vec<String>,
    paragraph: String,
    grid_span: usize,
    merge: VerticalMerge,
}

impl Cell {
    const fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            paragraph: String::new(),
            grid_span: 1,
            merge: VerticalMerge::None,
        }
    }

    fn text(mut self) -> String {
        if !self.paragraph.is_empty() {
            self.paragraphs.push(std::mem::take(&mut self.paragraph));
        }
        self.paragraphs.join("\n").trim().to_string()
    }
}

#[derive(Debug, Default)]
struct GridParser {
    depth: usize,
    in_run: bool,
    in_text: bool,
    grids: Vec<Grid>,
    rows: Grid,
    row: Option<Vec<String>>,
    cell: Option<Cell>,
}

impl GridParser {
    fn open(&mut self, e: &BytesStart<'_>) -> Result<(), DocxError> {
        let name = e.local_name();
        if name.as_ref() == b"tbl" {
            self.depth += 1;
            if self.depth == 1 {
                self.rows.clear();
            }
            return Ok(());
        }
        if self.depth != 1 {
            return Ok(());
        }

        match name.as_ref() {
            b"tr" => self.row = Some(Vec::new()),
            b"tc" => self.cell = Some(Cell::new()),
            b"p" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.paragraph.clear();
                }
            }
            b"r" => self.in_run = true,
            b"t" => self.in_text = self.in_run,
            b"tab" if self.in_run => self.push_text("\t"),
            b"br" | b"cr" if self.in_run => self.push_text("\n"),
            b"gridSpan" => {
                let span = attribute(e, b"val")?
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(1)
                    .clamp(1, MAX_GRID_SPAN);
                if let Some(cell) = self.cell.as_mut() {
                    cell.grid_span = span;
                }
            }
            b"vMerge" => {
                let merge = match attribute(e, b"val")?.as_deref() {
                    Some("restart") => VerticalMerge::Restart,
                    _ => VerticalMerge::Continue,
                };
                if let Some(cell) = self.cell.as_mut() {
                    cell.merge = merge;
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        if name == b"tbl" {
            if self.depth == 1 {
                self.grids.push(std::mem::take(&mut self.rows));
            }
            self.depth = self.depth.saturating_sub(1);
            return;
        }
        if self.depth != 1 {
            return;
        }

        match name {
            b"t" => self.in_text = false,
            b"r" => self.in_run = false,
            b"p" => {
                if let Some(cell) = self.cell.as_mut() {
                    let paragraph = std::mem::take(&mut cell.paragraph);
                    cell.paragraphs.push(paragraph);
                }
            }
            b"tc" => self.finish_cell(),
            b"tr" => {
                if let Some(row) = self.row.take() {
                    self.rows.push(row);
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.paragraph.push_str(text);
        }
    }

    fn finish_cell(&mut self) {
        let Some(cell) = self.cell.take() else {
            return;
        };
        let Some(row) = self.row.as_mut() else {
            return;
        };

        let span = cell.grid_span;
        let text = if cell.merge == VerticalMerge::Continue {
            self.rows
                .last()
                .and_then(|above| above.get(row.len()))
                .cloned()
                .unwrap_or_default()
        } else {
            cell.text()
        };

        for _ in 0..span {
            row.push(text.clone());
        }
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, DocxError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Parses every top-level table in a `word/document.xml` body.
///
/// # Errors
///
/// Returns [`DocxError::Xml`] if the XML is malformed.
pub fn parse_grids(xml: &str) -> Result<Vec<Grid>, DocxError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut parser = GridParser::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => parser.open(&e)?,
            Event::Empty(e) => {
                parser.open(&e)?;
                parser.close(e.local_name().as_ref());
            }
            Event::End(e) => parser.close(e.local_name().as_ref()),
            Event::Text(t) if parser.in_text => parser.push_text(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::debug!("Parsed {} top-level tables", parser.grids.len());

    Ok(parser.grids)
}

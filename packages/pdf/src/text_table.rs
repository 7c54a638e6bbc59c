//! Column-aligned table detection in PDF page text.
//!
//! Page text comes from [`layout`](crate::layout), which writes a tab at
//! every column gap. A line is split into cells on tabs or runs of two or
//! more whitespace characters, and a run of consecutive multi-cell lines
//! under a course table header line is taken as a table.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use credit_audit_classifier::ColumnRole;
use credit_audit_transcript_models::RawTable;
use regex::Regex;

/// Rows of cell strings, header row first.
pub type Grid = Vec<Vec<String>>;

/// Column gap: any tab, or two or more whitespace characters.
static CELL_GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\t\s*|\s{2,}").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapses whitespace runs to a single space and trims.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Splits a line into cells at column gaps.
#[must_use]
pub fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    CELL_GAP_RE
        .split(line)
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Returns `true` if `cells` label a course table: one cell names the course
/// and another cell names the credit or grade column.
#[must_use]
pub fn is_header_line(cells: &[String]) -> bool {
    let roles: Vec<Option<ColumnRole>> =
        cells.iter().map(|c| ColumnRole::of_header(c)).collect();
    roles.contains(&Some(ColumnRole::Name))
        && roles
            .iter()
            .any(|role| matches!(role, Some(ColumnRole::Credit | ColumnRole::Grade)))
}

fn accept_candidate(mut run: Grid, tables: &mut Vec<Grid>) {
    let Some(header) = run.iter().position(|cells| is_header_line(cells)) else {
        return;
    };
    run.drain(..header);
    if run.len() < 2 {
        return;
    }

    let width = run[0].len();
    for row in run.iter_mut().skip(1) {
        row.resize(width, String::new());
    }
    tables.push(run);
}

/// Finds column-aligned tables in the text of one page.
///
/// A candidate is a maximal run of consecutive lines that each split into at
/// least two cells. Its header is the first line passing [`is_header_line`];
/// earlier lines are dropped, and the candidate is kept only if at least one
/// data line follows the header. Data lines are padded or truncated to the
/// header width.
#[must_use]
pub fn detect_tables(page: &str) -> Vec<Grid> {
    let mut tables = Vec::new();
    let mut run: Grid = Vec::new();

    for line in page.lines() {
        let cells = split_cells(line);
        if cells.len() >= 2 {
            run.push(cells);
        } else if !run.is_empty() {
            accept_candidate(std::mem::take(&mut run), &mut tables);
        }
    }
    accept_candidate(run, &mut tables);

    tables
}

/// Maps a header label to its canonical role label, or its collapsed text.
#[must_use]
pub fn canonical_header(header: &str) -> String {
    let collapsed = collapse_whitespace(header);
    ColumnRole::of_header(&collapsed)
        .map_or(collapsed, |role| role.canonical_label().to_string())
}

/// Builds a [`RawTable`] with canonical headers from a detected grid.
///
/// A column whose label repeats an earlier one is dropped. Returns `None`
/// when fewer than two columns remain or there are no data rows.
#[must_use]
pub fn standardize(grid: Grid) -> Option<RawTable> {
    let mut rows = grid.into_iter();
    let header = rows.next()?;

    let mut seen = BTreeSet::new();
    let mut keep = Vec::new();
    let mut headers = Vec::new();
    for (i, label) in header.iter().map(|h| canonical_header(h)).enumerate() {
        if seen.insert(label.clone()) {
            keep.push(i);
            headers.push(label);
        }
    }

    if headers.len() < 2 {
        log::debug!("Discarding table with {} distinct column(s)", headers.len());
        return None;
    }

    let rows: Grid = rows
        .map(|row| {
            keep.iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    if rows.is_empty() {
        return None;
    }

    Some(RawTable::new(headers, rows))
}

//! Course name normalization.
//!
//! Produces the comparison key used for dictionary lookups. The key is
//! never displayed; transcripts keep the name as printed.

use regex::Regex;
use std::sync::LazyLock;

/// Bracketed annotations such as `（一）`, `(2)`, `〈遠距〉` or `【英】`.
static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"（.*?）|\(.*?\)|〈.*?〉|【.*?】").expect("valid regex"));

/// Semester markers appended to year-long courses.
static SEMESTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"上學期|下學期").expect("valid regex"));

/// Separators and whitespace.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[：:、，,。．.\-/／—–\s]+").expect("valid regex"));

fn normalize_once(input: &str) -> String {
    let no_brackets = BRACKETED_RE.replace_all(input, "");
    let no_semester = SEMESTER_RE.replace_all(&no_brackets, "");
    SEPARATOR_RE
        .replace_all(&no_semester, "")
        .trim()
        .to_string()
}

/// Normalizes a course name into a dictionary comparison key.
///
/// The pipeline:
/// 1. Strip bracketed spans, contents included
/// 2. Strip `上學期` / `下學期`
/// 3. Strip separator punctuation and all whitespace
///
/// Stripping can bring together text that forms a new match (for example
/// `上-學期`), so the pipeline is repeated until the key stops changing.
#[must_use]
pub fn normalize(input: &str) -> String {
    let mut current = normalize_once(input);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

//! Regex-based course line extraction from PDF text.
//!
//! Used when no column-aligned table is found. Each whitespace-collapsed
//! line is matched against a [`LineGrammar`] with named capture groups, and
//! every matching line becomes one row of a single synthesized table.

use std::sync::LazyLock;

use credit_audit_transcript_models::RawTable;
use regex::Regex;

use crate::PdfError;
use crate::text_table::collapse_whitespace;

/// Course line layout printed by the registrar, e.g.
/// `111 上 0272 綜合日語（一）Ｃ 3 B+`.
pub const TRANSCRIPT_LINE_PATTERN: &str = r"^\s*(?P<year>\d{3})\s*(?P<term>[上下])\s+(?P<code>\S+)\s+(?P<name>.+?)\s+(?P<credit>\d+)\s+(?P<grade>(?:[A-E][+-]?|通過|抵免|未通過))\s*$";

/// Headers of the synthesized table.
pub const HEADERS: [&str; 5] = ["學年度", "選課代號", "科目名稱", "學分", "成績"];

/// Groups every line pattern must define.
pub const REQUIRED_GROUPS: &[&str] = &["name", "credit", "grade"];

static TRANSCRIPT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TRANSCRIPT_LINE_PATTERN).expect("valid regex"));

/// A compiled course line pattern.
#[derive(Debug, Clone)]
pub struct LineGrammar {
    regex: Regex,
}

impl Default for LineGrammar {
    fn default() -> Self {
        Self::transcript()
    }
}

impl LineGrammar {
    /// The built-in registrar transcript layout.
    #[must_use]
    pub fn transcript() -> Self {
        Self {
            regex: TRANSCRIPT_LINE_RE.clone(),
        }
    }

    /// Compiles a custom line pattern.
    ///
    /// # Errors
    ///
    /// * [`PdfError::Regex`] if the pattern fails to compile
    /// * [`PdfError::Pattern`] if it lacks one of [`REQUIRED_GROUPS`]
    pub fn new(pattern: &str) -> Result<Self, PdfError> {
        let regex = Regex::new(pattern)?;

        let group_names: Vec<&str> = regex.capture_names().flatten().collect();
        if let Some(missing) = REQUIRED_GROUPS
            .iter()
            .find(|g| !group_names.contains(*g))
        {
            return Err(PdfError::Pattern(format!(
                "missing named group `{missing}`"
            )));
        }

        Ok(Self { regex })
    }

    /// Matches one line, returning its cells in [`HEADERS`] order.
    #[must_use]
    pub fn match_line(&self, line: &str) -> Option<Vec<String>> {
        let line = collapse_whitespace(line);
        let caps = self.regex.captures(&line)?;
        let group = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default()
        };

        let year_term = [group("year"), group("term")]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Some(vec![
            year_term,
            group("code"),
            group("name"),
            group("credit"),
            group("grade"),
        ])
    }

    /// Extracts every matching line of every page into one table.
    ///
    /// Non-matching lines are skipped. Returns `None` when no line matched.
    #[must_use]
    pub fn extract<S: AsRef<str>>(&self, pages: &[S]) -> Option<RawTable> {
        let rows: Vec<Vec<String>> = pages
            .iter()
            .flat_map(|page| page.as_ref().lines())
            .filter_map(|line| self.match_line(line))
            .collect();

        log::debug!("Line pattern matched {} course rows", rows.len());

        if rows.is_empty() {
            return None;
        }

        let headers = HEADERS.iter().map(|&h| h.to_owned()).collect();
        Some(RawTable::new(headers, rows))
    }
}

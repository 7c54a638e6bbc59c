//! Column role inference for transcript tables.
//!
//! Transcript tables label their columns inconsistently. Each role is found
//! by case-insensitive keyword search over the header labels, and a role
//! whose label appears on several physical columns reads the first
//! non-empty cell among them.

use credit_audit_transcript_models::ResolvedRow;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Header keywords identifying the course name column.
pub const NAME_KEYWORDS: &[&str] = &["科目", "課程", "名稱", "subject", "course"];

/// Header keywords identifying the credit column.
pub const CREDIT_KEYWORDS: &[&str] = &["學分", "credit"];

/// Header keywords identifying the grade column.
pub const GRADE_KEYWORDS: &[&str] = &["成績", "gpa", "grade"];

/// The logical roles a transcript column can play.
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
pub enum ColumnRole {
    /// Course name
    Name,
    /// Credit value
    Credit,
    /// Grade
    Grade,
}

impl ColumnRole {
    /// Returns all variants of this enum, in matching priority order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Name, Self::Credit, Self::Grade]
    }

    /// Header keywords for this role, lower-case.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Name => NAME_KEYWORDS,
            Self::Credit => CREDIT_KEYWORDS,
            Self::Grade => GRADE_KEYWORDS,
        }
    }

    /// Canonical header label for this role.
    #[must_use]
    pub const fn canonical_label(self) -> &'static str {
        match self {
            Self::Name => "科目名稱",
            Self::Credit => "學分",
            Self::Grade => "成績",
        }
    }

    /// Returns `true` if `header` contains one of this role's keywords.
    #[must_use]
    pub fn matches(self, header: &str) -> bool {
        let header = header.to_lowercase();
        self.keywords().iter().any(|k| header.contains(k))
    }

    /// Returns the first role, in priority order, that `header` matches.
    #[must_use]
    pub fn of_header(header: &str) -> Option<Self> {
        Self::all().iter().copied().find(|role| role.matches(header))
    }
}

/// A resolved column: the winning header label and every physical column
/// carrying that same label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    label: String,
    indices: Vec<usize>,
}

impl ColumnRef {
    fn for_header(headers: &[String], index: usize) -> Self {
        let label = headers[index].trim().to_string();
        let indices = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.trim() == label)
            .map(|(i, _)| i)
            .collect();
        Self { label, indices }
    }

    /// The header label, trimmed.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Physical column indices sharing this label, in table order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Reads this column from `row`.
    ///
    /// Returns the first non-empty trimmed cell among the duplicate columns,
    /// or an empty string. Columns past the end of a short row read as
    /// empty.
    #[must_use]
    pub fn pick<'a>(&self, row: &'a [String]) -> &'a str {
        self.indices
            .iter()
            .filter_map(|&i| row.get(i))
            .map(|cell| cell.trim())
            .find(|cell| !cell.is_empty())
            .unwrap_or("")
    }
}

/// Column assignment for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Course name column. Only `None` for a table with no headers.
    pub name: Option<ColumnRef>,
    /// Credit column, if any header matched.
    pub credit: Option<ColumnRef>,
    /// Grade column, if any header matched.
    pub grade: Option<ColumnRef>,
}

impl ResolvedColumns {
    /// Picks name, credit, and grade out of `row`.
    #[must_use]
    pub fn resolve_row(&self, row: &[String]) -> ResolvedRow {
        let pick = |col: Option<&ColumnRef>| {
            col.map(|c| c.pick(row).to_string()).unwrap_or_default()
        };

        ResolvedRow {
            name: pick(self.name.as_ref()),
            raw_credit: pick(self.credit.as_ref()),
            raw_grade: pick(self.grade.as_ref()),
        }
    }
}

fn find_role(headers: &[String], role: ColumnRole) -> Option<ColumnRef> {
    headers
        .iter()
        .position(|h| role.matches(h))
        .map(|i| ColumnRef::for_header(headers, i))
}

/// Infers which columns hold the course name, credit, and grade.
///
/// Each role takes the first header containing one of its keywords. An
/// unmatched name role falls back to the first column; credit and grade
/// have no fallback.
#[must_use]
pub fn resolve_columns(headers: &[String]) -> ResolvedColumns {
    let name = find_role(headers, ColumnRole::Name).or_else(|| {
        if headers.is_empty() {
            None
        } else {
            log::debug!("No name header in {headers:?}, using first column");
            Some(ColumnRef::for_header(headers, 0))
        }
    });

    ResolvedColumns {
        name,
        credit: find_role(headers, ColumnRole::Credit),
        grade: find_role(headers, ColumnRole::Grade),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn resolves_standard_headers() {
        let cols = resolve_columns(&strings(&["科目名稱", "學分", "成績"]));
        assert_eq!(cols.name.unwrap().indices(), &[0]);
        assert_eq!(cols.credit.unwrap().indices(), &[1]);
        assert_eq!(cols.grade.unwrap().indices(), &[2]);
    }

    #[test]
    fn matches_english_headers_case_insensitively() {
        let cols = resolve_columns(&strings(&["No.", "Course Title", "Credits", "GPA"]));
        assert_eq!(cols.name.unwrap().label(), "Course Title");
        assert_eq!(cols.credit.unwrap().indices(), &[2]);
        assert_eq!(cols.grade.unwrap().indices(), &[3]);
    }

    #[test]
    fn first_matching_header_wins() {
        let cols = resolve_columns(&strings(&["學年度", "課程代碼", "科目名稱", "學分"]));
        assert_eq!(cols.name.unwrap().label(), "課程代碼");
    }

    #[test]
    fn name_falls_back_to_first_column() {
        let cols = resolve_columns(&strings(&["欄位一", "欄位二"]));
        assert_eq!(cols.name.unwrap().indices(), &[0]);
        assert!(cols.credit.is_none());
        assert!(cols.grade.is_none());
    }

    #[test]
    fn headerless_table_resolves_nothing() {
        assert_eq!(resolve_columns(&[]), ResolvedColumns::default());
    }

    #[test]
    fn duplicate_headers_pick_first_non_empty() {
        let headers = strings(&["科目名稱", "學分", "科目名稱 ", "成績"]);
        let cols = resolve_columns(&headers);
        assert_eq!(cols.name.as_ref().unwrap().indices(), &[0, 2]);

        let row = strings(&["", "2", "大一英文", "A"]);
        let resolved = cols.resolve_row(&row);
        assert_eq!(resolved.name, "大一英文");
        assert_eq!(resolved.raw_credit, "2");
        assert_eq!(resolved.raw_grade, "A");
    }

    #[test]
    fn duplicates_never_concatenate() {
        let cols = resolve_columns(&strings(&["科目名稱", "科目名稱"]));
        let resolved = cols.resolve_row(&strings(&["日本史", "日本近世近代史"]));
        assert_eq!(resolved.name, "日本史");
    }

    #[test]
    fn short_rows_read_missing_cells_as_empty() {
        let cols = resolve_columns(&strings(&["科目名稱", "學分", "成績"]));
        let resolved = cols.resolve_row(&strings(&["商務日語"]));
        assert_eq!(resolved.name, "商務日語");
        assert_eq!(resolved.raw_credit, "");
        assert_eq!(resolved.raw_grade, "");
    }

    #[test]
    fn role_of_header_uses_priority_order() {
        assert_eq!(ColumnRole::of_header("科目 學分"), Some(ColumnRole::Name));
        assert_eq!(ColumnRole::of_header("Grade"), Some(ColumnRole::Grade));
        assert_eq!(ColumnRole::of_header("備註"), None);
    }
}

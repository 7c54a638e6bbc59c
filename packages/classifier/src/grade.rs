//! Pass/fail evaluation of transcript grade notations.

use regex::Regex;
use std::sync::LazyLock;

/// Non-letter grades that count as passing.
pub const PASSING_TOKENS: &[&str] = &["PASS", "通過", "抵免"];

/// Letter grades A through C with an optional modifier.
static PASSING_LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ABC][+-]?$").expect("valid regex"));

/// Returns `true` when `raw_grade` is a passing grade.
///
/// The grade is trimmed and upper-cased, then must either equal one of
/// [`PASSING_TOKENS`] or be a letter grade from `A` to `C-`. Everything else,
/// including an empty cell, fails.
#[must_use]
pub fn is_passing(raw_grade: &str) -> bool {
    let grade = raw_grade.trim().to_uppercase();
    if grade.is_empty() {
        return false;
    }
    PASSING_TOKENS.contains(&grade.as_str()) || PASSING_LETTER_RE.is_match(&grade)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_grades() {
        for grade in ["A", "A+", "B-", "C", "C-", "通過", "抵免", "PASS"] {
            assert!(is_passing(grade), "{grade:?} should pass");
        }
    }

    #[test]
    fn failing_grades() {
        for grade in ["D", "D-", "E", "F", "X", "", "??"] {
            assert!(!is_passing(grade), "{grade:?} should fail");
        }
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert!(is_passing(" b+ "));
        assert!(is_passing("pass"));
        assert!(is_passing("\t通過\n"));
    }

    #[test]
    fn rejects_near_misses() {
        for grade in ["A++", "AB", "未通過", "C+-", "95", "PASSED"] {
            assert!(!is_passing(grade), "{grade:?} should fail");
        }
    }
}

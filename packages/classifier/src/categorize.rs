//! Course categorization.
//!
//! Dictionaries are consulted before the general-education title pattern,
//! so curated titles that happen to start with a domain token (such as
//! `社會與企業`) keep their elective category.

use std::fmt;
use std::sync::LazyLock;

use credit_audit_transcript_models::{CourseCategory, GeneralEducationDomain};
use regex::Regex;
use serde::Serialize;

use crate::dictionary::dictionary;
use crate::normalize::normalize;

/// General-education titles: a domain token followed by a separator.
static GENERAL_EDUCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(人文|社會|自然)\s*[:：／/\-－]").expect("valid regex"));

/// Which rule decided a course's category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchRule {
    /// The normalized name starts with a dictionary entry.
    Dictionary {
        /// The normalized entry that matched.
        prefix: String,
    },
    /// The title carries a general-education domain tag.
    GeneralEducation {
        /// Domain named by the tag.
        domain: GeneralEducationDomain,
    },
    /// Nothing matched.
    Fallback,
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dictionary { prefix } => write!(f, "dictionary prefix {prefix}"),
            Self::GeneralEducation { domain } => {
                write!(f, "general education ({})", domain.token())
            }
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// A category together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseMatch {
    pub category: CourseCategory,
    pub rule: MatchRule,
}

fn general_education_domain(raw_name: &str) -> Option<GeneralEducationDomain> {
    GENERAL_EDUCATION_RE
        .captures(raw_name.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| GeneralEducationDomain::from_token(m.as_str()))
}

/// Classifies a course name, reporting which rule matched.
///
/// Priority order:
/// 1. Required dictionary
/// 2. Category-I dictionary
/// 3. Category-II dictionary
/// 4. General-education title pattern, counted as required
/// 5. Other
#[must_use]
pub fn classify(raw_name: &str) -> CourseMatch {
    let key = normalize(raw_name);

    if let Some((category, entry)) = dictionary().lookup(&key) {
        return CourseMatch {
            category,
            rule: MatchRule::Dictionary {
                prefix: entry.prefix.clone(),
            },
        };
    }

    if let Some(domain) = general_education_domain(raw_name) {
        return CourseMatch {
            category: CourseCategory::Required,
            rule: MatchRule::GeneralEducation { domain },
        };
    }

    CourseMatch {
        category: CourseCategory::Other,
        rule: MatchRule::Fallback,
    }
}

/// Returns the credit bucket for a course name.
#[must_use]
pub fn categorize(raw_name: &str) -> CourseCategory {
    classify(raw_name).category
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{CATEGORY_I_COURSES, CATEGORY_II_COURSES, REQUIRED_COURSES};

    #[test]
    fn every_dictionary_entry_classifies_to_its_category() {
        for (category, courses) in [
            (CourseCategory::Required, REQUIRED_COURSES),
            (CourseCategory::CategoryI, CATEGORY_I_COURSES),
            (CourseCategory::CategoryIi, CATEGORY_II_COURSES),
        ] {
            for course in courses {
                assert_eq!(categorize(course), category, "{course}");
            }
        }
    }

    #[test]
    fn bracket_annotations_do_not_block_matches() {
        assert_eq!(categorize("綜合日語（一）"), CourseCategory::Required);
        assert_eq!(categorize("商務日語(二)"), CourseCategory::CategoryIi);
        assert_eq!(categorize("日本史【日】上學期"), CourseCategory::CategoryI);
    }

    #[test]
    fn dictionary_runs_before_general_education() {
        assert_eq!(categorize("社會與企業"), CourseCategory::CategoryI);
        assert_eq!(
            classify("社會與企業").rule,
            MatchRule::Dictionary {
                prefix: "社會與企業".to_owned()
            }
        );
    }

    #[test]
    fn general_education_requires_separator() {
        let matched = classify("人文：藝術鑑賞");
        assert_eq!(matched.category, CourseCategory::Required);
        assert_eq!(
            matched.rule,
            MatchRule::GeneralEducation {
                domain: GeneralEducationDomain::Humanities
            }
        );

        assert_eq!(categorize("人文藝術鑑賞"), CourseCategory::Other);
    }

    #[test]
    fn general_education_accepts_every_separator() {
        for name in ["社會:法律與生活", " 自然／天文學", "自然 - 生態", "人文/哲學", "社會－經濟"] {
            assert_eq!(categorize(name), CourseCategory::Required, "{name}");
        }
    }

    #[test]
    fn unknown_courses_are_other() {
        let matched = classify("微積分");
        assert_eq!(matched.category, CourseCategory::Other);
        assert_eq!(matched.rule, MatchRule::Fallback);
        assert_eq!(categorize(""), CourseCategory::Other);
    }

    #[test]
    fn rule_display() {
        assert_eq!(MatchRule::Fallback.to_string(), "fallback");
        assert_eq!(
            MatchRule::GeneralEducation {
                domain: GeneralEducationDomain::Natural
            }
            .to_string(),
            "general education (自然)"
        );
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Transcript table, course record, and credit classification types.
//!
//! Extractors produce [`RawTable`]s from uploaded documents. The classifier
//! turns their rows into [`CourseRecord`]s and sorts passed courses into the
//! four [`CourseCategory`] credit buckets of a [`ClassificationResult`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A table lifted out of a transcript document.
///
/// Headers are passed through exactly as the document had them: they may be
/// synthetic, unrecognisable, or duplicated. Rows are not guaranteed to have
/// the same width as the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates a table from a header row and its data rows.
    #[must_use]
    pub const fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Column header labels in document order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in document order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns `true` when the table has no header labels.
    #[must_use]
    pub const fn is_headerless(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns `true` when the table has no data rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three cell values the classifier needs from one table row.
///
/// `raw_credit` and `raw_grade` are empty when the table had no matching
/// column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRow {
    /// Course name as printed on the transcript.
    pub name: String,
    /// Credit cell text, unparsed.
    pub raw_credit: String,
    /// Grade cell text, unparsed.
    pub raw_grade: String,
}

/// A single attempted course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    /// Course name as printed on the transcript.
    pub name: String,
    /// Credit value. Zero when the transcript cell was not a number.
    pub credit: f64,
    /// Grade as printed on the transcript.
    pub grade: String,
}

impl CourseRecord {
    /// Creates a new course record.
    #[must_use]
    pub fn new(name: impl Into<String>, credit: f64, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credit,
            grade: grade.into(),
        }
    }
}

/// Credit bucket a passed course counts toward.
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
pub enum CourseCategory {
    /// Department-required courses, including general education
    Required,
    /// Category-I electives
    CategoryI,
    /// Category-II electives
    CategoryIi,
    /// Every other passed course
    Other,
}

impl CourseCategory {
    /// Returns all variants of this enum, in classification priority order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Required, Self::CategoryI, Self::CategoryIi, Self::Other]
    }

    /// Human-readable label as used on the degree audit sheet.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Required => "必修",
            Self::CategoryI => "一類選修",
            Self::CategoryIi => "二類選修",
            Self::Other => "其他選修",
        }
    }

    /// Returns `true` for the three elective buckets.
    #[must_use]
    pub const fn is_elective(self) -> bool {
        !matches!(self, Self::Required)
    }
}

/// General-education domain a course title is tagged with.
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
pub enum GeneralEducationDomain {
    /// 人文
    Humanities,
    /// 社會
    Social,
    /// 自然
    Natural,
}

impl GeneralEducationDomain {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Humanities, Self::Social, Self::Natural]
    }

    /// The domain token as it appears at the start of a course title.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Humanities => "人文",
            Self::Social => "社會",
            Self::Natural => "自然",
        }
    }

    /// Looks up a domain by its title token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all().iter().copied().find(|d| d.token() == token)
    }
}

/// Per-domain credit tally for general-education courses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralEducationCredits {
    /// Credits from 人文 courses.
    pub humanities: f64,
    /// Credits from 社會 courses.
    pub social: f64,
    /// Credits from 自然 courses.
    pub natural: f64,
}

impl GeneralEducationCredits {
    /// Adds `credit` to the tally for `domain`.
    pub fn add(&mut self, domain: GeneralEducationDomain, credit: f64) {
        match domain {
            GeneralEducationDomain::Humanities => self.humanities += credit,
            GeneralEducationDomain::Social => self.social += credit,
            GeneralEducationDomain::Natural => self.natural += credit,
        }
    }

    /// Credits tallied for `domain`.
    #[must_use]
    pub const fn get(&self, domain: GeneralEducationDomain) -> f64 {
        match domain {
            GeneralEducationDomain::Humanities => self.humanities,
            GeneralEducationDomain::Social => self.social,
            GeneralEducationDomain::Natural => self.natural,
        }
    }

    /// Sum over all three domains.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.humanities + self.social + self.natural
    }
}

/// Credit totals and course lists for one transcript.
///
/// Every total is the sum of `credit` over the matching passed list. Failed
/// courses never contribute to any total. `passed` holds every course of the
/// four `passed_*` lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Credits of all passed courses.
    pub total: f64,
    /// Credits of passed [`CourseCategory::Required`] courses.
    pub required: f64,
    /// Credits of passed [`CourseCategory::CategoryI`] courses.
    pub category_i: f64,
    /// Credits of passed [`CourseCategory::CategoryIi`] courses.
    pub category_ii: f64,
    /// Credits of passed [`CourseCategory::Other`] courses.
    pub other_elective: f64,
    /// Every passed course, in transcript order.
    pub passed: Vec<CourseRecord>,
    /// Every failed course, in transcript order.
    pub failed: Vec<CourseRecord>,
    /// Passed required courses.
    pub passed_required: Vec<CourseRecord>,
    /// Passed Category-I electives.
    pub passed_i: Vec<CourseRecord>,
    /// Passed Category-II electives.
    pub passed_ii: Vec<CourseRecord>,
    /// Passed courses in no other bucket.
    pub passed_other: Vec<CourseRecord>,
    /// General-education share of `required`, split by domain.
    pub general_education: GeneralEducationCredits,
}

impl ClassificationResult {
    /// Records a passed course in its bucket and in `passed`.
    pub fn add_passed(&mut self, category: CourseCategory, record: CourseRecord) {
        let credit = record.credit;
        self.total += credit;

        let (bucket_total, bucket) = match category {
            CourseCategory::Required => (&mut self.required, &mut self.passed_required),
            CourseCategory::CategoryI => (&mut self.category_i, &mut self.passed_i),
            CourseCategory::CategoryIi => (&mut self.category_ii, &mut self.passed_ii),
            CourseCategory::Other => (&mut self.other_elective, &mut self.passed_other),
        };
        *bucket_total += credit;
        bucket.push(record.clone());
        self.passed.push(record);
    }

    /// Records a failed course.
    pub fn add_failed(&mut self, record: CourseRecord) {
        self.failed.push(record);
    }

    /// Credits earned in `category`.
    #[must_use]
    pub const fn credits_in(&self, category: CourseCategory) -> f64 {
        match category {
            CourseCategory::Required => self.required,
            CourseCategory::CategoryI => self.category_i,
            CourseCategory::CategoryIi => self.category_ii,
            CourseCategory::Other => self.other_elective,
        }
    }

    /// Passed courses in `category`.
    #[must_use]
    pub fn passed_in(&self, category: CourseCategory) -> &[CourseRecord] {
        match category {
            CourseCategory::Required => &self.passed_required,
            CourseCategory::CategoryI => &self.passed_i,
            CourseCategory::CategoryIi => &self.passed_ii,
            CourseCategory::Other => &self.passed_other,
        }
    }

    /// Credits across the three elective buckets.
    #[must_use]
    pub fn elective_total(&self) -> f64 {
        CourseCategory::all()
            .iter()
            .filter(|category| category.is_elective())
            .map(|category| self.credits_in(*category))
            .sum()
    }

    /// Returns `true` when no course, passed or failed, was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passed.is_empty() && self.failed.is_empty()
    }
}

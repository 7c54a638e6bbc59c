#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Transcript credit classification.
//!
//! Turns extracted [`RawTable`](credit_audit_transcript_models::RawTable)s
//! into a [`ClassificationResult`](credit_audit_transcript_models::ClassificationResult):
//!
//! 1. [`columns`] infers the name, credit, and grade columns of each table
//! 2. [`grade`] decides pass or fail
//! 3. [`categorize`] sorts passed courses into credit buckets using the
//!    [`dictionary`] and [`normalize`]d names
//! 4. [`aggregate`] drives the rows through all of the above
//!
//! Nothing here fails: malformed rows degrade to zero credit or a failing
//! grade.

pub mod aggregate;
pub mod categorize;
pub mod columns;
pub mod dictionary;
pub mod grade;
pub mod normalize;

pub use aggregate::aggregate;
pub use categorize::{CourseMatch, MatchRule, categorize, classify};
pub use columns::{ColumnRole, resolve_columns};
pub use grade::is_passing;
pub use normalize::normalize;

//! Text and JSON rendering of a classification result.

use credit_audit_transcript_models::{
    ClassificationResult, CourseCategory, CourseRecord, GeneralEducationCredits,
    GeneralEducationDomain,
};
use serde::Serialize;

use crate::AuditError;
use crate::export::{CourseList, format_credit};

/// Message shown when a document holds no course rows.
pub const NO_DATA_MESSAGE: &str = "No course data found in the document.";

/// Credit totals shown at the top of a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub required: f64,
    pub category_i: f64,
    pub category_ii: f64,
    pub other_elective: f64,
    pub elective_total: f64,
    pub total: f64,
    pub general_education: GeneralEducationCredits,
}

impl From<&ClassificationResult> for Summary {
    fn from(result: &ClassificationResult) -> Self {
        Self {
            required: result.required,
            category_i: result.category_i,
            category_ii: result.category_ii,
            other_elective: result.other_elective,
            elective_total: result.elective_total(),
            total: result.total,
            general_education: result.general_education,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    result: &'a ClassificationResult,
}

fn total_line(label: &str, credit: f64) -> String {
    format!("  {label:<10} {:>6}\n", format_credit(credit))
}

fn course_line(record: &CourseRecord) -> String {
    format!(
        "  {}\t{}\t{}\n",
        record.name,
        format_credit(record.credit),
        record.grade
    )
}

/// Renders the summary and all six course lists as plain text.
#[must_use]
pub fn render_text(result: &ClassificationResult) -> String {
    let summary = Summary::from(result);
    let mut out = String::from("學分統計\n");

    for category in CourseCategory::all() {
        out.push_str(&total_line(category.label(), result.credits_in(*category)));
    }
    out.push_str(&total_line("選修合計", summary.elective_total));
    out.push_str(&total_line("總學分", summary.total));

    if summary.general_education.total() > 0.0 {
        let domains: Vec<String> = GeneralEducationDomain::all()
            .iter()
            .map(|d| {
                format!(
                    "{} {}",
                    d.token(),
                    format_credit(summary.general_education.get(*d))
                )
            })
            .collect();
        out.push_str(&format!("  通識（計入必修）: {}\n", domains.join(" / ")));
    }

    for list in CourseList::ALL {
        let records = list.records(result);
        out.push_str(&format!("\n{} ({})\n", list.title(), records.len()));
        for record in records {
            out.push_str(&course_line(record));
        }
    }

    out
}

/// Renders the summary and full result as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`AuditError::Json`] if serialization fails.
pub fn render_json(result: &ClassificationResult) -> Result<String, AuditError> {
    let report = JsonReport {
        summary: Summary::from(result),
        result,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

//! Credit aggregation over extracted tables.

use credit_audit_transcript_models::{ClassificationResult, CourseRecord, RawTable};

use crate::categorize::{MatchRule, classify};
use crate::columns::resolve_columns;
use crate::grade::is_passing;

/// Parses a credit cell, yielding `0.0` for anything that is not a finite,
/// non-negative number.
#[must_use]
pub fn parse_credit(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|c| c.is_finite() && *c >= 0.0)
        .unwrap_or(0.0)
}

/// Classifies every course row across `tables`.
///
/// Empty and headerless tables are skipped, as are rows whose name cell is
/// empty. Malformed credits count as zero and never abort the run.
#[must_use]
pub fn aggregate(tables: &[RawTable]) -> ClassificationResult {
    let mut result = ClassificationResult::default();

    for (table_index, table) in tables.iter().enumerate() {
        if table.is_empty() || table.is_headerless() {
            log::debug!("Skipping table {table_index}: no headers or rows");
            continue;
        }

        let columns = resolve_columns(table.headers());
        log::debug!(
            "Table {table_index}: name={:?} credit={:?} grade={:?}",
            columns.name.as_ref().map(|c| c.label()),
            columns.credit.as_ref().map(|c| c.label()),
            columns.grade.as_ref().map(|c| c.label()),
        );

        for row in table.rows() {
            let resolved = columns.resolve_row(row);
            if resolved.name.is_empty() {
                continue;
            }

            let record = CourseRecord::new(
                resolved.name,
                parse_credit(&resolved.raw_credit),
                resolved.raw_grade,
            );

            if !is_passing(&record.grade) {
                log::trace!("Failed: {} ({})", record.name, record.grade);
                result.add_failed(record);
                continue;
            }

            let matched = classify(&record.name);
            log::debug!(
                "{} -> {} via {}",
                record.name,
                matched.category,
                matched.rule
            );

            if let MatchRule::GeneralEducation { domain } = matched.rule {
                result.general_education.add(domain, record.credit);
            }
            result.add_passed(matched.category, record);
        }
    }

    log::info!(
        "Classified {} passed and {} failed courses ({} credits)",
        result.passed.len(),
        result.failed.len(),
        result.total
    );

    result
}

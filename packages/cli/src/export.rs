//! CSV export of classified course lists.
//!
//! Files are UTF-8 with a byte-order mark so spreadsheet applications
//! detect the encoding of the Chinese course names.

use std::io::Write;
use std::path::{Path, PathBuf};

use credit_audit_transcript_models::{ClassificationResult, CourseCategory, CourseRecord};

use crate::AuditError;

/// UTF-8 byte-order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV header row.
pub const CSV_HEADERS: [&str; 3] = ["科目名稱", "學分", "成績"];

/// The six exportable course lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseList {
    Passed(CourseCategory),
    AllPassed,
    Failed,
}

impl CourseList {
    /// Every list, in report order.
    pub const ALL: [Self; 6] = [
        Self::Passed(CourseCategory::Required),
        Self::Passed(CourseCategory::CategoryI),
        Self::Passed(CourseCategory::CategoryIi),
        Self::Passed(CourseCategory::Other),
        Self::AllPassed,
        Self::Failed,
    ];

    /// Export file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Passed(CourseCategory::Required) => "required_passed.csv",
            Self::Passed(CourseCategory::CategoryI) => "category_i_passed.csv",
            Self::Passed(CourseCategory::CategoryIi) => "category_ii_passed.csv",
            Self::Passed(CourseCategory::Other) => "other_passed.csv",
            Self::AllPassed => "all_passed.csv",
            Self::Failed => "failed.csv",
        }
    }

    /// Heading used in the text report.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Passed(category) => category.label(),
            Self::AllPassed => "所有通過課程",
            Self::Failed => "未通過課程",
        }
    }

    /// The records of this list in `result`.
    #[must_use]
    pub fn records(self, result: &ClassificationResult) -> &[CourseRecord] {
        match self {
            Self::Passed(category) => result.passed_in(category),
            Self::AllPassed => &result.passed,
            Self::Failed => &result.failed,
        }
    }
}

/// Formats a credit without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_credit(credit: f64) -> String {
    format!("{credit}")
}

/// Writes `records` as CSV, BOM first.
///
/// # Errors
///
/// Returns an [`AuditError`] if writing fails.
pub fn write_csv<W: Write>(mut writer: W, records: &[CourseRecord]) -> Result<(), AuditError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;
    for record in records {
        csv_writer.write_record([
            record.name.as_str(),
            format_credit(record.credit).as_str(),
            record.grade.as_str(),
        ])?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Writes one CSV file per non-empty list into `dir`.
///
/// Returns the paths written.
///
/// # Errors
///
/// Returns an [`AuditError`] if the directory or a file cannot be written.
pub fn export_all(result: &ClassificationResult, dir: &Path) -> Result<Vec<PathBuf>, AuditError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for list in CourseList::ALL {
        let records = list.records(result);
        if records.is_empty() {
            continue;
        }

        let path = dir.join(list.file_name());
        let file = std::fs::File::create(&path)?;
        write_csv(std::io::BufWriter::new(file), records)?;

        log::info!("Wrote {} courses to {}", records.len(), path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassificationResult {
        let mut result = ClassificationResult::default();
        result.add_passed(
            CourseCategory::Required,
            CourseRecord::new("大一英文", 2.0, "A"),
        );
        result.add_passed(
            CourseCategory::Other,
            CourseRecord::new("微積分, 進階", 1.5, "B"),
        );
        result.add_failed(CourseRecord::new("商務日語", 3.0, "D"));
        result
    }

    #[test]
    fn writes_bom_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &sample().passed).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text,
            "科目名稱,學分,成績\n大一英文,2,A\n\"微積分, 進階\",1.5,B\n"
        );
    }

    #[test]
    fn empty_list_still_has_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "科目名稱,學分,成績\n");
    }

    #[test]
    fn lists_select_records() {
        let result = sample();
        assert_eq!(CourseList::AllPassed.records(&result).len(), 2);
        assert_eq!(CourseList::Failed.records(&result).len(), 1);
        assert_eq!(
            CourseList::Passed(CourseCategory::Required).records(&result)[0].name,
            "大一英文"
        );
        assert!(
            CourseList::Passed(CourseCategory::CategoryI)
                .records(&result)
                .is_empty()
        );
    }

    #[test]
    fn export_all_skips_empty_lists() {
        let dir = std::env::temp_dir().join(format!(
            "credit_audit_export_test_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let written = export_all(&sample(), &dir).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "required_passed.csv",
                "other_passed.csv",
                "all_passed.csv",
                "failed.csv"
            ]
        );

        let failed = std::fs::read(dir.join("failed.csv")).unwrap();
        assert!(failed.starts_with(UTF8_BOM));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn credits_format_without_trailing_zero() {
        assert_eq!(format_credit(3.0), "3");
        assert_eq!(format_credit(0.5), "0.5");
    }
}

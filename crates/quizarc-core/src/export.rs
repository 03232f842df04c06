//! CSV export of the report list.

use crate::error::ExportError;
use crate::models::{Quiz, Report};
use crate::stats::{format_timestamp, quiz_title};

/// Header row of the export.
pub const CSV_HEADER: [&str; 5] = ["Learner", "Quiz", "Score", "Duration", "Submitted"];

/// File name the export is written under.
pub const EXPORT_FILE_NAME: &str = "quizarc-reports.csv";

/// Serialize `reports` in list order, one row each, after the header.
pub fn reports_csv(reports: &[Report], quizzes: &[Quiz]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for report in reports {
        let score = report.score.to_string();
        let duration = report.duration_minutes.to_string();
        let submitted = format_timestamp(&report.submitted_at);
        writer.write_record([
            report.learner.as_str(),
            quiz_title(quizzes, &report.quiz_id),
            score.as_str(),
            duration.as_str(),
            submitted.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{bundled_quizzes, seed_reports};

    #[test]
    fn test_header_plus_one_line_per_report() {
        let csv = reports_csv(&seed_reports(), &bundled_quizzes()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Learner,Quiz,Score,Duration,Submitted");
        assert!(lines[1].starts_with("Mira Gonzalez,Modern CSS Layouts,92,7,"));
        assert!(lines[3].starts_with("Aria Chen,HTML Fundamentals,78,9,"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut reports = seed_reports();
        reports.truncate(1);
        reports[0].quiz_id = "missing".into();
        reports[0].learner = "Gonzalez, Mira".into();

        let csv = reports_csv(&reports, &bundled_quizzes()).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"Gonzalez, Mira\",Unknown quiz,92,7,\""), "{row}");
    }

    #[test]
    fn test_empty_list_is_header_only() {
        let csv = reports_csv(&[], &bundled_quizzes()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}

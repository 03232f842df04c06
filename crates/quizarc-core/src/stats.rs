//! Aggregations over the report list and display formatting.
//!
//! Everything here is pure; callers pass the current lists in.

use crate::models::{Quiz, Report};
use chrono::{DateTime, Local, Utc};

/// Title shown for reports whose quiz is not in the catalog.
pub const UNKNOWN_QUIZ: &str = "Unknown quiz";

/// Round `num / den` to the nearest integer, halves rounding up.
pub(crate) fn round_div(num: u64, den: u64) -> u64 {
    if den == 0 {
        return 0;
    }
    (2 * num + den) / (2 * den)
}

/// Mean score rounded to the nearest integer; 0 for no reports.
pub fn average_score(reports: &[Report]) -> u32 {
    let total: u64 = reports.iter().map(|r| u64::from(r.score)).sum();
    round_div(total, reports.len() as u64) as u32
}

/// Number of reports submitted for `quiz_id`.
pub fn attempts_for_quiz(reports: &[Report], quiz_id: &str) -> usize {
    reports.iter().filter(|r| r.quiz_id == quiz_id).count()
}

/// Sum of report durations in minutes.
pub fn total_engaged_minutes(reports: &[Report]) -> u32 {
    reports.iter().map(|r| r.duration_minutes).sum()
}

/// Title of `quiz_id`, or [`UNKNOWN_QUIZ`].
pub fn quiz_title<'a>(quizzes: &'a [Quiz], quiz_id: &str) -> &'a str {
    quizzes
        .iter()
        .find(|q| q.id == quiz_id)
        .map(|q| q.title.as_str())
        .unwrap_or(UNKNOWN_QUIZ)
}

/// Width of an attempts bar: `attempts * weight`, capped at 100.
pub fn attempt_bar_percent(attempts: usize, weight: usize) -> u16 {
    attempts.saturating_mul(weight).min(100) as u16
}

/// Share of questions answered, rounded.
pub fn answered_percent(answered: usize, total: usize) -> u16 {
    round_div(100 * answered as u64, total as u64).min(100) as u16
}

/// Viewer-local short timestamp, e.g. `Jan 8, 9:32 AM`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %-d, %-I:%M %p").to_string()
}

/// Countdown readout as zero-padded `MM:SS`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Lowercase `title` and collapse each run of non-alphanumerics into one
/// hyphen. Leading and trailing hyphens are dropped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_gap = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if in_gap && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            in_gap = false;
        } else {
            in_gap = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{bundled_quizzes, seed_reports};
    use proptest::prelude::*;

    fn report(score: u8, duration: u32) -> Report {
        Report {
            id: format!("rep-{score}-{duration}"),
            learner: "Test".into(),
            quiz_id: "modern-css".into(),
            score,
            submitted_at: Utc::now(),
            duration_minutes: duration,
        }
    }

    #[test]
    fn test_average_of_empty_is_zero() {
        assert_eq!(average_score(&[]), 0);
    }

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(average_score(&[report(80, 1), report(85, 1)]), 83);
        assert_eq!(average_score(&[report(80, 1), report(81, 1)]), 81);
        assert_eq!(average_score(&seed_reports()), 85);
    }

    #[test]
    fn test_attempts_and_minutes() {
        let reports = seed_reports();
        assert_eq!(attempts_for_quiz(&reports, "modern-css"), 1);
        assert_eq!(attempts_for_quiz(&reports, "missing"), 0);
        assert_eq!(total_engaged_minutes(&reports), 27);
    }

    #[test]
    fn test_quiz_title_fallback() {
        let quizzes = bundled_quizzes();
        assert_eq!(quiz_title(&quizzes, "js-async"), "JavaScript Async Patterns");
        assert_eq!(quiz_title(&quizzes, "gone"), UNKNOWN_QUIZ);
    }

    #[test]
    fn test_attempt_bar_is_capped() {
        assert_eq!(attempt_bar_percent(3, 12), 36);
        assert_eq!(attempt_bar_percent(20, 10), 100);
    }

    #[test]
    fn test_answered_percent() {
        assert_eq!(answered_percent(0, 3), 0);
        assert_eq!(answered_percent(1, 3), 33);
        assert_eq!(answered_percent(2, 3), 67);
        assert_eq!(answered_percent(3, 3), 100);
        assert_eq!(answered_percent(0, 0), 0);
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(480), "08:00");
        assert_eq!(format_countdown(61), "01:01");
        assert_eq!(format_countdown(0), "00:00");
    }

    #[test]
    fn test_format_timestamp_is_abbreviated() {
        let ts = seed_reports()[0].submitted_at;
        let formatted = format_timestamp(&ts);
        assert!(formatted.starts_with("Jan "), "{formatted}");
        assert!(formatted.ends_with("AM") || formatted.ends_with("PM"), "{formatted}");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Quiz!"), "my-quiz");
        assert_eq!(slugify("  --Intro--  "), "intro");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("TypeScript   Essentials"), "typescript-essentials");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
    }

    proptest! {
        #[test]
        fn prop_average_is_within_score_range(scores in proptest::collection::vec(0u8..=100, 0..50)) {
            let reports: Vec<Report> = scores.iter().map(|s| report(*s, 1)).collect();
            let avg = average_score(&reports);
            prop_assert!(avg <= 100);
            if let (Some(min), Some(max)) = (scores.iter().min(), scores.iter().max()) {
                prop_assert!(avg >= u32::from(*min) && avg <= u32::from(*max));
            }
        }
    }
}

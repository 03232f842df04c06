//! Bundled quizzes, seed reports and question-bank import.

use crate::error::CatalogError;
use crate::models::{AnswerOption, Difficulty, Question, Quiz, Report};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;

/// Quizzes and reports the controller starts from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub quizzes: Vec<Quiz>,
    /// Most recent first.
    pub reports: Vec<Report>,
}

impl Catalog {
    /// Bundled quizzes plus seed reports.
    pub fn bundled() -> Self {
        Self {
            quizzes: bundled_quizzes(),
            reports: seed_reports(),
        }
    }

    /// Parse a JSON question bank: an array of quizzes.
    pub fn parse_bank(json: &str) -> Result<Vec<Quiz>, CatalogError> {
        let quizzes: Vec<Quiz> = serde_json::from_str(json)?;
        for quiz in &quizzes {
            validate_quiz(quiz)?;
        }
        Ok(quizzes)
    }

    /// Append imported quizzes after the current ones. Leaves the catalog
    /// untouched if the result would be invalid.
    pub fn import(&mut self, quizzes: Vec<Quiz>) -> Result<usize, CatalogError> {
        let count = quizzes.len();
        let mut merged = Self {
            quizzes: self.quizzes.clone(),
            reports: Vec::new(),
        };
        merged.quizzes.extend(quizzes);
        merged.validate()?;
        self.quizzes = merged.quizzes;
        Ok(count)
    }

    /// Check id uniqueness and that each answer id names exactly one option.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        for quiz in &self.quizzes {
            if !ids.insert(quiz.id.as_str()) {
                return Err(CatalogError::DuplicateQuiz(quiz.id.clone()));
            }
            validate_quiz(quiz)?;
        }
        Ok(())
    }
}

fn validate_quiz(quiz: &Quiz) -> Result<(), CatalogError> {
    if quiz.estimated_time_minutes == 0 {
        return Err(CatalogError::ZeroDuration(quiz.id.clone()));
    }

    let mut question_ids = HashSet::new();
    for question in &quiz.questions {
        if !question_ids.insert(question.id.as_str()) {
            return Err(CatalogError::DuplicateQuestion {
                quiz: quiz.id.clone(),
                question: question.id.clone(),
            });
        }

        let mut option_ids = HashSet::new();
        for option in &question.options {
            if !option_ids.insert(option.id.as_str()) {
                return Err(CatalogError::DuplicateOption {
                    quiz: quiz.id.clone(),
                    question: question.id.clone(),
                    option: option.id.clone(),
                });
            }
        }

        if !question.has_option(&question.answer_id) {
            return Err(CatalogError::UnknownAnswer {
                quiz: quiz.id.clone(),
                question: question.id.clone(),
                answer: question.answer_id.clone(),
            });
        }
    }
    Ok(())
}

fn question(id: &str, text: &str, options: &[(&str, &str)], answer_id: &str, rationale: &str) -> Question {
    Question {
        id: id.into(),
        text: text.into(),
        options: options
            .iter()
            .map(|(id, label)| AnswerOption::new(*id, *label))
            .collect(),
        answer_id: answer_id.into(),
        rationale: rationale.into(),
    }
}

pub fn bundled_quizzes() -> Vec<Quiz> {
    vec![
        Quiz {
            id: "fundamentals-html".into(),
            title: "HTML Fundamentals".into(),
            description: "Assess knowledge of semantic structure, accessibility, and modern HTML patterns.".into(),
            tags: vec!["Frontend".into(), "Foundational".into()],
            difficulty: Difficulty::Intermediate,
            estimated_time_minutes: 8,
            questions: vec![
                question(
                    "html-1",
                    "Which HTML element provides a concise description of an entire page, primarily used by search engines?",
                    &[
                        ("meta-description", "<meta name=\"description\">"),
                        ("header-tag", "<header>"),
                        ("summary", "<summary>"),
                        ("cite", "<cite>"),
                    ],
                    "meta-description",
                    "The description meta tag is a page-level summary consumed by SEO crawlers. Structural elements like <header> or <summary> serve different semantic roles.",
                ),
                question(
                    "html-2",
                    "Which attribute should be used to improve accessibility when providing text for assistive technologies?",
                    &[
                        ("data-alt", "data-alt"),
                        ("alt-text", "alt"),
                        ("aria-img", "aria-img"),
                        ("longdesc", "longdesc"),
                    ],
                    "alt-text",
                    "The alt attribute is the standard mechanism for supplying alternative text for images, enabling screen reader support.",
                ),
                question(
                    "html-3",
                    "Select the element that conveys self-contained, reusable compositions such as cards or widgets.",
                    &[
                        ("section", "<section>"),
                        ("div", "<div>"),
                        ("article", "<article>"),
                        ("aside", "<aside>"),
                    ],
                    "article",
                    "<article> is intended for independent, distributable content blocks. It is more descriptive than a <div> and differs from <section>, which organizes content into thematic groups.",
                ),
            ],
        },
        Quiz {
            id: "modern-css".into(),
            title: "Modern CSS Layouts".into(),
            description: "Evaluate proficiency with Flexbox, Grid, and responsive design tokens.".into(),
            tags: vec!["Frontend".into(), "Design".into()],
            difficulty: Difficulty::Advanced,
            estimated_time_minutes: 10,
            questions: vec![
                question(
                    "css-1",
                    "Which CSS function allows components to respect user-configured minimum and maximum widths while remaining fluid?",
                    &[
                        ("clamp", "clamp()"),
                        ("minmax", "minmax()"),
                        ("fit-content", "fit-content()"),
                        ("min", "min()"),
                    ],
                    "clamp",
                    "clamp() accepts min, preferred, and max values and is ideal for fluid typography or element sizing responsive to container width.",
                ),
                question(
                    "css-2",
                    "When should you prefer CSS Grid over Flexbox for layout?",
                    &[
                        ("single-axis", "When aligning elements along a single axis."),
                        ("two-dimensional", "When managing two-dimensional layouts with rows and columns."),
                        ("simple-spacing", "When distributing equal spacing between inline items."),
                        ("text-flow", "When content should follow text flow order only."),
                    ],
                    "two-dimensional",
                    "Grid is optimized for two-dimensional control, enabling explicit row/column placement, whereas Flexbox thrives on one-dimensional flows.",
                ),
                question(
                    "css-3",
                    "Which property enables a grid item to span an entire implicit row?",
                    &[
                        ("grid-row", "grid-row: 1 / -1"),
                        ("grid-area", "grid-area: full"),
                        ("grid-auto-flow", "grid-auto-flow: row dense"),
                        ("justify-self", "justify-self: stretch"),
                    ],
                    "grid-row",
                    "Setting grid-row: 1 / -1 instructs the element to begin at the first line and end at the last line, spanning the entire row.",
                ),
            ],
        },
        Quiz {
            id: "js-async".into(),
            title: "JavaScript Async Patterns".into(),
            description: "Measure understanding of Promises, async/await, and concurrency controls.".into(),
            tags: vec!["JavaScript".into()],
            difficulty: Difficulty::Intermediate,
            estimated_time_minutes: 12,
            questions: vec![
                question(
                    "js-1",
                    "What is the primary advantage of Promise.allSettled over Promise.all?",
                    &[
                        ("faster", "It resolves faster by ignoring results."),
                        ("partial-success", "It resolves after the first fulfilled promise."),
                        ("settled-results", "It waits for all promises and reports each outcome."),
                        ("single-error", "It throws the first rejection immediately."),
                    ],
                    "settled-results",
                    "Promise.allSettled returns after every promise settles, providing full visibility into both fulfilled and rejected results.",
                ),
                question(
                    "js-2",
                    "Which statement accurately describes the event loop?",
                    &[
                        ("single-thread", "JavaScript runs on a single thread with a queue that the event loop processes."),
                        ("multi-thread", "Each asynchronous callback executes on its own thread managed by the loop."),
                        ("blocking", "The event loop blocks UI rendering until promises settle."),
                        ("microtask", "Microtasks are queued before the currently executing call stack completes."),
                    ],
                    "single-thread",
                    "JavaScript executes on a single thread where the event loop pulls tasks from a queue after the current call stack empties. Microtasks queue after synchronous work completes.",
                ),
                question(
                    "js-3",
                    "How can you limit concurrency when issuing a batch of asynchronous requests?",
                    &[
                        ("promise-all", "Use Promise.all to run them together."),
                        ("queue-runner", "Create a queue that processes a fixed number at a time."),
                        ("async-await", "Wrap everything in a single async function."),
                        ("settimeout", "Use setTimeout to delay every call equally."),
                    ],
                    "queue-runner",
                    "Implementing a concurrency queue or semaphore ensures only a configurable number of tasks execute simultaneously, protecting APIs and resources.",
                ),
            ],
        },
    ]
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

pub fn seed_reports() -> Vec<Report> {
    vec![
        Report {
            id: "rep-1001".into(),
            learner: "Mira Gonzalez".into(),
            quiz_id: "modern-css".into(),
            score: 92,
            submitted_at: at(2025, 1, 8, 9, 32),
            duration_minutes: 7,
        },
        Report {
            id: "rep-1002".into(),
            learner: "Noah Patel".into(),
            quiz_id: "js-async".into(),
            score: 84,
            submitted_at: at(2025, 1, 6, 16, 20),
            duration_minutes: 11,
        },
        Report {
            id: "rep-1003".into(),
            learner: "Aria Chen".into(),
            quiz_id: "fundamentals-html".into(),
            score: 78,
            submitted_at: at(2025, 1, 4, 14, 11),
            duration_minutes: 9,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_is_valid() {
        let catalog = Catalog::bundled();
        assert_eq!(catalog.quizzes.len(), 3);
        assert_eq!(catalog.reports.len(), 3);
        catalog.validate().unwrap();
    }

    #[test]
    fn test_seed_reports_are_most_recent_first() {
        let reports = seed_reports();
        assert!(reports
            .windows(2)
            .all(|pair| pair[0].submitted_at >= pair[1].submitted_at));
    }

    #[test]
    fn test_parse_bank_rejects_unknown_answer() {
        let json = r#"[{
            "id": "broken",
            "title": "Broken",
            "description": "Answer points nowhere",
            "difficulty": "Custom",
            "estimatedTimeMinutes": 5,
            "questions": [{
                "id": "q1",
                "text": "Pick one",
                "options": [{"id": "a", "label": "A"}, {"id": "b", "label": "B"}],
                "answerId": "c",
                "rationale": ""
            }]
        }]"#;

        let err = Catalog::parse_bank(json).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownAnswer { .. }));
    }

    #[test]
    fn test_parse_bank_accepts_valid_quiz() {
        let json = r#"[{
            "id": "rust-basics",
            "title": "Rust Basics",
            "description": "Ownership and borrowing",
            "tags": ["Rust"],
            "difficulty": "Foundational",
            "estimatedTimeMinutes": 6,
            "questions": [{
                "id": "r1",
                "text": "Who owns a moved value?",
                "options": [{"id": "old", "label": "The old binding"}, {"id": "new", "label": "The new binding"}],
                "answerId": "new",
                "rationale": "A move transfers ownership."
            }]
        }]"#;

        let quizzes = Catalog::parse_bank(json).unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].questions[0].answer_id, "new");
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let mut catalog = Catalog::bundled();
        let duplicate = catalog.quizzes[0].clone();
        let err = catalog.import(vec![duplicate]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateQuiz(id) if id == "fundamentals-html"));
        assert_eq!(catalog.quizzes.len(), 3);
    }

    #[test]
    fn test_zero_duration_is_rejected() {
        let mut catalog = Catalog::bundled();
        catalog.quizzes[1].estimated_time_minutes = 0;
        assert!(matches!(catalog.validate(), Err(CatalogError::ZeroDuration(_))));
    }
}

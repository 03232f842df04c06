//! Data models for the quiz catalog, reports and quiz-taking progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Quiz identifiers are slug-like strings (`fundamentals-html`).
pub type QuizId = String;

/// Learner name recorded on self-submitted reports.
pub const LEARNER_SELF: &str = "You";

/// Top-level views of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[default]
    Dashboard,
    Library,
    Reports,
    Sessions,
    Settings,
    Quiz,
}

impl Route {
    /// Routes reachable from the navigation bar, in display order.
    pub const NAV: [Route; 5] = [
        Route::Dashboard,
        Route::Library,
        Route::Reports,
        Route::Sessions,
        Route::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Library => "Library",
            Self::Reports => "Reports",
            Self::Sessions => "Sessions",
            Self::Settings => "Settings",
            Self::Quiz => "Quiz",
        }
    }
}

/// Difficulty label shown next to a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Foundational,
    Intermediate,
    Advanced,
    /// Quizzes created in-session.
    Custom,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Foundational => "Foundational",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Custom => "Custom",
        }
    }
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Unique within its question.
    pub id: String,
    pub label: String,
}

impl AnswerOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique within its quiz.
    pub id: String,
    /// Prompt text.
    pub text: String,
    /// Options in display order.
    pub options: Vec<AnswerOption>,
    /// Id of the correct option.
    pub answer_id: String,
    /// Explanation of the correct answer.
    pub rationale: String,
}

impl Question {
    /// Check whether `option_id` is one of this question's options.
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    pub fn is_correct(&self, option_id: &str) -> bool {
        self.answer_id == option_id
    }
}

/// A quiz in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Unique slug.
    pub id: QuizId,
    pub title: String,
    pub description: String,
    /// Tags in display order.
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    /// Time allotted to take the quiz.
    #[serde(alias = "estimatedTime")]
    pub estimated_time_minutes: u32,
    /// Questions in play order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Countdown allotment in seconds.
    pub fn allotted_seconds(&self) -> u32 {
        self.estimated_time_minutes.saturating_mul(60)
    }
}

/// A submitted attempt. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub learner: String,
    pub quiz_id: QuizId,
    /// Percentage, 0..=100.
    pub score: u8,
    pub submitted_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// Progress through the active quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    /// Index of the displayed question.
    pub current_index: usize,
    /// Chosen option id per question id. Unanswered questions are absent.
    pub answers: HashMap<String, String>,
    /// When the quiz was launched.
    pub started_at: DateTime<Utc>,
    /// Seconds left on the countdown.
    pub remaining_seconds: u32,
}

impl QuizProgress {
    /// Fresh progress for `quiz`, with the full allotment on the clock.
    pub fn start(quiz: &Quiz) -> Self {
        Self {
            current_index: 0,
            answers: HashMap::new(),
            started_at: Utc::now(),
            remaining_seconds: quiz.allotted_seconds(),
        }
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

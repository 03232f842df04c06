//! # quizarc-core
//!
//! Display-free core of QuizArc.
//!
//! ## Features
//!
//! - Route and quiz-taking state machine behind a single controller
//! - Bundled quiz catalog and JSON question-bank import
//! - Countdown handle with auto-submit on expiry
//! - Report aggregation and CSV export
//! - Transient notices with auto-dismiss

mod catalog;
mod controller;
mod countdown;
mod error;
mod export;
mod models;
mod notice;
mod session;
mod settings;
mod stats;

pub use catalog::{bundled_quizzes, seed_reports, Catalog};
pub use controller::{NewQuiz, QuizController, Tick, FALLBACK_ESTIMATED_MINUTES};
pub use countdown::{Countdown, TickPacer, TICK_PERIOD};
pub use error::{CatalogError, ExportError};
pub use export::{reports_csv, CSV_HEADER, EXPORT_FILE_NAME};
pub use models::{
    AnswerOption, Difficulty, Question, Quiz, QuizId, QuizProgress, Report, Route, LEARNER_SELF,
};
pub use notice::{Notice, NoticeId, NoticeLevel, NoticeQueue, DEFAULT_DISMISS_AFTER};
pub use session::{plan_session, SessionPlan, SessionPlanner};
pub use settings::{BrandVoice, DigestMode, ReminderFrequency, Settings, Theme};
pub use stats::{
    answered_percent, attempt_bar_percent, attempts_for_quiz, average_score, format_countdown,
    format_timestamp, quiz_title, slugify, total_engaged_minutes, UNKNOWN_QUIZ,
};

//! Error types.

use thiserror::Error;

/// Catalog loading or validation failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate quiz id: {0}")]
    DuplicateQuiz(String),
    #[error("Quiz {quiz}: duplicate question id {question}")]
    DuplicateQuestion { quiz: String, question: String },
    #[error("Quiz {quiz}, question {question}: answer {answer} matches no option")]
    UnknownAnswer {
        quiz: String,
        question: String,
        answer: String,
    },
    #[error("Quiz {quiz}, question {question}: duplicate option id {option}")]
    DuplicateOption {
        quiz: String,
        question: String,
        option: String,
    },
    #[error("Quiz {0} has no estimated time")]
    ZeroDuration(String),
}

/// Report export failure.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

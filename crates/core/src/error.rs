use thiserror::Error;

use crate::model::Style;

/// Configuration defects detected while loading the question bank.
///
/// These are fatal at startup: a bank that loads is guaranteed to score every
/// `(question, choice)` pair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("failed to read question bank {path}: {message}")]
    Read { path: String, message: String },

    #[error("malformed question bank: {0}")]
    Malformed(String),

    #[error("question bank has no questions")]
    Empty,

    #[error("scoring table has {rows} rows for {questions} questions")]
    ScoringMismatch { questions: usize, rows: usize },

    #[error("question {question} has {found} choices, expected {expected}")]
    ChoiceCount {
        question: usize,
        found: usize,
        expected: usize,
    },

    #[error("question {question} has blank text")]
    BlankText { question: usize },

    #[error("question {question} choice {choice} is blank")]
    BlankChoice { question: usize, choice: char },

    #[error("no description for style {0}")]
    MissingDescription(Style),

    #[error("style {0} is described more than once")]
    DuplicateDescription(Style),
}

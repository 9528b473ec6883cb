#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod time;

pub use error::BankError;
pub use model::{
    ChartSlice, Choice, QuestionBank, ResponseVector, ResultSummary, ScoreSummary, SessionId,
    Style, StyleDescription, StyleReport,
};
pub use time::Clock;

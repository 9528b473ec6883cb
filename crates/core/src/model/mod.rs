mod bank;
mod choice;
mod description;
mod ids;
mod question;
mod response;
mod score;
mod style;
mod summary;

pub use bank::{BUILTIN_BANK, QuestionBank};
pub use choice::{Choice, ChoiceError};
pub use description::{StyleDescription, StyleDescriptions};
pub use ids::SessionId;
pub use question::{CHOICES_PER_QUESTION, Question, strip_style_tag};
pub use response::ResponseVector;
pub use score::{ScoreSummary, ScoringTable};
pub use style::{ParseStyleError, Style};
pub use summary::{ChartSlice, ResultSummary, StyleReport, format_percentage};

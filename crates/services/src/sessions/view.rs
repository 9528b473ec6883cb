use style_core::model::{ChartSlice, Choice, ResultSummary, ScoreSummary, Style, StyleReport};

use super::progress::SessionProgress;
use super::service::{AssessmentSession, Phase};

/// Everything the presentation layer needs for one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    Welcome(WelcomeView),
    Question(QuestionView),
    Results(ResultsView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeView {
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    /// One-based, for "Question 3 of 18".
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub choices: Vec<String>,
    /// Previously recorded answer to pre-select.
    pub selected: Option<Choice>,
    pub back_enabled: bool,
    pub next_enabled: bool,
    pub progress: SessionProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub scores: ScoreSummary,
    pub percentages: Vec<(Style, String)>,
    pub dominant: Vec<Style>,
    pub dominant_label: String,
    pub report: StyleReport,
    pub chart: Vec<ChartSlice>,
}

impl SessionView {
    /// Build the render model from current session state.
    #[must_use]
    pub fn from_session(session: &AssessmentSession) -> Self {
        match session.phase() {
            Phase::Welcome => SessionView::Welcome(WelcomeView {
                total_questions: session.bank().len(),
            }),
            Phase::Answering => match session.current_question() {
                Some(question) => SessionView::Question(QuestionView {
                    index: question.index(),
                    number: question.number(),
                    total: session.bank().len(),
                    text: question.text().to_string(),
                    choices: question.choices().to_vec(),
                    selected: session.current_response(),
                    back_enabled: session.can_go_back(),
                    next_enabled: session.can_go_next(),
                    progress: session.progress(),
                }),
                // Unreachable for a loaded bank: the index always stays in range.
                None => SessionView::Welcome(WelcomeView {
                    total_questions: session.bank().len(),
                }),
            },
            Phase::Results => {
                let summary = ResultSummary::new(session.scores(), session.bank().len());
                SessionView::Results(ResultsView {
                    scores: *summary.scores(),
                    percentages: summary.percentages(),
                    dominant: summary.dominant_styles().to_vec(),
                    dominant_label: summary.dominant_label(),
                    report: summary.report(session.bank().descriptions()),
                    chart: summary.chart(),
                })
            }
        }
    }
}

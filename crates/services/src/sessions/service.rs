use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use style_core::model::{
    Choice, Question, QuestionBank, ResponseVector, ResultSummary, ScoreSummary, SessionId,
};

use super::progress::SessionProgress;

//
// ─── PHASE & TRANSITIONS ───────────────────────────────────────────────────────
//

/// Where a respondent is in the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Welcome,
    Answering,
    Results,
}

/// What a user action did to the session.
///
/// Actions that are not allowed in the current state are `Ignored`; they never
/// fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Advanced { from: usize, to: usize },
    MovedBack { from: usize, to: usize },
    Completed,
    Reset,
    Ignored,
}

impl Transition {
    #[must_use]
    pub fn is_ignored(self) -> bool {
        matches!(self, Transition::Ignored)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One respondent's pass through the question bank.
///
/// Walks `Welcome → Answering → Results`. Responses are only ever written
/// through the transition methods below; `Results` is left only by `reset`.
pub struct AssessmentSession {
    id: SessionId,
    bank: Arc<QuestionBank>,
    phase: Phase,
    current: usize,
    responses: ResponseVector,
    results_persisted: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl AssessmentSession {
    /// A fresh session on the welcome screen.
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        let responses = bank.empty_responses();
        Self {
            id: SessionId::new(),
            bank,
            phase: Phase::Welcome,
            current: 0,
            responses,
            results_persisted: false,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn responses(&self) -> &ResponseVector {
        &self.responses
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn results_persisted(&self) -> bool {
        self.results_persisted
    }

    /// The question on screen. `None` outside of `Answering`.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Answering => self.bank.question(self.current),
            Phase::Welcome | Phase::Results => None,
        }
    }

    /// The recorded answer for the question on screen, used to pre-select it.
    #[must_use]
    pub fn current_response(&self) -> Option<Choice> {
        match self.phase {
            Phase::Answering => self.responses.get(self.current),
            Phase::Welcome | Phase::Results => None,
        }
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.phase == Phase::Answering && self.current > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.phase == Phase::Answering
            && self.current < self.bank.last_index()
            && self.responses.get(self.current).is_some()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.bank.len();
        let answered = self.responses.answered_count();
        SessionProgress {
            total,
            current: self.current,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.phase == Phase::Results,
        }
    }

    /// Score whatever has been answered so far.
    #[must_use]
    pub fn scores(&self) -> ScoreSummary {
        self.bank.score(&self.responses)
    }

    /// Dominant styles and percentages. Only available once in `Results`.
    #[must_use]
    pub fn summary(&self) -> Option<ResultSummary> {
        match self.phase {
            Phase::Results => Some(ResultSummary::new(self.scores(), self.bank.len())),
            Phase::Welcome | Phase::Answering => None,
        }
    }

    /// Leave the welcome screen and begin at the first question with a clean slate.
    pub fn start(&mut self, now: DateTime<Utc>) -> Transition {
        if self.phase != Phase::Welcome {
            return Transition::Ignored;
        }
        self.clear();
        self.phase = Phase::Answering;
        self.started_at = Some(now);
        Transition::Started
    }

    /// Answer the question on screen.
    ///
    /// A new answer is recorded and moves forward one question, or into
    /// `Results` when it is the last one. Choosing the answer already recorded
    /// is ignored.
    pub fn select(&mut self, choice: Choice, now: DateTime<Utc>) -> Transition {
        if self.phase != Phase::Answering || self.responses.get(self.current) == Some(choice) {
            return Transition::Ignored;
        }

        self.responses.record(self.current, choice);

        if self.current < self.bank.last_index() {
            let from = self.current;
            self.current += 1;
            Transition::Advanced {
                from,
                to: self.current,
            }
        } else {
            self.phase = Phase::Results;
            self.completed_at = Some(now);
            Transition::Completed
        }
    }

    /// Return to the previous question. Recorded answers are kept.
    pub fn back(&mut self) -> Transition {
        if !self.can_go_back() {
            return Transition::Ignored;
        }
        let from = self.current;
        self.current -= 1;
        Transition::MovedBack {
            from,
            to: self.current,
        }
    }

    /// Move past an already answered question without changing it.
    pub fn next(&mut self) -> Transition {
        if !self.can_go_next() {
            return Transition::Ignored;
        }
        let from = self.current;
        self.current += 1;
        Transition::Advanced {
            from,
            to: self.current,
        }
    }

    /// Discard all progress and return to the welcome screen.
    pub fn reset(&mut self) -> Transition {
        self.clear();
        self.phase = Phase::Welcome;
        Transition::Reset
    }

    /// Claim the one persistence attempt for this session.
    ///
    /// Returns `true` only for the first call after completion.
    pub(crate) fn claim_persistence(&mut self) -> bool {
        if self.phase != Phase::Results || self.results_persisted {
            return false;
        }
        self.results_persisted = true;
        true
    }

    fn clear(&mut self) {
        self.current = 0;
        self.responses.clear();
        self.results_persisted = false;
        self.started_at = None;
        self.completed_at = None;
    }
}

impl fmt::Debug for AssessmentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("answered", &self.responses.answered_count())
            .field("results_persisted", &self.results_persisted)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

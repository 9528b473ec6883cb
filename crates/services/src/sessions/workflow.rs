use std::sync::Arc;
use std::time::Duration;

use storage::repository::{ResultRecord, ResultSink};
use style_core::model::{Choice, QuestionBank};
use tracing::{debug, info, warn};

use super::service::{AssessmentSession, Phase, Transition};
use super::view::SessionView;
use crate::Clock;

/// What happened when a completed session was offered to the result sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved,
    /// The one attempt for this session was already made.
    AlreadyPersisted,
    NotComplete,
    /// No sink is configured.
    Disabled,
    Failed,
    TimedOut,
}

/// Drives sessions through their transitions and hands finished results to
/// the configured sink.
///
/// Sink failures are logged and dropped; they never change what the
/// respondent sees.
#[derive(Clone)]
pub struct AssessmentLoopService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    sink: Option<Arc<dyn ResultSink>>,
    persist_timeout: Duration,
}

impl AssessmentLoopService {
    pub const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_secs(5);

    #[must_use]
    pub fn new(clock: Clock, bank: Arc<QuestionBank>, sink: Option<Arc<dyn ResultSink>>) -> Self {
        Self {
            clock,
            bank,
            sink,
            persist_timeout: Self::DEFAULT_PERSIST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_persist_timeout(mut self, timeout: Duration) -> Self {
        self.persist_timeout = timeout;
        self
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    /// A new session on the welcome screen.
    #[must_use]
    pub fn new_session(&self) -> AssessmentSession {
        AssessmentSession::new(Arc::clone(&self.bank))
    }

    pub fn start(&self, session: &mut AssessmentSession) -> Transition {
        let transition = session.start(self.clock.now());
        if !transition.is_ignored() {
            info!(session_id = %session.id(), questions = self.bank.len(), "assessment started");
        }
        transition
    }

    /// Answer the question on screen; persists results when this completes
    /// the session.
    pub async fn answer(&self, session: &mut AssessmentSession, choice: Choice) -> Transition {
        let question = session.current_index();
        let transition = session.select(choice, self.clock.now());
        debug!(
            session_id = %session.id(),
            question,
            choice = %choice.letter(),
            ?transition,
            "answer selected"
        );

        if transition == Transition::Completed {
            info!(session_id = %session.id(), "assessment completed");
            self.persist_results(session).await;
        }
        transition
    }

    pub fn back(&self, session: &mut AssessmentSession) -> Transition {
        let transition = session.back();
        debug!(session_id = %session.id(), ?transition, "back");
        transition
    }

    pub fn next(&self, session: &mut AssessmentSession) -> Transition {
        let transition = session.next();
        debug!(session_id = %session.id(), ?transition, "next");
        transition
    }

    pub fn reset(&self, session: &mut AssessmentSession) -> Transition {
        info!(session_id = %session.id(), "assessment reset");
        session.reset()
    }

    /// Render model for the current state.
    ///
    /// Rendering results re-checks persistence, so a session that completed
    /// without reaching the sink still gets its single attempt.
    pub async fn view(&self, session: &mut AssessmentSession) -> SessionView {
        if session.phase() == Phase::Results {
            self.persist_results(session).await;
        }
        SessionView::from_session(session)
    }

    /// Offer a completed session to the sink, at most once per session.
    ///
    /// The call is bounded by the persist timeout. Errors are logged, never
    /// returned.
    pub async fn persist_results(&self, session: &mut AssessmentSession) -> PersistOutcome {
        if session.phase() != Phase::Results {
            return PersistOutcome::NotComplete;
        }
        if !session.claim_persistence() {
            return PersistOutcome::AlreadyPersisted;
        }
        let Some(sink) = self.sink.as_ref() else {
            debug!(session_id = %session.id(), "no result sink configured");
            return PersistOutcome::Disabled;
        };
        let Some(summary) = session.summary() else {
            return PersistOutcome::NotComplete;
        };

        let completed_at = session.completed_at().unwrap_or_else(|| self.clock.now());
        let record = ResultRecord::from_results(completed_at, &summary, session.responses());

        match tokio::time::timeout(self.persist_timeout, sink.append_result(&record)).await {
            Ok(Ok(())) => {
                info!(
                    session_id = %session.id(),
                    dominant = %record.dominant_style,
                    "assessment results saved"
                );
                PersistOutcome::Saved
            }
            Ok(Err(err)) => {
                warn!(session_id = %session.id(), error = %err, "failed to save assessment results");
                PersistOutcome::Failed
            }
            Err(_) => {
                warn!(
                    session_id = %session.id(),
                    timeout_ms = u64::try_from(self.persist_timeout.as_millis()).unwrap_or(u64::MAX),
                    "timed out saving assessment results"
                );
                PersistOutcome::TimedOut
            }
        }
    }
}

mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use progress::SessionProgress;
pub use service::{AssessmentSession, Phase, Transition};
pub use view::{QuestionView, ResultsView, SessionView, WelcomeView};
pub use workflow::{AssessmentLoopService, PersistOutcome};

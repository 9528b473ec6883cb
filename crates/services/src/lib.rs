#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod sessions;
pub mod sheet_sink;

pub use style_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use config::{AssessmentConfig, SinkKind};
pub use error::{AppServicesError, ParseSinkError};
pub use sheet_sink::{SheetSinkConfig, SheetWebhookSink};

pub use sessions::{
    AssessmentLoopService, AssessmentSession, PersistOutcome, Phase, QuestionView, ResultsView,
    SessionProgress, SessionView, Transition, WelcomeView,
};

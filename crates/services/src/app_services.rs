use std::sync::Arc;

use storage::repository::ResultSink;
use storage::sqlite::SqliteRepository;
use style_core::model::QuestionBank;
use tracing::info;

use crate::Clock;
use crate::config::{AssessmentConfig, SinkKind};
use crate::error::AppServicesError;
use crate::sessions::AssessmentLoopService;
use crate::sheet_sink::SheetWebhookSink;

/// Assembles the question bank, result sink and session loop from config.
#[derive(Clone)]
pub struct AppServices {
    config: AssessmentConfig,
    bank: Arc<QuestionBank>,
    session_loop: Arc<AssessmentLoopService>,
}

impl AppServices {
    /// Build services with the sink named by `config.sink`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the bank is invalid, `SQLite` cannot be
    /// opened, or the sheet sink is selected without a webhook URL.
    pub async fn from_config(
        config: AssessmentConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let sink: Option<Arc<dyn ResultSink>> = match config.sink {
            SinkKind::Sqlite => {
                let repo = SqliteRepository::connect(&config.db_url).await?;
                repo.migrate().await?;
                Some(Arc::new(repo))
            }
            SinkKind::Sheet => {
                let sheet = config
                    .sheet
                    .clone()
                    .ok_or(AppServicesError::SheetNotConfigured)?;
                Some(Arc::new(SheetWebhookSink::new(sheet)))
            }
            SinkKind::None => None,
        };
        info!(sink = %config.sink, "result sink ready");

        Self::with_sink(config, clock, sink)
    }

    /// Build services around an already constructed sink.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Bank` if the configured bank fails validation.
    pub fn with_sink(
        config: AssessmentConfig,
        clock: Clock,
        sink: Option<Arc<dyn ResultSink>>,
    ) -> Result<Self, AppServicesError> {
        let bank = Arc::new(load_bank(&config)?);
        let session_loop = Arc::new(
            AssessmentLoopService::new(clock, Arc::clone(&bank), sink)
                .with_persist_timeout(config.persist_timeout),
        );

        Ok(Self {
            config,
            bank,
            session_loop,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<AssessmentLoopService> {
        Arc::clone(&self.session_loop)
    }
}

fn load_bank(config: &AssessmentConfig) -> Result<QuestionBank, AppServicesError> {
    let bank = match &config.bank_path {
        Some(path) => {
            info!(path = %path.display(), "loading question bank");
            QuestionBank::from_path(path)?
        }
        None => QuestionBank::builtin()?,
    };
    Ok(bank)
}

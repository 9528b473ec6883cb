use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use storage::repository::{ResultRecord, ResultSink, StorageError};

pub const DEFAULT_SPREADSHEET: &str = "Personality Assessment Results";
pub const DEFAULT_WORKSHEET: &str = "Sheet1";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetSinkConfig {
    pub webhook_url: String,
    pub token: Option<String>,
    pub spreadsheet: String,
    pub worksheet: String,
}

impl SheetSinkConfig {
    #[must_use]
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            token: None,
            spreadsheet: DEFAULT_SPREADSHEET.into(),
            worksheet: DEFAULT_WORKSHEET.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `None` unless a webhook URL is present.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let webhook_url = value("STYLE_SHEET_WEBHOOK_URL")?;
        Some(Self {
            webhook_url,
            token: value("STYLE_SHEET_TOKEN"),
            spreadsheet: value("STYLE_SHEET_NAME").unwrap_or_else(|| DEFAULT_SPREADSHEET.into()),
            worksheet: value("STYLE_SHEET_WORKSHEET").unwrap_or_else(|| DEFAULT_WORKSHEET.into()),
        })
    }
}

/// Appends result rows to a spreadsheet through an HTTP webhook.
#[derive(Clone)]
pub struct SheetWebhookSink {
    client: Client,
    config: SheetSinkConfig,
}

impl SheetWebhookSink {
    #[must_use]
    pub fn new(config: SheetSinkConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SheetSinkConfig {
        &self.config
    }

    fn payload<'a>(&'a self, record: &'a ResultRecord) -> AppendRowRequest<'a> {
        AppendRowRequest {
            spreadsheet: &self.config.spreadsheet,
            worksheet: &self.config.worksheet,
            values: record.to_row(),
            record,
        }
    }
}

#[async_trait]
impl ResultSink for SheetWebhookSink {
    async fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let mut request = self
            .client
            .post(self.config.webhook_url.as_str())
            .json(&self.payload(record));
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::Rejected {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct AppendRowRequest<'a> {
    spreadsheet: &'a str,
    worksheet: &'a str,
    values: Vec<Option<String>>,
    record: &'a ResultRecord,
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use style_core::model::{ResponseVector, ResultSummary, Style};
use style_core::time::format_timestamp;
use thiserror::Error;

/// Errors surfaced by result sinks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("sink rejected the row with status {status}")]
    Rejected { status: u16 },
}

//
// ─── RESULT RECORD ─────────────────────────────────────────────────────────────
//

/// Formatted percentage per style, as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StylePercentages {
    pub driver: String,
    pub analytical: String,
    pub amiable: String,
    pub expressive: String,
}

impl StylePercentages {
    #[must_use]
    pub fn from_summary(summary: &ResultSummary) -> Self {
        Self {
            driver: summary.percentage(Style::Driver),
            analytical: summary.percentage(Style::Analytical),
            amiable: summary.percentage(Style::Amiable),
            expressive: summary.percentage(Style::Expressive),
        }
    }

    #[must_use]
    pub fn get(&self, style: Style) -> &str {
        match style {
            Style::Driver => &self.driver,
            Style::Analytical => &self.analytical,
            Style::Amiable => &self.amiable,
            Style::Expressive => &self.expressive,
        }
    }
}

/// Persisted shape of one completed assessment.
///
/// Mirrors the exported spreadsheet row so sinks can serialize it without
/// touching the domain types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub timestamp: String,
    pub dominant_style: String,
    pub scores: StylePercentages,
    pub responses: Vec<Option<char>>,
}

impl ResultRecord {
    #[must_use]
    pub fn from_results(
        completed_at: DateTime<Utc>,
        summary: &ResultSummary,
        responses: &ResponseVector,
    ) -> Self {
        Self {
            timestamp: format_timestamp(completed_at),
            dominant_style: summary.dominant_label(),
            scores: StylePercentages::from_summary(summary),
            responses: responses.letters(),
        }
    }

    /// Flatten to spreadsheet column order: timestamp, dominant style, the four
    /// percentages in style order, then one letter per question. Unanswered
    /// questions become `None` (an empty cell).
    #[must_use]
    pub fn to_row(&self) -> Vec<Option<String>> {
        let mut row = Vec::with_capacity(6 + self.responses.len());
        row.push(Some(self.timestamp.clone()));
        row.push(Some(self.dominant_style.clone()));
        for style in Style::ALL {
            row.push(Some(self.scores.get(style).to_string()));
        }
        row.extend(
            self.responses
                .iter()
                .map(|letter| letter.map(|c| c.to_string())),
        );
        row
    }
}

//
// ─── SINK CONTRACT ─────────────────────────────────────────────────────────────
//

/// Write-only destination for completed assessments.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Append one result row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the row cannot be written.
    async fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError>;
}

/// Simple in-memory sink for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryResultSink {
    records: Arc<Mutex<Vec<ResultRecord>>>,
}

impl InMemoryResultSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every appended record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn records(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl ResultSink for InMemoryResultSink {
    async fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use style_core::model::{Choice, QuestionBank, ScoreSummary};
    use style_core::time::fixed_now;

    fn record_for(responses: &ResponseVector) -> ResultRecord {
        let bank = QuestionBank::builtin().unwrap();
        let scores = ScoreSummary::tally(bank.scoring(), responses);
        let summary = ResultSummary::new(scores, bank.len());
        ResultRecord::from_results(fixed_now(), &summary, responses)
    }

    #[test]
    fn record_captures_label_percentages_and_letters() {
        let responses = ResponseVector::from_slots(vec![Some(Choice::A); 18]);
        let record = record_for(&responses);

        assert_eq!(record.timestamp, "2023-11-14 22:13:20");
        assert_eq!(record.dominant_style, "Analytical");
        assert_eq!(record.scores.get(Style::Driver), "22.2%");
        assert_eq!(record.scores.get(Style::Analytical), "33.3%");
        assert_eq!(record.scores.get(Style::Amiable), "27.8%");
        assert_eq!(record.scores.get(Style::Expressive), "16.7%");
        assert_eq!(record.responses, vec![Some('A'); 18]);
    }

    #[test]
    fn row_follows_sheet_column_order() {
        let mut responses = ResponseVector::new(18);
        responses.record(0, Choice::C);
        let record = record_for(&responses);
        let row = record.to_row();

        assert_eq!(row.len(), 24);
        assert_eq!(row[0].as_deref(), Some("2023-11-14 22:13:20"));
        // Question 1, choice c scores Analytical.
        assert_eq!(row[1].as_deref(), Some("Analytical"));
        assert_eq!(row[2].as_deref(), Some("0.0%"));
        assert_eq!(row[3].as_deref(), Some("5.6%"));
        assert_eq!(row[6].as_deref(), Some("C"));
        assert!(row[7..].iter().all(Option::is_none));
    }

    #[tokio::test]
    async fn in_memory_sink_appends() {
        let sink = InMemoryResultSink::new();
        let record = record_for(&ResponseVector::new(18));
        sink.append_result(&record).await.unwrap();
        sink.append_result(&record).await.unwrap();

        let stored = sink.records().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(
            stored[0].dominant_style,
            "Driver & Analytical & Amiable & Expressive"
        );
    }
}

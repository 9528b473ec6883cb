use sqlx::Row;
use style_core::model::Choice;

use crate::repository::{ResultRecord, StorageError, StylePercentages};

const UNANSWERED: char = '-';

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Encodes response letters as one character per question, `-` when unanswered.
pub(crate) fn encode_responses(responses: &[Option<char>]) -> String {
    responses
        .iter()
        .map(|letter| letter.unwrap_or(UNANSWERED))
        .collect()
}

/// Inverse of `encode_responses`. Rejects anything that is not `A`-`D` or `-`.
pub(crate) fn decode_responses(raw: &str) -> Result<Vec<Option<char>>, StorageError> {
    raw.chars()
        .map(|c| match c {
            UNANSWERED => Ok(None),
            other => Choice::from_letter(other)
                .map(|choice| Some(choice.letter()))
                .map_err(ser),
        })
        .collect()
}

pub(crate) fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<ResultRecord, StorageError> {
    let responses: String = row.try_get("responses").map_err(ser)?;
    Ok(ResultRecord {
        timestamp: row.try_get("recorded_at").map_err(ser)?,
        dominant_style: row.try_get("dominant_style").map_err(ser)?,
        scores: StylePercentages {
            driver: row.try_get("driver_pct").map_err(ser)?,
            analytical: row.try_get("analytical_pct").map_err(ser)?,
            amiable: row.try_get("amiable_pct").map_err(ser)?,
            expressive: row.try_get("expressive_pct").map_err(ser)?,
        },
        responses: decode_responses(&responses)?,
    })
}

use serde::Deserialize;
use std::path::Path;

use crate::error::BankError;
use crate::model::{
    Choice, Question, ResponseVector, ScoreSummary, ScoringTable, Style, StyleDescription,
    StyleDescriptions,
};

/// The assessment shipped with the binary.
pub const BUILTIN_BANK: &str = include_str!("../../assets/assessment.json");

//
// ─── DOCUMENT SHAPE ────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BankDocument {
    questions: Vec<QuestionDocument>,
    scoring: Vec<ScoringRow>,
    styles: Vec<StyleDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionDocument {
    text: String,
    choices: Vec<String>,
}

/// One scoring row. Unknown or missing letters are rejected by serde, so a
/// parsed row always covers `a`-`d` exactly once.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScoringRow {
    a: Style,
    b: Style,
    c: Style,
    d: Style,
}

impl From<ScoringRow> for [Style; 4] {
    fn from(row: ScoringRow) -> Self {
        [row.a, row.b, row.c, row.d]
    }
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Validated static assessment data: questions, scoring table and style
/// descriptions. Loaded once and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    scoring: ScoringTable,
    descriptions: StyleDescriptions,
}

impl QuestionBank {
    /// Load the embedded assessment.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the embedded document fails validation.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_BANK)
    }

    /// Load an assessment document from disk.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Read` if the file cannot be read, or any validation
    /// error from [`QuestionBank::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| BankError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate an assessment document.
    ///
    /// # Errors
    ///
    /// Returns `BankError` when the document is malformed, empty, has a
    /// scoring row count different from its question count, has a question
    /// without exactly four choices, or does not describe every style.
    pub fn from_json(raw: &str) -> Result<Self, BankError> {
        let doc: BankDocument =
            serde_json::from_str(raw).map_err(|e| BankError::Malformed(e.to_string()))?;

        if doc.questions.is_empty() {
            return Err(BankError::Empty);
        }
        if doc.scoring.len() != doc.questions.len() {
            return Err(BankError::ScoringMismatch {
                questions: doc.questions.len(),
                rows: doc.scoring.len(),
            });
        }

        let questions = doc
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, q)| Question::new(index, q.text, q.choices))
            .collect::<Result<Vec<_>, _>>()?;
        let scoring = ScoringTable::new(doc.scoring.into_iter().map(Into::into).collect());
        let descriptions = StyleDescriptions::new(doc.styles)?;

        Ok(Self {
            questions,
            scoring,
            descriptions,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Index of the final question.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn scoring(&self) -> &ScoringTable {
        &self.scoring
    }

    #[must_use]
    pub fn descriptions(&self) -> &StyleDescriptions {
        &self.descriptions
    }

    #[must_use]
    pub fn description(&self, style: Style) -> &StyleDescription {
        self.descriptions.get(style)
    }

    #[must_use]
    pub fn style_for(&self, question: usize, choice: Choice) -> Option<Style> {
        self.scoring.style_for(question, choice)
    }

    /// An unanswered response vector sized for this bank.
    #[must_use]
    pub fn empty_responses(&self) -> ResponseVector {
        ResponseVector::new(self.len())
    }

    #[must_use]
    pub fn score(&self, responses: &ResponseVector) -> ScoreSummary {
        ScoreSummary::tally(&self.scoring, responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn styles_json() -> serde_json::Value {
        json!(Style::ALL
            .iter()
            .map(|s| json!({
                "style": s.as_str(),
                "title": format!("{s} Style"),
                "keywords": ["k"],
                "behaviors": ["b"],
                "tips": ["t"],
            }))
            .collect::<Vec<_>>())
    }

    fn question_json(text: &str) -> serde_json::Value {
        json!({ "text": text, "choices": ["one", "two", "three", "four"] })
    }

    fn row_json() -> serde_json::Value {
        json!({ "a": "Driver", "b": "Analytical", "c": "Amiable", "d": "Expressive" })
    }

    #[test]
    fn builtin_bank_loads() {
        let bank = QuestionBank::builtin().unwrap();
        assert_eq!(bank.len(), 18);
        assert_eq!(bank.scoring().len(), 18);
        assert_eq!(bank.last_index(), 17);
        assert_eq!(bank.question(0).unwrap().text(), "When talking to a customer…");
        assert_eq!(
            bank.question(1).unwrap().choice_text(Choice::B),
            "I go with my gut feelings."
        );
        assert_eq!(bank.description(Style::Driver).title, "Driver Style");
    }

    #[test]
    fn builtin_choices_are_untagged() {
        let bank = QuestionBank::builtin().unwrap();
        for question in bank.questions() {
            for choice in question.choices() {
                assert!(!choice.contains(" ("), "tag left in {choice:?}");
            }
        }
    }

    #[test]
    fn builtin_table_matches_published_key() {
        let bank = QuestionBank::builtin().unwrap();
        assert_eq!(bank.style_for(0, Choice::A), Some(Style::Driver));
        assert_eq!(bank.style_for(7, Choice::B), Some(Style::Analytical));
        assert_eq!(bank.style_for(17, Choice::D), Some(Style::Expressive));
        assert_eq!(bank.style_for(18, Choice::A), None);
    }

    #[test]
    fn small_custom_bank_loads() {
        let doc = json!({
            "questions": [question_json("First?"), question_json("Second?")],
            "scoring": [row_json(), row_json()],
            "styles": styles_json(),
        });
        let bank = QuestionBank::from_json(&doc.to_string()).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.empty_responses().len(), 2);
    }

    #[test]
    fn mismatched_scoring_rows_fail() {
        let doc = json!({
            "questions": [question_json("First?"), question_json("Second?")],
            "scoring": [row_json()],
            "styles": styles_json(),
        });
        let err = QuestionBank::from_json(&doc.to_string()).unwrap_err();
        assert_eq!(
            err,
            BankError::ScoringMismatch {
                questions: 2,
                rows: 1
            }
        );
    }

    #[test]
    fn incomplete_scoring_row_fails() {
        let doc = json!({
            "questions": [question_json("First?")],
            "scoring": [{ "a": "Driver", "b": "Analytical", "c": "Amiable" }],
            "styles": styles_json(),
        });
        let err = QuestionBank::from_json(&doc.to_string()).unwrap_err();
        assert!(matches!(err, BankError::Malformed(_)));
    }

    #[test]
    fn unknown_style_in_table_fails() {
        let doc = json!({
            "questions": [question_json("First?")],
            "scoring": [{ "a": "Driver", "b": "Analytical", "c": "Amiable", "d": "Visionary" }],
            "styles": styles_json(),
        });
        assert!(matches!(
            QuestionBank::from_json(&doc.to_string()),
            Err(BankError::Malformed(_))
        ));
    }

    #[test]
    fn empty_bank_fails() {
        let doc = json!({ "questions": [], "scoring": [], "styles": styles_json() });
        assert_eq!(
            QuestionBank::from_json(&doc.to_string()).unwrap_err(),
            BankError::Empty
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = QuestionBank::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, BankError::Read { ref path, .. } if path.contains("not/here")));
    }
}

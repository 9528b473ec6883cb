use crate::error::BankError;
use crate::model::Choice;

/// Every question offers exactly this many choices.
pub const CHOICES_PER_QUESTION: usize = 4;

/// A single forced-choice question. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    index: usize,
    text: String,
    choices: Vec<String>,
}

impl Question {
    /// Build a question, stripping style annotations from the choice texts.
    ///
    /// # Errors
    ///
    /// Returns `BankError::ChoiceCount` unless exactly four choices are given,
    /// `BankError::BlankText` / `BankError::BlankChoice` for empty strings.
    pub fn new(
        index: usize,
        text: impl Into<String>,
        choices: Vec<String>,
    ) -> Result<Self, BankError> {
        let number = index + 1;
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(BankError::BlankText { question: number });
        }
        if choices.len() != CHOICES_PER_QUESTION {
            return Err(BankError::ChoiceCount {
                question: number,
                found: choices.len(),
                expected: CHOICES_PER_QUESTION,
            });
        }

        let mut cleaned = Vec::with_capacity(CHOICES_PER_QUESTION);
        for (choice, raw) in Choice::ALL.into_iter().zip(&choices) {
            let stripped = strip_style_tag(raw);
            if stripped.is_empty() {
                return Err(BankError::BlankChoice {
                    question: number,
                    choice: choice.letter(),
                });
            }
            cleaned.push(stripped.to_string());
        }

        Ok(Self {
            index,
            text,
            choices: cleaned,
        })
    }

    /// Zero-based position in the bank.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based number shown to respondents.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn choice_text(&self, choice: Choice) -> &str {
        &self.choices[choice.index()]
    }
}

/// Drops a trailing `" (Style)"` annotation from a choice text.
///
/// Everything from the first `" ("` onward is removed.
#[must_use]
pub fn strip_style_tag(raw: &str) -> &str {
    match raw.find(" (") {
        Some(pos) => raw[..pos].trim(),
        None => raw.trim(),
    }
}

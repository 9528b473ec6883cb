use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChoiceError {
    #[error("invalid choice index: {0}")]
    InvalidIndex(usize),
    #[error("invalid choice letter: {0}")]
    InvalidLetter(char),
}

/// One of the four labeled answers to a question.
///
/// - index `0..=3` is the position in the question's choice list
/// - the lowercase letter keys the scoring table
/// - the uppercase letter is what gets exported with results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];

    /// Converts a zero-based choice position into a `Choice`.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceError::InvalidIndex` if the index is not in the range 0-3.
    pub fn from_index(index: usize) -> Result<Self, ChoiceError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ChoiceError::InvalidIndex(index))
    }

    /// Parses a choice letter, accepting either case.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceError::InvalidLetter` for anything outside `a-d`.
    pub fn from_letter(letter: char) -> Result<Self, ChoiceError> {
        match letter.to_ascii_lowercase() {
            'a' => Ok(Self::A),
            'b' => Ok(Self::B),
            'c' => Ok(Self::C),
            'd' => Ok(Self::D),
            _ => Err(ChoiceError::InvalidLetter(letter)),
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Choice::A => 0,
            Choice::B => 1,
            Choice::C => 2,
            Choice::D => 3,
        }
    }

    /// Uppercase export letter (`A`-`D`).
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Choice::A => 'A',
            Choice::B => 'B',
            Choice::C => 'C',
            Choice::D => 'D',
        }
    }
}

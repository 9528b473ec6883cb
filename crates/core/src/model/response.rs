use crate::model::Choice;

/// Which choice, if any, was selected for each question.
///
/// Slot `i` corresponds to question `i` of the bank the vector was sized for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseVector {
    slots: Vec<Option<Choice>>,
}

impl ResponseVector {
    /// An all-unanswered vector for a bank of `len` questions.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Build a vector from explicit slots.
    #[must_use]
    pub fn from_slots(slots: Vec<Option<Choice>>) -> Self {
        Self { slots }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Choice> {
        self.slots.get(index).copied().flatten()
    }

    /// Store `choice` at `index`, returning the previous answer.
    ///
    /// Out-of-range indices are ignored.
    pub fn record(&mut self, index: usize, choice: Choice) -> Option<Choice> {
        self.slots
            .get_mut(index)
            .and_then(|slot| slot.replace(choice))
    }

    /// Mark every question as unanswered.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Choice>> + '_ {
        self.slots.iter().copied()
    }

    /// Uppercase export letters, `None` where unanswered.
    #[must_use]
    pub fn letters(&self) -> Vec<Option<char>> {
        self.slots.iter().map(|slot| slot.map(Choice::letter)).collect()
    }
}

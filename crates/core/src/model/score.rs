use serde::Serialize;

use crate::model::{Choice, ResponseVector, Style};

//
// ─── SCORING TABLE ─────────────────────────────────────────────────────────────
//

/// Maps every `(question, choice)` pair to the style it scores for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringTable {
    rows: Vec<[Style; 4]>,
}

impl ScoringTable {
    /// Rows are indexed by question; columns by `Choice::index`.
    #[must_use]
    pub fn new(rows: Vec<[Style; 4]>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn style_for(&self, question: usize, choice: Choice) -> Option<Style> {
        self.rows.get(question).map(|row| row[choice.index()])
    }
}

//
// ─── SCORE SUMMARY ─────────────────────────────────────────────────────────────
//

/// Per-style answer counts. All four styles are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    counts: [u32; 4],
}

impl ScoreSummary {
    /// Count one point per answered question for the style its choice maps to.
    ///
    /// Unanswered questions contribute nothing, so partial vectors are fine.
    #[must_use]
    pub fn tally(table: &ScoringTable, responses: &ResponseVector) -> Self {
        let mut summary = Self::default();
        for (question, response) in responses.iter().enumerate() {
            let Some(choice) = response else {
                continue;
            };
            if let Some(style) = table.style_for(question, choice) {
                let slot = &mut summary.counts[style.position()];
                *slot = slot.saturating_add(1);
            }
        }
        summary
    }

    #[must_use]
    pub fn from_counts(driver: u32, analytical: u32, amiable: u32, expressive: u32) -> Self {
        Self {
            counts: [driver, analytical, amiable, expressive],
        }
    }

    #[must_use]
    pub fn count(&self, style: Style) -> u32 {
        self.counts[style.position()]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(style, count)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Style, u32)> + '_ {
        Style::ALL.into_iter().map(|style| (style, self.count(style)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionBank;

    fn bank() -> QuestionBank {
        QuestionBank::builtin().unwrap()
    }

    #[test]
    fn empty_vector_scores_zero() {
        let bank = bank();
        let summary = ScoreSummary::tally(bank.scoring(), &ResponseVector::new(bank.len()));
        assert_eq!(summary, ScoreSummary::from_counts(0, 0, 0, 0));
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.max_count(), 0);
    }

    #[test]
    fn total_matches_answered_count_for_every_prefix() {
        let bank = bank();
        for answered in 0..=bank.len() {
            let mut responses = ResponseVector::new(bank.len());
            for i in 0..answered {
                responses.record(i, Choice::ALL[i % 4]);
            }
            let summary = ScoreSummary::tally(bank.scoring(), &responses);
            assert_eq!(summary.total() as usize, answered);
        }
    }

    #[test]
    fn all_first_choices_match_table_column() {
        let bank = bank();
        let responses = ResponseVector::from_slots(vec![Some(Choice::A); bank.len()]);
        let summary = ScoreSummary::tally(bank.scoring(), &responses);

        assert_eq!(summary.count(Style::Driver), 4);
        assert_eq!(summary.count(Style::Analytical), 6);
        assert_eq!(summary.count(Style::Amiable), 5);
        assert_eq!(summary.count(Style::Expressive), 3);
        assert_eq!(summary.total(), 18);
    }

    #[test]
    fn reanswering_moves_only_that_question() {
        let bank = bank();
        let mut responses = ResponseVector::from_slots(vec![Some(Choice::A); bank.len()]);
        let before = ScoreSummary::tally(bank.scoring(), &responses);

        // Question 2: a = Analytical, b = Driver.
        responses.record(1, Choice::B);
        let after = ScoreSummary::tally(bank.scoring(), &responses);

        assert_eq!(after.count(Style::Analytical), before.count(Style::Analytical) - 1);
        assert_eq!(after.count(Style::Driver), before.count(Style::Driver) + 1);
        assert_eq!(after.count(Style::Amiable), before.count(Style::Amiable));
        assert_eq!(after.count(Style::Expressive), before.count(Style::Expressive));
    }

    #[test]
    fn tally_is_deterministic() {
        let bank = bank();
        let mut responses = ResponseVector::new(bank.len());
        responses.record(0, Choice::D);
        responses.record(7, Choice::C);
        assert_eq!(
            ScoreSummary::tally(bank.scoring(), &responses),
            ScoreSummary::tally(bank.scoring(), &responses)
        );
    }

    #[test]
    fn iter_lists_styles_in_order() {
        let summary = ScoreSummary::from_counts(1, 2, 3, 4);
        let pairs: Vec<_> = summary.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (Style::Driver, 1),
                (Style::Analytical, 2),
                (Style::Amiable, 3),
                (Style::Expressive, 4)
            ]
        );
    }
}

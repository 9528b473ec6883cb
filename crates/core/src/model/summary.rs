use serde::Serialize;

use crate::model::{ScoreSummary, Style, StyleDescription, StyleDescriptions};

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Descriptive guidance for the dominant style(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleReport {
    /// Exactly one style holds the maximum count.
    Single(StyleDescription),
    /// Several styles tie at the maximum; one description per tied style.
    Blend(Vec<StyleDescription>),
}

impl StyleReport {
    #[must_use]
    pub fn descriptions(&self) -> &[StyleDescription] {
        match self {
            StyleReport::Single(description) => std::slice::from_ref(description),
            StyleReport::Blend(descriptions) => descriptions,
        }
    }

    #[must_use]
    pub fn is_blend(&self) -> bool {
        matches!(self, StyleReport::Blend(_))
    }
}

/// One slice of the results chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub style: Style,
    pub count: u32,
    pub percent: f64,
    pub label: String,
    /// Dominant slices are drawn pulled out / emphasized.
    pub highlighted: bool,
}

//
// ─── RESULT SUMMARY ────────────────────────────────────────────────────────────
//

/// Derived view of a score: dominant styles, percentages and chart data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSummary {
    scores: ScoreSummary,
    total_questions: usize,
    dominant: Vec<Style>,
}

impl ResultSummary {
    /// Summarize `scores` for a bank of `total_questions` questions.
    ///
    /// Every style whose count equals the maximum is dominant, in declaration
    /// order. An all-zero score makes all four styles dominant.
    #[must_use]
    pub fn new(scores: ScoreSummary, total_questions: usize) -> Self {
        let max = scores.max_count();
        let dominant = scores
            .iter()
            .filter(|(_, count)| *count == max)
            .map(|(style, _)| style)
            .collect();
        Self {
            scores,
            total_questions,
            dominant,
        }
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreSummary {
        &self.scores
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    #[must_use]
    pub fn dominant_styles(&self) -> &[Style] {
        &self.dominant
    }

    #[must_use]
    pub fn is_blend(&self) -> bool {
        self.dominant.len() > 1
    }

    /// Dominant style names joined by `" & "`.
    #[must_use]
    pub fn dominant_label(&self) -> String {
        self.dominant
            .iter()
            .map(|style| style.as_str())
            .collect::<Vec<_>>()
            .join(" & ")
    }

    #[must_use]
    pub fn percentage(&self, style: Style) -> String {
        format_percentage(self.scores.count(style), self.total_questions)
    }

    /// Formatted percentage per style, in declaration order.
    #[must_use]
    pub fn percentages(&self) -> Vec<(Style, String)> {
        Style::ALL
            .into_iter()
            .map(|style| (style, self.percentage(style)))
            .collect()
    }

    #[must_use]
    pub fn report(&self, descriptions: &StyleDescriptions) -> StyleReport {
        let mut picked: Vec<_> = self
            .dominant
            .iter()
            .map(|style| descriptions.get(*style).clone())
            .collect();
        if picked.len() == 1 {
            StyleReport::Single(picked.remove(0))
        } else {
            StyleReport::Blend(picked)
        }
    }

    #[must_use]
    pub fn chart(&self) -> Vec<ChartSlice> {
        self.scores
            .iter()
            .map(|(style, count)| ChartSlice {
                style,
                count,
                percent: percent_of(count, self.total_questions),
                label: format_percentage(count, self.total_questions),
                highlighted: self.dominant.contains(&style),
            })
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent_of(count: u32, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(count) / total as f64 * 100.0
}

/// `count / total * 100` rounded half away from zero to one decimal, e.g.
/// `5 / 18` becomes `"27.8%"`.
#[must_use]
pub fn format_percentage(count: u32, total: usize) -> String {
    let rounded = (percent_of(count, total) * 10.0).round() / 10.0;
    format!("{rounded:.1}%")
}

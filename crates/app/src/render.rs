//! Plain-text screens for the terminal front end.

use services::{QuestionView, ResultsView, SessionView, WelcomeView};
use style_core::model::{ChartSlice, Choice, StyleDescription};

const BAR_WIDTH: usize = 30;

#[must_use]
pub fn render(view: &SessionView) -> String {
    match view {
        SessionView::Welcome(welcome) => render_welcome(welcome),
        SessionView::Question(question) => render_question(question),
        SessionView::Results(results) => render_results(results),
    }
}

#[must_use]
pub fn help() -> &'static str {
    "Commands: a-d or 1-4 answer, b back, n next, r restart, q quit"
}

fn render_welcome(view: &WelcomeView) -> String {
    [
        "Social Style Assessment".to_string(),
        "=======================".to_string(),
        String::new(),
        format!(
            "Answer {} questions about how you usually act at work.",
            view.total_questions
        ),
        "There are no right or wrong answers. Pick the option closest to you.".to_string(),
        String::new(),
        "Press Enter to begin.".to_string(),
    ]
    .join("\n")
}

fn render_question(view: &QuestionView) -> String {
    let mut lines = vec![
        format!(
            "Question {} of {}  {}",
            view.number,
            view.total,
            bar(view.progress.fraction(), BAR_WIDTH)
        ),
        String::new(),
        view.text.clone(),
        String::new(),
    ];
    for (choice, text) in Choice::ALL.iter().zip(&view.choices) {
        let marker = if view.selected == Some(*choice) { '*' } else { ' ' };
        lines.push(format!(
            "{marker} {}) {text}",
            choice.letter().to_ascii_lowercase()
        ));
    }

    let mut nav = Vec::new();
    if view.back_enabled {
        nav.push("b back");
    }
    if view.next_enabled {
        nav.push("n next");
    }
    nav.push("q quit");
    lines.push(String::new());
    lines.push(nav.join(" | "));
    lines.join("\n")
}

fn render_results(view: &ResultsView) -> String {
    let mut lines = vec!["Your Results".to_string(), "============".to_string(), String::new()];

    if view.report.is_blend() {
        lines.push(format!("You have a blend of styles: {}", view.dominant_label));
    } else {
        lines.push(format!("Your dominant style: {}", view.dominant_label));
    }
    lines.push(String::new());
    lines.extend(render_chart(&view.chart));

    for description in view.report.descriptions() {
        lines.push(String::new());
        lines.extend(render_description(description));
    }

    lines.push(String::new());
    lines.push("r restart | q quit".to_string());
    lines.join("\n")
}

fn render_chart(slices: &[ChartSlice]) -> Vec<String> {
    slices
        .iter()
        .map(|slice| {
            let marker = if slice.highlighted { '>' } else { ' ' };
            format!(
                "{marker} {:<10} {} {:>2}  {}",
                slice.style.as_str(),
                bar(slice.percent / 100.0, BAR_WIDTH),
                slice.count,
                slice.label
            )
        })
        .collect()
}

fn render_description(description: &StyleDescription) -> Vec<String> {
    let mut lines = vec![
        description.title.clone(),
        "-".repeat(description.title.chars().count()),
        format!("Keywords: {}", description.keywords.join(", ")),
        String::new(),
        "Typical behaviors:".to_string(),
    ];
    lines.extend(description.behaviors.iter().map(|b| format!("  - {b}")));
    lines.push(String::new());
    lines.push(format!("Working with {} people:", description.style));
    lines.extend(description.tips.iter().map(|t| format!("  - {t}")));
    lines
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

//! One line of respondent input mapped to a session event.

use style_core::model::Choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Choose(Choice),
    Back,
    Next,
    Restart,
    Help,
    Quit,
}

/// Parse a trimmed, case-insensitive line. Answers accept `a`-`d` or `1`-`4`.
pub fn parse_command(line: &str) -> Option<Command> {
    let word = line.trim().to_ascii_lowercase();
    let command = match word.as_str() {
        "" | "s" | "start" => Command::Start,
        "b" | "back" | "<" => Command::Back,
        "n" | "next" | ">" => Command::Next,
        "r" | "restart" => Command::Restart,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return parse_choice(other).map(Command::Choose),
    };
    Some(command)
}

fn parse_choice(word: &str) -> Option<Choice> {
    let mut chars = word.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match first.to_digit(10) {
        Some(digit @ 1..=4) => Choice::from_index(digit as usize - 1).ok(),
        Some(_) => None,
        None => Choice::from_letter(first).ok(),
    }
}

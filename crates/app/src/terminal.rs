//! Line-oriented driver: read a command, apply it, redraw.

use std::io;
use std::time::Duration;

use services::{AssessmentLoopService, Phase, Transition};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::input::{Command, parse_command};
use crate::render::{help, render};

/// Run one respondent through the assessment until they quit or input ends.
///
/// # Errors
///
/// Returns `io::Error` if reading input or writing a screen fails.
pub async fn run_session<R, W>(
    service: &AssessmentLoopService,
    input: R,
    output: &mut W,
    advance_delay: Duration,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut session = service.new_session();
    let mut notice: Option<String> = None;

    loop {
        let view = service.view(&mut session).await;
        let mut screen = render(&view);
        if let Some(text) = notice.take() {
            screen.push_str("\n\n");
            screen.push_str(&text);
        }
        output.write_all(screen.as_bytes()).await?;
        output.write_all(b"\n> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            debug!(session_id = %session.id(), "input closed");
            break;
        };
        let Some(command) = parse_command(&line) else {
            notice = Some(format!("Unrecognized input `{}`. {}", line.trim(), help()));
            continue;
        };

        let transition = match command {
            Command::Quit => break,
            Command::Help => {
                notice = Some(help().to_string());
                continue;
            }
            Command::Start => service.start(&mut session),
            Command::Choose(choice) => {
                let transition = service.answer(&mut session, choice).await;
                if matches!(transition, Transition::Advanced { .. }) && !advance_delay.is_zero() {
                    tokio::time::sleep(advance_delay).await;
                }
                transition
            }
            Command::Back => service.back(&mut session),
            Command::Next => service.next(&mut session),
            Command::Restart => service.reset(&mut session),
        };

        if transition.is_ignored() && session.phase() != Phase::Welcome {
            notice = Some(help().to_string());
        }
    }

    output.write_all(b"\n").await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::repository::InMemoryResultSink;
    use style_core::model::QuestionBank;
    use style_core::time::fixed_clock;

    fn service(sink: &InMemoryResultSink) -> AssessmentLoopService {
        AssessmentLoopService::new(
            fixed_clock(),
            Arc::new(QuestionBank::builtin().unwrap()),
            Some(Arc::new(sink.clone())),
        )
    }

    async fn drive(service: &AssessmentLoopService, script: &str) -> String {
        let mut output = Vec::new();
        run_session(service, script.as_bytes(), &mut output, Duration::ZERO)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn full_run_reaches_results_and_saves_once() {
        let sink = InMemoryResultSink::new();
        let service = service(&sink);
        let mut script = String::from("\n");
        script.push_str(&"a\n".repeat(18));
        script.push_str("?\nq\n");

        let output = drive(&service, &script).await;

        assert!(output.contains("Question 18 of 18"));
        assert!(output.contains("Your dominant style: Analytical"));
        assert_eq!(sink.records().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bad_input_is_reported_and_ignored() {
        let sink = InMemoryResultSink::new();
        let service = service(&sink);

        let output = drive(&service, "\nzz\nb\n").await;

        assert!(output.contains("Unrecognized input `zz`"));
        assert!(output.contains("Commands:"));
        assert!(sink.records().unwrap().is_empty());
    }

    #[tokio::test]
    async fn restart_returns_to_welcome() {
        let sink = InMemoryResultSink::new();
        let service = service(&sink);
        let mut script = String::from("\n");
        script.push_str(&"2\n".repeat(18));
        script.push_str("r\n");

        let output = drive(&service, &script).await;

        let last_screen = output.rsplit("> ").nth(1).unwrap_or_default();
        assert!(last_screen.contains("Press Enter to begin."));
        assert_eq!(sink.records().unwrap()[0].responses, vec![Some('B'); 18]);
    }
}

use std::sync::Arc;

use services::{
    AppServices, AssessmentConfig, AssessmentLoopService, Clock, Phase, SessionView, Transition,
};
use storage::repository::{InMemoryResultSink, ResultSink};
use style_core::model::{Choice, QuestionBank, Style};
use style_core::time::{fixed_clock, fixed_now};

fn loop_with_sink() -> (AssessmentLoopService, InMemoryResultSink) {
    let sink = InMemoryResultSink::new();
    let bank = Arc::new(QuestionBank::builtin().unwrap());
    let service = AssessmentLoopService::new(fixed_clock(), bank, Some(Arc::new(sink.clone())));
    (service, sink)
}

#[tokio::test]
async fn all_first_choices_produce_an_analytical_record() {
    let (service, sink) = loop_with_sink();
    let mut session = service.new_session();

    assert!(matches!(
        service.view(&mut session).await,
        SessionView::Welcome(_)
    ));
    assert_eq!(service.start(&mut session), Transition::Started);

    let mut last = Transition::Ignored;
    for _ in 0..18 {
        last = service.answer(&mut session, Choice::A).await;
    }
    assert_eq!(last, Transition::Completed);

    let SessionView::Results(results) = service.view(&mut session).await else {
        panic!("expected results");
    };
    assert_eq!(results.scores.count(Style::Driver), 4);
    assert_eq!(results.scores.count(Style::Analytical), 6);
    assert_eq!(results.scores.count(Style::Amiable), 5);
    assert_eq!(results.scores.count(Style::Expressive), 3);
    assert_eq!(results.dominant, vec![Style::Analytical]);

    let records = sink.records().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.dominant_style, "Analytical");
    assert_eq!(record.scores.driver, "22.2%");
    assert_eq!(record.scores.analytical, "33.3%");
    assert_eq!(record.scores.amiable, "27.8%");
    assert_eq!(record.scores.expressive, "16.7%");

    let row = record.to_row();
    assert_eq!(row.len(), 24);
    assert!(row[6..].iter().all(|cell| cell.as_deref() == Some("A")));
}

#[tokio::test]
async fn navigation_keeps_answers_and_rescoring_moves_one_question() {
    let (service, sink) = loop_with_sink();
    let mut session = service.new_session();
    service.start(&mut session);

    assert!(service.back(&mut session).is_ignored());
    service.answer(&mut session, Choice::B).await;
    service.answer(&mut session, Choice::C).await;
    assert_eq!(session.current_index(), 2);

    assert_eq!(
        service.back(&mut session),
        Transition::MovedBack { from: 2, to: 1 }
    );
    let SessionView::Question(question) = service.view(&mut session).await else {
        panic!("expected a question");
    };
    assert_eq!(question.selected, Some(Choice::C));
    assert!(question.next_enabled);

    assert_eq!(
        service.next(&mut session),
        Transition::Advanced { from: 1, to: 2 }
    );
    assert!(service.next(&mut session).is_ignored());

    for _ in 2..18 {
        service.answer(&mut session, Choice::D).await;
    }
    assert_eq!(session.phase(), Phase::Results);
    let before = session.scores();

    // Going back from results is not offered; a restart clears everything.
    assert!(service.back(&mut session).is_ignored());
    service.reset(&mut session);
    assert_eq!(session.phase(), Phase::Welcome);
    assert_eq!(session.responses().answered_count(), 0);
    assert_eq!(before.total(), 18);
    assert_eq!(sink.records().unwrap().len(), 1);
}

#[tokio::test]
async fn repeated_result_renders_write_one_row() {
    let (service, sink) = loop_with_sink();
    let mut session = service.new_session();
    service.start(&mut session);
    while session.phase() == Phase::Answering {
        service.answer(&mut session, Choice::B).await;
    }

    for _ in 0..5 {
        service.view(&mut session).await;
    }
    assert_eq!(sink.records().unwrap().len(), 1);
    assert_eq!(sink.records().unwrap()[0].timestamp, "2023-11-14 22:13:20");
}

#[tokio::test]
async fn app_services_wire_a_custom_sink() {
    let sink = InMemoryResultSink::new();
    let shared: Arc<dyn ResultSink> = Arc::new(sink.clone());
    let services = AppServices::with_sink(
        AssessmentConfig::default(),
        Clock::fixed(fixed_now()),
        Some(shared),
    )
    .unwrap();

    let service = services.session_loop();
    let mut session = service.new_session();
    service.start(&mut session);
    while session.phase() == Phase::Answering {
        service.answer(&mut session, Choice::D).await;
    }

    let records = sink.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].responses, vec![Some('D'); 18]);
}

use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use futures_util::stream;
use scout_engine::{
    run_turn, ApiError, ChannelEventSink, Clock, EngineCommand, EngineEvent, EngineHandle,
    EventSink, PaperRecord, ScoutClient, SummaryStream,
};

/// Scripted backend: a fixed search answer and a fixed chunk sequence.
struct FakeClient {
    papers: Result<Vec<PaperRecord>, ApiError>,
    chunks: Vec<Result<&'static str, ApiError>>,
    summarize_error: Option<ApiError>,
    panic_on_search: bool,
}

impl FakeClient {
    fn streaming(chunks: Vec<Result<&'static str, ApiError>>) -> Self {
        Self {
            papers: Ok(Vec::new()),
            chunks,
            summarize_error: None,
            panic_on_search: false,
        }
    }
}

#[async_trait::async_trait]
impl ScoutClient for FakeClient {
    async fn search(&self, _query: &str) -> Result<Vec<PaperRecord>, ApiError> {
        if self.panic_on_search {
            panic!("search exploded");
        }
        self.papers.clone()
    }

    async fn summarize(&self, _pdf_url: &str) -> Result<SummaryStream, ApiError> {
        if let Some(err) = &self.summarize_error {
            return Err(err.clone());
        }
        let chunks: Vec<Result<Bytes, ApiError>> = self
            .chunks
            .iter()
            .map(|chunk| chunk.clone().map(|text| Bytes::from_static(text.as_bytes())))
            .collect();
        Ok(SummaryStream::new(
            Some("text/plain; charset=utf-8".to_string()),
            stream::iter(chunks),
        ))
    }
}

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn fixed_clock() -> Clock {
    Arc::new(|| "2026-01-01T00:00:00+00:00".to_string())
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn summarize_emits_progress_per_chunk_then_completion() {
    let client = FakeClient::streaming(vec![Ok("Point one\n"), Ok("Point two\n")]);
    let sink = TestSink::default();

    run_turn(
        &client,
        fixed_clock().as_ref(),
        EngineCommand::Summarize {
            turn: 3,
            pdf_url: "http://x/doc.pdf".into(),
        },
        &sink,
    )
    .await;

    assert_eq!(
        sink.take(),
        vec![
            EngineEvent::SummaryProgress {
                turn: 3,
                lines: lines(&["Point one"])
            },
            EngineEvent::SummaryProgress {
                turn: 3,
                lines: lines(&["Point one", "Point two"])
            },
            EngineEvent::SummaryCompleted {
                turn: 3,
                result: Ok(())
            },
        ]
    );
}

#[tokio::test]
async fn mid_stream_failure_completes_with_error_after_partial_progress() {
    let client = FakeClient::streaming(vec![
        Ok("Partial line\n"),
        Err(ApiError::Network("connection reset".into())),
        Ok("never read\n"),
    ]);
    let sink = TestSink::default();

    run_turn(
        &client,
        fixed_clock().as_ref(),
        EngineCommand::Summarize {
            turn: 1,
            pdf_url: "http://x/doc.pdf".into(),
        },
        &sink,
    )
    .await;

    assert_eq!(
        sink.take(),
        vec![
            EngineEvent::SummaryProgress {
                turn: 1,
                lines: lines(&["Partial line"])
            },
            EngineEvent::SummaryCompleted {
                turn: 1,
                result: Err(ApiError::Network("connection reset".into()))
            },
        ]
    );
}

#[tokio::test]
async fn summarize_rejection_emits_only_completion() {
    let mut client = FakeClient::streaming(Vec::new());
    client.summarize_error = Some(ApiError::Status {
        status: 500,
        message: "Failed to download PDF".into(),
    });
    let sink = TestSink::default();

    run_turn(
        &client,
        fixed_clock().as_ref(),
        EngineCommand::Summarize {
            turn: 2,
            pdf_url: "bad".into(),
        },
        &sink,
    )
    .await;

    let events = sink.take();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_completion());
}

#[tokio::test]
async fn search_emits_single_completion() {
    let mut client = FakeClient::streaming(Vec::new());
    client.papers = Ok(vec![PaperRecord {
        title: "T".into(),
        ..PaperRecord::default()
    }]);
    let sink = TestSink::default();

    run_turn(
        &client,
        fixed_clock().as_ref(),
        EngineCommand::Search {
            turn: 5,
            query: "llm".into(),
        },
        &sink,
    )
    .await;

    let events = sink.take();
    assert_eq!(events.len(), 1);
    match &events[0] {
        EngineEvent::SearchCompleted { turn, result } => {
            assert_eq!(*turn, 5);
            assert_eq!(result.as_ref().unwrap()[0].title, "T");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn handle_runs_commands_and_reports_over_channel() {
    scout_logging::initialize_for_tests();
    let (tx, rx) = mpsc::channel();
    let client = FakeClient::streaming(vec![Ok("Hello\nWo"), Ok("rld\n")]);
    let handle = EngineHandle::with_client(
        Arc::new(client),
        fixed_clock(),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("engine");

    handle.summarize(9, "http://x/doc.pdf");

    let mut events = Vec::new();
    while let Ok(event) = rx.recv_timeout(Duration::from_secs(5)) {
        let done = event.is_completion();
        events.push(event);
        if done {
            break;
        }
    }
    assert_eq!(
        events.last(),
        Some(&EngineEvent::SummaryCompleted {
            turn: 9,
            result: Ok(())
        })
    );
    assert_eq!(
        events[events.len() - 2],
        EngineEvent::SummaryProgress {
            turn: 9,
            lines: lines(&["Hello", "World"])
        }
    );
}

#[test]
fn panicking_turn_still_reports_completion() {
    let (tx, rx) = mpsc::channel();
    let mut client = FakeClient::streaming(Vec::new());
    client.panic_on_search = true;
    let handle = EngineHandle::with_client(
        Arc::new(client),
        fixed_clock(),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("engine");

    handle.search(4, "boom");

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("completion");
    assert_eq!(
        event,
        EngineEvent::SearchCompleted {
            turn: 4,
            result: Err(ApiError::Internal("search exploded".into()))
        }
    );
}

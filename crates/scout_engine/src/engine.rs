use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use futures_util::FutureExt;
use scout_logging::{scout_debug, scout_error, scout_info};
use serde_json::json;

use crate::accumulate::SummaryAccumulator;
use crate::client::{ChunkRead, ClientSettings, Clock, ReqwestScoutClient, ScoutClient};
use crate::tool_log::{log_tool_call, log_tool_start, ToolCallRecord, SEARCH_TOOL, SUMMARIZE_TOOL};
use crate::{ApiError, EngineEvent, TurnId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Client(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Search { turn: TurnId, query: String },
    Summarize { turn: TurnId, pdf_url: String },
}

impl EngineCommand {
    fn turn(&self) -> TurnId {
        match self {
            EngineCommand::Search { turn, .. } | EngineCommand::Summarize { turn, .. } => *turn,
        }
    }

    /// Completion event reporting `error` for this command's turn.
    fn failed(&self, error: ApiError) -> EngineEvent {
        match self {
            EngineCommand::Search { turn, .. } => EngineEvent::SearchCompleted {
                turn: *turn,
                result: Err(error),
            },
            EngineCommand::Summarize { turn, .. } => EngineEvent::SummaryCompleted {
                turn: *turn,
                result: Err(error),
            },
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs backend turns on a background tokio runtime.
///
/// Every command produces exactly one completion event, even when the turn
/// panics, so the session can always return to idle.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let client = ReqwestScoutClient::new(&settings)?;
        scout_info!("Engine using backend {}", client.base_url());
        Self::with_client(Arc::new(client), settings.clock, sink)
    }

    pub fn with_client(
        client: Arc<dyn ScoutClient>,
        clock: Clock,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let clock = clock.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    let fallback = command.clone();
                    let outcome = AssertUnwindSafe(run_turn(
                        client.as_ref(),
                        clock.as_ref(),
                        command,
                        sink.as_ref(),
                    ))
                    .catch_unwind()
                    .await;
                    if let Err(panic) = outcome {
                        let reason = panic_message(panic.as_ref());
                        scout_error!("Turn {} panicked: {}", fallback.turn(), reason);
                        sink.emit(fallback.failed(ApiError::Internal(reason)));
                    }
                });
            }
            scout_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn search(&self, turn: TurnId, query: impl Into<String>) {
        self.submit(EngineCommand::Search {
            turn,
            query: query.into(),
        });
    }

    pub fn summarize(&self, turn: TurnId, pdf_url: impl Into<String>) {
        self.submit(EngineCommand::Summarize {
            turn,
            pdf_url: pdf_url.into(),
        });
    }
}

/// Executes one command and emits its events, ending with the completion.
pub async fn run_turn(
    client: &dyn ScoutClient,
    clock: &(dyn Fn() -> String + Send + Sync),
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::Search { turn, query } => {
            let arguments = json!({ "query": query });
            log_tool_start(SEARCH_TOOL, &arguments);
            let started = Instant::now();
            let result = client.search(&query).await;
            log_tool_call(&ToolCallRecord::new(
                clock(),
                SEARCH_TOOL,
                arguments,
                &result,
                started.elapsed(),
            ));
            sink.emit(EngineEvent::SearchCompleted { turn, result });
        }
        EngineCommand::Summarize { turn, pdf_url } => {
            let arguments = json!({ "pdf_url": pdf_url });
            log_tool_start(SUMMARIZE_TOOL, &arguments);
            let started = Instant::now();
            let result = stream_summary(client, turn, &pdf_url, sink).await;
            log_tool_call(&ToolCallRecord::new(
                clock(),
                SUMMARIZE_TOOL,
                arguments,
                &result,
                started.elapsed(),
            ));
            sink.emit(EngineEvent::SummaryCompleted { turn, result });
        }
    }
}

async fn stream_summary(
    client: &dyn ScoutClient,
    turn: TurnId,
    pdf_url: &str,
    sink: &dyn EventSink,
) -> Result<(), ApiError> {
    let mut stream = client.summarize(pdf_url).await?;
    let mut accumulator = SummaryAccumulator::for_content_type(stream.content_type());
    scout_debug!(
        "Turn {} streaming summary as {}",
        turn,
        accumulator.encoding_name()
    );

    loop {
        match stream.read().await? {
            ChunkRead::Data(bytes) => {
                let lines = accumulator.push(&bytes);
                sink.emit(EngineEvent::SummaryProgress { turn, lines });
            }
            ChunkRead::Done => break,
        }
    }

    scout_debug!(
        "Turn {} summary complete ({} chars)",
        turn,
        accumulator.text().len()
    );
    Ok(())
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "turn panicked".to_string()
    }
}

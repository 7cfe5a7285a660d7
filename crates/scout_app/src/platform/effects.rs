use std::sync::{mpsc, Arc};

use scout_core::{Effect, Msg, Paper};
use scout_engine::{ClientSettings, EngineError, EngineEvent, EngineHandle, EventSink, PaperRecord};
use scout_logging::{scout_info, scout_warn};

use super::app::Inbox;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, inbox: mpsc::Sender<Inbox>) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings, Arc::new(InboxSink { inbox }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Search { turn, query } => {
                    scout_info!("Search turn={} query_len={}", turn, query.len());
                    self.engine.search(turn, query);
                }
                Effect::Summarize { turn, pdf_url } => {
                    scout_info!("Summarize turn={} pdf_url={}", turn, pdf_url);
                    self.engine.summarize(turn, pdf_url);
                }
            }
        }
    }
}

/// Forwards engine events into the session loop as core messages.
struct InboxSink {
    inbox: mpsc::Sender<Inbox>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.inbox.send(Inbox::Msg(map_event(event)));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { turn, result } => Msg::SearchFinished {
            turn,
            result: result
                .map(|papers| papers.into_iter().map(map_paper).collect())
                .map_err(|err| {
                    scout_warn!("Search turn {} failed: {}", turn, err);
                    err.to_string()
                }),
        },
        EngineEvent::SummaryProgress { turn, lines } => Msg::SummaryProgress { turn, lines },
        EngineEvent::SummaryCompleted { turn, result } => Msg::SummaryFinished {
            turn,
            error: result.err().map(|err| {
                scout_warn!("Summarize turn {} failed: {}", turn, err);
                err.to_string()
            }),
        },
    }
}

fn map_paper(record: PaperRecord) -> Paper {
    Paper {
        title: record.title,
        authors: record.authors,
        summary: record.summary,
        pdf_url: record.pdf_url.filter(|url| !url.trim().is_empty()),
    }
}

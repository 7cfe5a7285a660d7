use scout_logging::{scout_debug, scout_info};

use crate::state::TurnKind;
use crate::{classify, AppState, Effect, Intent, MessageBody, Msg, Sender};

pub const INVALID_COMMAND_TEXT: &str =
    "Invalid command. Please use \"search <query>\" or \"summarize <PDF_URL>\".";
pub const NO_PAPERS_TEXT: &str = "No papers found for your query.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::InputSubmitted => submit(&mut state),
        Msg::SearchFinished { turn, result } => {
            if !state.is_active(turn, TurnKind::Search) {
                scout_debug!("Ignoring search result for inactive turn {}", turn);
                return (state, Vec::new());
            }
            let body = match result {
                Ok(papers) if papers.is_empty() => MessageBody::PlainText(NO_PAPERS_TEXT.to_string()),
                Ok(papers) => MessageBody::PaperList(papers),
                Err(message) => MessageBody::PlainText(message),
            };
            state.append(Sender::Bot, body);
            state.finish_turn();
            Vec::new()
        }
        Msg::SummaryProgress { turn, lines } => {
            if state.is_active(turn, TurnKind::Summarize) {
                state.merge_summary(lines);
            } else {
                scout_debug!("Ignoring summary progress for inactive turn {}", turn);
            }
            Vec::new()
        }
        Msg::SummaryFinished { turn, error } => {
            if !state.is_active(turn, TurnKind::Summarize) {
                scout_debug!("Ignoring summary completion for inactive turn {}", turn);
                return (state, Vec::new());
            }
            // A partial summary stays in the log as-is; the error follows it.
            if let Some(message) = error {
                state.append(Sender::Bot, MessageBody::PlainText(message));
            }
            state.finish_turn();
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if state.input().trim().is_empty() {
        return Vec::new();
    }
    if state.is_busy() {
        scout_debug!("Submission ignored while a turn is running");
        return Vec::new();
    }

    let raw = state.take_input();
    let turn = state.begin_turn();
    state.append(Sender::User, MessageBody::PlainText(raw.trim().to_string()));

    match classify(&raw) {
        Intent::Search { query } => {
            scout_info!("Turn {} search query={:?}", turn, query);
            state.track_turn(turn, TurnKind::Search);
            vec![Effect::Search { turn, query }]
        }
        Intent::Summarize { pdf_url } => {
            scout_info!("Turn {} summarize pdf_url={}", turn, pdf_url);
            state.track_turn(turn, TurnKind::Summarize);
            vec![Effect::Summarize { turn, pdf_url }]
        }
        Intent::Unrecognized => {
            state.append(
                Sender::Bot,
                MessageBody::PlainText(INVALID_COMMAND_TEXT.to_string()),
            );
            state.finish_turn();
            Vec::new()
        }
    }
}

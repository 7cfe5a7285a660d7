use crate::view_model::AppViewModel;
use crate::{ConversationLog, MessageBody, MessageId, Sender};

pub type TurnId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TurnKind {
    Search,
    Summarize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveTurn {
    id: TurnId,
    kind: TurnKind,
}

/// The whole session: conversation log, input buffer and the busy gate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    log: ConversationLog,
    input: String,
    session: SessionState,
    last_turn: TurnId,
    active: Option<ActiveTurn>,
    /// Summary message the running turn merges into; cleared when the turn ends.
    open_stream: Option<MessageId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            input: self.input.clone(),
            messages: self.log.messages().to_vec(),
            streaming: self.open_stream,
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn is_busy(&self) -> bool {
        self.session == SessionState::Busy
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn active_turn(&self) -> Option<TurnId> {
        self.active.map(|turn| turn.id)
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    pub(crate) fn begin_turn(&mut self) -> TurnId {
        self.last_turn += 1;
        self.session = SessionState::Busy;
        self.open_stream = None;
        self.active = None;
        self.mark_dirty();
        self.last_turn
    }

    pub(crate) fn track_turn(&mut self, id: TurnId, kind: TurnKind) {
        self.active = Some(ActiveTurn { id, kind });
    }

    pub(crate) fn is_active(&self, id: TurnId, kind: TurnKind) -> bool {
        self.active == Some(ActiveTurn { id, kind })
    }

    pub(crate) fn finish_turn(&mut self) {
        self.session = SessionState::Idle;
        self.active = None;
        self.open_stream = None;
        self.mark_dirty();
    }

    pub(crate) fn append(&mut self, sender: Sender, body: MessageBody) -> MessageId {
        self.mark_dirty();
        self.log.append(sender, body)
    }

    pub(crate) fn merge_summary(&mut self, lines: Vec<String>) -> MessageId {
        let id = self.log.merge_stream_update(self.open_stream, lines);
        self.open_stream = Some(id);
        self.mark_dirty();
        id
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

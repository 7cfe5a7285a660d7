use crate::{Message, MessageId, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub input: String,
    pub messages: Vec<Message>,
    /// Summary message still receiving stream updates, if any.
    pub streaming: Option<MessageId>,
}

impl AppViewModel {
    pub fn is_busy(&self) -> bool {
        self.session == SessionState::Busy
    }

    /// Whether `id` may still change in a later view.
    pub fn is_streaming(&self, id: MessageId) -> bool {
        self.streaming == Some(id)
    }
}

use crate::{Message, MessageBody, MessageId, Sender};

/// Append-only, ordered conversation history.
///
/// Only the last message may ever change, and only through
/// [`ConversationLog::merge_stream_update`] while it is the open summary of
/// the running turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, sender: Sender, body: MessageBody) -> MessageId {
        let id = MessageId(self.messages.len());
        self.messages.push(Message { id, sender, body });
        id
    }

    /// Replaces the payload of the open summary message, or appends a new Bot
    /// summary when `open` does not name the last message. Returns the id the
    /// caller should keep as its open handle.
    pub fn merge_stream_update(&mut self, open: Option<MessageId>, lines: Vec<String>) -> MessageId {
        if let (Some(open), Some(last)) = (open, self.messages.last_mut()) {
            if last.id == open {
                if let MessageBody::SummaryLines(current) = &mut last.body {
                    *current = lines;
                    return open;
                }
            }
        }
        self.append(Sender::Bot, MessageBody::SummaryLines(lines))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Position of a message in the conversation log. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paper {
    pub title: String,
    pub authors: String,
    pub summary: String,
    pub pdf_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    PlainText(String),
    PaperList(Vec<Paper>),
    /// Display lines of a streamed summary; replaced wholesale while streaming.
    SummaryLines(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    PlainText,
    PaperList,
    SummaryLines,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub body: MessageBody,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self.body {
            MessageBody::PlainText(_) => MessageKind::PlainText,
            MessageBody::PaperList(_) => MessageKind::PaperList,
            MessageBody::SummaryLines(_) => MessageKind::SummaryLines,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::PlainText(text) => Some(text),
            _ => None,
        }
    }
}

//! Scout core: pure session state machine and view-model helpers.
mod command;
mod conversation;
mod effect;
mod message;
mod msg;
mod state;
mod update;
mod view_model;

pub use command::{classify, Intent};
pub use conversation::ConversationLog;
pub use effect::Effect;
pub use message::{Message, MessageBody, MessageId, MessageKind, Paper, Sender};
pub use msg::Msg;
pub use state::{AppState, SessionState, TurnId};
pub use update::{update, INVALID_COMMAND_TEXT, NO_PAPERS_TEXT};
pub use view_model::AppViewModel;

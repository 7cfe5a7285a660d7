use crate::{Paper, TurnId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input line.
    InputChanged(String),
    /// User submitted the current input line.
    InputSubmitted,
    /// Engine finished a search turn. The error is already user-facing text.
    SearchFinished {
        turn: TurnId,
        result: Result<Vec<Paper>, String>,
    },
    /// Engine decoded another chunk of a summary; `lines` is the full current line set.
    SummaryProgress { turn: TurnId, lines: Vec<String> },
    /// Engine drained (or failed) a summary stream.
    SummaryFinished { turn: TurnId, error: Option<String> },
}

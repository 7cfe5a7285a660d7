use crate::TurnId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Search { turn: TurnId, query: String },
    Summarize { turn: TurnId, pdf_url: String },
}

impl Effect {
    pub fn turn(&self) -> TurnId {
        match self {
            Effect::Search { turn, .. } | Effect::Summarize { turn, .. } => *turn,
        }
    }
}

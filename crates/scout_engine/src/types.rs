use serde::{Deserialize, Deserializer};

pub type TurnId = u64;

/// One search hit as the backend serialises it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PaperRecord {
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    /// The backend sends either a preformatted string or a list of names.
    #[serde(default, deserialize_with = "authors_string_or_list")]
    pub authors: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub summary: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Authors {
    Joined(String),
    List(Vec<String>),
}

fn authors_string_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Authors>::deserialize(deserializer)? {
        Some(Authors::Joined(authors)) => authors,
        Some(Authors::List(names)) => names.join(", "),
        None => String::new(),
    })
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Failure of one backend call. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Backend answered with a non-success status.
    #[error("Error: {message}")]
    Status { status: u16, message: String },
    /// The request could not be completed at all, or the stream broke off.
    #[error(
        "Failed to connect to the backend. Please ensure the backend server is running. Error: {0}"
    )]
    Network(String),
    /// A success response whose body is not what the endpoint promises.
    #[error("Error: Could not decode JSON response from backend: {0}")]
    Decode(String),
    #[error("invalid backend url {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    /// The turn runner itself failed (client construction, panic).
    #[error("Error: unexpected failure: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SearchCompleted {
        turn: TurnId,
        result: Result<Vec<PaperRecord>, ApiError>,
    },
    /// Full current line set after another decoded chunk.
    SummaryProgress { turn: TurnId, lines: Vec<String> },
    SummaryCompleted {
        turn: TurnId,
        result: Result<(), ApiError>,
    },
}

impl EngineEvent {
    pub fn turn(&self) -> TurnId {
        match self {
            EngineEvent::SearchCompleted { turn, .. }
            | EngineEvent::SummaryProgress { turn, .. }
            | EngineEvent::SummaryCompleted { turn, .. } => *turn,
        }
    }

    pub fn is_completion(&self) -> bool {
        !matches!(self, EngineEvent::SummaryProgress { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_authors_accept_list_or_string() {
        let listed: PaperRecord =
            serde_json::from_str(r#"{"title":"T","authors":["Ada","Alan"],"summary":"S"}"#)
                .unwrap();
        assert_eq!(listed.authors, "Ada, Alan");
        assert_eq!(listed.pdf_url, None);

        let joined: PaperRecord = serde_json::from_str(
            r#"{"title":"T","authors":"Ada and Alan","summary":"S","pdf_url":"http://x/p.pdf"}"#,
        )
        .unwrap();
        assert_eq!(joined.authors, "Ada and Alan");
        assert_eq!(joined.pdf_url.as_deref(), Some("http://x/p.pdf"));
    }

    #[test]
    fn missing_and_null_fields_default_to_empty() {
        let paper: PaperRecord =
            serde_json::from_str(r#"{"title":null,"authors":null,"pdf_url":null}"#).unwrap();
        assert_eq!(paper, PaperRecord::default());
    }

    #[test]
    fn network_error_hints_backend_is_down() {
        let text = ApiError::Network("connection refused".into()).to_string();
        assert!(text.starts_with("Failed to connect to the backend."));
        assert!(text.ends_with("Error: connection refused"));
    }
}

const SEARCH_PREFIX: &str = "search ";
const SUMMARIZE_PREFIX: &str = "summarize ";

/// Classified meaning of one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Search { query: String },
    Summarize { pdf_url: String },
    Unrecognized,
}

/// Classifies raw input by its verb. The verb must open the line; only its
/// case is ignored. The remainder is trimmed but otherwise passed through
/// unvalidated, so an empty query is still a search.
pub fn classify(raw: &str) -> Intent {
    if let Some(rest) = strip_verb(raw, SEARCH_PREFIX) {
        return Intent::Search {
            query: rest.trim().to_string(),
        };
    }
    if let Some(rest) = strip_verb(raw, SUMMARIZE_PREFIX) {
        return Intent::Summarize {
            pdf_url: rest.trim().to_string(),
        };
    }
    Intent::Unrecognized
}

fn strip_verb<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        input.get(prefix.len()..)
    } else {
        None
    }
}

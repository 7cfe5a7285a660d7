use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use scout_logging::{scout_debug, scout_info, scout_warn};

use crate::ApiError;

pub const SEARCH_TOOL: &str = "search_papers_api";
pub const SUMMARIZE_TOOL: &str = "summarize_pdf_api";

/// One backend call, as written to the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCallRecord {
    pub timestamp: String,
    pub tool_name: &'static str,
    pub arguments: Value,
    pub outcome: String,
    pub latency: String,
}

impl ToolCallRecord {
    pub fn new<T>(
        timestamp: String,
        tool_name: &'static str,
        arguments: Value,
        result: &Result<T, ApiError>,
        elapsed: Duration,
    ) -> Self {
        let outcome = match result {
            Ok(_) => "success".to_string(),
            Err(err) => format!("error: {err}"),
        };
        Self {
            timestamp,
            tool_name,
            arguments,
            outcome,
            latency: format!("{:.2}s", elapsed.as_secs_f64()),
        }
    }
}

pub fn log_tool_start(tool_name: &str, arguments: &Value) {
    scout_debug!("Tool Call: {}({})", tool_name, arguments);
}

pub fn log_tool_call(record: &ToolCallRecord) {
    match serde_json::to_string(record) {
        Ok(json) => scout_info!("[tool] {}", json),
        Err(err) => scout_warn!("Could not serialise tool call {}: {}", record.tool_name, err),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn record_formats_outcome_and_latency() {
        let ok: Result<(), ApiError> = Ok(());
        let record = ToolCallRecord::new(
            "2026-01-01T00:00:00Z".into(),
            SEARCH_TOOL,
            json!({ "query": "llm" }),
            &ok,
            Duration::from_millis(1234),
        );
        assert_eq!(record.outcome, "success");
        assert_eq!(record.latency, "1.23s");

        let failed: Result<(), ApiError> = Err(ApiError::Status {
            status: 500,
            message: "boom".into(),
        });
        let record = ToolCallRecord::new(
            "t".into(),
            SUMMARIZE_TOOL,
            json!({ "pdf_url": "x" }),
            &failed,
            Duration::ZERO,
        );
        assert_eq!(record.outcome, "error: Error: boom");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "timestamp": "t",
                "tool_name": "summarize_pdf_api",
                "arguments": { "pdf_url": "x" },
                "outcome": "error: Error: boom",
                "latency": "0.00s"
            })
        );
    }
}

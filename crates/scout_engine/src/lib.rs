//! Scout engine: backend transport, summary stream decoding and turn execution.
mod accumulate;
mod client;
mod engine;
mod tool_log;
mod types;

pub use accumulate::{display_lines, SummaryAccumulator};
pub use client::{
    parse_base_url, ChunkRead, ClientSettings, Clock, ReqwestScoutClient, ScoutClient,
    SummaryStream, DEFAULT_BASE_URL,
};
pub use engine::{run_turn, ChannelEventSink, EngineCommand, EngineError, EngineHandle, EventSink};
pub use tool_log::{ToolCallRecord, SEARCH_TOOL, SUMMARIZE_TOOL};
pub use types::{ApiError, EngineEvent, PaperRecord, TurnId};

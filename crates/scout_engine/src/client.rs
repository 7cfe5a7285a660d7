use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::stream::{BoxStream, Stream};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ApiError, PaperRecord};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const SEARCH_FALLBACK: &str = "Unknown error during search.";
const SUMMARIZE_FALLBACK: &str = "Failed to summarize PDF.";

/// Produces timestamps for the tool-call log.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request limit, stream included. `None` waits forever.
    pub request_timeout: Option<Duration>,
    pub clock: Clock,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            clock: Arc::new(|| chrono::Utc::now().to_rfc3339()),
        }
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

/// Result of one read from a summary stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkRead {
    Data(Bytes),
    Done,
}

/// Live body of a successful `/summarize` response.
pub struct SummaryStream {
    content_type: Option<String>,
    chunks: BoxStream<'static, Result<Bytes, ApiError>>,
}

impl SummaryStream {
    pub fn new<S>(content_type: Option<String>, chunks: S) -> Self
    where
        S: Stream<Item = Result<Bytes, ApiError>> + Send + 'static,
    {
        Self {
            content_type,
            chunks: chunks.boxed(),
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Next chunk, or `Done` once the body is exhausted.
    pub async fn read(&mut self) -> Result<ChunkRead, ApiError> {
        match self.chunks.next().await {
            Some(Ok(bytes)) => Ok(ChunkRead::Data(bytes)),
            Some(Err(err)) => Err(err),
            None => Ok(ChunkRead::Done),
        }
    }
}

impl fmt::Debug for SummaryStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryStream")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// The two backend operations. Each is attempted exactly once.
#[async_trait::async_trait]
pub trait ScoutClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<PaperRecord>, ApiError>;

    async fn summarize(&self, pdf_url: &str) -> Result<SummaryStream, ApiError>;
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    pdf_url: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestScoutClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestScoutClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&settings.base_url)?;
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: err.to_string(),
            })
    }

    async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(path)?;
        let payload = serde_json::to_vec(body).map_err(|err| ApiError::Internal(err.to_string()))?;
        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl ScoutClient for ReqwestScoutClient {
    async fn search(&self, query: &str) -> Result<Vec<PaperRecord>, ApiError> {
        let response = self.post_json("search", &SearchRequest { query }).await?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            // The search endpoint reports failures as `{"error": "..."}`.
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| SEARCH_FALLBACK.to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn summarize(&self, pdf_url: &str) -> Result<SummaryStream, ApiError> {
        let response = self
            .post_json("summarize", &SummarizeRequest { pdf_url })
            .await?;
        let status = response.status();

        if !status.is_success() {
            // The summarize endpoint reports failures as plain text, never JSON.
            let text = response.text().await.map_err(map_reqwest_error)?;
            let message = if text.is_empty() {
                SUMMARIZE_FALLBACK.to_string()
            } else {
                text
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_reqwest_error));
        Ok(SummaryStream::new(content_type, chunks))
    }
}

/// Accepts a base with or without a trailing slash; the endpoints are joined below it.
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|err| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        message: err.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            message: "expected an http or https url".to_string(),
        });
    }
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Network(format!("request timed out: {err}"));
    }
    ApiError::Network(err.to_string())
}
